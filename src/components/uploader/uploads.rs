//! Upload rows: destination, progress bar and a cancel button.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::{UploadEntry, UploadId};

stylance::import_crate_style!(css, "src/components/uploader/uploads.module.css");

#[component]
pub fn Uploads() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::uploads>
            <For
                each=move || ctx.explorer.uploads.get()
                key=|entry| entry.id
                children=move |entry| view! { <UploadRow entry=entry /> }
            />
        </div>
    }
}

#[component]
fn UploadRow(entry: UploadEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let id: UploadId = entry.id;
    // Rows are keyed by id, so progress is read back from the signal.
    let progress = Signal::derive(move || {
        ctx.explorer.uploads.with(|uploads| {
            uploads
                .iter()
                .find(|upload| upload.id == id)
                .map(|upload| upload.progress)
                .unwrap_or(0)
        })
    });

    view! {
        <div class=css::row>
            <div class=css::info>
                <span class=css::label>{entry.label}</span>
                <span class=css::percent>{move || format!("{}%", progress.get())}</span>
            </div>
            <div class=css::bar>
                <div
                    class=css::fill
                    role="progressbar"
                    aria-valuemin="0"
                    aria-valuemax="100"
                    aria-valuenow=move || progress.get().to_string()
                    style:width=move || format!("{}%", progress.get())
                ></div>
            </div>
            <button class=css::cancel on:click=move |_| ctx.cancel_upload(id) aria-label="Cancel upload">
                <Icon icon=ic::CLOSE />
            </button>
        </div>
    }
}
