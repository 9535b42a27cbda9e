//! Main widget component.
//!
//! Stacks alerts, toolbar, path bar, upload rows and the listing. The whole
//! widget is a drop zone for uploads while the file list is shown.

use leptos::prelude::*;

use super::{Alerts, DetailsModal, DirectoryListing, PathBar, Toolbar, Uploads};
use crate::app::AppContext;
use crate::config::APP_NAME;
use crate::utils::PickedFile;

stylance::import_crate_style!(css, "src/components/uploader/uploader.module.css");

/// Wrap every file of a browser `FileList`.
pub(super) fn picked_files(list: Option<web_sys::FileList>) -> Vec<PickedFile> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|index| list.get(index))
        .map(PickedFile::new)
        .collect()
}

/// File-manager widget.
#[component]
pub fn Uploader() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (dragging, set_dragging) = signal(false);
    let accepts_drop = Signal::derive(move || ctx.explorer.style.get().allows_upload());

    let handle_dragover = move |ev: leptos::ev::DragEvent| {
        if accepts_drop.get_untracked() {
            ev.prevent_default();
            set_dragging.set(true);
        }
    };

    let handle_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_dragging.set(false);
        let files = ev.data_transfer().and_then(|transfer| transfer.files());
        ctx.upload(picked_files(files));
    };

    view! {
        <div
            class=move || {
                if dragging.get() {
                    format!("{} {}", css::uploader, css::dragging)
                } else {
                    css::uploader.to_string()
                }
            }
            on:dragover=handle_dragover
            on:dragleave=move |_| set_dragging.set(false)
            on:drop=handle_drop
        >
            <header class=css::header>
                <h1 class=css::title>{APP_NAME}</h1>
                <Show when=move || accepts_drop.get()>
                    <p class=css::tip>"Drag & drop files on this window or use the \"Upload Files\" button"</p>
                </Show>
            </header>

            <Alerts />
            <Toolbar />
            <PathBar />
            <Uploads />
            <DirectoryListing />
            <DetailsModal />
        </div>
    }
}
