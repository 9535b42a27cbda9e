//! Details modal for the selected file or app.
//!
//! Offers a download, and an install when the entry is an app bundle.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, Selection};
use crate::components::icons as ic;
use crate::models::{AppEntry, FileEntry, InstallRequest};
use crate::utils::format::format_optional_size;

stylance::import_crate_style!(css, "src/components/uploader/modal.module.css");

#[component]
pub fn DetailsModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let close = move |_: leptos::ev::MouseEvent| ctx.explorer.clear_selection();

    view! {
        <Show when=move || ctx.explorer.selection.with(Option::is_some)>
            <div class=css::backdrop on:click=close>
                <div
                    class=css::dialog
                    role="dialog"
                    aria-modal="true"
                    on:click=|ev: leptos::ev::MouseEvent| ev.stop_propagation()
                >
                    <button class=css::close on:click=close aria-label="Close">
                        <Icon icon=ic::CLOSE />
                    </button>
                    {move || match ctx.explorer.selection.get() {
                        Some(Selection::File(entry)) => view! { <FileDetails entry=entry /> }.into_any(),
                        Some(Selection::App(entry)) => view! { <AppDetails entry=entry /> }.into_any(),
                        None => ().into_any(),
                    }}
                </div>
            </div>
        </Show>
    }
}

#[component]
fn FileDetails(entry: FileEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let path = entry.file_path().to_string();
    let name = path.trim_start_matches('/').to_string();
    let size = format_optional_size(entry.size);
    let download_path = path.clone();

    view! {
        <h2 class=css::title>{name}</h2>
        <p class=css::subtitle>{size}</p>
        <div class=css::buttons>
            {entry.is_ipa.then(|| {
                let path = path.clone();
                view! {
                    <button
                        class=css::button
                        on:click=move |_| ctx.install(InstallRequest { path: path.clone(), bundle_id: None })
                    >
                        <Icon icon=ic::INSTALL />
                        <span>"Install"</span>
                    </button>
                }
            })}
            <button class=format!("{} {}", css::button, css::primary) on:click=move |_| ctx.download(&download_path)>
                <Icon icon=ic::DOWNLOAD />
                <span>"Download"</span>
            </button>
        </div>
    }
}

#[component]
fn AppDetails(entry: AppEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let install_request = InstallRequest {
        path: entry.path.clone(),
        bundle_id: Some(entry.bundle_id.clone()).filter(|id| !id.is_empty()),
    };
    let download_path = entry.path.clone();
    let rows = [
        ("Version", entry.version),
        ("Bundle ID", entry.bundle_id),
        ("Certificate", entry.cert),
        ("Date", entry.time),
        ("Size", format_optional_size(entry.size)),
        ("File", entry.path),
    ];

    view! {
        <div class=css::appHeader>
            {(!entry.logo.is_empty()).then(|| view! { <img class=css::logo src=entry.logo.clone() alt="" /> })}
            <h2 class=css::title>{entry.name}</h2>
        </div>
        <dl class=css::details>
            {rows
                .into_iter()
                .map(|(term, value)| view! {
                    <dt>{term}</dt>
                    <dd>{value}</dd>
                })
                .collect_view()}
        </dl>
        <div class=css::buttons>
            <button class=css::button on:click=move |_| ctx.install(install_request.clone())>
                <Icon icon=ic::INSTALL />
                <span>"Install"</span>
            </button>
            <button class=format!("{} {}", css::button, css::primary) on:click=move |_| ctx.download(&download_path)>
                <Icon icon=ic::DOWNLOAD />
                <span>"Download"</span>
            </button>
        </div>
    }
}
