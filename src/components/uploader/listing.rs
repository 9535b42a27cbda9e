//! Directory listing component.
//!
//! File rows open directories on click and show details for files; app rows
//! always open the details modal.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{AppContext, Selection};
use crate::components::icons as ic;
use crate::models::{AppEntry, DirectoryPath, FileEntry, Listing};
use crate::utils::format::format_optional_size;

stylance::import_crate_style!(css, "src/components/uploader/listing.module.css");

#[component]
pub fn DirectoryListing() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::list role="grid" aria-label="Directory listing">
            {move || match ctx.explorer.listing.get() {
                None => view! { <p class=css::empty>"Loading…"</p> }.into_any(),
                Some(listing) if listing.is_empty() => {
                    view! { <p class=css::empty>"This folder is empty"</p> }.into_any()
                }
                Some(Listing::Files(files)) => files
                    .into_iter()
                    .map(|entry| view! { <FileRow entry=entry /> })
                    .collect_view()
                    .into_any(),
                Some(Listing::Apps(apps)) => apps
                    .into_iter()
                    .map(|entry| view! { <AppRow entry=entry /> })
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}

#[component]
fn FileRow(entry: FileEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_dir = entry.is_dir();
    let icon = if is_dir { ic::FOLDER } else { ic::FILE };
    let size = if is_dir {
        String::new()
    } else {
        format_optional_size(entry.size)
    };
    let name = entry.name.clone();
    let download_path = entry.file_path().to_string();

    let handle_click = move |_: leptos::ev::MouseEvent| {
        if entry.is_dir() {
            ctx.open(DirectoryPath::from(entry.path.as_str()));
        } else {
            ctx.explorer.select(Selection::File(entry.clone()));
        }
    };

    let handle_download = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        ctx.download(&download_path);
    };

    view! {
        <div class=css::row role="row" tabindex="0" on:click=handle_click>
            <span class=css::icon aria-hidden="true"><Icon icon=icon /></span>
            <span class=if is_dir { format!("{} {}", css::name, css::nameDir) } else { css::name.to_string() }>
                {name}
            </span>
            <span class=css::size>{size}</span>
            <span class=css::actions>
                {if is_dir {
                    view! {
                        <span class=css::chevron aria-hidden="true">
                            <Icon icon=ic::CHEVRON_RIGHT />
                        </span>
                    }
                    .into_any()
                } else {
                    view! {
                        <button class=css::action on:click=handle_download aria-label="Download">
                            <Icon icon=ic::DOWNLOAD />
                        </button>
                    }
                    .into_any()
                }}
            </span>
        </div>
    }
}

#[component]
fn AppRow(entry: AppEntry) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let name = entry.name.clone();
    let details = format!("{} · {}", entry.version, entry.bundle_id);
    let logo = entry.logo.clone();
    let size = format_optional_size(entry.size);

    let handle_click =
        move |_: leptos::ev::MouseEvent| ctx.explorer.select(Selection::App(entry.clone()));

    view! {
        <div class=css::row role="row" tabindex="0" on:click=handle_click>
            <span class=css::icon aria-hidden="true">
                {if logo.is_empty() {
                    view! { <Icon icon=ic::APP /> }.into_any()
                } else {
                    view! { <img class=css::logo src=logo alt="" /> }.into_any()
                }}
            </span>
            <span class=css::nameWrapper>
                <span class=css::name>{name}</span>
                <span class=css::meta>{details}</span>
            </span>
            <span class=css::size>{size}</span>
            <span class=css::actions>
                <span class=css::chevron aria-hidden="true">
                    <Icon icon=ic::CHEVRON_RIGHT />
                </span>
            </span>
        </div>
    }
}
