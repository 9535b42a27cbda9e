//! Toolbar component.
//!
//! Style toggle on the left; upload picker, reload and the uploading
//! indicator on the right.

use leptos::html;
use leptos::prelude::*;
use leptos_icons::Icon;
use web_sys::HtmlInputElement;

use super::uploader::picked_files;
use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::ViewStyle;

stylance::import_crate_style!(css, "src/components/uploader/toolbar.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let input_ref = NodeRef::<html::Input>::new();
    let can_upload = Signal::derive(move || ctx.explorer.style.get().allows_upload());

    let open_picker = move |_: leptos::ev::MouseEvent| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let handle_files = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        ctx.upload(picked_files(input.files()));
        // Allow picking the same file again.
        input.set_value("");
    };

    view! {
        <div class=css::toolbar>
            <div class=css::group role="group" aria-label="Listing style">
                <StyleButton style=ViewStyle::FileList icon=ic::LIST label="Files" />
                <StyleButton style=ViewStyle::AppList icon=ic::GRID label="Apps" />
            </div>

            <div class=css::group>
                <Show when=move || ctx.explorer.uploading.get()>
                    <span class=css::uploading>"Uploading…"</span>
                </Show>

                <Show when=move || can_upload.get()>
                    <button class=css::button on:click=open_picker>
                        <Icon icon=ic::UPLOAD />
                        <span>"Upload Files"</span>
                    </button>
                </Show>
                <input
                    node_ref=input_ref
                    class=css::fileInput
                    type="file"
                    multiple=true
                    on:change=handle_files
                />

                <button class=css::button on:click=move |_| ctx.refresh() aria-label="Reload">
                    <Icon icon=ic::RELOAD />
                    <span>"Refresh"</span>
                </button>
            </div>
        </div>
    }
}

/// One half of the style toggle.
#[component]
fn StyleButton(style: ViewStyle, icon: icondata::Icon, label: &'static str) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let is_active = Signal::derive(move || ctx.explorer.style.get() == style);

    view! {
        <button
            class=move || {
                if is_active.get() {
                    format!("{} {}", css::button, css::active)
                } else {
                    css::button.to_string()
                }
            }
            aria-pressed=move || is_active.get().to_string()
            on:click=move |_| ctx.set_style(style)
        >
            <Icon icon=icon />
            <span>{label}</span>
        </button>
    }
}
