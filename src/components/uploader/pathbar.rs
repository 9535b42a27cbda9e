//! Path bar component.
//!
//! Renders the breadcrumbs of the displayed directory. Every crumb but the
//! last is clickable and reloads that directory.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Breadcrumb;

stylance::import_crate_style!(css, "src/components/uploader/pathbar.module.css");

#[component]
pub fn PathBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <nav class=css::pathbar aria-label="Path">
            {move || {
                ctx.explorer
                    .breadcrumbs
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, crumb)| {
                        let icon = if idx == 0 { ic::HOME } else { ic::FOLDER };
                        view! {
                            <>
                                {(idx > 0).then(|| view! {
                                    <span class=css::separator>
                                        <Icon icon=ic::CHEVRON_RIGHT />
                                    </span>
                                })}
                                <Segment crumb=crumb icon=icon />
                            </>
                        }
                    })
                    .collect_view()
            }}
        </nav>
    }
}

#[component]
fn Segment(crumb: Breadcrumb, icon: icondata::Icon) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let Breadcrumb { label, target } = crumb;
    match target {
        Some(target) => {
            let open = move |_: leptos::ev::MouseEvent| ctx.open(target.clone());
            view! {
                <button class=css::segment on:click=open>
                    <span class=css::icon><Icon icon=icon /></span>
                    <span class=css::label>{label}</span>
                </button>
            }
            .into_any()
        }
        None => view! {
            <button class=format!("{} {}", css::segment, css::segmentCurrent) disabled=true>
                <span class=css::icon><Icon icon=icon /></span>
                <span class=css::label>{label}</span>
            </button>
        }
        .into_any(),
    }
}
