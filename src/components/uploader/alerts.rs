//! Alert list fed by controller notifications, newest on top.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::{Alert, AppContext};
use crate::components::icons as ic;
use crate::models::AlertLevel;

stylance::import_crate_style!(css, "src/components/uploader/alerts.module.css");

#[component]
pub fn Alerts() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::alerts role="status" aria-live="polite">
            <For
                each=move || ctx.explorer.alerts.get()
                key=|alert| alert.id
                children=move |alert| view! { <AlertItem alert=alert /> }
            />
        </div>
    }
}

#[component]
fn AlertItem(alert: Alert) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let Alert { id, notification } = alert;
    let level_class = match notification.level {
        AlertLevel::Danger => css::danger,
    };

    view! {
        <div class=format!("{} {}", css::alert, level_class)>
            <button
                class=css::dismiss
                on:click=move |_| ctx.explorer.dismiss_alert(id)
                aria-label="Dismiss"
            >
                <Icon icon=ic::CLOSE />
            </button>
            <strong>{notification.title}</strong>
            {notification.description}
        </div>
    }
}
