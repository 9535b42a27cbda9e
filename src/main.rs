use leptos::prelude::*;
use wasm_bindgen::JsCast;
use webuploader::app::App;
use webuploader::config::MOUNT_ELEMENT_ID;

fn main() {
    console_error_panic_hook::set_once();

    // Server pages without the mount point get the widget on <body>.
    match document().get_element_by_id(MOUNT_ELEMENT_ID) {
        Some(root) => mount_to(root.unchecked_into::<web_sys::HtmlElement>(), App).forget(),
        None => mount_to_body(App),
    }
}
