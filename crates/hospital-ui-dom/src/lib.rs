//! Browser entry point for the hospital page behaviors.

use std::rc::Rc;

use hospital_ui::{initialize_page, InitReport, PageConfig};
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub mod console_log;
pub mod dom_page;

pub use dom_page::{DomNode, DomPage};

/// Install every page behavior once the document is parsed.
///
/// Scripts loaded in `<head>` run before the body exists, so setup waits
/// for `DOMContentLoaded` in that case.
pub fn start() {
    console_log::init(LevelFilter::Info);

    let Some(page) = DomPage::new() else {
        log::error!("No window or document, page behaviors not installed");
        return;
    };
    if page.document().ready_state() != "loading" {
        setup(page);
        return;
    }

    let document = page.document().clone();
    let mut pending = Some(page);
    let on_ready = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(page) = pending.take() {
            setup(page);
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(error) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        log::error!("Failed to wait for DOMContentLoaded: {error:?}");
    }
    on_ready.forget();
}

/// Read the page configuration and install the behaviors on `page`.
pub fn setup(page: DomPage) -> InitReport {
    let page = Rc::new(page);
    let config = PageConfig::from_page(&*page);
    log::set_max_level(config.log_level);
    initialize_page(&page, &config)
}
