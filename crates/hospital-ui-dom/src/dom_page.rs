//! `web-sys` implementation of the page boundary.

use futures::future::{FutureExt, LocalBoxFuture};
use hospital_ui::page::Handler;
use hospital_ui::{EventKind, FetchError, Page, PageEvent, PageNode, SelectOption};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement,
    HtmlTextAreaElement, NodeList, Window,
};

/// The browser window and its document.
#[derive(Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    /// `None` outside a browsing context (e.g. in a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Page for DomPage {
    type Node = DomNode;

    fn element_by_id(&self, id: &str) -> Option<DomNode> {
        self.document.get_element_by_id(id).map(DomNode)
    }

    fn elements_by_class(&self, class: &str) -> Vec<DomNode> {
        match self.document.query_selector_all(&format!(".{class}")) {
            Ok(list) => elements(&list),
            Err(error) => {
                log::error!("Invalid class selector `{class}`: {}", js_error_message(&error));
                Vec::new()
            }
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or_else(|error| {
            log::warn!("Confirm prompt failed, treating as declined: {}", js_error_message(&error));
            false
        })
    }

    fn fetch_json(&self, url: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        let window = self.window.clone();
        let url = url.to_string();
        async move { fetch_json(&window, &url).await }.boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        zoon::Task::start(task);
    }
}

async fn fetch_json(window: &Window, url: &str) -> Result<Value, FetchError> {
    let transport = |error: JsValue| FetchError::Transport {
        url: url.to_string(),
        reason: js_error_message(&error),
    };
    let invalid_json = |reason: String| FetchError::InvalidJson {
        url: url.to_string(),
        reason,
    };

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(transport)?;
    let response: web_sys::Response = response.dyn_into().map_err(transport)?;
    if !response.ok() {
        // The body is still used when it parses, only the status is noted.
        log::debug!("GET {url} answered {}", response.status());
    }
    let json = response
        .json()
        .map_err(|error| invalid_json(js_error_message(&error)))?;
    let body = JsFuture::from(json)
        .await
        .map_err(|error| invalid_json(js_error_message(&error)))?;
    serde_wasm_bindgen::from_value(body).map_err(|error| invalid_json(error.to_string()))
}

fn js_error_message(error: &JsValue) -> String {
    if let Some(message) = error.as_string() {
        return message;
    }
    if let Some(error) = error.dyn_ref::<js_sys::Error>() {
        return error.message().into();
    }
    format!("{error:?}")
}

fn elements(list: &NodeList) -> Vec<DomNode> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(DomNode)
        .collect()
}

struct DomEvent(web_sys::Event);

impl PageEvent for DomEvent {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}

/// One DOM element.
#[derive(Clone, Debug, PartialEq)]
pub struct DomNode(pub Element);

impl PageNode for DomNode {
    fn find_by_id(&self, id: &str) -> Option<Self> {
        self.0
            .query_selector(&format!("#{id}"))
            .ok()
            .flatten()
            .map(DomNode)
    }

    fn body_rows(&self) -> Vec<Self> {
        match self.0.query_selector_all("tbody tr") {
            Ok(list) => elements(&list),
            Err(error) => {
                log::error!("Failed to query table rows: {}", js_error_message(&error));
                Vec::new()
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn is_select(&self) -> bool {
        self.0.dyn_ref::<HtmlSelectElement>().is_some()
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else if let Some(text_area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            text_area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, value: &str) {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(text_area) = self.0.dyn_ref::<HtmlTextAreaElement>() {
            text_area.set_value(value);
        }
    }

    fn is_checked(&self) -> bool {
        self.0
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(HtmlInputElement::checked)
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn replace_options(&self, options: &[SelectOption]) {
        let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() else {
            return;
        };
        select.set_inner_html("");
        for option in options {
            let appended = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value)
                .and_then(|element| select.append_child(&element));
            if let Err(error) = appended {
                log::error!(
                    "Failed to add option `{}`: {}",
                    option.value,
                    js_error_message(&error)
                );
            }
        }
    }

    fn set_displayed(&self, displayed: bool) {
        let Some(element) = self.0.dyn_ref::<HtmlElement>() else {
            return;
        };
        let display = if displayed { "" } else { "none" };
        if let Err(error) = element.style().set_property("display", display) {
            log::error!("Failed to set display: {}", js_error_message(&error));
        }
    }

    fn listen(&self, kind: EventKind, mut handler: Handler) {
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            handler(&DomEvent(event));
        }) as Box<dyn FnMut(web_sys::Event)>);
        if let Err(error) = self
            .0
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to listen for `{}`: {}", kind.dom_name(), js_error_message(&error));
        }
        // Listeners live as long as the page.
        closure.forget();
    }
}
