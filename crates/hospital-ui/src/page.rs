//! Page boundary.
//!
//! The behaviors never touch the DOM directly. They look elements up through
//! [`Page`], read and mutate them through [`PageNode`], and subscribe to
//! events with boxed handlers. Everything is single-threaded, so handles are
//! `Rc`-based and nothing here is `Send`.

use futures::future::LocalBoxFuture;
use serde_json::Value;

/// DOM events the behaviors subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Change,
    Input,
    Click,
    Submit,
}

impl EventKind {
    /// Event type name as the browser spells it.
    pub fn dom_name(&self) -> &'static str {
        match self {
            Self::Change => "change",
            Self::Input => "input",
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// The event passed to a handler.
pub trait PageEvent {
    /// Cancel the default action (e.g. form submission).
    fn prevent_default(&self);
}

pub type Handler = Box<dyn FnMut(&dyn PageEvent)>;

/// One `<option>` of a select element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Option whose value and label are the same text.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            value: text.clone(),
            label: text,
        }
    }
}

/// Why a JSON fetch failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("request to `{url}` failed: {reason}")]
    Transport { url: String, reason: String },
    #[error("response from `{url}` is not valid JSON: {reason}")]
    InvalidJson { url: String, reason: String },
}

/// Handle to one element.
///
/// Handles are cheap to clone and compare by identity in the underlying
/// document, not by content.
pub trait PageNode: Clone + 'static {
    /// Descendant with the given id.
    fn find_by_id(&self, id: &str) -> Option<Self>;

    /// Rows of the table body (`tbody tr`), in document order.
    fn body_rows(&self) -> Vec<Self>;

    fn attribute(&self, name: &str) -> Option<String>;

    /// `true` for `<select>` elements.
    fn is_select(&self) -> bool;

    /// Current value of an input, select or textarea. Empty for others.
    fn value(&self) -> String;

    fn set_value(&self, value: &str);

    /// Checked state of a checkbox. `false` for other elements.
    fn is_checked(&self) -> bool;

    fn text(&self) -> String;

    fn set_text(&self, text: &str);

    /// Remove every option of a select and append `options` in order.
    fn replace_options(&self, options: &[SelectOption]);

    /// Toggle the `display` style between `""` and `none`.
    fn set_displayed(&self, displayed: bool);

    fn listen(&self, kind: EventKind, handler: Handler);
}

/// The document and window the behaviors run in.
pub trait Page: 'static {
    type Node: PageNode;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn elements_by_class(&self, class: &str) -> Vec<Self::Node>;

    /// Blocking yes/no prompt. `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;

    /// GET `url` and decode the body as JSON.
    fn fetch_json(&self, url: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>>;

    /// Run `task` on the page's event loop.
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
