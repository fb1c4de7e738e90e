//! In-memory page for running the behaviors without a browser.
//!
//! Elements are created through builder methods, user actions are simulated
//! by methods that set a value and dispatch the matching event. Confirm
//! prompts answer with a scripted value and fetches resolve with canned
//! responses. Spawned tasks run when [`TestPage::run_until_stalled`] is
//! called.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::page::{EventKind, FetchError, Handler, Page, PageEvent, PageNode, SelectOption};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Script,
    Input,
    Checkbox,
    TextArea,
    Select,
    Button,
    Form,
    Table,
    Row,
}

impl Tag {
    fn has_value(&self) -> bool {
        matches!(self, Self::Input | Self::Checkbox | Self::TextArea | Self::Select)
    }
}

struct NodeData {
    tag: Tag,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    parent: Option<usize>,
    body_rows: Vec<usize>,
    value: String,
    checked: bool,
    text: String,
    displayed: bool,
    options: Vec<SelectOption>,
    submissions: usize,
}

impl NodeData {
    fn new(tag: Tag, id: Option<&str>, parent: Option<usize>) -> Self {
        Self {
            tag,
            id: id.map(str::to_string),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            parent,
            body_rows: Vec::new(),
            value: String::new(),
            checked: false,
            text: String::new(),
            displayed: true,
            options: Vec::new(),
            submissions: 0,
        }
    }
}

#[derive(Default)]
struct Document {
    nodes: RefCell<Vec<NodeData>>,
    listeners: RefCell<HashMap<usize, Vec<(EventKind, Handler)>>>,
    confirm_answer: Cell<bool>,
    prompts: RefCell<Vec<String>>,
    responses: RefCell<HashMap<String, Result<Value, FetchError>>>,
    requests: RefCell<Vec<String>>,
    tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

#[derive(Default)]
struct TestEvent {
    prevented: Cell<bool>,
}

impl PageEvent for TestEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

#[derive(Default)]
pub struct TestPage {
    doc: Rc<Document>,
}

impl TestPage {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&self, data: NodeData) -> TestNode {
        let mut nodes = self.doc.nodes.borrow_mut();
        nodes.push(data);
        TestNode {
            doc: self.doc.clone(),
            index: nodes.len() - 1,
        }
    }

    /// Top-level element with the given tag and id.
    pub fn element(&self, tag: Tag, id: &str) -> TestNode {
        self.insert(NodeData::new(tag, Some(id), None))
    }

    /// Top-level element without an id.
    pub fn anonymous(&self, tag: Tag) -> TestNode {
        self.insert(NodeData::new(tag, None, None))
    }

    pub fn input(&self, id: &str) -> TestNode {
        self.element(Tag::Input, id)
    }

    pub fn checkbox(&self, id: &str) -> TestNode {
        self.element(Tag::Checkbox, id)
    }

    pub fn select(&self, id: &str) -> TestNode {
        self.element(Tag::Select, id)
    }

    pub fn button(&self, id: &str) -> TestNode {
        self.element(Tag::Button, id)
    }

    pub fn form(&self, id: &str) -> TestNode {
        self.element(Tag::Form, id)
    }

    pub fn table(&self, id: &str) -> TestNode {
        self.element(Tag::Table, id)
    }

    pub fn span(&self, id: &str) -> TestNode {
        self.element(Tag::Span, id)
    }

    pub fn script(&self, id: &str) -> TestNode {
        self.element(Tag::Script, id)
    }

    /// Answer every following confirm prompt with `answer`.
    pub fn answer_confirm(&self, answer: bool) {
        self.doc.confirm_answer.set(answer);
    }

    /// Messages of all confirm prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.doc.prompts.borrow().clone()
    }

    /// Resolve fetches of `url` with `response`. Unscripted URLs fail.
    pub fn respond(&self, url: &str, response: Result<Value, FetchError>) {
        self.doc
            .responses
            .borrow_mut()
            .insert(url.to_string(), response);
    }

    /// URLs fetched so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.doc.requests.borrow().clone()
    }

    pub fn pending_tasks(&self) -> usize {
        self.doc.tasks.borrow().len()
    }

    /// Run spawned tasks, including tasks they spawn, until none are left.
    pub fn run_until_stalled(&self) {
        loop {
            let tasks = std::mem::take(&mut *self.doc.tasks.borrow_mut());
            if tasks.is_empty() {
                break;
            }
            for task in tasks {
                futures::executor::block_on(task);
            }
        }
    }
}

impl Page for TestPage {
    type Node = TestNode;

    fn element_by_id(&self, id: &str) -> Option<TestNode> {
        let nodes = self.doc.nodes.borrow();
        let index = nodes.iter().position(|node| node.id.as_deref() == Some(id))?;
        Some(TestNode {
            doc: self.doc.clone(),
            index,
        })
    }

    fn elements_by_class(&self, class: &str) -> Vec<TestNode> {
        let nodes = self.doc.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.classes.iter().any(|c| c == class))
            .map(|(index, _)| TestNode {
                doc: self.doc.clone(),
                index,
            })
            .collect()
    }

    fn confirm(&self, message: &str) -> bool {
        self.doc.prompts.borrow_mut().push(message.to_string());
        self.doc.confirm_answer.get()
    }

    fn fetch_json(&self, url: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        self.doc.requests.borrow_mut().push(url.to_string());
        let response = self
            .doc
            .responses
            .borrow()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: "no response scripted".to_string(),
                })
            });
        future::ready(response).boxed_local()
    }

    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.doc.tasks.borrow_mut().push(task);
    }
}

#[derive(Clone)]
pub struct TestNode {
    doc: Rc<Document>,
    index: usize,
}

impl std::fmt::Debug for TestNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nodes = self.doc.nodes.borrow();
        let node = &nodes[self.index];
        f.debug_struct("TestNode")
            .field("index", &self.index)
            .field("tag", &node.tag)
            .field("id", &node.id)
            .finish()
    }
}

impl PartialEq for TestNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.doc, &other.doc) && self.index == other.index
    }
}

impl TestNode {
    fn with_data<T>(&self, f: impl FnOnce(&NodeData) -> T) -> T {
        f(&self.doc.nodes.borrow()[self.index])
    }

    fn update(&self, f: impl FnOnce(&mut NodeData)) {
        f(&mut self.doc.nodes.borrow_mut()[self.index]);
    }

    fn insert_child(&self, data: NodeData) -> TestNode {
        let mut nodes = self.doc.nodes.borrow_mut();
        nodes.push(data);
        TestNode {
            doc: self.doc.clone(),
            index: nodes.len() - 1,
        }
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.update(|node| {
            node.attributes.insert(name.to_string(), value.to_string());
        });
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.update(|node| node.classes.push(class.to_string()));
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.update(|node| node.value = value.to_string());
        self
    }

    /// Child element with the given tag and id.
    pub fn child(&self, tag: Tag, id: &str) -> TestNode {
        self.insert_child(NodeData::new(tag, Some(id), Some(self.index)))
    }

    /// Append a `tbody` row carrying `attributes`.
    pub fn add_row(&self, attributes: &[(&str, &str)]) -> TestNode {
        let mut data = NodeData::new(Tag::Row, None, Some(self.index));
        data.attributes = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let row = self.insert_child(data);
        self.update(|node| node.body_rows.push(row.index));
        row
    }

    pub fn options(&self) -> Vec<SelectOption> {
        self.with_data(|node| node.options.clone())
    }

    pub fn is_displayed(&self) -> bool {
        self.with_data(|node| node.displayed)
    }

    /// Submissions that went through (not cancelled by a handler).
    pub fn submissions(&self) -> usize {
        self.with_data(|node| node.submissions)
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.doc
            .listeners
            .borrow()
            .get(&self.index)
            .map(|handlers| handlers.iter().filter(|(k, _)| *k == kind).count())
            .unwrap_or(0)
    }

    /// Dispatch `kind` to the handlers of this element.
    ///
    /// Returns `false` when a handler cancelled the default action.
    pub fn dispatch(&self, kind: EventKind) -> bool {
        let event = TestEvent::default();
        // Handlers read the document, so they must not run while the
        // listener table is borrowed.
        let mut handlers = self
            .doc
            .listeners
            .borrow_mut()
            .remove(&self.index)
            .unwrap_or_default();
        for (handler_kind, handler) in handlers.iter_mut() {
            if *handler_kind == kind {
                handler(&event);
            }
        }
        let mut listeners = self.doc.listeners.borrow_mut();
        if let Some(added) = listeners.remove(&self.index) {
            handlers.extend(added);
        }
        listeners.insert(self.index, handlers);
        !event.prevented.get()
    }

    /// Type `text` into an input, replacing its value.
    pub fn type_text(&self, text: &str) {
        self.set_value(text);
        self.dispatch(EventKind::Input);
    }

    /// Pick `value` in a select.
    pub fn choose(&self, value: &str) {
        self.set_value(value);
        self.dispatch(EventKind::Change);
    }

    pub fn set_checked(&self, checked: bool) {
        self.update(|node| node.checked = checked);
        self.dispatch(EventKind::Change);
    }

    pub fn click(&self) {
        self.dispatch(EventKind::Click);
    }

    /// Submit a form. Returns `true` when the submission went through.
    pub fn submit(&self) -> bool {
        let submitted = self.dispatch(EventKind::Submit);
        if submitted {
            self.update(|node| node.submissions += 1);
        }
        submitted
    }
}

impl PageNode for TestNode {
    fn find_by_id(&self, id: &str) -> Option<Self> {
        let nodes = self.doc.nodes.borrow();
        let is_descendant = |mut index: usize| {
            while let Some(parent) = nodes[index].parent {
                if parent == self.index {
                    return true;
                }
                index = parent;
            }
            false
        };
        let index = (0..nodes.len())
            .find(|&index| nodes[index].id.as_deref() == Some(id) && is_descendant(index))?;
        Some(TestNode {
            doc: self.doc.clone(),
            index,
        })
    }

    fn body_rows(&self) -> Vec<Self> {
        self.with_data(|node| node.body_rows.clone())
            .into_iter()
            .map(|index| TestNode {
                doc: self.doc.clone(),
                index,
            })
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.with_data(|node| node.attributes.get(name).cloned())
    }

    fn is_select(&self) -> bool {
        self.with_data(|node| node.tag == Tag::Select)
    }

    fn value(&self) -> String {
        self.with_data(|node| {
            if node.tag.has_value() {
                node.value.clone()
            } else {
                String::new()
            }
        })
    }

    fn set_value(&self, value: &str) {
        self.update(|node| {
            if node.tag.has_value() {
                node.value = value.to_string();
            }
        });
    }

    fn is_checked(&self) -> bool {
        self.with_data(|node| node.tag == Tag::Checkbox && node.checked)
    }

    fn text(&self) -> String {
        self.with_data(|node| node.text.clone())
    }

    fn set_text(&self, text: &str) {
        self.update(|node| node.text = text.to_string());
    }

    fn replace_options(&self, options: &[SelectOption]) {
        self.update(|node| {
            if node.tag != Tag::Select {
                return;
            }
            node.options = options.to_vec();
            // A select shows its first option once the old ones are gone.
            node.value = options
                .first()
                .map(|option| option.value.clone())
                .unwrap_or_default();
        });
    }

    fn set_displayed(&self, displayed: bool) {
        self.update(|node| node.displayed = displayed);
    }

    fn listen(&self, kind: EventKind, handler: Handler) {
        self.doc
            .listeners
            .borrow_mut()
            .entry(self.index)
            .or_default()
            .push((kind, handler));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_id_only_searches_descendants() {
        let page = TestPage::new();
        let form = page.form("add-record-form");
        let other = page.form("other-form");
        let inside = form.child(Tag::Input, "diagnosis");
        other.child(Tag::Input, "dosage");

        assert_eq!(form.find_by_id("diagnosis"), Some(inside));
        assert_eq!(form.find_by_id("dosage"), None);
    }

    #[test]
    fn test_handlers_can_read_the_document() {
        let page = TestPage::new();
        let input = page.input("q");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let handler_input = input.clone();
        let handler_seen = seen.clone();
        input.listen(
            EventKind::Input,
            Box::new(move |_: &dyn PageEvent| {
                handler_seen.borrow_mut().push(handler_input.value())
            }),
        );

        input.type_text("abc");
        input.type_text("abcd");
        input.click();

        assert_eq!(*seen.borrow(), ["abc", "abcd"]);
        assert_eq!(input.listener_count(EventKind::Input), 1);
    }
}
