//! Confirmation before deleting a doctor.

use std::rc::Rc;

use crate::page::{EventKind, Page, PageEvent, PageNode};

pub const DELETE_FORM_CLASS: &str = "doctor-delete-form";
pub const CONFIRM_MESSAGE: &str =
    "Are you sure you want to delete this doctor? This cannot be undone.";

/// Guard every `.doctor-delete-form`. Returns the number of guarded forms.
pub fn install<P: Page>(page: &Rc<P>) -> usize {
    let forms = page.elements_by_class(DELETE_FORM_CLASS);
    for form in &forms {
        let page = page.clone();
        form.listen(
            EventKind::Submit,
            Box::new(move |event: &dyn PageEvent| {
                if !page.confirm(CONFIRM_MESSAGE) {
                    event.prevent_default();
                }
            }),
        );
    }
    forms.len()
}
