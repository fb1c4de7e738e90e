//! "Use last treatment" button on the add-record form.

use std::rc::Rc;

use crate::page::{EventKind, Page, PageEvent, PageNode};

pub const TRIGGER_ID: &str = "use-last-treatment";
pub const FORM_ID: &str = "add-record-form";

/// Form field id and the trigger attribute it is copied from.
pub const FIELDS: [(&str, &str); 5] = [
    ("diagnosis", "data-latest-diagnosis"),
    ("medicines", "data-latest-medicines"),
    ("dosage", "data-latest-dosage"),
    ("treatment_status", "data-latest-treatment-status"),
    ("prescription_text", "data-latest-prescription-text"),
];

pub fn install<P: Page>(page: &Rc<P>) -> bool {
    let (Some(trigger), Some(form)) = (page.element_by_id(TRIGGER_ID), page.element_by_id(FORM_ID))
    else {
        return false;
    };
    // Fields missing from the form are skipped for good.
    let targets: Vec<_> = FIELDS
        .iter()
        .filter_map(|&(field_id, attribute)| Some((form.find_by_id(field_id)?, attribute)))
        .collect();

    let source = trigger.clone();
    trigger.listen(
        EventKind::Click,
        Box::new(move |_: &dyn PageEvent| {
            for (field, attribute) in &targets {
                field.set_value(&source.attribute(attribute).unwrap_or_default());
            }
        }),
    );
    true
}
