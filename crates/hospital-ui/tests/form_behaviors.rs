//! Last-treatment autofill and the delete confirmation guard.

use std::rc::Rc;

use hospital_ui::autofill;
use hospital_ui::delete_guard::{self, CONFIRM_MESSAGE, DELETE_FORM_CLASS};
use hospital_ui::test_page::{Tag, TestPage};
use hospital_ui::{EventKind, PageNode};

#[test]
fn autofill_copies_latest_treatment_into_the_form() {
    let page = Rc::new(TestPage::new());
    let button = page
        .button(autofill::TRIGGER_ID)
        .with_attr("data-latest-diagnosis", "Viral fever")
        .with_attr("data-latest-medicines", "Paracetamol")
        .with_attr("data-latest-dosage", "500mg twice daily")
        .with_attr("data-latest-treatment-status", "Ongoing")
        .with_attr("data-latest-prescription-text", "Rest and fluids");
    let form = page.form(autofill::FORM_ID);
    let diagnosis = form.child(Tag::Input, "diagnosis").with_value("old");
    let medicines = form.child(Tag::Input, "medicines");
    let dosage = form.child(Tag::Input, "dosage");
    let status = form.child(Tag::Select, "treatment_status");
    let prescription = form.child(Tag::TextArea, "prescription_text");
    assert!(autofill::install(&page));

    button.click();

    assert_eq!(diagnosis.value(), "Viral fever");
    assert_eq!(medicines.value(), "Paracetamol");
    assert_eq!(dosage.value(), "500mg twice daily");
    assert_eq!(status.value(), "Ongoing");
    assert_eq!(prescription.value(), "Rest and fluids");
}

#[test]
fn autofill_clears_fields_without_a_latest_value() {
    let page = Rc::new(TestPage::new());
    let button = page
        .button(autofill::TRIGGER_ID)
        .with_attr("data-latest-diagnosis", "Asthma");
    let form = page.form(autofill::FORM_ID);
    let diagnosis = form.child(Tag::Input, "diagnosis");
    let dosage = form.child(Tag::Input, "dosage").with_value("typed by hand");
    autofill::install(&page);

    button.click();

    assert_eq!(diagnosis.value(), "Asthma");
    assert_eq!(dosage.value(), "");
}

#[test]
fn autofill_skips_fields_missing_from_the_form() {
    let page = Rc::new(TestPage::new());
    let button = page
        .button(autofill::TRIGGER_ID)
        .with_attr("data-latest-medicines", "Cetirizine")
        .with_attr("data-latest-dosage", "10mg");
    let form = page.form(autofill::FORM_ID);
    let medicines = form.child(Tag::Input, "medicines");
    // Same id outside the form is not touched.
    let stray = page.input("dosage").with_value("keep");
    assert!(autofill::install(&page));

    button.click();

    assert_eq!(medicines.value(), "Cetirizine");
    assert_eq!(stray.value(), "keep");
}

#[test]
fn autofill_needs_button_and_form() {
    let page = Rc::new(TestPage::new());
    let button = page.button(autofill::TRIGGER_ID);
    assert!(!autofill::install(&page));
    assert_eq!(button.listener_count(EventKind::Click), 0);

    let page = Rc::new(TestPage::new());
    page.form(autofill::FORM_ID);
    assert!(!autofill::install(&page));
}

#[test]
fn declined_confirmation_cancels_delete() {
    let page = Rc::new(TestPage::new());
    let form = page.form("delete-doctor-3").with_class(DELETE_FORM_CLASS);
    assert_eq!(delete_guard::install(&page), 1);

    page.answer_confirm(false);
    assert!(!form.submit());

    assert_eq!(form.submissions(), 0);
    assert_eq!(page.prompts(), [CONFIRM_MESSAGE]);
}

#[test]
fn accepted_confirmation_submits_once() {
    let page = Rc::new(TestPage::new());
    let form = page.form("delete-doctor-3").with_class(DELETE_FORM_CLASS);
    delete_guard::install(&page);

    page.answer_confirm(true);
    assert!(form.submit());

    assert_eq!(form.submissions(), 1);
    assert_eq!(page.prompts().len(), 1);
}

#[test]
fn every_delete_form_is_guarded() {
    let page = Rc::new(TestPage::new());
    let first = page.form("delete-doctor-1").with_class(DELETE_FORM_CLASS);
    let second = page.form("delete-doctor-2").with_class(DELETE_FORM_CLASS);
    let unrelated = page.form("edit-doctor-1").with_class("doctor-edit-form");
    assert_eq!(delete_guard::install(&page), 2);

    page.answer_confirm(false);
    assert!(!first.submit());
    assert!(!second.submit());
    assert!(unrelated.submit());

    assert_eq!(page.prompts().len(), 2);
    assert_eq!(unrelated.submissions(), 1);
}

#[test]
fn page_without_delete_forms_guards_nothing() {
    let page = Rc::new(TestPage::new());
    page.form("add-record-form");
    assert_eq!(delete_guard::install(&page), 0);
}
