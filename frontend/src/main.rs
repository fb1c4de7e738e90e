fn main() {
    hospital_ui_dom::start();
}
