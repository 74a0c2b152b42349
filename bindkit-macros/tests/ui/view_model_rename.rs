use bindkit_command::{NotifyPropertyChanged, Property};
use bindkit_macros::view_model;
use std::sync::{Arc, Mutex};

#[view_model]
#[derive(Default)]
struct Editor {
    #[property(name = "Id")]
    id: Property<u32>,
    #[property(name = "Title")]
    title: Property<String>,
}

fn main() {
    let editor = Editor::default();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    editor.property_changed().subscribe(move |args| {
        sink.lock().unwrap().push(args.property_name().to_string());
    });

    editor.set_title("draft".to_string());
    editor.set_id(7);

    assert_eq!(editor.title(), "draft");
    assert_eq!(*seen.lock().unwrap(), vec!["Title".to_string(), "Id".to_string()]);
}
