use bindkit_command::{BindingContext, NotifyPropertyChanged, Property};
use bindkit_macros::view_model;
use std::sync::{Arc, Mutex};

#[view_model]
pub struct Counter {
    #[property]
    count: Property<i32>,
    label: String,
}

fn main() {
    let counter = Counter {
        property_changed: Default::default(),
        count: Property::new(0),
        label: "clicks".to_string(),
    };

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    counter.property_changed().subscribe(move |args| {
        sink.lock().unwrap().push(args.property_name().to_string());
    });

    assert!(counter.set_count(1));
    assert!(!counter.set_count(1));
    assert_eq!(counter.count(), 1);
    assert_eq!(counter.label, "clicks");
    assert_eq!(*seen.lock().unwrap(), vec!["count".to_string()]);

    // 具备通知能力
    assert!(counter.as_notify_property_changed().is_some());
}
