use bindkit_command::{BindingContext, Property, PropertyChangedEvent};
use bindkit_macros::view_model;

// 已声明事件字段时复用原字段，不重复注入
#[view_model]
struct Session<T: Clone + PartialEq + Send + Sync> {
    property_changed: PropertyChangedEvent,
    #[property]
    value: Property<T>,
}

fn main() {
    let session = Session {
        property_changed: PropertyChangedEvent::new(),
        value: Property::new("a"),
    };

    assert!(session.set_value("b"));
    assert_eq!(session.value(), "b");

    let context: &dyn BindingContext = &session;
    assert!(context.as_notify_property_changed().is_some());
}
