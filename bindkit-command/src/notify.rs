//! 属性变更通知（Property Changed）
//!
//! - `NotifyPropertyChanged`：可被观察对象需具备的能力，暴露属性变更事件；
//! - `BindingContext`：命令可绑定的任意对象，运行时查询其是否具备上述能力；
//! - `Property<T>`：视图模型中可在共享引用下读写的属性槽。
//!
use crate::event::Event;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// 属性变更事件参数
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyChangedArgs {
    property_name: String,
}

impl PropertyChangedArgs {
    pub fn new(property_name: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

pub type PropertyChangedEvent = Event<PropertyChangedArgs>;

/// 可观察能力：对外暴露属性变更事件
pub trait NotifyPropertyChanged: Send + Sync {
    fn property_changed(&self) -> &PropertyChangedEvent;

    /// 以属性名发布一次变更通知
    fn raise_property_changed(&self, property_name: &str) {
        self.property_changed()
            .publish(&PropertyChangedArgs::new(property_name));
    }

    /// 写入属性；值发生变化时发布通知并返回 true
    fn set_property<T>(&self, slot: &Property<T>, value: T, property_name: &str) -> bool
    where
        Self: Sized,
        T: PartialEq,
    {
        let changed = slot.replace(value);
        if changed {
            self.raise_property_changed(property_name);
        }
        changed
    }
}

/// 可绑定上下文
///
/// 命令构造时通过 `as_notify_property_changed` 检查对象是否可被观察；
/// 默认实现返回 `None`，即不具备通知能力。
pub trait BindingContext: Send + Sync {
    fn as_notify_property_changed(&self) -> Option<&dyn NotifyPropertyChanged> {
        None
    }
}

/// 属性槽：写入在锁内完成，通知在锁外发布
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T> Property<T> {
    pub const fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    /// 替换为新值，返回是否发生变化；相等时保持原值不动
    pub fn replace(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
        if *guard == value {
            return false;
        }
        *guard = value;
        true
    }
}

impl<T: Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Property").field(value).finish())
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
