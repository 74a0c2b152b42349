//! 命令参数（CommandParameter）
//!
//! 绑定层以 `Option<Box<dyn Any + Send>>` 传入参数，命令执行前需还原为 `P`：
//! - 传入值：按 `from_boxed` 还原，类型不符时原样退回；
//! - 未传入：取 `absent()`，返回 `None` 的类型不接受缺省参数。
//!
//! `()` 忽略传入值；`Option<T>` 将缺省参数视为 `None`，并接受裸的 `T`。
//! 自定义参数类型实现本 trait 即可（默认实现已足够）：
//!
//! ```
//! use bindkit_command::CommandParameter;
//!
//! struct Selection(Vec<usize>);
//!
//! impl CommandParameter for Selection {}
//! ```
//!
use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

pub trait CommandParameter: Sized + 'static {
    /// 是否忽略绑定层传入的值（无参命令）
    const IGNORES_PARAMETER: bool = false;

    /// 未传入参数时使用的值
    fn absent() -> Option<Self> {
        None
    }

    /// 由类型擦除的值还原；失败时退回原值，便于调用方报告实际类型
    fn from_boxed(boxed: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        boxed.downcast::<Self>().map(|value| *value)
    }
}

impl CommandParameter for () {
    const IGNORES_PARAMETER: bool = true;

    fn absent() -> Option<Self> {
        Some(())
    }
}

impl<T: 'static> CommandParameter for Option<T> {
    fn absent() -> Option<Self> {
        Some(None)
    }

    fn from_boxed(boxed: Box<dyn Any + Send>) -> Result<Self, Box<dyn Any + Send>> {
        match boxed.downcast::<Option<T>>() {
            Ok(value) => Ok(*value),
            Err(boxed) => boxed.downcast::<T>().map(|value| Some(*value)),
        }
    }
}

macro_rules! impl_command_parameter {
    ($($ty:ty),* $(,)?) => {
        $(impl CommandParameter for $ty {})*
    };
}

impl_command_parameter!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    String, &'static str, PathBuf,
);

impl<T: 'static> CommandParameter for Vec<T> {}

impl<T: ?Sized + 'static> CommandParameter for Box<T> {}

impl<T: ?Sized + 'static> CommandParameter for Arc<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed<T: Any + Send>(value: T) -> Box<dyn Any + Send> {
        Box::new(value)
    }

    #[test]
    fn concrete_type_has_no_absent_value() {
        assert_eq!(String::absent(), None);
        assert_eq!(u64::absent(), None);
    }

    #[test]
    fn unit_and_option_accept_absent_parameter() {
        assert_eq!(<()>::absent(), Some(()));
        assert_eq!(Option::<String>::absent(), Some(None));
    }

    #[test]
    fn option_accepts_bare_value_and_wrapped_value() {
        let bare = Option::<String>::from_boxed(boxed("a".to_string())).unwrap();
        let wrapped = Option::<String>::from_boxed(boxed(Some("b".to_string()))).unwrap();

        assert_eq!(bare.as_deref(), Some("a"));
        assert_eq!(wrapped.as_deref(), Some("b"));
    }

    #[test]
    fn mismatched_value_is_handed_back() {
        let rejected = i32::from_boxed(boxed(1_u8)).unwrap_err();

        assert_eq!((*rejected).type_id(), std::any::TypeId::of::<u8>());
    }
}
