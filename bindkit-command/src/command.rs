//! 动作命令（ActionCommand）与绑定协议（BindableCommand）
//!
//! `ActionCommand<P>` 包装一个接收参数 `P` 的回调，默认总是可执行；
//! 无参命令即 `ActionCommand<()>`。
//!
//! `BindableCommand` 是绑定层驱动命令时使用的类型擦除协议：
//! 参数以 `Any` 形式传入，执行前还原为命令期望的类型。
//!
use crate::error::{CommandError, CommandResult};
use crate::event::CanExecuteChanged;
use crate::parameter::CommandParameter;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

/// 命令回调
pub type Action<P> = Arc<dyn Fn(P) + Send + Sync>;

/// 可执行条件（谓词）
pub type Condition = Arc<dyn Fn() -> bool + Send + Sync>;

/// 由闭包构造回调，便于在 builder 中推断参数类型
pub fn action<P, F>(f: F) -> Action<P>
where
    F: Fn(P) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 由闭包构造条件
pub fn condition<F>(f: F) -> Condition
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

/// 绑定层使用的命令协议
///
/// - `query_can_execute`：查询当前是否可执行，参数由具体命令决定是否使用；
/// - `invoke`：执行命令，参数按 `CommandParameter` 还原，失败时返回 `InvalidCast`；
/// - `can_execute_changed`：可执行状态变化事件，绑定层据此刷新界面。
pub trait BindableCommand: Send + Sync {
    fn query_can_execute(&self, parameter: Option<&dyn Any>) -> bool;

    fn invoke(&self, parameter: Option<Box<dyn Any + Send>>) -> CommandResult<()>;

    fn can_execute_changed(&self) -> &CanExecuteChanged;
}

/// 总是可执行的命令
pub struct ActionCommand<P = ()> {
    action: Action<P>,
    can_execute_changed: CanExecuteChanged,
}

impl<P: 'static> ActionCommand<P> {
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(P) + Send + Sync + 'static,
    {
        Self::with_action(Arc::new(action))
    }

    /// 由可能缺失的回调构造；缺失时返回 `InvalidArgument`
    pub fn from_action(action: Option<Action<P>>) -> CommandResult<Self> {
        let action =
            action.ok_or_else(|| CommandError::invalid_argument("action cannot be absent"))?;
        Ok(Self::with_action(action))
    }

    fn with_action(action: Action<P>) -> Self {
        Self {
            action,
            can_execute_changed: CanExecuteChanged::new(),
        }
    }

    pub fn can_execute(&self) -> bool {
        true
    }

    pub fn execute(&self, parameter: P) {
        (self.action)(parameter)
    }

    pub fn can_execute_changed(&self) -> &CanExecuteChanged {
        &self.can_execute_changed
    }

    /// 无条件发布状态变化；仅供组合它的命令在确认变化后调用
    pub(crate) fn raise_can_execute_changed(&self) {
        self.can_execute_changed.publish(&());
    }
}

impl<P: CommandParameter> ActionCommand<P> {
    pub(crate) fn invoke_erased(&self, parameter: Option<Box<dyn Any + Send>>) -> CommandResult<()> {
        let parameter = downcast_parameter::<P>(parameter)?;
        self.execute(parameter);
        Ok(())
    }
}

impl ActionCommand<()> {
    pub fn parameterless<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move |()| action())
    }
}

impl<P> fmt::Debug for ActionCommand<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCommand")
            .field("parameter", &type_name::<P>())
            .field("can_execute_changed", &self.can_execute_changed)
            .finish()
    }
}

impl<P: CommandParameter> BindableCommand for ActionCommand<P> {
    fn query_can_execute(&self, _parameter: Option<&dyn Any>) -> bool {
        self.can_execute()
    }

    fn invoke(&self, parameter: Option<Box<dyn Any + Send>>) -> CommandResult<()> {
        self.invoke_erased(parameter)
    }

    fn can_execute_changed(&self) -> &CanExecuteChanged {
        &self.can_execute_changed
    }
}

// 将绑定层传入的参数还原为 P；无参命令忽略传入值
fn downcast_parameter<P: CommandParameter>(parameter: Option<Box<dyn Any + Send>>) -> CommandResult<P> {
    let parameter = if P::IGNORES_PARAMETER { None } else { parameter };

    match parameter {
        Some(boxed) => P::from_boxed(boxed).map_err(|rejected| CommandError::InvalidCast {
            expected: type_name::<P>(),
            found: Some((*rejected).type_id()),
        }),
        None => P::absent().ok_or_else(|| CommandError::InvalidCast {
            expected: type_name::<P>(),
            found: None,
        }),
    }
}
