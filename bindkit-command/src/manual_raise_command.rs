//! 手动复查命令（ManualRaiseCommand）
//!
//! 在 `ActionCommand` 之上附加条件谓词：
//! - `can_execute` 每次都重新求值谓词，并记录为最近一次结果；
//! - `raise_can_execute_changed` 求值一次并与记录值比较，仅在变化时发布事件；
//! - 命令自身从不主动发布，绑定层频繁轮询也不会引发通知。
//!
use crate::command::{Action, ActionCommand, BindableCommand, Condition};
use crate::error::{CommandError, CommandResult};
use crate::event::CanExecuteChanged;
use crate::parameter::CommandParameter;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub struct ManualRaiseCommand<P = ()> {
    command: ActionCommand<P>,
    condition: Condition,
    last_can_execute: AtomicBool,
}

impl<P: 'static> ManualRaiseCommand<P> {
    pub fn new<A, C>(action: A, condition: C) -> Self
    where
        A: Fn(P) + Send + Sync + 'static,
        C: Fn() -> bool + Send + Sync + 'static,
    {
        Self::with_parts(ActionCommand::new(action), Arc::new(condition))
    }

    /// 由可能缺失的回调与条件构造；任一缺失时返回 `InvalidArgument`
    pub fn from_parts(action: Option<Action<P>>, condition: Option<Condition>) -> CommandResult<Self> {
        let command = ActionCommand::from_action(action)?;
        let condition = condition.ok_or_else(|| {
            CommandError::invalid_argument(
                "condition cannot be absent, for a command without condition use ActionCommand",
            )
        })?;
        Ok(Self::with_parts(command, condition))
    }

    fn with_parts(command: ActionCommand<P>, condition: Condition) -> Self {
        // 构造时的结果仅作为后续比较的基线
        let baseline = condition();
        Self {
            command,
            condition,
            last_can_execute: AtomicBool::new(baseline),
        }
    }

    pub fn can_execute(&self) -> bool {
        let current = (self.condition)();
        self.last_can_execute.store(current, Ordering::SeqCst);
        current
    }

    pub fn execute(&self, parameter: P) {
        self.command.execute(parameter)
    }

    pub fn can_execute_changed(&self) -> &CanExecuteChanged {
        self.command.can_execute_changed()
    }

    /// 复查条件：与上次记录值不同才发布事件，返回是否发布
    pub fn raise_can_execute_changed(&self) -> bool {
        let current = (self.condition)();
        let previous = self.last_can_execute.swap(current, Ordering::SeqCst);

        if previous == current {
            tracing::trace!(can_execute = current, "can_execute unchanged, notification skipped");
            return false;
        }

        tracing::debug!(previous, current, "can_execute changed");
        self.command.raise_can_execute_changed();
        true
    }
}

impl ManualRaiseCommand<()> {
    pub fn parameterless<A, C>(action: A, condition: C) -> Self
    where
        A: Fn() + Send + Sync + 'static,
        C: Fn() -> bool + Send + Sync + 'static,
    {
        Self::new(move |()| action(), condition)
    }
}

impl<P> fmt::Debug for ManualRaiseCommand<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualRaiseCommand")
            .field("parameter", &type_name::<P>())
            .field(
                "last_can_execute",
                &self.last_can_execute.load(Ordering::SeqCst),
            )
            .finish()
    }
}

impl<P: CommandParameter> BindableCommand for ManualRaiseCommand<P> {
    fn query_can_execute(&self, _parameter: Option<&dyn Any>) -> bool {
        self.can_execute()
    }

    fn invoke(&self, parameter: Option<Box<dyn Any + Send>>) -> CommandResult<()> {
        self.command.invoke_erased(parameter)
    }

    fn can_execute_changed(&self) -> &CanExecuteChanged {
        self.command.can_execute_changed()
    }
}
