//! 界面绑定命令基础库（bindkit-command）
//!
//! 为数据绑定层（按钮、菜单项等）提供“能否执行 / 执行”模式的命令对象：
//! - `ActionCommand`：包装一个回调，默认总是可执行；
//! - `ManualRaiseCommand`：附带条件谓词，仅在显式复查且结果变化时发出通知；
//! - `WatchingCommand`：订阅绑定上下文的属性变更，监控的属性变化时自动复查；
//! - `event` / `notify`：显式的发布/订阅协议与属性变更能力；
//! - `parameter`：绑定层类型擦除参数的还原规则。
//!
//! 所有通知都在触发方的调用栈内同步完成，不涉及线程、I/O 或挂起。
//!
//! 典型用法：
//! 1. 用 `#[view_model]`（见 `bindkit-macros`）声明视图模型，获得属性变更通知能力；
//! 2. 以 `WatchingCommand::builder()` 绑定动作、条件、上下文与监控属性；
//! 3. 绑定层订阅 `can_execute_changed()`，在通知到来时重新查询 `can_execute()`。
//!
pub mod command;
pub mod error;
pub mod event;
pub mod manual_raise_command;
pub mod notify;
pub mod parameter;
pub mod watching_command;

pub use command::{Action, ActionCommand, BindableCommand, Condition, action, condition};
pub use error::{CommandError, CommandResult};
pub use event::{CanExecuteChanged, Event, SubscriptionId};
pub use manual_raise_command::ManualRaiseCommand;
pub use notify::{
    BindingContext, NotifyPropertyChanged, Property, PropertyChangedArgs, PropertyChangedEvent,
};
pub use parameter::CommandParameter;
pub use watching_command::WatchingCommand;

// 允许在本 crate 内部通过 ::bindkit_command 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::bindkit_command 路径。
extern crate self as bindkit_command;
