//! 绑定层通用工具（bindkit-util）
//!
//! - `type_switch`：按运行时类型分派处理器的查找表，支持兜底分支；
//! - `extensions`：序列遍历辅助。
//!
pub mod error;
pub mod extensions;
pub mod type_switch;

pub use error::{SwitchError, SwitchResult};
pub use extensions::EachExt;
pub use type_switch::{Handler, TypeSwitch};
