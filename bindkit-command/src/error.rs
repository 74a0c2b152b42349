//! 命令层统一错误定义
//!
//! 仅包含构造期参数校验与绑定层调用时的类型转换两类错误，
//! 均直接返回给调用方，内部不做捕获或降级。
//!
use std::any::TypeId;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    // --- 构造期 ---
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // --- 绑定层调用 ---
    /// `found` 为实际传入值的类型；`None` 表示未传入参数
    #[error("invalid cast: expected={expected}, found={}", display_found(.found))]
    InvalidCast {
        expected: &'static str,
        found: Option<TypeId>,
    },
}

impl CommandError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

fn display_found(found: &Option<TypeId>) -> String {
    match found {
        Some(type_id) => format!("{type_id:?}"),
        None => "<none>".to_string(),
    }
}

/// 统一 Result 类型别名
pub type CommandResult<T> = Result<T, CommandError>;
