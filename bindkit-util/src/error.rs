use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwitchError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("handler already registered: type={type_name}")]
    DuplicateKey { type_name: &'static str },

    #[error(
        "switching failed, there's no case handling {}, consider using a fallback to handle unexpected cases",
        display_type(.type_name)
    )]
    NoMatchingCase { type_name: Option<&'static str> },
}

fn display_type(type_name: &Option<&'static str>) -> &'static str {
    type_name.unwrap_or("<none>")
}

/// 统一 Result 类型别名
pub type SwitchResult<T> = Result<T, SwitchError>;
