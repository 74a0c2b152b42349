//! 视图模型过程宏（bindkit-macros）
//!
//! - `#[view_model]`：为具名字段结构体注入属性变更事件，并为 `#[property]` 字段
//!   生成读取与通知式写入方法，同时实现 `NotifyPropertyChanged` 与 `BindingContext`。
//!
use proc_macro::TokenStream;

mod field_utils;
mod view_model;

/// 视图模型宏
/// - 若缺失则追加字段：`property_changed: ::bindkit_command::PropertyChangedEvent`，置于字段最前
/// - `#[property]` 字段（类型须为 `Property<T>`）生成 `fn name(&self) -> T` 与 `fn set_name(&self, T) -> bool`
/// - 支持字段参数：`#[property(name = "...")]` 覆写通知中使用的属性名，默认取字段名
/// - 自动实现 `::bindkit_command::NotifyPropertyChanged` 与 `::bindkit_command::BindingContext`
#[proc_macro_attribute]
pub fn view_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    view_model::expand(attr, item)
}
