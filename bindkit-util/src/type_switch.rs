//! 类型分派表（TypeSwitch）
//!
//! - 通过 `TypeId` 注册不同类型对应的无参处理器，同一类型只能注册一次；
//! - 分派时命中则调用对应处理器，未命中或类型缺失时调用兜底处理器；
//! - 未配置兜底时返回 `NoMatchingCase`，属于调用方违约而非可恢复的运行时状态。
//!
//! `TypeSwitch<()>` 即不返回值的分派表。
//!
use crate::error::{SwitchError, SwitchResult};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

/// 按值分派时无法得知静态类型名，以此标记
const RUNTIME_TYPE: &str = "<dyn Any>";

/// 无参处理器
pub type Handler<R> = Arc<dyn Fn() -> R + Send + Sync>;

pub struct TypeSwitch<R = ()> {
    cases: DashMap<TypeId, (&'static str, Handler<R>)>,
    fallback: Option<Handler<R>>,
}

impl<R> Default for TypeSwitch<R> {
    fn default() -> Self {
        Self {
            cases: DashMap::new(),
            fallback: None,
        }
    }
}

impl<R: 'static> TypeSwitch<R> {
    /// 不带兜底的分派表：未命中时返回错误
    pub fn new() -> Self {
        Self::default()
    }

    /// 带兜底的分派表，相当于 `default` 分支
    pub fn with_fallback<F>(fallback: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Self {
            cases: DashMap::new(),
            fallback: Some(Arc::new(fallback)),
        }
    }

    /// 为类型 `T` 注册处理器
    pub fn set<T, F>(&self, handler: F) -> SwitchResult<()>
    where
        T: ?Sized + 'static,
        F: Fn() -> R + Send + Sync + 'static,
    {
        self.set_type(TypeId::of::<T>(), type_name::<T>(), Some(Arc::new(handler)))
    }

    /// 按 `TypeId` 注册处理器
    ///
    /// - 处理器缺失：`InvalidArgument`
    /// - 类型已注册：`DuplicateKey`，保留先注册的处理器
    pub fn set_type(
        &self,
        type_id: TypeId,
        type_name: &'static str,
        handler: Option<Handler<R>>,
    ) -> SwitchResult<()> {
        let handler = handler.ok_or_else(|| SwitchError::InvalidArgument {
            reason: format!("handler for {type_name} cannot be absent"),
        })?;

        // entry 在分片锁内完成检查与插入，并发注册同一类型时只有一个成功
        match self.cases.entry(type_id) {
            Entry::Occupied(_) => Err(SwitchError::DuplicateKey { type_name }),
            Entry::Vacant(slot) => {
                slot.insert((type_name, handler));
                Ok(())
            }
        }
    }

    /// 分派：`None` 视同未注册类型
    pub fn execute(&self, type_id: Option<TypeId>) -> SwitchResult<R> {
        self.dispatch(type_id, None)
    }

    pub fn execute_for<T: ?Sized + 'static>(&self) -> SwitchResult<R> {
        self.dispatch(Some(TypeId::of::<T>()), Some(type_name::<T>()))
    }

    /// 按值的运行时类型分派；未命中时类型名记为 `<dyn Any>`，与类型缺失区分
    pub fn execute_for_value(&self, value: &dyn Any) -> SwitchResult<R> {
        self.dispatch(Some(value.type_id()), Some(RUNTIME_TYPE))
    }

    fn dispatch(&self, type_id: Option<TypeId>, type_name: Option<&'static str>) -> SwitchResult<R> {
        // 先克隆出处理器再调用，避免处理器内部再次注册时与分片锁冲突
        let handler = type_id.and_then(|id| self.cases.get(&id).map(|case| Arc::clone(&case.1)));

        if let Some(handler) = handler {
            return Ok(handler());
        }

        match &self.fallback {
            Some(fallback) => Ok(fallback()),
            None => {
                tracing::debug!(
                    type_name = type_name.unwrap_or("<none>"),
                    type_id = ?type_id,
                    "no case matched and no fallback configured"
                );
                Err(SwitchError::NoMatchingCase { type_name })
            }
        }
    }
}

impl<R> TypeSwitch<R> {
    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        self.cases.contains_key(&TypeId::of::<T>())
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// 获取已注册的类型名列表（只读视图）
    pub fn registered_types(&self) -> Vec<&'static str> {
        self.cases.iter().map(|e| e.value().0).collect()
    }
}

impl<R> fmt::Debug for TypeSwitch<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types = self.registered_types();
        types.sort_unstable();

        f.debug_struct("TypeSwitch")
            .field("cases", &types)
            .field("has_fallback", &self.has_fallback())
            .finish()
    }
}
