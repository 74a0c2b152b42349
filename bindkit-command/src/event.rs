//! 事件（Event）：显式的发布/订阅协议
//!
//! - `subscribe`：登记监听器并返回订阅凭据；
//! - `unsubscribe`：凭据注销，之后的发布不再调用该监听器；
//! - `publish`：按登记顺序同步调用全部监听器。
//!
//! 发布前会先对监听器列表做快照，调用期间不持有锁，
//! 因此监听器内部可以再次订阅、注销或发布而不会死锁。
//! 同一轮发布中被注销的监听器仍会收到本轮通知。
//!
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// 订阅凭据，进程内唯一
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

type Listener<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// 携带参数 `A` 的事件
pub struct Event<A> {
    listeners: Mutex<Vec<(SubscriptionId, Listener<A>)>>,
}

/// 命令“可执行状态已变化”事件，无参数
pub type CanExecuteChanged = Event<()>;

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记监听器，返回用于注销的凭据
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.lock().push((id, Arc::new(listener)));
        id
    }

    /// 注销监听器；凭据不存在（或已注销）时返回 false
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        match listeners.iter().position(|(sid, _)| *sid == id) {
            Some(idx) => {
                listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    /// 按登记顺序同步通知全部监听器
    pub fn publish(&self, args: &A) {
        let snapshot: Vec<Listener<A>> = self
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(args);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriber_count() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Listener<A>)>> {
        // 监听器在锁外执行，列表本身不会处于中间状态
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
