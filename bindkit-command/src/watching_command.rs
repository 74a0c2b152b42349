//! 属性监控命令（WatchingCommand）
//!
//! 在 `ManualRaiseCommand` 之上订阅绑定上下文的属性变更事件：
//! 变更的属性名命中监控集合（区分大小写的精确匹配）时自动复查条件，
//! 其余属性的变更直接忽略。
//!
//! 命令只持有上下文的弱引用，不延长其生命周期；
//! 订阅在 `detach` 或命令析构时注销，避免上下文比命令活得更久时残留监听器。
//!
use crate::command::{Action, BindableCommand, Condition};
use crate::error::{CommandError, CommandResult};
use crate::event::{CanExecuteChanged, SubscriptionId};
use crate::manual_raise_command::ManualRaiseCommand;
use crate::notify::{BindingContext, PropertyChangedArgs};
use crate::parameter::CommandParameter;
use bon::bon;
use std::any::{Any, type_name};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub struct WatchingCommand<P = ()> {
    command: Arc<ManualRaiseCommand<P>>,
    context: Weak<dyn BindingContext>,
    properties: Arc<HashSet<String>>,
    subscription: Mutex<Option<SubscriptionId>>,
}

#[bon]
impl<P: 'static> WatchingCommand<P> {
    /// 构造并立即订阅上下文
    ///
    /// - `action` / `condition` 缺失：`InvalidArgument`
    /// - `context` 不具备属性变更通知能力：`InvalidArgument`
    /// - `properties` 为空：`InvalidArgument`
    ///
    /// ```
    /// use bindkit_command::{BindingContext, WatchingCommand, action, condition};
    /// use std::sync::Arc;
    ///
    /// struct Plain;
    /// impl BindingContext for Plain {}
    ///
    /// let result = WatchingCommand::builder()
    ///     .action(action(|()| {}))
    ///     .condition(condition(|| true))
    ///     .context(Arc::new(Plain))
    ///     .properties(vec!["Id".to_string()])
    ///     .build();
    /// assert!(result.is_err());
    /// ```
    #[builder]
    pub fn new(
        action: Option<Action<P>>,
        condition: Option<Condition>,
        context: Arc<dyn BindingContext>,
        properties: Vec<String>,
    ) -> CommandResult<Self> {
        let command = Arc::new(ManualRaiseCommand::from_parts(action, condition)?);

        let notifier = context.as_notify_property_changed().ok_or_else(|| {
            CommandError::invalid_argument(
                "context doesn't implement NotifyPropertyChanged hence it can't be used for monitoring dependencies",
            )
        })?;

        if properties.is_empty() {
            return Err(CommandError::invalid_argument(
                "at least one property must be monitored",
            ));
        }

        let properties: Arc<HashSet<String>> = Arc::new(properties.into_iter().collect());

        let subscription = {
            let command = Arc::downgrade(&command);
            let properties = Arc::clone(&properties);

            notifier
                .property_changed()
                .subscribe(move |args: &PropertyChangedArgs| {
                    if !properties.contains(args.property_name()) {
                        tracing::trace!(
                            property = args.property_name(),
                            "property not monitored, ignored"
                        );
                        return;
                    }
                    if let Some(command) = command.upgrade() {
                        command.raise_can_execute_changed();
                    }
                })
        };

        tracing::debug!(
            %subscription,
            properties = properties.len(),
            "watching command attached"
        );

        Ok(Self {
            command,
            context: Arc::downgrade(&context),
            properties,
            subscription: Mutex::new(Some(subscription)),
        })
    }

    pub fn can_execute(&self) -> bool {
        self.command.can_execute()
    }

    pub fn execute(&self, parameter: P) {
        self.command.execute(parameter)
    }

    pub fn can_execute_changed(&self) -> &CanExecuteChanged {
        self.command.can_execute_changed()
    }

    /// 手动复查，语义同 `ManualRaiseCommand::raise_can_execute_changed`
    pub fn raise_can_execute_changed(&self) -> bool {
        self.command.raise_can_execute_changed()
    }
}

impl<P> WatchingCommand<P> {
    pub fn is_monitored(&self, property_name: &str) -> bool {
        self.properties.contains(property_name)
    }

    pub fn monitored_properties(&self) -> impl Iterator<Item = &str> {
        self.properties.iter().map(String::as_str)
    }

    pub fn is_attached(&self) -> bool {
        self.lock_subscription().is_some()
    }

    /// 注销对上下文的订阅，可重复调用；返回本次是否释放了订阅
    pub fn detach(&self) -> bool {
        let Some(subscription) = self.lock_subscription().take() else {
            return false;
        };

        // 上下文已释放时监听器随之销毁，无需再注销
        if let Some(context) = self.context.upgrade() {
            if let Some(notifier) = context.as_notify_property_changed() {
                notifier.property_changed().unsubscribe(subscription);
            }
        }

        tracing::debug!(%subscription, "watching command detached");
        true
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<SubscriptionId>> {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P> Drop for WatchingCommand<P> {
    fn drop(&mut self) {
        self.detach();
    }
}

impl<P> fmt::Debug for WatchingCommand<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut properties: Vec<&str> = self.properties.iter().map(String::as_str).collect();
        properties.sort_unstable();

        f.debug_struct("WatchingCommand")
            .field("parameter", &type_name::<P>())
            .field("properties", &properties)
            .field("command", &self.command)
            .finish()
    }
}

impl<P: CommandParameter> BindableCommand for WatchingCommand<P> {
    fn query_can_execute(&self, parameter: Option<&dyn Any>) -> bool {
        self.command.query_can_execute(parameter)
    }

    fn invoke(&self, parameter: Option<Box<dyn Any + Send>>) -> CommandResult<()> {
        self.command.invoke(parameter)
    }

    fn can_execute_changed(&self) -> &CanExecuteChanged {
        self.command.can_execute_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{action, condition};
    use crate::notify::{NotifyPropertyChanged, Property, PropertyChangedEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Form {
        id: Property<i32>,
        name: Property<String>,
        property_changed: PropertyChangedEvent,
    }

    impl Form {
        fn set_id(&self, value: i32) {
            self.set_property(&self.id, value, "Id");
        }

        fn set_name(&self, value: &str) {
            self.set_property(&self.name, value.to_string(), "Name");
        }
    }

    impl NotifyPropertyChanged for Form {
        fn property_changed(&self) -> &PropertyChangedEvent {
            &self.property_changed
        }
    }

    impl BindingContext for Form {
        fn as_notify_property_changed(&self) -> Option<&dyn NotifyPropertyChanged> {
            Some(self)
        }
    }

    struct Opaque;

    impl BindingContext for Opaque {}

    fn watch_id(form: &Arc<Form>, wanted: i32) -> WatchingCommand {
        let probe = Arc::clone(form);
        WatchingCommand::builder()
            .action(action(|()| {}))
            .condition(condition(move || probe.id.get() == wanted))
            .context(form.clone())
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap()
    }

    fn counting(command: &WatchingCommand) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        command.can_execute_changed().subscribe(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        hits
    }

    #[test]
    fn monitored_change_to_desired_value_notifies_once() {
        let form = Arc::new(Form::default());
        let command = watch_id(&form, 10);
        let hits = counting(&command);

        form.set_id(10);
        form.set_id(10);
        form.raise_property_changed("Id");

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(command.can_execute());
    }

    #[test]
    fn monitored_change_without_transition_does_not_notify() {
        let form = Arc::new(Form::default());
        let command = watch_id(&form, 10);
        let hits = counting(&command);

        form.set_id(9);

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn unmonitored_property_is_ignored() {
        let form = Arc::new(Form::default());
        let probe = Arc::clone(&form);
        let command = WatchingCommand::builder()
            .action(action(|()| {}))
            .condition(condition(move || probe.name.get() == "x"))
            .context(form.clone())
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap();
        let hits = counting(&command);

        form.set_name("x");

        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn property_names_are_case_sensitive() {
        let form = Arc::new(Form::default());
        let command = watch_id(&form, 10);
        let hits = counting(&command);

        form.id.replace(10);
        form.raise_property_changed("id");
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        form.raise_property_changed("Id");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn context_without_notification_is_rejected() {
        let err = WatchingCommand::builder()
            .action(action(|()| {}))
            .condition(condition(|| false))
            .context(Arc::new(Opaque))
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidArgument { .. }));
    }

    #[test]
    fn missing_condition_is_rejected() {
        let err = WatchingCommand::builder()
            .action(action(|()| {}))
            .context(Arc::new(Form::default()))
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidArgument { .. }));
    }

    #[test]
    fn missing_action_is_rejected() {
        let err = WatchingCommand::<()>::builder()
            .condition(condition(|| true))
            .context(Arc::new(Form::default()))
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidArgument { .. }));
    }

    #[test]
    fn empty_property_list_is_rejected() {
        let err = WatchingCommand::builder()
            .action(action(|()| {}))
            .condition(condition(|| true))
            .context(Arc::new(Form::default()))
            .properties(Vec::new())
            .build()
            .unwrap_err();

        assert!(matches!(err, CommandError::InvalidArgument { .. }));
    }

    #[test]
    fn detach_releases_subscription() {
        let form = Arc::new(Form::default());
        let command = watch_id(&form, 10);
        let hits = counting(&command);
        assert_eq!(form.property_changed().subscriber_count(), 1);

        assert!(command.detach());
        assert!(!command.detach());
        assert!(!command.is_attached());

        form.set_id(10);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(form.property_changed().is_empty());
    }

    #[test]
    fn drop_releases_subscription() {
        let form = Arc::new(Form::default());
        let command = watch_id(&form, 10);
        assert_eq!(form.property_changed().subscriber_count(), 1);

        drop(command);

        assert!(form.property_changed().is_empty());
        form.set_id(10);
    }

    #[test]
    fn command_does_not_keep_context_alive() {
        let form = Arc::new(Form::default());
        let command = WatchingCommand::builder()
            .action(action(|()| {}))
            .condition(condition(|| true))
            .context(form.clone())
            .properties(vec!["Id".to_string()])
            .build()
            .unwrap();
        let weak = Arc::downgrade(&form);

        drop(form);

        assert!(weak.upgrade().is_none());
        assert!(command.detach());
    }

    #[test]
    fn typed_command_invokes_with_parameter() {
        let form = Arc::new(Form::default());
        let total = Arc::new(AtomicUsize::new(0));
        let t = total.clone();
        let command = WatchingCommand::builder()
            .action(action(move |n: usize| {
                t.fetch_add(n, Ordering::SeqCst);
            }))
            .condition(condition(|| true))
            .context(form.clone())
            .properties(vec!["Id".to_string(), "Name".to_string()])
            .build()
            .unwrap();

        command.execute(4);
        command.invoke(Some(Box::new(6_usize))).unwrap();

        assert_eq!(total.load(Ordering::SeqCst), 10);
        assert!(command.is_monitored("Name"));
        assert!(!command.is_monitored("name"));
    }
}
