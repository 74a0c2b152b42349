use bindkit_command::{
    ActionCommand, BindableCommand, ManualRaiseCommand, Property, WatchingCommand, action,
    condition,
};
use bindkit_macros::view_model;
use bindkit_util::{EachExt, TypeSwitch};
use std::any::Any;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[view_model]
#[derive(Default)]
struct LoginForm {
    #[property(name = "UserName")]
    user_name: Property<String>,
    #[property(name = "Password")]
    password: Property<String>,
    #[property(name = "Attempts")]
    attempts: Property<u32>,
}

struct KeyPress;
struct Click;
struct Scroll;

const MAX_ATTEMPTS: u32 = 3;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let form = Arc::new(LoginForm::default());

    // 提交：用户名与密码都非空时可用，随两者变化自动刷新
    let submit = {
        let probe = Arc::clone(&form);
        let target = Arc::clone(&form);
        WatchingCommand::builder()
            .action(action(move |()| {
                let attempt = target.attempts() + 1;
                target.set_attempts(attempt);
                info!(user = %target.user_name(), attempt, "login submitted");
            }))
            .condition(condition(move || {
                !probe.user_name().is_empty() && !probe.password().is_empty()
            }))
            .context(form.clone())
            .properties(vec!["UserName".to_string(), "Password".to_string()])
            .build()?
    };

    submit.can_execute_changed().subscribe(|_| {
        info!("submit button must re-query its enabled state");
    });

    // 改名：尝试次数用尽后禁用，需要手动复查
    let rename = {
        let probe = Arc::clone(&form);
        let target = Arc::clone(&form);
        ManualRaiseCommand::new(
            move |name: String| {
                target.set_user_name(name);
            },
            move || probe.attempts() < MAX_ATTEMPTS,
        )
    };

    let clear = {
        let target = Arc::clone(&form);
        ActionCommand::parameterless(move || {
            target.set_password(String::new());
        })
    };

    info!(enabled = submit.can_execute(), "initial state");

    rename.invoke(Some(Box::new("ada".to_string())))?;
    form.set_password("secret".to_string());
    info!(enabled = submit.can_execute(), "credentials entered");

    for _ in 0..MAX_ATTEMPTS {
        if submit.query_can_execute(None) {
            submit.invoke(None)?;
        }
    }

    if rename.raise_can_execute_changed() {
        info!(enabled = rename.can_execute(), "rename availability changed");
    }

    clear.execute(());
    info!(enabled = submit.can_execute(), "password cleared");

    // 输入事件按运行时类型路由
    let router = TypeSwitch::<&'static str>::with_fallback(|| "ignored");
    router.set::<KeyPress, _>(|| "keyboard")?;
    router.set::<Click, _>(|| "pointer")?;

    let inputs: Vec<Box<dyn Any>> = vec![Box::new(KeyPress), Box::new(Scroll), Box::new(Click)];
    inputs.iter().each(|input| match router.execute_for_value(input.as_ref()) {
        Ok(kind) => info!(kind, "input routed"),
        Err(err) => info!(%err, "input dropped"),
    });

    submit.detach();
    Ok(())
}
