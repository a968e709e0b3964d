use codewars_bot::{
    config::Env, events::Context, messages::MessageLoader, scheduler, store::Store,
};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Env::load()?;

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let settings = env.settings();
    let store = Store::open(&env.data_dir)?;
    let messages = MessageLoader::load_from_file(&env.message_file, &settings)?;
    info!(
        "Serving {} with trainer roles {:?}",
        store.data_dir().display(),
        settings.allowed_roles
    );
    let context = Context::new(store, messages, settings);

    tokio::select! {
        _ = scheduler::run(context, scheduler::TracingAnnouncer, env.timer_tick()) => {}
        _ = signal::ctrl_c() => {
            tracing::warn!("Received SIGINT. Exiting.");
        }
    }
    tracing::warn!("Exiting bot...");

    Ok(())
}
