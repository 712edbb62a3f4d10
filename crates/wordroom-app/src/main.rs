use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wordroom_config::Config;

pub mod cli;
pub mod controller;
pub mod events;
pub mod render;
pub mod state;


use self::cli::Cli;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config = Config::new().with_key_file();
    let mut state = AppState::new(config);

    // Shutdown token (Ctrl+C)
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            return;
        }
        tracing::info!("Shutdown requested");
        ctrl_c.cancel();
    });

    let result = events::handle_command(&mut state, cli.command, &cancel).await;

    // Final save, only writes what isn't on disk yet
    match state.vocab.save() {
        Ok(true) => tracing::info!("Saved vocabulary on exit"),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to save vocabulary on exit: {e}"),
    }

    result
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
