use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kinobot::audit::AuditStore;
use kinobot::audit::sqlite::SqliteAuditStore;
use kinobot::banner::{BannerInfo, print_banner};
use kinobot::chat::Dispatcher;
use kinobot::chat::telegram::{Bot, TelegramClient};
use kinobot::config::Config;
use kinobot::consts::{DEFAULT_DB_PATH, DEFAULT_DISPLAY_LANG};
use kinobot::engine::orchestrator::Orchestrator;
use kinobot::metadata::omdb::OmdbClient;
use kinobot::translator::Translation;
use kinobot::translator::google::GoogleTranslator;

#[derive(Parser)]
#[command(
    name = "kinobot",
    version,
    about = "Telegram bot that looks up movies on OMDb.",
    long_about = "Telegram bot that looks up movies on OMDb.\n\n\
                  Requires BOT_TOKEN and OMDB_API_KEY in the environment or a .env file."
)]
struct Cli {
    /// SQLite database for the search audit log
    #[arg(short, long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Language titles and plots are translated into
    #[arg(short, long, env = "DISPLAY_LANG", default_value = DEFAULT_DISPLAY_LANG)]
    lang: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may already be exported.
    let _ = dotenvy::dotenv();

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let config = Config::from_env()?
        .with_db_path(cli.db)
        .with_display_lang(cli.lang);

    let audit = Arc::new(SqliteAuditStore::new(&config.db_path));
    audit
        .initialize()
        .await
        .context("failed to initialize audit database")?;

    let translation = Translation::new(Arc::new(GoogleTranslator::new()), &config.display_lang);
    let metadata = Arc::new(OmdbClient::new(&config.omdb_api_key));
    let orchestrator = Arc::new(Orchestrator::new(translation, metadata, audit));

    let dispatcher = Arc::new(Dispatcher::new(orchestrator));
    let telegram = Arc::new(TelegramClient::new(&config.bot_token));
    let bot = Bot::new(telegram, dispatcher);

    print_banner(&BannerInfo {
        display_lang: &config.display_lang,
        db_path: &config.db_path,
    });
    info!("bot started");

    tokio::select! {
        _ = bot.run() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("shutting down");
        }
    }

    Ok(())
}
