mod cli;
mod render;

use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use marquee_api::TmdbClient;
use marquee_core::config::{AppConfig, API_KEY_ENV};
use marquee_core::{CancellationToken, DetailController, ListController, MovieRepository};

use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "marquee=debug" } else { "marquee=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
    .with_context(|| format!("loading config from {}", config_path.display()))?;

    match cli.command {
        Commands::Config { command } => {
            show_config(command, cli.config.as_deref(), &config_path, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List { person, retry } => {
            let person_id = person.unwrap_or(config.discover.person_id);
            let repo = Arc::new(MovieRepository::new(tmdb_client(&config)?, person_id));
            run_list(repo, retry, &config.tmdb.image_base_url).await
        }
        Commands::Detail { movie_id } => {
            let repo = Arc::new(MovieRepository::new(
                tmdb_client(&config)?,
                config.discover.person_id,
            ));
            run_detail(repo, movie_id, &config.tmdb.image_base_url).await
        }
    }
}

fn tmdb_client(config: &AppConfig) -> anyhow::Result<TmdbClient> {
    let api_key = config.resolved_api_key().with_context(|| {
        format!("no TMDB API key: set {API_KEY_ENV} or tmdb.api_key in the config file")
    })?;
    let client = TmdbClient::builder()
        .api_key(api_key)
        .base_url(config.tmdb.base_url.as_str())
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

fn show_config(
    command: ConfigCommands,
    explicit: Option<&std::path::Path>,
    path: &std::path::Path,
    config: &AppConfig,
) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Show => {
            let mut shown = config.clone();
            if !shown.tmdb.api_key.is_empty() {
                shown.tmdb.api_key = "<redacted>".into();
            }
            print!("{}", toml::to_string_pretty(&shown)?);
        }
        ConfigCommands::Init => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            match explicit {
                Some(path) => config.save_to(path)?,
                None => config.save()?,
            }
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

/// Cancel `token` on Ctrl-C.
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted, cancelling");
            token.cancel();
        }
    });
}

/// Drive `work` to completion, printing every state it publishes.
async fn observe<T, W>(mut rx: watch::Receiver<T>, work: W, render: impl Fn(&T) -> String)
where
    W: Future<Output = ()>,
{
    tokio::pin!(work);
    loop {
        tokio::select! {
            _ = &mut work => break,
            Ok(()) = rx.changed() => {
                let screen = render(&*rx.borrow_and_update());
                println!("{screen}\n");
            }
        }
    }
    if rx.has_changed().unwrap_or(false) {
        println!("{}", render(&*rx.borrow_and_update()));
    }
}

async fn run_list(
    repo: Arc<MovieRepository<TmdbClient>>,
    retries: u32,
    image_base: &str,
) -> anyhow::Result<ExitCode> {
    let controller = ListController::new(repo);
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let work = async {
        controller.start(&cancel).await;
        for attempt in 1..=retries {
            if controller.state().error_message.is_none() || cancel.is_cancelled() {
                break;
            }
            tracing::info!(attempt, retries, "retrying movie list");
            controller.retry(&cancel).await;
        }
    };
    observe(controller.subscribe(), work, |s| render::list_screen(s, image_base)).await;

    if cancel.is_cancelled() || controller.state().error_message.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

async fn run_detail(
    repo: Arc<MovieRepository<TmdbClient>>,
    movie_id: u64,
    image_base: &str,
) -> anyhow::Result<ExitCode> {
    let controller = DetailController::new(repo);
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let work = controller.initialize(movie_id, &cancel);
    observe(controller.subscribe(), work, |s| render::detail_screen(s, image_base)).await;

    if cancel.is_cancelled() || controller.state().error_message.is_some() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
