use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docbrowse::collaborators::LoggingNavigator;
use docbrowse::types::{LoadPhase, SCREEN_TITLE};
use docbrowse::{config, FileListController, HttpListFetcher};

#[derive(Parser, Debug)]
#[command(name = "docbrowse", version, about = "Browse the documents served by a file server")]
struct Args {
    /// Server root, overrides server.base_url
    #[arg(long)]
    base_url: Option<String>,

    /// Open this file in the viewer after loading
    #[arg(long)]
    select: Option<String>,

    /// Print the list state as JSON
    #[arg(long)]
    json: bool,

    /// Print counters in Prometheus text format before exiting
    #[arg(long)]
    metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logging (stderr + daily file rotation under ./logs); stdout carries the list
    std::fs::create_dir_all("logs").ok();
    let (console_nb, console_guard) = tracing_appender::non_blocking(std::io::stderr());
    let file_appender = tracing_appender::rolling::daily("logs", "docbrowse.log");
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(console_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    // Keep guards alive so the non-blocking writers flush
    let _log_guards = (console_guard, file_guard);

    let args = Args::parse();

    // Load configuration (embedded defaults -> docbrowse.toml -> env/.env), CLI last
    let app_cfg = config::load_with(args.base_url.as_deref())?;

    let fetcher = match &app_cfg.fetch.user_agent {
        Some(ua) => HttpListFetcher::with_user_agent(ua)?,
        None => HttpListFetcher::new(),
    };
    let controller = FileListController::from_config(&app_cfg, Arc::new(fetcher), Arc::new(LoggingNavigator));
    info!("Loading file list from {}", controller.layout().listing_url());
    controller.activate();

    let state = tokio::select! {
        state = controller.settled() => state,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted. Unmounting...");
            controller.unmount();
            controller.snapshot()
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{}", SCREEN_TITLE);
        for item in controller.items() {
            println!("  {}  [{}]", item.name, item.thumbnail_url);
        }
        if state.phase == LoadPhase::LoadFailed {
            if let Some(err) = &state.last_error {
                println!("(list could not be loaded: {})", err);
            }
        }
    }

    if let Some(name) = args.select.as_deref() {
        match controller.select_by_name(name) {
            Some(request) => println!("{} -> {}", request.route, request.document_url),
            None => warn!("{} is not in the list", name),
        }
    }

    if args.metrics {
        print!("{}", controller.metrics().get_snapshot().to_prometheus());
    }

    controller.unmount();
    Ok(())
}
