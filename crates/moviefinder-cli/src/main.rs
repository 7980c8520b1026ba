//! moviefinder - terminal movie discovery over the TMDB API.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use moviefinder_api::tmdb::{MAX_PAGE, Movie, TmdbClient};
use moviefinder_browse::{BrowseController, FetchError, FetchStatus};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, TmdbConfig, resolve_config_path, resolve_log_path};
use crate::tui::run_browser;

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response language (e.g. "en-US"), overrides the config file.
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run (default: browse).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies interactively.
    Browse,
    /// Search movies by title.
    Search(SearchArgs),
    /// List popular movies.
    Discover(DiscoverArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query (empty lists popular movies).
    #[arg(long)]
    query: String,

    /// Result page.
    #[arg(long, default_value_t = 1, value_parser = page_parser())]
    page: u32,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
struct DiscoverArgs {
    /// Result page.
    #[arg(long, default_value_t = 1, value_parser = page_parser())]
    page: u32,
}

/// Accepts the pages TMDB will serve.
fn page_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE))
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set, the configured base URL
/// is invalid, or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(tmdb: &TmdbConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    let mut builder = TmdbClient::builder().api_token(api_token).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = tmdb.parsed_base_url()? {
        builder = builder.base_url(base_url);
    }

    builder.build().context("failed to build TMDB client")
}

/// Creates a controller from the loaded configuration.
fn new_controller(config: &AppConfig) -> BrowseController {
    BrowseController::new(config.browse.quiet_period())
        .with_language(config.tmdb.language.clone())
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the terminal fails.
#[instrument(skip_all)]
async fn run_browse(config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(&config.tmdb)?;
    tracing::info!(base_url = %client.base_url(), "Starting movie browser");
    run_browser(&client, new_controller(config)).await
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(&config.tmdb)?;
    run_listing(&client, new_controller(config), &args.query, args.page).await
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if the TMDB client fails to build or the request fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, config: &AppConfig) -> Result<()> {
    let client = build_tmdb_client(&config.tmdb)?;
    run_listing(&client, new_controller(config), "", args.page).await
}

/// Fetches one page through the controller and logs it as a table.
///
/// Pages beyond the first are requested once the first response has
/// reported the total, so out-of-range pages land on the last one.
///
/// # Errors
///
/// Returns an error carrying the user-facing message if a request fails.
async fn run_listing(
    client: &TmdbClient,
    mut controller: BrowseController,
    query: &str,
    page: u32,
) -> Result<()> {
    controller.input(query, Instant::now());
    let ticket = controller
        .submit()
        .or_else(|| controller.start())
        .context("no request to send")?;
    controller.fetch(client, &ticket).await;

    if page > 1
        && controller.error_message().is_none()
        && let Some(ticket) = controller.go_to_page(page)
    {
        controller.fetch(client, &ticket).await;
    }

    if let FetchStatus::Failed(error) = controller.status() {
        if matches!(error, FetchError::NoResults(_)) {
            tracing::info!("{error}");
            return Ok(());
        }
        bail!("{error}");
    }

    if controller.page() != page {
        tracing::warn!(
            requested = page,
            total_pages = controller.total_pages(),
            "Requested page is out of range"
        );
    }

    tracing::info!(
        "Page {} of {}",
        controller.page(),
        controller.total_pages()
    );
    tracing::info!("ID\tTitle\t\t\tOrigLang\tVote\tReleaseDate");
    for movie in controller.movies() {
        log_movie_row(movie);
    }

    Ok(())
}

/// Logs one table row.
fn log_movie_row(movie: &Movie) {
    tracing::info!(
        "{}\t{}\t{}\t\t{}\t{}",
        movie.id,
        movie.title.as_deref().unwrap_or("-"),
        movie.original_language.as_deref().unwrap_or("-"),
        movie
            .vote_average
            .map_or_else(|| String::from("-"), |vote| format!("{vote:.1}")),
        movie.release_date.as_deref().unwrap_or("-"),
    );
}

/// Opens the browser log file, creating its directory if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_writer(log_path: &Path) -> Result<BoxMakeWriter> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Installs the global tracing subscriber.
fn init_tracing(writer: BoxMakeWriter, ansi: bool) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(ansi)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.dir.as_ref())?;
    let command = cli.command.unwrap_or(Commands::Browse);

    // The TUI owns the terminal, so the browser logs to a file.
    if matches!(command, Commands::Browse) {
        init_tracing(open_log_writer(&resolve_log_path(&config_path))?, false);
    } else {
        init_tracing(
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        );
    }

    let mut config = AppConfig::load(&config_path)?;
    if let Some(language) = cli.language {
        config.tmdb.language = Some(language);
    }

    match command {
        Commands::Browse => run_browse(&config).await,
        Commands::Search(args) => run_search(&args, &config).await,
        Commands::Discover(args) => run_discover(&args, &config).await,
    }
}
