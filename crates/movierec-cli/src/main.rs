//! movierec - terminal movie discovery client.

/// Application configuration (TOML).
mod config;
/// Terminal UI.
mod tui;

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{
    API_URL_ENV, AppConfig, resolve_api_url, resolve_config_path, resolve_data_dir,
    resolve_log_path, resolve_session_path,
};
use crate::tui::widgets::{genre_text, rating_text, release_year};
use movierec_api::{
    ApiClient, Envelope, FileSessionStore, ListMoviesParams, LoginRequest, MemorySessionStore,
    Movie, MovieApi, Navigator, RatingEntry, RecordingNavigator, RegisterRequest,
    SessionContext, SessionStore, WatchlistEntry, login_and_persist, logout_and_clear,
    normalize_base_url, refresh_and_persist, register_and_persist,
};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// API root (overrides `MOVIEREC_API_URL` and the config file).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Keep the session in memory only.
    #[arg(long, global = true)]
    no_persist: bool,

    /// Subcommand to run (default: tui).
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse movies interactively.
    Tui,
    /// Log in, register, and manage the session.
    Auth(AuthCommand),
    /// Query the movie catalog.
    Movies(MoviesCommand),
    /// Show personalized recommendations.
    Recommend,
    /// Manage the watchlist.
    Watchlist(WatchlistCommand),
    /// Manage ratings.
    Ratings(RatingsCommand),
    /// Manage the config file.
    Config(ConfigCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a default config file (uses `--api-url` when given).
    Init(InitArgs),
    /// Show the effective configuration.
    Show,
}

/// Arguments for the `config init` subcommand.
#[derive(clap::Args)]
struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

/// Arguments for the `auth` subcommand.
#[derive(clap::Args)]
struct AuthCommand {
    /// Auth subcommand to run.
    #[command(subcommand)]
    command: AuthSubcommands,
}

/// Available auth subcommands.
#[derive(Subcommand)]
enum AuthSubcommands {
    /// Log in and store the session.
    Login(LoginArgs),
    /// Create an account and store the session.
    Register(RegisterArgs),
    /// Log out and remove the stored session.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// Renew the access token with the stored refresh token.
    Refresh,
}

/// Arguments for the `auth login` subcommand.
#[derive(clap::Args)]
struct LoginArgs {
    /// Username.
    #[arg(long, required = true)]
    username: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
}

/// Arguments for the `auth register` subcommand.
#[derive(clap::Args)]
struct RegisterArgs {
    /// Username.
    #[arg(long, required = true)]
    username: String,
    /// Email address.
    #[arg(long, required = true)]
    email: String,
    /// Password.
    #[arg(long, required = true)]
    password: String,
    /// Given name.
    #[arg(long, default_value = "")]
    first_name: String,
    /// Family name.
    #[arg(long, default_value = "")]
    last_name: String,
}

/// Arguments for the `movies` subcommand.
#[derive(clap::Args)]
struct MoviesCommand {
    /// Movies subcommand to run.
    #[command(subcommand)]
    command: MoviesSubcommands,
}

/// Available movies subcommands.
#[derive(Subcommand)]
enum MoviesSubcommands {
    /// List movies with optional filters.
    List(ListArgs),
    /// Show one movie.
    Show(IdArgs),
    /// Search movies by title.
    Search(SearchArgs),
    /// List genres.
    Genres,
    /// List movies similar to one movie.
    Similar(SimilarArgs),
    /// List popular movies.
    Popular(PageArgs),
    /// List top-rated movies.
    TopRated(PageArgs),
}

/// Arguments for the `movies list` subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// Genre name filter.
    #[arg(long)]
    genre: Option<String>,
    /// Release year filter.
    #[arg(long)]
    year: Option<u32>,
    /// Minimum vote average.
    #[arg(long)]
    min_rating: Option<f64>,
    /// Title filter.
    #[arg(long)]
    search: Option<String>,
    /// Ordering key (e.g. "-popularity").
    #[arg(long)]
    ordering: Option<String>,
}

/// A movie route ID (TMDB ID when known).
#[derive(clap::Args)]
struct IdArgs {
    /// Movie ID.
    id: u64,
}

/// Arguments for the `movies search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search query.
    query: String,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `movies similar` subcommand.
#[derive(clap::Args)]
struct SimilarArgs {
    /// Movie ID.
    id: u64,
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// A result page.
#[derive(clap::Args)]
struct PageArgs {
    /// Result page.
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `watchlist` subcommand.
#[derive(clap::Args)]
struct WatchlistCommand {
    /// Watchlist subcommand to run.
    #[command(subcommand)]
    command: WatchlistSubcommands,
}

/// Available watchlist subcommands.
#[derive(Subcommand)]
enum WatchlistSubcommands {
    /// List watchlist entries.
    List(PageArgs),
    /// Add a movie by backend ID.
    Add(MovieIdArgs),
    /// Remove a watchlist entry by entry ID.
    Remove(EntryIdArgs),
}

/// A backend movie primary key.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// Backend movie ID.
    movie_id: u64,
}

/// A watchlist entry ID.
#[derive(clap::Args)]
struct EntryIdArgs {
    /// Watchlist entry ID.
    entry_id: u64,
}

/// Arguments for the `ratings` subcommand.
#[derive(clap::Args)]
struct RatingsCommand {
    /// Ratings subcommand to run.
    #[command(subcommand)]
    command: RatingsSubcommands,
}

/// Available ratings subcommands.
#[derive(Subcommand)]
enum RatingsSubcommands {
    /// List the user's ratings.
    List(PageArgs),
    /// Rate a movie by backend ID.
    Add(RateArgs),
    /// Delete a rating by rating ID.
    Remove(RatingIdArgs),
}

/// A rating ID.
#[derive(clap::Args)]
struct RatingIdArgs {
    /// Rating ID (see `ratings list`).
    rating_id: u64,
}

/// Arguments for the `ratings add` subcommand.
#[derive(clap::Args)]
struct RateArgs {
    /// Backend movie ID.
    movie_id: u64,
    /// Rating from 1 to 10.
    #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
    rating: u8,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    shell: Shell,
}

/// Shared state for subcommands that talk to the backend.
struct Backend {
    client: ApiClient,
    session: SessionContext,
    config: AppConfig,
}

/// Loads config and session, then builds the API client.
///
/// # Errors
///
/// Returns an error if paths cannot be resolved, the config is invalid,
/// or the client fails to build.
fn build_backend(cli: &Cli, navigator: Option<Arc<dyn Navigator>>) -> Result<Backend> {
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let store: Arc<dyn SessionStore> = if cli.no_persist {
        Arc::new(MemorySessionStore::new())
    } else {
        let data_dir =
            resolve_data_dir(cli.dir.as_ref()).context("failed to resolve data dir")?;
        Arc::new(FileSessionStore::new(resolve_session_path(&data_dir)))
    };
    let session = SessionContext::new(store);

    let env_url = std::env::var(API_URL_ENV).ok();
    let base_url = resolve_api_url(cli.api_url.as_deref(), env_url.as_deref(), &config)
        .context("invalid API URL")?;

    let mut builder = ApiClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .session(session.clone());
    if let Some(navigator) = navigator {
        builder = builder.navigator(navigator);
    }
    let client = builder.build().context("failed to build API client")?;

    Ok(Backend {
        client,
        session,
        config,
    })
}

/// Logs a movie table.
fn log_movies(movies: &[Movie]) {
    tracing::info!("ID\tTMDB\tYear\t\tRating\tTitle\t\t\tGenres");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t\t{}\t{}\t\t\t{}",
            movie.id,
            movie
                .tmdb_id
                .map_or_else(|| String::from("-"), |id| id.to_string()),
            release_year(movie),
            rating_text(movie.vote_average),
            movie.title,
            genre_text(&movie.genres),
        );
    }
}

/// Logs the movies of a list response, its message, and its pagination.
fn log_envelope(envelope: &Envelope, page: u32) {
    let movies = envelope.movies();
    if movies.is_empty() {
        tracing::info!("{}", envelope.message().unwrap_or("No movies found."));
        return;
    }
    log_movies(&movies);
    let pagination = envelope.pagination(page);
    if pagination.controls_visible() {
        tracing::info!(
            "{} (total: {} movies)",
            pagination.label(),
            envelope.total_count()
        );
    } else {
        tracing::info!("Total: {} movies", movies.len());
    }
}

/// Runs the `tui` subcommand.
///
/// # Errors
///
/// Returns an error if setup or the TUI fails.
#[instrument(skip_all)]
async fn run_tui(cli: &Cli) -> Result<()> {
    let navigator = RecordingNavigator::new();
    let backend = build_backend(cli, Some(Arc::new(navigator.clone())))?;
    tracing::info!(
        api_url = %backend.client.base_url(),
        authenticated = backend.session.is_authenticated(),
        "launching TUI"
    );
    crate::tui::run_tui(
        Arc::new(backend.client),
        backend.session,
        navigator,
        backend.config.ui,
    )
    .await
    .context("TUI failed")
}

/// Runs the `auth` subcommands.
///
/// # Errors
///
/// Returns an error if the backend rejects the request or the session
/// cannot be stored.
#[instrument(skip_all)]
async fn run_auth(cli: &Cli, command: &AuthSubcommands) -> Result<()> {
    let Backend {
        client, session, ..
    } = build_backend(cli, None)?;
    match command {
        AuthSubcommands::Login(args) => {
            let credentials = LoginRequest {
                username: args.username.clone(),
                password: args.password.clone(),
            };
            let response = login_and_persist(&client, &session, &credentials)
                .await
                .context("login failed")?;
            tracing::info!("Logged in as {}", response.user.display_name());
        }
        AuthSubcommands::Register(args) => {
            let form = RegisterRequest {
                username: args.username.clone(),
                email: args.email.clone(),
                password: args.password.clone(),
                first_name: args.first_name.clone(),
                last_name: args.last_name.clone(),
            };
            let response = register_and_persist(&client, &session, &form)
                .await
                .context("registration failed")?;
            tracing::info!("Registered and logged in as {}", response.user.username);
        }
        AuthSubcommands::Logout => {
            if !session.is_authenticated() {
                tracing::info!("Not logged in.");
                return Ok(());
            }
            logout_and_clear(&client, &session)
                .await
                .context("failed to clear session")?;
            tracing::info!("Logged out.");
        }
        AuthSubcommands::Whoami => {
            let user = client.profile().await.context("failed to fetch profile")?;
            tracing::info!("ID:       {}", user.id);
            tracing::info!("Username: {}", user.username);
            tracing::info!("Name:     {}", user.display_name());
            let email = if user.email.is_empty() {
                "-"
            } else {
                user.email.as_str()
            };
            tracing::info!("Email:    {email}");
            tracing::info!("Joined:   {}", user.date_joined.as_deref().unwrap_or("-"));
        }
        AuthSubcommands::Refresh => {
            refresh_and_persist(&client, &session)
                .await
                .context("failed to refresh token")?;
            tracing::info!("Access token renewed.");
        }
    }
    Ok(())
}

/// Runs the `movies` subcommands.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_movies(cli: &Cli, command: &MoviesSubcommands) -> Result<()> {
    let client = build_backend(cli, None)?.client;
    match command {
        MoviesSubcommands::List(args) => {
            let mut params = ListMoviesParams::new().page(args.page);
            if let Some(ref genre) = args.genre {
                params = params.genre(genre.clone());
            }
            if let Some(year) = args.year {
                params = params.year(year);
            }
            if let Some(rating) = args.min_rating {
                params = params.min_rating(rating);
            }
            if let Some(ref search) = args.search {
                params = params.search(search.clone());
            }
            if let Some(ref ordering) = args.ordering {
                params = params.ordering(ordering.clone());
            }
            let envelope = client
                .list_movies(&params)
                .await
                .context("failed to list movies")?;
            log_envelope(&envelope, args.page);
        }
        MoviesSubcommands::Show(args) => {
            let movie = client
                .movie(args.id)
                .await
                .with_context(|| format!("failed to fetch movie {}", args.id))?;
            log_movie_details(&movie);
        }
        MoviesSubcommands::Search(args) => {
            let query = crate::tui::search::normalize_query(&args.query);
            anyhow::ensure!(!query.is_empty(), "search query is empty");
            let envelope = client
                .search(&query, args.page)
                .await
                .context("failed to search movies")?;
            log_envelope(&envelope, args.page);
        }
        MoviesSubcommands::Genres => {
            let genres = client.genres().await.context("failed to list genres")?;
            tracing::info!("ID\tTMDB\tName");
            for genre in &genres {
                tracing::info!(
                    "{}\t{}\t{}",
                    genre.id,
                    genre
                        .tmdb_id
                        .map_or_else(|| String::from("-"), |id| id.to_string()),
                    genre.name,
                );
            }
            tracing::info!("Total: {} genres", genres.len());
        }
        MoviesSubcommands::Similar(args) => {
            let envelope = client
                .movie_recommendations(args.id, args.page)
                .await
                .with_context(|| format!("failed to fetch movies similar to {}", args.id))?;
            log_envelope(&envelope, args.page);
        }
        MoviesSubcommands::Popular(args) => {
            let envelope = client
                .popular(args.page)
                .await
                .context("failed to fetch popular movies")?;
            log_envelope(&envelope, args.page);
        }
        MoviesSubcommands::TopRated(args) => {
            let envelope = client
                .top_rated(args.page)
                .await
                .context("failed to fetch top-rated movies")?;
            log_envelope(&envelope, args.page);
        }
    }
    Ok(())
}

/// Logs every known field of one movie.
fn log_movie_details(movie: &Movie) {
    tracing::info!("Title:     {}", movie.title);
    if let Some(ref original) = movie.original_title {
        tracing::info!("Original:  {original}");
    }
    tracing::info!("ID:        {} (route {})", movie.id, movie.route_id());
    tracing::info!("Year:      {}", release_year(movie));
    tracing::info!(
        "Rating:    {} ({} votes)",
        rating_text(movie.vote_average),
        movie
            .vote_count
            .map_or_else(|| String::from("-"), |v| v.to_string())
    );
    tracing::info!(
        "Runtime:   {}",
        movie
            .runtime
            .map_or_else(|| String::from("-"), |m| format!("{m} min"))
    );
    tracing::info!("Genres:    {}", genre_text(&movie.genres));
    tracing::info!("Poster:    {}", movie.poster().unwrap_or("-"));
    tracing::info!(
        "Overview:  {}",
        movie.overview.as_deref().unwrap_or("No description available.")
    );
}

/// Runs the `recommend` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_recommend(cli: &Cli) -> Result<()> {
    let client = build_backend(cli, None)?.client;
    let envelope = client
        .user_recommendations()
        .await
        .context("failed to fetch recommendations")?;
    log_envelope(&envelope, 1);
    Ok(())
}

/// Runs the `watchlist` subcommands.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_watchlist(cli: &Cli, command: &WatchlistSubcommands) -> Result<()> {
    let client = build_backend(cli, None)?.client;
    match command {
        WatchlistSubcommands::List(args) => {
            let envelope = client
                .watchlist(args.page)
                .await
                .context("failed to fetch watchlist")?;
            let entries: Vec<WatchlistEntry> = envelope.entries();
            tracing::info!("Entry\tMovie\tAdded\t\t\t\tTitle");
            for entry in &entries {
                tracing::info!(
                    "{}\t{}\t{}\t{}",
                    entry.id,
                    entry.movie.id,
                    entry.added_at.as_deref().unwrap_or("-"),
                    entry.movie.title,
                );
            }
            tracing::info!("Total: {} entries", envelope.total_count());
        }
        WatchlistSubcommands::Add(args) => {
            let entry = client
                .add_to_watchlist(args.movie_id)
                .await
                .with_context(|| format!("failed to add movie {} to watchlist", args.movie_id))?;
            tracing::info!("Added \"{}\" (entry {})", entry.movie.title, entry.id);
        }
        WatchlistSubcommands::Remove(args) => {
            client
                .remove_from_watchlist(args.entry_id)
                .await
                .with_context(|| format!("failed to remove watchlist entry {}", args.entry_id))?;
            tracing::info!("Removed watchlist entry {}", args.entry_id);
        }
    }
    Ok(())
}

/// Runs the `ratings` subcommands.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_ratings(cli: &Cli, command: &RatingsSubcommands) -> Result<()> {
    let client = build_backend(cli, None)?.client;
    match command {
        RatingsSubcommands::List(args) => {
            let envelope = client
                .ratings(args.page)
                .await
                .context("failed to fetch ratings")?;
            let entries: Vec<RatingEntry> = envelope.entries();
            tracing::info!("ID\tRating\tMovie\tUpdated\t\t\t\tTitle");
            for entry in &entries {
                tracing::info!(
                    "{}\t{}\t{}\t{}\t{}",
                    entry.id,
                    entry.rating,
                    entry.movie.id,
                    entry
                        .updated_at
                        .as_deref()
                        .or(entry.created_at.as_deref())
                        .unwrap_or("-"),
                    entry.movie.title,
                );
            }
            tracing::info!("Total: {} ratings", envelope.total_count());
        }
        RatingsSubcommands::Add(args) => {
            let entry = client
                .rate_movie(args.movie_id, args.rating)
                .await
                .with_context(|| format!("failed to rate movie {}", args.movie_id))?;
            tracing::info!("Rated \"{}\" {}/10", entry.movie.title, entry.rating);
        }
        RatingsSubcommands::Remove(args) => {
            client
                .delete_rating(args.rating_id)
                .await
                .with_context(|| format!("failed to delete rating {}", args.rating_id))?;
            tracing::info!("Deleted rating {}", args.rating_id);
        }
    }
    Ok(())
}

/// Runs the `config` subcommands.
///
/// # Errors
///
/// Returns an error if the config cannot be resolved, read, or written.
#[instrument(skip_all)]
fn run_config(cli: &Cli, command: &ConfigSubcommands) -> Result<()> {
    let config_path =
        resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    match command {
        ConfigSubcommands::Init(args) => {
            anyhow::ensure!(
                args.force || !config_path.exists(),
                "config already exists: {} (use --force to overwrite)",
                config_path.display()
            );
            let mut config = AppConfig::default();
            if let Some(ref raw) = cli.api_url {
                let url = normalize_base_url(raw).context("invalid API URL")?;
                config.api.base_url = Some(url.to_string());
            }
            config.save(&config_path)?;
            tracing::info!("Wrote {}", config_path.display());
        }
        ConfigSubcommands::Show => {
            let config = AppConfig::load(&config_path).context("failed to load config")?;
            let env_url = std::env::var(API_URL_ENV).ok();
            let base_url = resolve_api_url(cli.api_url.as_deref(), env_url.as_deref(), &config)
                .context("invalid API URL")?;
            let data_dir =
                resolve_data_dir(cli.dir.as_ref()).context("failed to resolve data dir")?;
            tracing::info!("Config:          {}", config_path.display());
            tracing::info!("API URL:         {base_url}");
            tracing::info!("Session file:    {}", resolve_session_path(&data_dir).display());
            tracing::info!("TUI log:         {}", resolve_log_path(&data_dir).display());
            tracing::info!("Slider interval: {}s", config.ui.slider_interval().as_secs());
            tracing::info!("Card overview:   {} chars", config.ui.description_limit);
        }
    }
    Ok(())
}

/// Writes a completion script to stdout.
///
/// # Errors
///
/// Never fails; kept fallible to match the other subcommands.
fn run_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(args.shell, &mut command, env!("CARGO_BIN_NAME"), &mut io::stdout());
    Ok(())
}

/// Opens the TUI log file, creating its directory.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file: {}", path.display()))
}

/// Installs the global subscriber. Logs go to `log_file` when given
/// (the TUI owns the terminal), otherwise to stdout.
fn init_tracing(log_file: Option<File>) {
    let ansi = log_file.is_none();
    let writer = log_file.map_or_else(
        || BoxMakeWriter::new(io::stdout),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    #[cfg(not(feature = "otel"))]
    {
        tracing_subscriber::fmt()
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

    let log_file = match cli.command {
        None | Some(Commands::Tui) => {
            let data_dir =
                resolve_data_dir(cli.dir.as_ref()).context("failed to resolve data dir")?;
            Some(open_log_file(&resolve_log_path(&data_dir))?)
        }
        Some(_) => None,
    };
    init_tracing(log_file);

    match cli.command {
        None | Some(Commands::Tui) => run_tui(&cli).await,
        Some(Commands::Auth(ref auth)) => run_auth(&cli, &auth.command).await,
        Some(Commands::Movies(ref movies)) => run_movies(&cli, &movies.command).await,
        Some(Commands::Recommend) => run_recommend(&cli).await,
        Some(Commands::Watchlist(ref watchlist)) => run_watchlist(&cli, &watchlist.command).await,
        Some(Commands::Ratings(ref ratings)) => run_ratings(&cli, &ratings.command).await,
        Some(Commands::Config(ref config)) => run_config(&cli, &config.command),
        Some(Commands::Completions(ref args)) => run_completions(args),
    }
}
