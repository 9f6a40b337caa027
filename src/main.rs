use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand, ValueEnum};
use gudang_admin::{
    App,
    config::{AppConfig, Env},
    error::{ApiError, ConfigError, NavigationError, StorageError},
    models::{ListParams, ResourceId},
    services::slugs::generate_slug,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("not signed in; run `gudang-admin login` first")]
    NotSignedIn,
    #[error("invalid JSON output: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "gudang-admin", about = "Gudang Grosiran admin client")]
struct Cli {
    /// Overrides GUDANG_STORAGE_PATH for this invocation.
    #[arg(long)]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session.
    Login {
        /// Username or email.
        login: String,
        #[arg(long, env = "GUDANG_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out locally and notify the backend.
    Logout,
    /// Print the persisted session's user.
    Whoami,
    /// Run a navigation through the guard and print where it ended.
    Navigate { path: String },
    /// Read admin resources.
    Resource(ResourceCommand),
    /// Blog slug helpers.
    Slug(SlugCommand),
}

#[derive(Args, Debug)]
struct ResourceCommand {
    #[command(subcommand)]
    command: ResourceSubcommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResourceKind {
    Products,
    Blogs,
    Categories,
    Brands,
    Tags,
    Pages,
    Users,
}

#[derive(Subcommand, Debug)]
enum ResourceSubcommand {
    List {
        kind: ResourceKind,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    Get {
        kind: ResourceKind,
        id: String,
    },
    /// Free-text product search.
    Search { query: String },
}

#[derive(Args, Debug)]
struct SlugCommand {
    #[command(subcommand)]
    command: SlugSubcommand,
}

#[derive(Subcommand, Debug)]
enum SlugSubcommand {
    /// Derive a slug locally, without the backend.
    Local { text: String },
    Generate { title: String },
    Check { slug: String },
    Suggest { title: String },
}

/// main
///
/// 1. Loads `.env` and the configuration.
/// 2. Initializes logging for the environment.
/// 3. Builds the application context and rehydrates the stored session.
/// 4. Runs the requested command.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let mut config = AppConfig::load()?;
    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }

    // 2. Logging, pretty locally and JSON in production. Logs go to stderr so
    // stdout stays machine readable.
    init_tracing(config.env);
    tracing::debug!(api = %config.api_url, "client starting in {:?} mode", config.env);

    // 3. Application Context
    let mut app = App::from_config(config)?;
    app.start()?;

    // 4. Dispatch
    match cli.command {
        Command::Login { login, password } => {
            let session = app.login(&login, &password).await?;
            print_json(&json!({
                "user": session.user,
                "location": app.current_path(),
            }))
        }
        Command::Logout => {
            app.logout().await;
            print_json(&json!({ "location": app.current_path() }))
        }
        Command::Whoami => match app.session() {
            Some(session) => print_json(&session.user),
            None => Err(CliError::NotSignedIn),
        },
        Command::Navigate { path } => {
            let target = app.navigate(&path).await?;
            print_json(&json!({
                "requested": path,
                "location": target.location.full_path,
                "route": target.route.name,
                "view": target.route.view,
                "params": target.params,
                "title": app.document().title(),
                "description": app.document().meta("description"),
            }))?;
            println!("{}", app.document().render());
            Ok(())
        }
        Command::Resource(resource) => run_resource(&app, resource.command).await,
        Command::Slug(slug) => run_slug(&app, slug.command).await,
    }
}

fn init_tracing(env: Env) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gudang_admin=info".into());

    match env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }
}

async fn run_resource(app: &App, command: ResourceSubcommand) -> Result<(), CliError> {
    match command {
        ResourceSubcommand::List {
            kind,
            page,
            per_page,
            search,
        } => {
            let params = ListParams {
                page,
                per_page,
                search,
                extra: Vec::new(),
            };
            let value = match kind {
                ResourceKind::Products => to_json(&app.products().list(&params).await?)?,
                ResourceKind::Blogs => to_json(&app.blogs().list(&params).await?)?,
                ResourceKind::Categories => to_json(&app.categories().list(&params).await?)?,
                ResourceKind::Brands => to_json(&app.brands().list(&params).await?)?,
                ResourceKind::Tags => to_json(&app.tags().list(&params).await?)?,
                ResourceKind::Pages => to_json(&app.pages().list(&params).await?)?,
                ResourceKind::Users => app.users().list(&params).await?,
            };
            print_json(&value)
        }
        ResourceSubcommand::Get { kind, id } => {
            let id = ResourceId::from(id);
            let value = match kind {
                ResourceKind::Products => to_json(&app.products().get(&id).await?)?,
                ResourceKind::Blogs => to_json(&app.blogs().get(&id).await?)?,
                ResourceKind::Categories => to_json(&app.categories().get(&id).await?)?,
                ResourceKind::Brands => to_json(&app.brands().get(&id).await?)?,
                ResourceKind::Tags => to_json(&app.tags().get(&id).await?)?,
                ResourceKind::Pages => to_json(&app.pages().get(&id).await?)?,
                ResourceKind::Users => app.users().get(&id).await?,
            };
            print_json(&value)
        }
        ResourceSubcommand::Search { query } => print_json(&app.products().search(&query).await?),
    }
}

async fn run_slug(app: &App, command: SlugSubcommand) -> Result<(), CliError> {
    let slugs = app.slugs();
    match command {
        SlugSubcommand::Local { text } => print_json(&json!({ "slug": generate_slug(&text) })),
        SlugSubcommand::Generate { title } => {
            print_json(&json!({ "slug": slugs.generate_unique(&title).await }))
        }
        SlugSubcommand::Check { slug } => {
            let available = slugs.check_availability(&slug).await;
            print_json(&json!({ "slug": slug, "available": available }))
        }
        SlugSubcommand::Suggest { title } => {
            print_json(&json!({ "suggestions": slugs.suggestions(&title).await }))
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, CliError> {
    Ok(serde_json::to_value(value)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
