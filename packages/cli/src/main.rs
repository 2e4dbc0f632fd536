//! CLI entry point for the notes client.
//!
//! Signs in against the notes service, keeps the session on disk, and lists or
//! creates notes, either one command at a time or from an interactive shell.

mod render;
mod shell;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use api::HttpClient;
use clap::{Parser, Subcommand};
use store::{ClientConfig, FileStore, Locale};
use tracing_subscriber::EnvFilter;
use ui::{Messages, NotesOutcome, SignInForm, SignUpForm, ViewRouter};

type Router = ViewRouter<FileStore, HttpClient>;

/// notes: terminal client for the notes service
#[derive(Parser)]
#[command(name = "notes")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/notes-client/notes-client.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the notes service
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory holding the saved session
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Message language (en, es)
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current view
    Status,

    /// Sign in with an existing account
    Login {
        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        user: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the saved session
    Logout,

    /// Work with the signed-in user's notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Interactive shell (default)
    Shell,

    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List notes
    List,

    /// Create a note
    Add {
        /// Note text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let path = config_path(&cli);
    let config = resolve_config(&cli)?;
    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Config { command } => run_config(&path, &config, &command)?,
        Commands::Status => print!("{}", render::view(&open(&config).await)),
        Commands::Login { user, password } => {
            let mut router = open(&config).await;
            let outcome = router
                .submit_sign_in(&SignInForm::new(user, password))
                .await?;
            if let Some(error) = outcome.error_message() {
                bail!("{error}");
            }
            print!("{}", render::view(&router));
        }
        Commands::Register {
            name,
            user,
            password,
        } => {
            let mut router = open(&config).await;
            let outcome = router
                .submit_sign_up(&SignUpForm::new(name, user, password))
                .await?;
            if let Some(error) = outcome.error_message() {
                bail!("{error}");
            }
            print!("{}", render::view(&router));
        }
        Commands::Logout => {
            let mut router = open(&config).await;
            router
                .logout()
                .await
                .context("failed to remove the saved session")?;
            print!("{}", render::view(&router));
        }
        Commands::Notes { command } => run_notes(&open(&config).await, command).await?,
        Commands::Shell => shell::run(&mut open(&config).await).await?,
    }

    Ok(())
}

/// Build the client and restore the saved session.
async fn open(config: &ClientConfig) -> Router {
    let messages = Messages::for_locale(config.ui.locale);
    let api = HttpClient::new(&config.api.base_url);
    let store = ui::make_store(config);
    tracing::debug!(
        base_url = %config.api.base_url,
        data_dir = %store.base().display(),
        "starting"
    );
    ViewRouter::start(store, api, messages).await
}

async fn run_notes(router: &Router, command: NotesCommand) -> Result<()> {
    let Some(dashboard) = router.dashboard() else {
        bail!("not signed in; run `notes login` first");
    };

    // Mounting the dashboard already fetched the list
    let outcome = match command {
        NotesCommand::List => None,
        NotesCommand::Add { text } => Some(dashboard.create(&text).await),
    };
    if let Some(error) = outcome.as_ref().and_then(NotesOutcome::error_message) {
        bail!("{error}");
    }
    if let Some(error) = dashboard.request_state().error {
        bail!("{error}");
    }
    print!("{}", render::view(router));
    Ok(())
}

fn run_config(path: &Path, config: &ClientConfig, command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("# {}", path.display());
            print!("{}", config.to_toml().context("failed to serialise config")?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            config
                .save(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(ui::APP_DIR)
        .join(ClientConfig::filename())
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(default_config_path)
}

/// Defaults, then the config file, then the environment, then flags.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let path = config_path(cli);
    let mut config = ClientConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?
        .with_env_overrides();

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.storage.dir = dir.display().to_string();
    }
    if let Some(tag) = &cli.locale {
        config.ui.locale =
            Locale::from_tag(tag).with_context(|| format!("unsupported locale: {tag}"))?;
    }
    Ok(config)
}
