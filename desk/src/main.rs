mod credentials;
mod edit;
mod list;
mod login;
mod whoami;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use deskapi::types::{SiteUrl, Username};
use tracing_subscriber::EnvFilter;

use crate::credentials::Credentials;
use crate::list::ListArgs;
use crate::login::store::Backend;

#[derive(Parser)]
#[command(
    version,
    about = "desk.com command-line client",
    propagate_version = false,
    disable_help_subcommand = true
)]
struct Cli {
    /// Base URL of the desk.com site, e.g. https://example.desk.com
    #[clap(long, global = true, conflicts_with = "site")]
    url: Option<SiteUrl>,

    /// Name of a hosted site, short for --url=https://{site}.desk.com
    #[clap(long, global = true)]
    site: Option<String>,

    /// Account username
    #[clap(short, long, global = true)]
    username: Option<Username>,

    /// Account password
    #[clap(long, global = true, env = "DESK_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Saved logins file, instead of the default location
    #[clap(long, global = true, env = "DESK_CONFIG")]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remember a desk.com login.
    ///
    /// Stores a username and password for a given desk.com site. The password
    /// is kept in the keyring unless --no-keyring is given.
    Login {
        /// Save password in plaintext instead of the keyring
        #[clap(long)]
        no_keyring: bool,

        /// Read the password from stdin
        #[clap(long)]
        password_stdin: bool,
    },

    /// Forget saved logins
    Logout {},

    /// Show the saved login which would be used
    Whoami {},

    /// List topics
    Topics(ListArgs),

    /// List articles
    Articles(ListArgs),

    /// List the translations of a topic or article
    Translations {
        /// Topic or article, e.g. /api/v2/articles/1
        href: String,
    },

    /// Create a topic
    CreateTopic {
        /// Name of the topic
        name: String,

        /// Allow questions on articles in this topic
        #[clap(long)]
        allow_questions: bool,

        /// Show the topic in the support center
        #[clap(long)]
        in_support_center: bool,
    },

    /// Change fields of a topic, article or translation
    Set {
        /// Object to change, e.g. /api/v2/articles/1
        href: String,

        /// Fields as name=value, where value is JSON or else a string
        #[clap(required = true)]
        fields: Vec<String>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;
    let args = Cli::parse();

    let credentials = Credentials {
        url: args.url,
        site: args.site,
        username: args.username,
        password: args.password,
        config_path: args.config,
    };

    match args.command {
        Commands::Login {
            no_keyring,
            password_stdin,
        } => {
            let backend = if no_keyring {
                Backend::ClearText
            } else {
                Backend::Keyring
            };
            login::cmd::login(credentials, backend, password_stdin)
        }
        Commands::Logout {} => login::cmd::logout(credentials),
        Commands::Whoami {} => whoami::whoami(credentials),
        Commands::Topics(args) => list::topics(credentials.get_api()?, args),
        Commands::Articles(args) => list::articles(credentials.get_api()?, args),
        Commands::Translations { href } => list::translations(credentials.get_api()?, &href),
        Commands::CreateTopic {
            name,
            allow_questions,
            in_support_center,
        } => edit::create_topic(
            credentials.get_api()?,
            name,
            allow_questions,
            in_support_center,
        ),
        Commands::Set { href, fields } => edit::set(credentials.get_api()?, &href, &fields),
    }
}

/// Print log records from this program and the client library to stderr,
/// filtered by `RUST_LOG` (default: warnings only).
fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| eyre!("failed to initialize logging: {e}"))
}
