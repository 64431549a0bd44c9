//! Command-line interface parsing and handling
//!
//! Each subcommand maps onto one client call and prints the backend's reply
//! as JSON on stdout.

pub mod chat_file;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::api::images::ImageFile;
use crate::api::{ApiClient, ApiError, RawResponse, SearchQuery};
use crate::core::chat::Chat;
use crate::core::config::Config;
use crate::core::settings::Settings;
use crate::utils::logging::init_tracing;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\ncommit: ",
    env!("VERGEN_GIT_SHA"),
    "\nbuilt: ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    "\nrustc: ",
    env!("VERGEN_RUSTC_SEMVER"),
);

#[derive(Parser)]
#[command(name = "gpteng")]
#[command(version, long_version = LONG_VERSION)]
#[command(about = "Talk to a gpt-engineer backend from the terminal")]
#[command(
    long_about = "gpteng drives the gpt-engineer backend's HTTP API: project settings, \
the knowledge index, chats, code generation runs, profiles and image uploads.\n\n\
Every request carries the active project's path token as the gpteng_path query \
parameter. The token comes from --gpteng-path, the configured launch-url, or the \
settings cached by the last successful 'gpteng settings read'.\n\n\
Environment Variables:\n\
  GPTENG_CONFIG_DIR   Directory holding config.toml\n\
  GPTENG_LOG          Log filter (e.g. gpteng_client=debug), defaults to warn"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides the configured base-url)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Project path token to send with every request
    #[arg(short = 'g', long, global = true, value_name = "PATH")]
    pub gpteng_path: Option<String>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Project lifecycle
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Read or write backend settings
    #[command(subcommand)]
    Settings(SettingsCommand),
    /// Inspect and maintain the knowledge index
    #[command(subcommand)]
    Knowledge(KnowledgeCommand),
    /// Saved chats and chat messages
    #[command(subcommand)]
    Chats(ChatsCommand),
    /// Start code generation from a chat
    #[command(subcommand)]
    Run(RunCommand),
    /// Named configuration profiles
    #[command(subcommand)]
    Profiles(ProfilesCommand),
    /// Image uploads
    #[command(subcommand)]
    Images(ImagesCommand),
    /// Show or change local configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
pub enum ProjectCommand {
    /// Initialize the project at the current path token
    Create,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Fetch settings and refresh the local cache
    Read,
    /// Replace backend settings with a JSON object
    Write {
        /// Settings as a JSON object
        json: String,
    },
}

#[derive(Subcommand)]
pub enum KnowledgeCommand {
    Status,
    Reload,
    /// Re-index one folder
    ReloadFolder { path: String },
    /// Search indexed documents
    Search {
        term: String,
        #[arg(long = "type", value_name = "TYPE")]
        search_type: Option<String>,
        #[arg(long)]
        document_search_type: Option<String>,
        #[arg(long)]
        cutoff_score: Option<f64>,
        #[arg(long)]
        document_count: Option<u32>,
    },
    /// Remove sources from the index
    Delete {
        #[arg(required = true)]
        sources: Vec<String>,
    },
    Keywords,
    SearchKeywords { query: String },
}

#[derive(Subcommand)]
pub enum ChatsCommand {
    List,
    /// Load a saved chat by name
    Load { name: String },
    /// Print a fresh, empty chat
    New,
    /// Append a user message to a chat file, send it, and store the reply
    Send {
        /// Chat file; created when missing
        #[arg(long, value_name = "FILE")]
        chat: PathBuf,
        /// Message text (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },
    /// Save a chat file on the backend
    Save {
        #[arg(long, value_name = "FILE")]
        chat: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum RunCommand {
    Improve {
        #[arg(long, value_name = "FILE")]
        chat: PathBuf,
    },
    Edit {
        #[arg(long, value_name = "FILE")]
        chat: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ProfilesCommand {
    List,
    Load { name: String },
    /// Store a profile given as a JSON value
    Save { name: String, json: String },
    Delete { name: String },
}

#[derive(Subcommand)]
pub enum ImagesCommand {
    /// Upload an image and print the URL it is served from
    Upload { file: PathBuf },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    Show,
    Set { key: String, value: String },
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    if let Commands::Config(command) = &args.command {
        return run_config(command);
    }

    let mut config = Config::load()?;
    if let Some(base_url) = args.base_url.clone() {
        config.base_url = Some(base_url);
    }
    let client = ApiClient::from_config(&config)?;
    if let Some(path) = args.gpteng_path.clone() {
        client.set_gpteng_path(path);
    }

    if let Err(err) = dispatch(&client, args.command).await {
        eprintln!("❌ {err}");
        std::process::exit(1);
    }
    Ok(())
}

fn run_config(command: &ConfigCommand) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match command {
        ConfigCommand::Show => config.print_all(),
        ConfigCommand::Set { key, value } => {
            if let Err(err) = config.set_key(key, value) {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {key} to: {value}");
        }
        ConfigCommand::Unset { key } => {
            if let Err(err) = config.unset_key(key) {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Unset {key}");
        }
    }
    Ok(())
}

async fn dispatch(client: &ApiClient, command: Commands) -> Result<(), Box<dyn Error>> {
    match command {
        Commands::Project(ProjectCommand::Create) => print_raw(client.project().create().await?),
        Commands::Settings(command) => match command {
            SettingsCommand::Read => print_raw(client.settings().read().await?),
            SettingsCommand::Write { json } => {
                let settings: Settings = serde_json::from_str(&json)?;
                print_raw(client.settings().write(&settings).await?)
            }
        },
        Commands::Knowledge(command) => {
            let knowledge = client.knowledge();
            let response = match command {
                KnowledgeCommand::Status => knowledge.status().await?,
                KnowledgeCommand::Reload => knowledge.reload().await?,
                KnowledgeCommand::ReloadFolder { path } => knowledge.reload_folder(&path).await?,
                KnowledgeCommand::Search {
                    term,
                    search_type,
                    document_search_type,
                    cutoff_score,
                    document_count,
                } => {
                    let query = SearchQuery {
                        search_term: Some(term),
                        search_type,
                        document_search_type,
                        cutoff_score,
                        document_count,
                    };
                    knowledge.search(&query).await?
                }
                KnowledgeCommand::Delete { sources } => knowledge.delete(&sources).await?,
                KnowledgeCommand::Keywords => knowledge.keywords().await?,
                KnowledgeCommand::SearchKeywords { query } => {
                    knowledge.search_keywords(&query).await?
                }
            };
            print_raw(response)
        }
        Commands::Chats(command) => run_chats(client, command).await,
        Commands::Run(command) => {
            let response = match command {
                RunCommand::Improve { chat } => {
                    client.run().improve(&chat_file::load(&chat)?).await?
                }
                RunCommand::Edit { chat } => client.run().edit(&chat_file::load(&chat)?).await?,
            };
            print_raw(response)
        }
        Commands::Profiles(command) => {
            let profiles = client.profiles();
            let response = match command {
                ProfilesCommand::List => profiles.list().await?,
                ProfilesCommand::Load { name } => profiles.load(&name).await?,
                ProfilesCommand::Save { name, json } => {
                    let profile: Value = serde_json::from_str(&json)?;
                    profiles.save(&name, &profile).await?
                }
                ProfilesCommand::Delete { name } => profiles.delete(&name).await?,
            };
            print_raw(response)
        }
        Commands::Images(ImagesCommand::Upload { file }) => {
            let url = client.images().upload(ImageFile::from_path(&file).await?).await?;
            println!("{url}");
            Ok(())
        }
        Commands::Config(_) => Ok(()),
    }
}

async fn run_chats(client: &ApiClient, command: ChatsCommand) -> Result<(), Box<dyn Error>> {
    let chats = client.chats();
    match command {
        ChatsCommand::List => print_json(&chats.list().await?),
        ChatsCommand::Load { name } => print_json(&chats.load_chat(&name).await?),
        ChatsCommand::New => print_json(&chats.new_chat()),
        ChatsCommand::Send { chat, message } => {
            let mut conversation: Chat = chat_file::load_or_new(&chat)?;
            conversation.push_user(message.join(" "));
            match chats.message(&mut conversation).await {
                Ok(updated) => {
                    if let Some(reply) = updated.last_message() {
                        match reply.text() {
                            Some(text) => println!("{text}"),
                            None => print_json(&reply.content)?,
                        }
                    }
                }
                Err(err) => return Err(describe_send_failure(err).into()),
            }
            chat_file::save(&chat, &conversation)
        }
        ChatsCommand::Save { chat } => print_raw(chats.save(&chat_file::load(&chat)?).await?),
    }
}

fn describe_send_failure(err: ApiError) -> String {
    if err.is_retryable() {
        format!("{err} (the backend may be busy; try again)")
    } else {
        err.to_string()
    }
}

fn print_raw(response: RawResponse) -> Result<(), Box<dyn Error>> {
    print_json(&response.data)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
