use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use swapi_browser::config::Config;
use swapi_browser::render;
use swapi_browser::swapi::{format_api_error, SwapiClient};
use swapi_browser::RecordStore;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Browse Star Wars API characters
#[derive(Parser, Debug)]
#[command(name = "swapi-browser", version, about, long_about = None)]
struct Args {
    /// API root (overrides SWAPI_BASE_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List one page of characters
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Only characters whose name matches
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show a single character
    Show {
        /// Character id (last segment of its URL)
        id: String,

        /// Also print details of every linked resource
        #[arg(long)]
        details: bool,
    },
    /// Edit a character in memory and print the result
    Edit {
        /// Character id (last segment of its URL)
        id: String,

        /// Attribute edit, e.g. --set eye_color=blue
        #[arg(long = "set", value_parser = parse_attribute_edit)]
        set: Vec<(String, String)>,

        /// Rename a linked resource, e.g. --rename https://swapi.dev/api/planets/1/=Tatooine
        #[arg(long = "rename", value_parser = parse_rename)]
        rename: Vec<(String, String)>,
    },
    /// Persist settings
    Config {
        /// API root to store in the config file
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn parse_attribute_edit(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))
}

// URLs may contain '=', names are split off the last one
fn parse_rename(s: &str) -> Result<(String, String), String> {
    s.rsplit_once('=')
        .map(|(url, name)| (url.trim().to_string(), name.to_string()))
        .ok_or_else(|| format!("expected URL=NAME, got '{}'", s))
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("swapi-browser started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("swapi-browser").join("swapi-browser.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".swapi-browser").join("swapi-browser.log");
    }
    PathBuf::from("swapi-browser.log")
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    if let Err(err) = run(args).await {
        eprintln!("Error: {}", format_api_error(&err));
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = Config::load();

    if let Command::Config { base_url } = &args.command {
        if let Some(base_url) = base_url {
            SwapiClient::new(base_url)?;
            config.set_base_url(base_url)?;
        }
        println!("base_url = {}", config.effective_base_url(None));
        return Ok(());
    }

    let base_url = config.effective_base_url(args.base_url.as_deref());
    tracing::info!("Using API at {}", base_url);
    let store = RecordStore::new(SwapiClient::new(&base_url)?);

    match args.command {
        Command::List { page, search } => list(&store, page, &search, args.json).await,
        Command::Show { id, details } => show(&store, &id, details, args.json).await,
        Command::Edit { id, set, rename } => edit(&store, &id, &set, &rename, args.json).await,
        Command::Config { .. } => Ok(()),
    }
}

async fn list(store: &RecordStore, page: u32, search: &str, json: bool) -> Result<()> {
    store.reset_page();
    store.fetch_page(page, search).await;

    if let Some(message) = store.last_error() {
        return Err(anyhow::anyhow!(message));
    }

    let records = store.characters();
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No characters found.");
    }
    for record in &records {
        println!("{}", render::render_card(store, record));
    }
    println!("{}", render::render_footer(store, page));
    Ok(())
}

async fn show(store: &RecordStore, id: &str, details: bool, json: bool) -> Result<()> {
    let record = store
        .load_record(id)
        .await
        .context("Failed to load character data")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", render::render_detail(store, &record, details));
    }
    Ok(())
}

async fn edit(
    store: &RecordStore,
    id: &str,
    set: &[(String, String)],
    rename: &[(String, String)],
    json: bool,
) -> Result<()> {
    let mut record = store
        .load_record(id)
        .await
        .context("Failed to load character data")?;

    for (field, value) in set {
        record.character.set_attribute(field, value)?;
    }
    store.update_record(record.clone());

    for (url, name) in rename {
        if !record.resources.contains_key(url) {
            return Err(anyhow::anyhow!("{} is not linked from {}", url, record.character.name));
        }
        let Some(mut resource) = render::lookup(store, &record, url) else {
            return Err(anyhow::anyhow!("{} could not be resolved", url));
        };
        resource.rename(name);
        store.update_resource_data(url, resource);
    }

    let record = store.get_record(id).unwrap_or(record);
    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Character data saved (in memory only).");
        print!("{}", render::render_detail(store, &record, false));
    }
    Ok(())
}
