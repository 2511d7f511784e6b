use anyhow::{anyhow, bail, Result};
use blue_user::client::BlueUserApi;
use blue_user::config::BlueUserConfig;
use blue_user::model::BLUE_USER;
use blue_user::module::MODULE_NAME;
use blue_user::BlueUser;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use resource_kit::export::Caller;
use resource_kit::{CapabilityRegistry, ClientHub, Module, ModuleCtx, ModuleCtxBuilder};
use runtime::{AppConfig, LoggingConfig, Section};
use std::path::PathBuf;
use std::sync::Arc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Blue user CLI - export users the way the REST API shows them
#[derive(Parser)]
#[command(name = "blue-user")]
#[command(about = "Blue user CLI - export users the way the REST API shows them")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one user as JSON
    Show {
        /// User id
        id: String,
        /// Principal of the requesting caller (anonymous when omitted)
        #[arg(long)]
        principal: Option<String>,
        /// Permission granted to the caller; repeatable
        #[arg(long = "permission")]
        permissions: Vec<String>,
    },
    /// Print the distinct author names of a change set
    Authors {
        /// Author ids in commit order
        ids: Vec<String>,
    },
    /// List resources registered under a capability tag
    Capabilities {
        #[arg(long, default_value = BLUE_USER)]
        tag: String,
    },
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        if !path.is_file() {
            bail!("config file not found: {}", path.display());
        }
    }
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    let logging = logging_config(&config, cli.verbose);
    runtime::init_logging_from_config(&logging, &config.base_dir_path()?);
    tracing::info!("blue-user starting");

    match cli.command.unwrap_or(Commands::Check) {
        Commands::Show {
            id,
            principal,
            permissions,
        } => {
            let caller = permissions.into_iter().fold(
                principal.map_or_else(Caller::anonymous, Caller::authenticated),
                |caller, p| caller.with_permission(p),
            );
            show_user(config, &id, &caller).await
        }
        Commands::Authors { ids } => show_authors(config, &ids).await,
        Commands::Capabilities { tag } => list_capabilities(&tag),
        Commands::Check => check_config(config),
    }
}

/// Logging from config, or console-only warnings when the config has none.
/// `-v` flags raise the default console level.
fn logging_config(config: &AppConfig, verbose: u8) -> LoggingConfig {
    let mut logging = config.logging.clone().unwrap_or_else(|| {
        let mut l = LoggingConfig::new();
        l.insert(
            "default".to_string(),
            Section {
                console_level: "warn".to_string(),
                file: String::new(),
                file_level: String::new(),
                max_backups: None,
                max_size_mb: None,
            },
        );
        l
    });

    let level = match verbose {
        0 => return logging,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    if let Some(section) = logging.get_mut("default") {
        section.console_level = level.to_string();
    }
    logging
}

fn module_ctx(config: AppConfig, hub: Arc<ClientHub>) -> ModuleCtx {
    ModuleCtxBuilder::new()
        .with_config_provider(Arc::new(config))
        .with_client_hub(hub)
        .build()
        .for_module(MODULE_NAME)
}

async fn init_api(config: AppConfig) -> Result<Arc<dyn BlueUserApi>> {
    let hub = Arc::new(ClientHub::new());
    BlueUser::new().init(&module_ctx(config, hub.clone())).await?;
    Ok(hub.get::<dyn BlueUserApi>()?)
}

async fn show_user(config: AppConfig, id: &str, caller: &Caller) -> Result<()> {
    let api = init_api(config).await?;
    match blue_user::api::rest::handlers::get_user_json(api.as_ref(), id, caller).await {
        Ok(user) => {
            println!("{}", serde_json::to_string_pretty(&user)?);
            Ok(())
        }
        Err(problem) => {
            eprintln!("{}", serde_json::to_string_pretty(&problem)?);
            Err(anyhow!("{} ({})", problem.title, problem.code))
        }
    }
}

async fn show_authors(config: AppConfig, ids: &[String]) -> Result<()> {
    let api = init_api(config).await?;
    match blue_user::api::rest::handlers::change_set_authors_json(api.as_ref(), ids).await {
        Ok(names) => {
            println!("{}", serde_json::to_string_pretty(&names)?);
            Ok(())
        }
        Err(problem) => {
            eprintln!("{}", serde_json::to_string_pretty(&problem)?);
            Err(anyhow!("{} ({})", problem.title, problem.code))
        }
    }
}

fn list_capabilities(tag: &str) -> Result<()> {
    let registry = CapabilityRegistry::discover()?;
    let resources = registry.resources_for(tag);
    if resources.is_empty() {
        bail!("no resources registered under capability '{tag}'");
    }
    for entry in resources {
        let fields: Vec<_> = (entry.fields)()
            .iter()
            .map(|f| {
                if f.is_restricted() {
                    format!("{} (restricted)", f.wire_name)
                } else {
                    f.wire_name.to_string()
                }
            })
            .collect();
        println!("{}: {}", entry.resource, fields.join(", "));
    }
    Ok(())
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    if config.module_section(MODULE_NAME).is_some() {
        let ctx = module_ctx(config.clone(), Arc::new(ClientHub::new()));
        let cfg: BlueUserConfig = ctx.module_config_required()?;
        println!(
            "blue_user: local accounts: {}, directory entries: {}",
            cfg.seed_users.len(),
            cfg.directory.len()
        );
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}
