//! rolesmith: assemble roles and install them into a host CLI tool
//!
//! Usage:
//!   rolesmith install writer                   → .claude/commands/writer.md
//!   rolesmith install writer --mode subagent   → .claude/agents/writer.md
//!   rolesmith render writer                    → print assembled content
//!   rolesmith list                             → roles in the resource roots
//!   rolesmith config                           → dump default config

use clap::{Parser, Subcommand};
use rolesmith::config::{RolesmithConfig, DEFAULT_CONFIG_FILE};
use rolesmith::install::{local_pipeline, Installer};
use rolesmith_builder::ClaudeDirBuilder;
use rolesmith_core::AssemblyMode;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[derive(Parser)]
#[command(
    name = "rolesmith",
    version = env!("CARGO_PKG_VERSION"),
    about = "Assemble roles and install them as host CLI commands or subagents"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory (resource root and install target are relative to it)
    #[arg(short, long, global = true, default_value = ".")]
    project: PathBuf,

    /// Path to config file (TOML). Default: <project>/.rolesmith.toml
    #[arg(long, global = true)]
    config: Option<String>,

    /// Write logs to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a role and write it into the host tool directory
    Install {
        /// Role id, e.g. "writer"
        role: String,
        /// command or subagent
        #[arg(short, long, default_value = "command")]
        mode: AssemblyMode,
        /// Artifact name (default: <name_prefix><role>)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Assemble a role and print the result
    Render {
        role: String,
        #[arg(short, long, default_value = "command")]
        mode: AssemblyMode,
    },
    /// List roles found in the resource roots
    List,
    /// Dump the default configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config = cli.command {
        println!("{}", RolesmithConfig::default().to_toml());
        return Ok(());
    }

    let project = cli.project.canonicalize().unwrap_or_else(|_| cli.project.clone());
    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| project.join(DEFAULT_CONFIG_FILE));

    // Logging needs the config's filter, and config loading logs; read it
    // once quietly for the filter, then again with tracing live.
    let filter = quiet_filter(&config_path);
    let _guard = init_tracing(&filter, cli.log_file.as_deref())?;
    let config = RolesmithConfig::load(&config_path);

    let (pipeline, loader) = local_pipeline(&config, &project);

    match cli.command {
        Commands::Install { role, mode, name } => {
            let builder = Arc::new(ClaudeDirBuilder::new(config.target_dir(&project)));
            let installer = Installer::new(pipeline, builder, config.install.clone());
            let report = installer.install(&role, mode, name.as_deref()).await?;
            if !report.outcome.success {
                anyhow::bail!(
                    "failed to install role '{}': {}",
                    role,
                    report.outcome.error.unwrap_or_default()
                );
            }
            let bundle = &report.activation.bundle;
            println!(
                "Installed {} ({} mode): {} thoughts, {} executions, cognition network {}",
                role,
                mode,
                bundle.thoughts.len(),
                bundle.executions.len(),
                if report.activation.cognition.has_network { "found" } else { "not found" }
            );
            if let Some(path) = report.outcome.path {
                println!("  → {}", path.display());
            }
        }
        Commands::Render { role, mode } => {
            let content = pipeline.process_role(&role, mode).await?;
            println!("{}", content);
        }
        Commands::List => {
            let roles = loader.ids("role").await?;
            if roles.is_empty() {
                println!("No roles found. Searched:");
                for root in loader.roots() {
                    println!("  {}", root.display());
                }
            }
            for role in roles {
                println!("{}", role);
            }
        }
        Commands::Config => {}
    }

    Ok(())
}

fn quiet_filter(config_path: &Path) -> String {
    std::fs::read_to_string(config_path)
        .ok()
        .and_then(|s| toml::from_str::<RolesmithConfig>(&s).ok())
        .unwrap_or_default()
        .logging
        .filter
}

fn init_tracing(
    default_filter: &str,
    log_file: Option<&str>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter.into())
    };
    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter());

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr).init();
        return Ok(None);
    };

    let path = expand_tilde(path);
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("--log-file needs a file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    let file = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(stderr).with(file).init();
    Ok(Some(guard))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
