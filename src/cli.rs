use std::{
    io::IsTerminal,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

mod prompt;
mod session;
mod terminal;

use clap::ArgAction;
use gradebook::Config;
use prompt::{Interactive, LinePrompt};
use session::Session;
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "gradebook.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Session(SessionArgs::default()))
            .run(&self.config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout belongs to the interactive menu
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Start the interactive menu (default)
    Session(SessionArgs),

    /// Write a configuration file with default settings
    Init(Init),

    /// Show the effective configuration
    Config,
}

impl Command {
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self {
            Self::Session(command) => command.run(config_path)?,
            Self::Init(command) => command.run(config_path)?,
            Self::Config => show_config(config_path)?,
        }
        Ok(())
    }
}

#[derive(Debug, Default, clap::Parser)]
pub struct SessionArgs {
    /// Maximum number of students (overrides the configuration file)
    #[arg(long)]
    capacity: Option<NonZeroUsize>,

    /// Where to export reports (overrides the configuration file)
    #[arg(long, value_name = "PATH")]
    export_path: Option<PathBuf>,
}

impl SessionArgs {
    #[instrument]
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        let mut config = Config::load_or_default(config_path);
        if let Some(capacity) = self.capacity {
            config.set_capacity(Some(capacity));
        }
        if let Some(export_path) = self.export_path {
            config.export_path = export_path;
        }
        tracing::info!(?config, "Starting session");

        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        if stdin.is_terminal() {
            Session::new(&config, Interactive, stdout.lock()).run()
        } else {
            tracing::debug!("stdin is not a terminal, reading answers line by line");
            let prompt = LinePrompt::new(stdin.lock(), std::io::stdout());
            Session::new(&config, prompt, stdout.lock()).run()
        }
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {
    /// Overwrite an existing configuration file
    #[arg(long, short)]
    force: bool,
}

impl Init {
    #[instrument]
    fn run(self, config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file {} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        Config::default()
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", config_path.display()))?;

        println!(
            "{}",
            format!("✅ Created {}", config_path.display()).success()
        );
        Ok(())
    }
}

#[instrument]
fn show_config(config_path: &Path) -> anyhow::Result<()> {
    let (config, source) = if config_path.exists() {
        let config = Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))?;
        (config, config_path.display().to_string())
    } else {
        (Config::default(), "defaults".to_string())
    };

    println!("{}", format!("# source: {source}").dim());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
