use clap::{Parser, Subcommand, ValueEnum};
use cli::{run_job, SwapJob};
use color_eyre::eyre::{eyre, Result};
use jersey_swap::{
    GeminiClient, JerseyType, NegativeConstraint, NegativeConstraintSet, ProcessingStatus,
    PromptOperation, SwapConfig,
};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gemini API key (or set GEMINI_API_KEY / API_KEY environment variable)
    #[arg(long, global = true)]
    api_key: Option<String>,
    /// TOML file with model, endpoint and status interval
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct PromptOptions {
    /// custom or official
    #[arg(long, default_value = "custom")]
    jersey_type: String,
    /// Artifact to steer away from, e.g. "blurry" (repeatable)
    #[arg(long = "avoid")]
    avoid: Vec<String>,
    /// Start from an empty constraint list instead of the defaults
    #[arg(long)]
    no_default_avoid: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Swap the jersey on a player photo, optionally replacing the background
    Swap {
        /// Photo of the player
        #[arg(long)]
        player: PathBuf,
        /// Image of the new jersey
        #[arg(long)]
        jersey: PathBuf,
        /// New background scene
        #[arg(long)]
        background: Option<PathBuf>,
        /// Where to write the result image
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        prompt: PromptOptions,
    },
    /// Run a job described in a TOML or JSON file
    Run {
        #[arg(short, long)]
        job: PathBuf,
    },
    /// Print the instruction text without calling the service
    Prompt {
        #[arg(value_enum)]
        operation: PromptKind,
        #[command(flatten)]
        prompt: PromptOptions,
    },
    /// Print the JSON schema of prompt operations and job files
    Schema,
}

#[derive(Clone, Copy, ValueEnum)]
enum PromptKind {
    Swap,
    Background,
}

impl PromptOptions {
    fn jersey_type(&self) -> Result<JerseyType> {
        self.jersey_type
            .parse()
            .map_err(|_| eyre!("Unknown jersey type '{}'. Use custom or official", self.jersey_type))
    }

    fn negative_constraints(&self) -> Result<NegativeConstraintSet> {
        let mut constraints = if self.no_default_avoid {
            NegativeConstraintSet::empty()
        } else {
            NegativeConstraintSet::default()
        };
        for text in &self.avoid {
            constraints.insert(NegativeConstraint::parse(text)?);
        }
        Ok(constraints)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Swap {
            player,
            jersey,
            background,
            output,
            prompt,
        } => {
            let job = SwapJob {
                player: player.clone(),
                jersey: jersey.clone(),
                jersey_type: prompt.jersey_type()?,
                negative_constraints: prompt.negative_constraints()?,
                output: output.clone(),
                background: background.clone(),
                background_output: None,
            };
            process_job(&cli, &job).await?;
        }
        Commands::Run { job } => {
            let job = SwapJob::from_file(job)?;
            process_job(&cli, &job).await?;
        }
        Commands::Prompt { operation, prompt } => {
            let operation = match operation {
                PromptKind::Swap => PromptOperation::JerseySwap {
                    jersey_type: prompt.jersey_type()?,
                    negative_constraints: prompt.negative_constraints()?,
                },
                PromptKind::Background => PromptOperation::BackgroundReplace,
            };
            let [first, second] = operation.image_roles();
            info!("{} (images: {}, {})", operation.description(), first, second);
            println!("{}", operation.build());
        }
        Commands::Schema => {
            let schema = serde_json::json!({
                "prompt_operation": PromptOperation::schema(),
                "swap_job": schemars::schema_for!(SwapJob),
            });
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>, api_key: Option<&str>) -> Result<SwapConfig> {
    let config = match (config_path, api_key) {
        (Some(path), Some(key)) => {
            SwapConfig::from_toml(&std::fs::read_to_string(path)?)?.with_api_key(key)
        }
        (Some(path), None) => SwapConfig::from_toml_file(path)?,
        (None, Some(key)) => SwapConfig::default().with_api_key(key),
        (None, None) => SwapConfig::from_env()?,
    };
    Ok(config)
}

async fn process_job(cli: &Cli, job: &SwapJob) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.api_key.as_deref())?;
    info!("Config: {:?}", config);

    let client = GeminiClient::new(&config)?;
    let status = ProcessingStatus::new(config.status_interval());
    let report = run_job(job, &client, &status).await?;

    info!("✅ Jersey swap saved to {:?}", report.swap_output);
    if let Some(path) = report.background_output {
        info!("✅ Background replacement saved to {:?}", path);
    }
    Ok(())
}
