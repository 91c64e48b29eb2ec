//! Command line interface
//!
//! Operator commands over the gateway. Results go to stdout as pretty JSON;
//! logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use sgw_application::ports::registry::list_text_generation_providers;
use sgw_application::ports::services::SuggestionServiceInterface;
use sgw_domain::error::Result;
use sgw_domain::value_objects::{ConversationTurn, GenerationRequest, SystemStatus};
use sgw_infrastructure::config::{AppConfig, ConfigLoader};
use sgw_infrastructure::logging::{init_logging, log_health_check};
use sgw_infrastructure::{AppContext, init_app};
use tracing::info;

/// Command line interface for the Suggestion Gateway
#[derive(Debug, Parser)]
#[command(name = "sgw")]
#[command(about = "Suggestion Gateway - resilient text-generation provider orchestration")]
#[command(
    after_help = "Examples:\n  sgw health\n  sgw generate --conversation c-1 \"Do you ship to Porto?\"\n  sgw providers"
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operator commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Probe every configured provider
    Health,
    /// Print per-provider breaker, limiter and configuration state
    Stats,
    /// List registered adapters and configured providers
    Providers,
    /// Print the effective configuration with secrets redacted
    Config,
    /// Generate one reply suggestion
    Generate(GenerateArgs),
}

/// Arguments of `sgw generate`
#[derive(Debug, Clone, clap::Args)]
pub struct GenerateArgs {
    /// Conversation id used for rate limiting
    #[arg(long)]
    pub conversation: String,

    /// Workspace id
    #[arg(long, default_value = "")]
    pub workspace: String,

    /// Provider to use instead of the recommended one
    #[arg(long)]
    pub provider: Option<String>,

    /// Model to use instead of the provider default
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature, clamped to [0, 1]
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Output token budget, clamped to the provider ceiling
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Overall deadline in milliseconds
    #[arg(long)]
    pub max_latency_ms: Option<u64>,

    /// Earlier turn as `customer:<text>` or `agent:<text>`; repeatable, oldest first
    #[arg(long = "turn", value_parser = parse_turn)]
    pub turns: Vec<ConversationTurn>,

    /// Latest customer message
    pub message: String,
}

impl GenerateArgs {
    /// Request for these arguments, using the configured prompt policy
    pub fn to_request(&self, config: &AppConfig) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.conversation.clone(), self.message.clone())
            .with_workspace(self.workspace.clone())
            .with_context(self.turns.clone())
            .with_policy(config.prompt.clone());
        if let Some(provider) = &self.provider {
            request = request.with_provider(provider.clone());
        }
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(max_latency_ms) = self.max_latency_ms {
            request = request.with_max_latency_ms(max_latency_ms);
        }
        request
    }
}

/// Parse a `role:text` history turn
pub fn parse_turn(value: &str) -> std::result::Result<ConversationTurn, String> {
    let (role, text) = value
        .split_once(':')
        .ok_or_else(|| format!("expected 'customer:<text>' or 'agent:<text>', got '{value}'"))?;
    let text = text.trim();
    if text.is_empty() {
        return Err("turn text must not be empty".to_string());
    }
    match role.trim().to_ascii_lowercase().as_str() {
        "customer" => Ok(ConversationTurn::customer(text)),
        "agent" => Ok(ConversationTurn::agent(text)),
        other => Err(format!("unknown turn role '{other}'")),
    }
}

/// Load configuration from the optional path
pub fn load_config(path: Option<&std::path::Path>) -> Result<AppConfig> {
    let loader = match path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}

/// Run a parsed command line
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    if let Command::Config = cli.command {
        print_json(&redacted_config(&config))?;
        return Ok(ExitCode::SUCCESS);
    }

    let context = init_app(config)?;
    info!(command = ?cli.command, "Running command");

    match cli.command {
        Command::Health => health(&context).await,
        Command::Stats => {
            print_json(&context.gateway().get_stats())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Providers => {
            print_json(&providers_listing(&context))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Generate(args) => {
            let request = args.to_request(&context.config);
            let result = context.gateway().generate(request).await;
            print_json(&result)?;
            Ok(if result.ok {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Config => Ok(ExitCode::SUCCESS),
    }
}

async fn health(context: &AppContext) -> Result<ExitCode> {
    let summary = context.gateway().check_health().await;
    for (name, report) in &summary.providers {
        log_health_check(name, report.ok, report.detail.as_deref());
    }
    print_json(&summary)?;
    Ok(match summary.status {
        SystemStatus::Healthy => ExitCode::SUCCESS,
        SystemStatus::Degraded => ExitCode::FAILURE,
    })
}

/// Registered adapters plus configured providers in fallback order
pub fn providers_listing(context: &AppContext) -> serde_json::Value {
    let adapters: Vec<_> = list_text_generation_providers()
        .into_iter()
        .map(|(name, description)| json!({ "name": name, "description": description }))
        .collect();
    json!({
        "adapters": adapters,
        "providers": context.registry().descriptors(),
        "recommended": context.registry().recommended().ok().map(|h| h.name().to_string()),
    })
}

/// Configuration with inline API keys masked
pub fn redacted_config(config: &AppConfig) -> AppConfig {
    let mut copy = config.clone();
    for settings in copy.providers.values_mut() {
        *settings = settings.redacted();
    }
    copy
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

