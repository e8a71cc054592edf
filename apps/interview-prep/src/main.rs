mod chain;
mod config;
mod errors;
mod input;
mod llm_client;
mod models;
mod output;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chain::{run_chain, PlanParseError};
use crate::config::Config;
use crate::errors::ChainError;
use crate::input::collect_inputs;
use crate::llm_client::OpenAiClient;
use crate::models::sampling::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P};
use crate::models::{PlanSource, SamplingConfig};
use crate::output::write_artifacts;

const BANNER: &str = "=============================================";

#[derive(Parser, Debug)]
#[command(
    name = "interview-prep",
    version,
    about = "Interview Helper: two-stage prompt chain (plan JSON → Markdown questions)"
)]
struct Cli {
    /// Sampling temperature, 0.0 to 2.0
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Nucleus sampling top_p, 0.0 to 1.0
    #[arg(long, alias = "top_p", default_value_t = DEFAULT_TOP_P)]
    top_p: f32,

    /// Max output tokens per model call
    #[arg(long, alias = "max_tokens", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Directory that receives plan.json and output.md
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let sampling = SamplingConfig {
        temperature: cli.temperature,
        top_p: cli.top_p,
        max_tokens: cli.max_tokens,
    };
    sampling.validate()?;

    // Fails early on a missing OPENAI_API_KEY, before any input is collected
    let config = Config::from_env()?;

    // Logs go to stderr; stdout is the interactive transcript
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let llm = OpenAiClient::new(config.openai())?;
    info!("LLM client initialized (model: {})", llm.model());

    println!("\n=== Interview Helper (Two-Stage) ===");
    let input = collect_inputs(&mut io::stdin().lock(), &mut io::stdout())?;

    println!("\n[Chain 1] Creating plan...");
    let result = match run_chain(&llm, &input, &sampling).await {
        Ok(result) => result,
        Err(ChainError::PlanParse(PlanParseError::RepairFailed {
            original,
            repaired,
            reason,
        })) => {
            eprintln!("Plan repair failed.");
            eprintln!("Raw repair output:\n{repaired}\n\nParse error: {reason}");
            eprintln!("\nRaw plan output:\n{original}");
            anyhow::bail!("no valid plan after one repair attempt; nothing was written");
        }
        Err(e) => return Err(e.into()),
    };

    if result.plan_source == PlanSource::Repaired {
        println!("[Chain 1] Plan JSON parse failed; one-time repair succeeded.");
    }
    println!("[Chain 2] Final Markdown answer generated.");

    println!("\n========== FINAL ANSWER (Markdown) ==========\n");
    println!("{}", result.document.as_str());
    println!("\n{BANNER}\n");

    let paths = write_artifacts(&cli.out_dir, &result)?;
    let repaired_note = match result.plan_source {
        PlanSource::Repaired => " (repaired)",
        PlanSource::FirstAttempt => "",
    };
    println!("Saved plan to {}{repaired_note}", paths.plan.display());
    println!("Saved Markdown to {}", paths.document.display());

    Ok(())
}
