use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "agentform",
    about = "agentform — cloud topology synthesizer for the agent-execution platform",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the platform blueprint and emit the deployment manifest.
    ///
    /// Reads the stack configuration, applies flag overrides, stages the
    /// handler bundle, and prints the resolved manifest as JSON (or writes
    /// it with --out). Fails without producing output if the blueprint
    /// does not resolve.
    Synth {
        /// Stack configuration file (default: ./agentform.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Enable the external model planner on the simulate unit
        #[arg(long)]
        enable_planner: bool,
        /// Model identifier forwarded to the planner
        #[arg(long)]
        model_id: Option<String>,
        /// Write the manifest here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Skip bundle staging (the code reference carries no digest)
        #[arg(long)]
        no_stage: bool,
    },
    /// Print the resolved output projection as key = value lines.
    Outputs {
        /// Stack configuration file (default: ./agentform.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Enable the external model planner on the simulate unit
        #[arg(long)]
        enable_planner: bool,
        /// Model identifier forwarded to the planner
        #[arg(long)]
        model_id: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agentform=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Synth {
            config,
            enable_planner,
            model_id,
            out,
            no_stage,
        } => commands::synth::run(
            config.as_deref(),
            enable_planner,
            model_id,
            out.as_deref(),
            no_stage,
        ),
        Commands::Outputs {
            config,
            enable_planner,
            model_id,
        } => commands::outputs::run(config.as_deref(), enable_planner, model_id),
    }
}
