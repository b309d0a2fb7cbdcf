use std::{
    net::SocketAddr,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;
use vidquiz_core::{Config, InvocationEvent, RequestOrchestrator};

mod server;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

#[derive(Parser)]
#[command(name = "vidquiz")]
#[command(about = "Generate multiple-choice questions from YouTube video transcripts with Gemini")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a single invocation and print the response as JSON
    Invoke {
        /// Video ID
        #[arg(required_unless_present = "event", conflicts_with = "event")]
        video_id: Option<String>,

        /// Raw invocation event, e.g. '{"video_id":"qn4dMXyUn1Q"}'
        #[arg(short, long)]
        event: Option<String>,
    },
    /// Serve the function over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },
}

const DEFAULT_LOG_FILTER: &str = "vidquiz=info,vidquiz_core=info,tower_http=info";

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_spinner(msg: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")?,
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    Ok(pb)
}

fn parse_invoke_event(video_id: Option<String>, event: Option<String>) -> Result<InvocationEvent> {
    match (video_id, event) {
        (_, Some(raw)) => {
            let value: serde_json::Value = serde_json::from_str(&raw)?;
            Ok(InvocationEvent::from_value(&value))
        }
        (Some(video_id), None) => Ok(InvocationEvent::new(video_id)),
        (None, None) => Ok(InvocationEvent::default()),
    }
}

async fn run_invoke(orchestrator: RequestOrchestrator, event: InvocationEvent) -> Result<()> {
    let started = Instant::now();
    let spinner = create_spinner(&format!(
        "Generating questions for {}...",
        event.video_id().unwrap_or("<missing video_id>")
    ))?;

    let response = orchestrator.handle(&event).await;

    let elapsed = style(format!("[{}]", format_duration(started.elapsed()))).dim();
    if response.is_success() {
        spinner.finish_with_message(format!(
            "{} {} {}",
            style("✓").green().bold(),
            response.status_code,
            elapsed
        ));
    } else {
        spinner.finish_with_message(format!(
            "{} {} {}",
            style("Error:").red().bold(),
            response.status_code,
            elapsed
        ));
    }

    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Command::Invoke { video_id, event } => {
            init_tracing();
            let event = parse_invoke_event(video_id, event)?;
            run_invoke(RequestOrchestrator::from_config(config), event).await
        }
        Command::Serve { addr } => {
            init_tracing();
            if config.api_key.is_none() {
                tracing::warn!("GEMINI_API_KEY is not set; every invocation will answer 400");
            }
            let orchestrator = Arc::new(RequestOrchestrator::from_config(config));
            server::serve(addr, orchestrator).await
        }
    }
}
