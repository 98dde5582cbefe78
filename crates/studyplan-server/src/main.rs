//! Study planner API server binary.
//!
//! Start the server with:
//! ```bash
//! OPENAI_API_KEY=xxx cargo run -p studyplan-server -- --port 3000
//! ```
//!
//! Without an API key every plan and timeline comes from the deterministic
//! allocators.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use studyplan_api::{serve, ApiConfig, AppState};
use studyplan_engine::{GeneratorConfig, OpenAiClient, Planner};
use tracing_subscriber::EnvFilter;

/// Study planner - schedules study time for exams and assignments
#[derive(Parser, Debug)]
#[command(name = "studyplan-server")]
#[command(about = "JSON API for the study planner")]
struct Args {
    /// Host to bind to
    #[arg(long, env = "STUDYPLAN_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port to bind to
    #[arg(short, long, env = "STUDYPLAN_PORT", default_value = "3000")]
    port: u16,

    /// Data directory (default: ~/.studyplan)
    #[arg(long, env = "STUDYPLAN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Allowed CORS origins, comma separated
    #[arg(long, env = "STUDYPLAN_CORS_ORIGINS", value_delimiter = ',', default_value = "*")]
    cors_origins: Vec<String>,

    /// API key for the OpenAI-compatible endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Model used for generated plans
    #[arg(long, env = "OPENAI_MODEL")]
    openai_model: Option<String>,

    /// Chat completions endpoint
    #[arg(long, env = "OPENAI_BASE_URL")]
    openai_base_url: Option<String>,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".studyplan")
}

fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "studyplan=info,tower_http=warn",
        1 => "studyplan=debug,tower_http=info",
        2 => "studyplan=trace,tower_http=debug",
        _ => "trace",
    }
}

/// Builds the planner, with a text generator when an API key is configured.
fn build_planner(args: &Args) -> Planner {
    let Some(api_key) = args.openai_api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
        tracing::info!("No OpenAI API key configured, using deterministic planning");
        return Planner::default();
    };

    let mut config = GeneratorConfig::new(api_key);
    if let Some(model) = &args.openai_model {
        config = config.with_model(model);
    }
    if let Some(base_url) = &args.openai_base_url {
        config = config.with_base_url(base_url);
    }

    match OpenAiClient::new(config) {
        Ok(client) => Planner::default().with_generator(Arc::new(client)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create OpenAI client, continuing without AI");
            Planner::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Environment files must be loaded before clap reads env fallbacks
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_filter(args.verbose)))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
    let planner = build_planner(&args);

    let config = ApiConfig::new(&args.host, args.port).with_cors_origins(args.cors_origins.clone());
    let state = AppState::new(config.clone(), &data_dir, planner);

    println!("\nStudy planner API");
    println!("   Listening: http://{}", config.bind_address());
    println!("   Data: {}", data_dir.display());
    println!("   Press Ctrl+C to stop\n");

    serve(config, state).await?;

    Ok(())
}
