use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use vidguide::{
    logger::{self, LogLevel, LoggerConfig},
    ui::presenter,
    GuideApp, GuideConfig, HttpBackend, SelectedFile, UiEvent,
};

/// Upload a video to the analysis webhook and print the generated guide.
#[derive(Debug, Parser)]
#[command(name = "vidguide", version, about)]
struct Cli {
    /// Video file to analyze
    video: PathBuf,

    /// Extra instructions appended to the prompt
    #[arg(short, long, default_value = "")]
    instructions: String,

    /// Webhook that issues upload slots and runs the analysis
    #[arg(long, env = "GUIDE_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Per-request timeout in seconds (none by default)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON log lines on stderr
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv_loaded = dotenv::dotenv().is_ok();
    let cli = Cli::parse();

    let logger_config = if cli.json_logs {
        LoggerConfig::production()
    } else if cli.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::default().with_level(LogLevel::Info)
    };
    if let Err(e) = logger::init_with_config(logger_config) {
        eprintln!("{}", e);
    }

    if dotenv_loaded {
        log::debug!("✅ .env file loaded");
    }

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> vidguide::Result<ExitCode> {
    let mut config = GuideConfig::from_env();
    if let Some(url) = cli.webhook_url {
        config = config.with_webhook_url(url);
    }
    if let Some(secs) = cli.timeout_secs.filter(|secs| *secs > 0) {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    logger::log_config_info(&config);

    let backend = HttpBackend::new(&config)?;
    let mut app = GuideApp::new(Arc::new(backend), config);

    let file = SelectedFile::from_path(&cli.video).await?;
    app.handle(UiEvent::FilesPicked(vec![file])).await;
    app.handle(UiEvent::InstructionsChanged(cli.instructions)).await;

    // a rejected selection has already written its error to the panel
    if app.view().trigger.is_clickable() {
        app.handle(UiEvent::GenerateClicked).await;
    }

    let panel = &app.view().result;
    let colors = !cli.json_logs;
    if panel.error().is_some() {
        eprintln!("{}", presenter::render(panel, colors));
        Ok(ExitCode::FAILURE)
    } else {
        println!("{}", presenter::render(panel, colors));
        Ok(ExitCode::SUCCESS)
    }
}
