//! AKI Risk: ICU acute kidney injury risk calculator.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aki_risk::adapters::sanitize::RedactingMakeWriter;
use aki_risk::tui::App;

fn main() -> Result<()> {
    // Logs written to the terminal would corrupt the TUI (alternate screen).
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode = std::env::var("AKI_RISK_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file =
            std::env::var("AKI_RISK_LOG_FILE").unwrap_or_else(|_| "aki-risk.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: a missing directory surfaces as an open error below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    let make_writer = RedactingMakeWriter::new(writer);
    let redacting = make_writer.is_redacting();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            // Plain text so the redaction patterns see bare field names.
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(make_writer),
        )
        .init();

    tracing::info!("Starting aki-risk...");
    if !redacting {
        tracing::warn!("AKI_RISK_LOG_INPUTS is set; patient inputs will appear in logs");
    }

    let mut app = App::new()?;
    app.run()?;

    tracing::info!("aki-risk shutdown complete.");
    Ok(())
}
