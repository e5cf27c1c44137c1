//! Ask command handler.
//!
//! Answers a single question about a set of files.

use crate::commands::{build_pipeline, load_grounding};
use crate::files::collect_uploads;
use crate::render;
use clap::Args;
use docqa_chat::{AnswerError, AnsweredQuestion, ChatSession};
use docqa_core::{config::AppConfig, AppResult};
use std::path::PathBuf;
use std::time::Duration;

/// Ask one question about a set of files
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// File to answer from (repeatable; directories are expanded)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the answer at once instead of revealing it
    #[arg(long)]
    pub no_reveal: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let pipeline = build_pipeline(config)?;
        let uploads = collect_uploads(&self.files)?;
        let mut session = ChatSession::new(load_grounding(config));

        let spinner = render::spinner("Processing...", !self.json);
        let outcome = session.ask(&pipeline, &self.question, &uploads).await;
        spinner.finish_and_clear();

        if self.json {
            let output = json_output(
                &outcome,
                pipeline.generator().model(),
                pipeline.generator().provider_name(),
            );
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        let delay = if self.no_reveal {
            Duration::ZERO
        } else {
            Duration::from_millis(config.chat.reveal_delay_ms)
        };

        match &outcome {
            Ok(answered) => {
                for skipped in &answered.skipped {
                    eprintln!("Skipped {}: {}", skipped.name, skipped.error);
                }
                render::reveal_answer(&answered.answer, delay).await?;
            }
            Err(error) => {
                println!("{}", error);
                if let Some(hint) = render::retry_hint(error) {
                    eprintln!("{}", hint);
                }
            }
        }

        Ok(())
    }
}

/// Structured result for `--json`.
fn json_output(
    outcome: &Result<AnsweredQuestion, AnswerError>,
    model: &str,
    provider: &str,
) -> serde_json::Value {
    match outcome {
        Ok(answered) => serde_json::json!({
            "answer": answered.answer,
            "model": model,
            "provider": provider,
            "documents": answered
                .documents
                .iter()
                .map(|d| serde_json::json!({
                    "name": d.name,
                    "format": d.format,
                    "chars": d.text.chars().count(),
                }))
                .collect::<Vec<_>>(),
            "chunks": answered.chunks.len(),
            "skipped": answered.skipped,
        }),
        Err(error) => serde_json::json!({
            "error": {
                "kind": error.kind(),
                "message": error.to_string(),
                "retryable": error.is_retryable(),
            },
            "model": model,
            "provider": provider,
        }),
    }
}
