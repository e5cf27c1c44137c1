//! Extract command handler.
//!
//! Shows the context a question would be answered from, without calling the
//! completion API.

use crate::commands::load_grounding;
use crate::files::collect_uploads;
use clap::Args;
use docqa_chat::AnswerError;
use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_documents::{AssembledContext, ContextAssembler};
use std::path::PathBuf;

/// Print the assembled context for a set of files
#[derive(Args, Debug)]
pub struct ExtractCommand {
    /// File to extract (repeatable; directories are expanded)
    #[arg(short = 'f', long = "file", value_name = "PATH", required = true)]
    pub files: Vec<PathBuf>,

    /// List the chunks after the context
    #[arg(long)]
    pub chunks: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExtractCommand {
    /// Execute the extract command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing extract command");

        let uploads = collect_uploads(&self.files)?;
        let grounding = load_grounding(config);
        let assembler = ContextAssembler::new(config.chat.extraction_policy);

        let context = assembler
            .assemble(&grounding, &uploads)
            .map_err(|e| AppError::Document(AnswerError::from(e).to_string()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&self.json_output(&context))?);
        } else {
            print!("{}", self.text_output(&context));
        }

        for skipped in &context.skipped {
            eprintln!("Skipped {}: {}", skipped.name, skipped.error);
        }

        Ok(())
    }

    fn json_output(&self, context: &AssembledContext) -> serde_json::Value {
        let mut output = serde_json::json!({
            "context": context.text,
            "documents": context.documents,
            "skipped": context.skipped,
        });

        if self.chunks {
            output["chunks"] = serde_json::json!(context.chunks);
        }

        output
    }

    fn text_output(&self, context: &AssembledContext) -> String {
        let mut output = format!("{}\n", context.text);

        if self.chunks {
            for chunk in &context.chunks {
                output.push_str(&format!(
                    "\n--- chunk {} ({} chars, {}) ---\n{}\n",
                    chunk.position,
                    chunk.char_count,
                    &chunk.hash[..12],
                    chunk.text
                ));
            }
        }

        output
    }
}
