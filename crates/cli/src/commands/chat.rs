//! Chat command handler.
//!
//! Interactive session: every line is a question answered from the attached
//! files and the grounding text. Lines starting with `/` are session commands.

use crate::commands::{build_pipeline, load_grounding};
use crate::files::collect_uploads;
use crate::render;
use clap::Args;
use docqa_chat::ChatSession;
use docqa_core::{config::AppConfig, AppResult};
use docqa_documents::UploadedFile;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  /files          list attached files
  /attach <path>  attach a file or directory
  /clear-files    detach all files
  /history        show the transcript
  /quit           leave the session";

/// Interactive question-and-answer session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// File to answer from (repeatable; directories are expanded)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,
}

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Question(&'a str),
    Files,
    Attach(&'a str),
    ClearFiles,
    History,
    Help,
    Quit,
    Unknown(&'a str),
    Empty,
}

impl<'a> Input<'a> {
    fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        if !line.starts_with('/') {
            return Self::Question(line);
        }

        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "/files" => Self::Files,
            "/attach" if !argument.is_empty() => Self::Attach(argument),
            "/clear-files" => Self::ClearFiles,
            "/history" => Self::History,
            "/help" => Self::Help,
            "/quit" | "/exit" => Self::Quit,
            _ => Self::Unknown(command),
        }
    }
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let pipeline = build_pipeline(config)?;
        let mut uploads = collect_uploads(&self.files)?;
        let mut session = ChatSession::new(load_grounding(config));
        let delay = Duration::from_millis(config.chat.reveal_delay_ms);

        println!(
            "docqa chat ({} via {})",
            pipeline.generator().model(),
            pipeline.generator().provider_name()
        );
        println!("{}", render::DISCLAIMER);
        println!(
            "{} file(s) attached. Type /help for commands.",
            uploads.len()
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("\n> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Input::parse(&line) {
                Input::Empty => continue,
                Input::Quit => break,
                Input::Help => println!("{}", HELP),
                Input::Unknown(command) => println!("Unknown command: {}\n{}", command, HELP),
                Input::Files => print_files(&uploads),
                Input::ClearFiles => {
                    uploads.clear();
                    println!("Detached all files.");
                }
                Input::Attach(path) => match collect_uploads(&[PathBuf::from(path)]) {
                    Ok(attached) => {
                        println!("Attached {} file(s).", attached.len());
                        uploads.extend(attached);
                    }
                    Err(e) => println!("{}", e),
                },
                Input::History => {
                    for turn in session.turns() {
                        println!("{}\n", render::format_turn(turn));
                    }
                }
                Input::Question(question) => {
                    let spinner = render::spinner("Processing...", true);
                    let outcome = session.ask(&pipeline, question, &uploads).await;
                    spinner.finish_and_clear();

                    match outcome {
                        Ok(answered) => {
                            for skipped in &answered.skipped {
                                eprintln!("Skipped {}: {}", skipped.name, skipped.error);
                            }
                            render::reveal_answer(&answered.answer, delay).await?;
                        }
                        Err(error) => {
                            println!("{}", error);
                            if let Some(hint) = render::retry_hint(&error) {
                                eprintln!("{}", hint);
                            }
                        }
                    }
                }
            }
        }

        tracing::info!(
            "Chat session {} ended after {} questions",
            session.id(),
            session.turns().len()
        );

        Ok(())
    }
}

fn print_files(uploads: &[UploadedFile]) {
    if uploads.is_empty() {
        println!("No files attached.");
        return;
    }

    for upload in uploads {
        println!("  {} ({} bytes)", upload.name(), upload.len());
    }
}
