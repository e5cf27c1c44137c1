//! Terminal presentation: spinner, progressive reveal, transcript.

use docqa_chat::{AnswerError, ChatTurn, TurnStatus};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{IsTerminal, Write};
use std::time::Duration;

/// Shown under the chat banner.
pub const DISCLAIMER: &str =
    "Generative AI is under development and can produce incorrect responses. Use with caution.";

/// Drawn after the last revealed character while the answer is being painted.
const CURSOR: char = '|';

/// Spinner on stderr while a question is processed. Hidden when stderr is
/// not a terminal or `enabled` is false.
pub fn spinner(message: &str, enabled: bool) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Paint `text` one character at a time, `delay` apart.
///
/// With `cursor`, a `|` follows the last painted character and is erased at
/// the end. A zero delay writes the text in one go. The written text always
/// equals `text` once the cursor is erased.
pub async fn reveal<W: Write>(
    out: &mut W,
    text: &str,
    delay: Duration,
    cursor: bool,
) -> std::io::Result<()> {
    if delay.is_zero() {
        out.write_all(text.as_bytes())?;
        return out.flush();
    }

    let mut buffer = [0u8; 4];
    for c in text.chars() {
        out.write_all(c.encode_utf8(&mut buffer).as_bytes())?;
        if cursor && c != '\n' {
            write!(out, "{}", CURSOR)?;
            out.flush()?;
            tokio::time::sleep(delay).await;
            out.write_all(b"\x08 \x08")?;
        } else {
            out.flush()?;
            tokio::time::sleep(delay).await;
        }
    }

    out.flush()
}

/// Reveal an answer on stdout followed by a newline.
pub async fn reveal_answer(text: &str, delay: Duration) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    let cursor = stdout.is_terminal();
    let delay = if cursor { delay } else { Duration::ZERO };

    reveal(&mut stdout, text, delay, cursor).await?;
    writeln!(stdout)
}

/// Hint printed after a failure that may go away on retry.
pub fn retry_hint(error: &AnswerError) -> Option<&'static str> {
    error
        .is_retryable()
        .then_some("The completion service did not answer. Ask again to retry.")
}

/// One transcript entry as printed by `/history`.
pub fn format_turn(turn: &ChatTurn) -> String {
    let answer = match &turn.status {
        TurnStatus::Pending => "...".to_string(),
        TurnStatus::Answered(answer) => answer.clone(),
        TurnStatus::Failed(error) => error.to_string(),
    };

    format!(
        "[{}] You: {}\nAssistant: {}",
        turn.created_at.format("%H:%M:%S"),
        turn.question,
        answer
    )
}
