//! Chat session and transcript.
//!
//! A session owns the grounding text and an append-only list of turns. Each
//! question is appended as a pending turn before the pipeline runs and is
//! resolved in place with the answer or the failure afterwards.

use crate::error::AnswerError;
use crate::pipeline::{AnswerPipeline, AnsweredQuestion};
use chrono::{DateTime, Utc};
use docqa_documents::{GroundingText, UploadedFile};
use serde::Serialize;
use uuid::Uuid;

/// State of a turn's answer slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum TurnStatus {
    Pending,
    Answered(String),
    Failed(AnswerError),
}

/// One question and its answer slot.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub status: TurnStatus,
}

impl ChatTurn {
    pub fn is_pending(&self) -> bool {
        matches!(self.status, TurnStatus::Pending)
    }

    /// Text shown in the answer slot, `None` while pending.
    pub fn answer_text(&self) -> Option<String> {
        match &self.status {
            TurnStatus::Pending => None,
            TurnStatus::Answered(answer) => Some(answer.clone()),
            TurnStatus::Failed(error) => Some(error.to_string()),
        }
    }
}

/// Refers to a pending turn. Consumed on resolution, so a turn is resolved once.
#[derive(Debug, PartialEq, Eq)]
pub struct TurnHandle(usize);

impl TurnHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// In-memory conversation with fixed grounding text.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    id: Uuid,
    #[serde(skip)]
    grounding: GroundingText,
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(grounding: GroundingText) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!("Started chat session {}", id);

        Self {
            id,
            grounding,
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn grounding(&self) -> &GroundingText {
        &self.grounding
    }

    /// Turns in submission order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn turn(&self, handle: &TurnHandle) -> Option<&ChatTurn> {
        self.turns.get(handle.0)
    }

    /// Append a pending turn for `question`.
    pub fn append_pending(&mut self, question: impl Into<String>) -> TurnHandle {
        self.turns.push(ChatTurn {
            question: question.into(),
            created_at: Utc::now(),
            status: TurnStatus::Pending,
        });
        TurnHandle(self.turns.len() - 1)
    }

    /// Store the outcome of a pending turn.
    pub fn resolve(&mut self, handle: TurnHandle, outcome: Result<String, AnswerError>) {
        if let Some(turn) = self.turns.get_mut(handle.0) {
            turn.status = match outcome {
                Ok(answer) => TurnStatus::Answered(answer),
                Err(error) => TurnStatus::Failed(error),
            };
        }
    }

    /// Record a question, run it through the pipeline and store the outcome.
    pub async fn ask(
        &mut self,
        pipeline: &AnswerPipeline,
        question: &str,
        files: &[UploadedFile],
    ) -> Result<AnsweredQuestion, AnswerError> {
        let handle = self.append_pending(question);

        let outcome = pipeline.answer(&self.grounding, question, files).await;

        match &outcome {
            Ok(answered) => self.resolve(handle, Ok(answered.answer.clone())),
            Err(error) => {
                tracing::info!("Question failed ({}): {}", error.kind(), error);
                self.resolve(handle, Err(error.clone()));
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::AnswerGenerator;
    use crate::testing::FakeClient;
    use docqa_documents::ContextAssembler;
    use std::sync::Arc;

    fn pipeline(client: Arc<FakeClient>) -> AnswerPipeline {
        AnswerPipeline::new(
            AnswerGenerator::new(client, "gpt-3.5-turbo"),
            ContextAssembler::default(),
        )
    }

    #[test]
    fn test_pending_then_resolved() {
        let mut session = ChatSession::new(GroundingText::empty());
        let handle = session.append_pending("Hello");

        assert!(session.turn(&handle).unwrap().is_pending());
        assert_eq!(session.turn(&handle).unwrap().answer_text(), None);

        let index = handle.index();
        session.resolve(handle, Ok("Hi!".to_string()));

        let turn = &session.turns()[index];
        assert_eq!(turn.question, "Hello");
        assert_eq!(turn.status, TurnStatus::Answered("Hi!".to_string()));
        assert_eq!(turn.answer_text().as_deref(), Some("Hi!"));
    }

    #[test]
    fn test_turns_keep_submission_order() {
        let mut session = ChatSession::new(GroundingText::empty());
        let first = session.append_pending("first");
        let second = session.append_pending("second");

        session.resolve(second, Err(AnswerError::NoContent));
        session.resolve(first, Ok("one".to_string()));

        let questions: Vec<&str> = session.turns().iter().map(|t| t.question.as_str()).collect();
        assert_eq!(questions, vec!["first", "second"]);
        assert_eq!(
            session.turns()[1].answer_text().as_deref(),
            Some("No text found in the document")
        );
    }

    #[tokio::test]
    async fn test_ask_records_answer() {
        let client = Arc::new(FakeClient::answering("Hello there"));
        let mut session = ChatSession::new(GroundingText::new("Handbook"));

        let answered = session.ask(&pipeline(client), "Hello", &[]).await.unwrap();

        assert_eq!(answered.context, "Handbook");
        assert_eq!(session.turns().len(), 1);
        assert_eq!(
            session.turns()[0].status,
            TurnStatus::Answered("Hello there".to_string())
        );
    }

    #[tokio::test]
    async fn test_ask_records_failure() {
        let client = Arc::new(FakeClient::failing("rate limited"));
        let mut session = ChatSession::new(GroundingText::empty());

        let error = session
            .ask(&pipeline(client.clone()), "Hello", &[])
            .await
            .unwrap_err();

        assert!(error.is_retryable());
        assert_eq!(
            session.turns()[0].answer_text().as_deref(),
            Some("Failed to load the document: rate limited")
        );

        let files = vec![UploadedFile::new("bundle.zip", "PK")];
        session.ask(&pipeline(client.clone()), "Again", &files).await.unwrap_err();
        assert_eq!(
            session.turns()[1].status,
            TurnStatus::Failed(AnswerError::UnsupportedFileType)
        );
        assert_eq!(client.call_count(), 1);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        let a = ChatSession::new(GroundingText::empty());
        let b = ChatSession::new(GroundingText::empty());
        assert_ne!(a.id(), b.id());
    }
}
