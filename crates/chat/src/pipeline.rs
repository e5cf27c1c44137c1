//! The question pipeline: assemble context, then generate.

use crate::error::AnswerError;
use crate::generator::AnswerGenerator;
use docqa_documents::{
    AssembledContext, Chunk, ContextAssembler, ExtractedDocument, FileFailure, GroundingText,
    UploadedFile,
};
use serde::Serialize;

/// A successfully answered question and what it was answered from.
#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion {
    /// Final, post-processed answer
    pub answer: String,

    /// Context sent with the prompt
    pub context: String,

    pub documents: Vec<ExtractedDocument>,

    pub chunks: Vec<Chunk>,

    pub skipped: Vec<FileFailure>,
}

/// Runs one question through assembly and generation, in sequence.
#[derive(Clone)]
pub struct AnswerPipeline {
    generator: AnswerGenerator,
    assembler: ContextAssembler,
}

impl AnswerPipeline {
    pub fn new(generator: AnswerGenerator, assembler: ContextAssembler) -> Self {
        Self {
            generator,
            assembler,
        }
    }

    pub fn generator(&self) -> &AnswerGenerator {
        &self.generator
    }

    /// Answer a question against the grounding text and uploaded files.
    ///
    /// Without files the assembler is bypassed: the grounding text is sent
    /// as-is, even when empty. With files, assembly failures end the question
    /// before any completion request is made.
    pub async fn answer(
        &self,
        grounding: &GroundingText,
        question: &str,
        files: &[UploadedFile],
    ) -> Result<AnsweredQuestion, AnswerError> {
        if files.is_empty() {
            tracing::debug!("No files attached, answering from grounding text only");

            let answer = self.generator.generate(grounding.as_str(), question).await?;
            return Ok(AnsweredQuestion {
                answer,
                context: grounding.as_str().to_string(),
                documents: Vec::new(),
                chunks: Vec::new(),
                skipped: Vec::new(),
            });
        }

        let AssembledContext {
            text,
            chunks,
            documents,
            skipped,
        } = self.assembler.assemble(grounding, files)?;

        let answer = self.generator.generate(&text, question).await?;

        Ok(AnsweredQuestion {
            answer,
            context: text,
            documents,
            chunks,
            skipped,
        })
    }
}
