//! Prompt system for docqa.
//!
//! This crate provides structured prompt management with:
//! - A built-in answer prompt (instructions, context, question)
//! - Optional YAML overrides under `.docqa/prompts/`
//! - Handlebars template rendering

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use defaults::{default_prompt, DEFAULT_INSTRUCTIONS, DEFAULT_PROMPT_ID, DEFAULT_TEMPLATE};
pub use loader::load_prompt;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
