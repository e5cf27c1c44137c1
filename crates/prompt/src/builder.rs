//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use docqa_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build the completion prompt for one question.
///
/// Renders the definition's template with three variables: `instructions`,
/// `context` and `question`. Values are inserted verbatim (no HTML escaping).
///
/// # Example
/// ```
/// use docqa_prompt::{build_prompt, default_prompt};
///
/// let built = build_prompt(&default_prompt(), "Alpha\n", "What is Alpha?").unwrap();
/// assert!(built.user.ends_with("Question:\nWhat is Alpha?\n\nAnswer:\n"));
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    context: &str,
    question: &str,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let mut variables = HashMap::new();
    variables.insert("instructions", definition.instructions.as_str());
    variables.insert("context", context);
    variables.insert("question", question);

    let rendered = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        rendered,
        definition.id.clone(),
        context.chars().count(),
    ))
}

/// Render a Handlebars template with variables.
///
/// Strict mode is on: a template naming an unknown variable is an error
/// rather than a silent blank.
fn render_template(template: &str, variables: &HashMap<&str, &str>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Disable HTML escaping for plain text
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_prompt;

    fn definition(template: &str) -> PromptDefinition {
        PromptDefinition {
            id: "test.prompt".to_string(),
            title: "Test".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            instructions: "Be brief.".to_string(),
            template: template.to_string(),
        }
    }

    #[test]
    fn test_segments_in_fixed_order() {
        let mut def = default_prompt();
        def.instructions = "INSTRUCTIONS".to_string();

        let built = build_prompt(&def, "CONTEXT", "QUESTION").unwrap();
        assert_eq!(
            built.user,
            "INSTRUCTIONS\n\nContext:\nCONTEXT\n\nQuestion:\nQUESTION\n\nAnswer:\n"
        );
        assert_eq!(built.metadata.source_prompt_id, "docqa.answer.default");
        assert_eq!(built.metadata.context_chars, 7);
    }

    #[test]
    fn test_empty_context() {
        let built = build_prompt(&default_prompt(), "", "Hello").unwrap();
        assert!(built.user.contains("\n\nContext:\n\n\nQuestion:\nHello\n"));
        assert_eq!(built.metadata.context_chars, 0);
    }

    #[test]
    fn test_values_are_not_escaped_or_interpreted() {
        let def = definition("{{context}}|{{question}}");
        let built = build_prompt(&def, "<b>R&D</b> {{not a tag}}", "\"quoted\"").unwrap();
        assert_eq!(built.user, "<b>R&D</b> {{not a tag}}|\"quoted\"");
    }

    #[test]
    fn test_unknown_variable_is_rejected() {
        let def = definition("{{instructions}} {{documents}}");
        let result = build_prompt(&def, "ctx", "q");
        assert!(matches!(result, Err(AppError::Prompt(_))));
    }

    #[test]
    fn test_malformed_template_is_rejected() {
        let def = definition("{{#if context}} unterminated");
        assert!(build_prompt(&def, "ctx", "q").is_err());
    }
}
