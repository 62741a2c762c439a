//! Prompt template for turning a topic into a generation request.

use crate::Topic;

/// Placeholder substituted with the selected topic when rendering.
const TOPIC_PLACEHOLDER: &str = "{topic}";

/// Default user-prompt template.
pub const DEFAULT_PROMPT_TEMPLATE: &str =
    "Write an informative and engaging post about the web technology \"{topic}\". \
     Use Markdown formatting.";

/// Default system prompt sent alongside every generation request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert in web technologies.";

/// A fixed template with a `{topic}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Create a template from a string containing a `{topic}` placeholder.
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        if !template.contains(TOPIC_PLACEHOLDER) {
            tracing::warn!("Prompt template has no {{topic}} placeholder");
        }
        Self { template }
    }

    /// Render the template for a topic.
    pub fn render(&self, topic: &Topic) -> String {
        self.template.replace(TOPIC_PLACEHOLDER, topic.as_str())
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_embeds_topic() {
        let template = PromptTemplate::default();
        let rendered = template.render(&Topic::from("GraphQL"));
        assert!(rendered.contains("\"GraphQL\""));
        assert!(!rendered.contains(TOPIC_PLACEHOLDER));
    }

    #[test]
    fn render_replaces_every_occurrence() {
        let template = PromptTemplate::new("{topic} and {topic} again");
        assert_eq!(
            template.render(&Topic::from("Svelte")),
            "Svelte and Svelte again"
        );
    }
}
