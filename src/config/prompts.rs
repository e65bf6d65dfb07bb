//! Prompt templates for Svar.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub rag: RagPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for grounded response generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// System instruction framing retrieved context as the only grounding.
    pub system: String,
    /// User message template with {{context}} and {{question}} slots.
    pub user: String,
    /// Substituted into the context slot when retrieval returns nothing.
    pub no_context: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful assistant that answers questions based on the provided context from uploaded documents.
You should only answer questions using information from the provided context. If the context doesn't contain enough information to answer a question,
you should say "I don't have enough information in the provided context to answer that question."
Do not make up or hallucinate information that isn't in the context."#
                .to_string(),

            user: "Context from the document:\n{{context}}\n\nUser question: {{question}}"
                .to_string(),

            no_context: "No relevant context was found in the document.".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let rag_path = custom_path.join("rag.toml");
            if rag_path.exists() {
                let content = std::fs::read_to_string(&rag_path)?;
                prompts.rag = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Substitution happens in one pass over the template, so placeholders
    /// inside substituted values stay literal and unknown placeholders pass
    /// through unchanged.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let tail = &rest[start + 2..];
            match tail.find("}}") {
                Some(end) => {
                    match vars.get(&tail[..end]) {
                        Some(value) => result.push_str(value),
                        None => result.push_str(&rest[start..start + end + 4]),
                    }
                    rest = &tail[end + 2..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.rag.system.is_empty());
        assert!(prompts.rag.user.contains("{{context}}"));
        assert!(prompts.rag.user.contains("{{question}}"));
        assert!(!prompts.rag.no_context.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_keeps_placeholders_in_values_literal() {
        let template = "Context:\n{{context}}\n\nQuestion: {{question}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert(
            "context".to_string(),
            "The form letter starts with {{question}}.".to_string(),
        );
        vars.insert("question".to_string(), "What is svar?".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(
            result,
            "Context:\nThe form letter starts with {{question}}.\n\nQuestion: What is svar?"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let vars = std::collections::HashMap::new();
        assert_eq!(Prompts::render("Hi {{name}}", &vars), "Hi {{name}}");
    }

    #[test]
    fn test_render_with_custom_precedence() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("tone".to_string(), "formal".to_string());
        prompts
            .variables
            .insert("name".to_string(), "config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "call-site".to_string());

        let result = prompts.render_with_custom("{{tone}} {{name}}", &vars);
        assert_eq!(result, "formal call-site");
    }

    #[test]
    fn test_load_custom_rag_prompts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("rag.toml"),
            r#"
            system = "Custom system."
            user = "Q: {{question}} C: {{context}}"
            "#,
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.rag.system, "Custom system.");
        assert_eq!(prompts.rag.user, "Q: {{question}} C: {{context}}");
        // Fields absent from the custom file keep their defaults.
        assert_eq!(
            prompts.rag.no_context,
            RagPrompts::default().no_context
        );
    }
}
