//! Prompt templates for tubeqa.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid regex"));

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub rag: RagPrompts,
    pub styles: StylePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompt used by the question answering chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagPrompts {
    /// Template with `{{context}}` and `{{question}}` placeholders.
    pub qa: String,
}

impl Default for RagPrompts {
    fn default() -> Self {
        Self {
            qa: r#"
You are an expert assistant. Answer the following question based strictly on the context provided.
Do not include phrases like "Based on the provided transcript" or "According to the context".
Just answer directly.

context:
{{context}}


Question:
{{question}}

Answer:
"#
            .to_string(),
        }
    }
}

/// Instructions prepended to a question for each answer style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePrompts {
    pub teacher: String,
    pub bullet_points: String,
    pub summary: String,
    pub examples: String,
}

impl Default for StylePrompts {
    fn default() -> Self {
        Self {
            teacher: "Explain the answer like a teacher would to a student.".to_string(),
            bullet_points: "Answer using concise bullet points.".to_string(),
            summary: "Provide a short summary of the answer.".to_string(),
            examples: "Add relevant examples in the answer.".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
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

            let styles_path = custom_path.join("styles.toml");
            if styles_path.exists() {
                let content = std::fs::read_to_string(&styles_path)?;
                prompts.styles = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are resolved in one pass over the template, so inserted
    /// values are never scanned again. Unknown placeholders are left as is.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        PLACEHOLDER
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
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
        assert!(prompts.rag.qa.contains("{{context}}"));
        assert!(prompts.rag.qa.contains("{{question}}"));
        assert!(prompts.styles.teacher.contains("teacher"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_inserted_values_are_not_rendered_again() {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), "The host says {{question}} a lot.".to_string());
        vars.insert("question".to_string(), "Why {{context}}?".to_string());

        let result = Prompts::render("C:{{context}} Q:{{question}} {{unknown}}", &vars);
        assert_eq!(
            result,
            "C:The host says {{question}} a lot. Q:Why {{context}}? {{unknown}}"
        );
    }

    #[test]
    fn test_provided_vars_override_custom() {
        let mut custom = HashMap::new();
        custom.insert("audience".to_string(), "students".to_string());
        custom.insert("question".to_string(), "from config".to_string());
        let prompts = Prompts::load(None, Some(&custom)).unwrap();

        let mut vars = HashMap::new();
        vars.insert("question".to_string(), "from caller".to_string());

        let rendered = prompts.render_with_custom("{{question}} for {{audience}}", &vars);
        assert_eq!(rendered, "from caller for students");
    }

    #[test]
    fn test_load_custom_styles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("styles.toml"),
            "summary = \"Answer in one sentence.\"\n",
        )
        .unwrap();

        let prompts = Prompts::load(dir.path().to_str(), None).unwrap();
        assert_eq!(prompts.styles.summary, "Answer in one sentence.");
        assert_eq!(prompts.styles.teacher, StylePrompts::default().teacher);
    }
}
