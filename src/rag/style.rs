//! Answer styles.

use crate::config::StylePrompts;
use serde::{Deserialize, Serialize};

/// How the model should shape its answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStyle {
    #[default]
    Default,
    Teacher,
    BulletPoints,
    Summary,
    Examples,
}

impl AnswerStyle {
    pub const ALL: [AnswerStyle; 5] = [
        AnswerStyle::Default,
        AnswerStyle::Teacher,
        AnswerStyle::BulletPoints,
        AnswerStyle::Summary,
        AnswerStyle::Examples,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerStyle::Default => "Default",
            AnswerStyle::Teacher => "Answer like a teacher",
            AnswerStyle::BulletPoints => "Answer with bullet points",
            AnswerStyle::Summary => "Summarize the answer",
            AnswerStyle::Examples => "Add examples",
        }
    }

    /// Instruction prepended to the question.
    pub fn modifier<'a>(&self, prompts: &'a StylePrompts) -> &'a str {
        match self {
            AnswerStyle::Default => "",
            AnswerStyle::Teacher => &prompts.teacher,
            AnswerStyle::BulletPoints => &prompts.bullet_points,
            AnswerStyle::Summary => &prompts.summary,
            AnswerStyle::Examples => &prompts.examples,
        }
    }

    /// Combine the style instruction with a question.
    pub fn apply(&self, prompts: &StylePrompts, question: &str) -> String {
        format!("{} {}", self.modifier(prompts), question).trim().to_string()
    }
}

impl std::str::FromStr for AnswerStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "default" | "none" => Ok(AnswerStyle::Default),
            "teacher" => Ok(AnswerStyle::Teacher),
            "bullets" | "bullet_points" => Ok(AnswerStyle::BulletPoints),
            "summary" | "summarize" => Ok(AnswerStyle::Summary),
            "examples" => Ok(AnswerStyle::Examples),
            _ => Err(format!(
                "Unknown answer style: {}. Use default, teacher, bullets, summary, or examples.",
                s
            )),
        }
    }
}

impl std::fmt::Display for AnswerStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AnswerStyle::Default => "default",
            AnswerStyle::Teacher => "teacher",
            AnswerStyle::BulletPoints => "bullets",
            AnswerStyle::Summary => "summary",
            AnswerStyle::Examples => "examples",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_style() {
        let prompts = StylePrompts::default();
        assert_eq!(
            AnswerStyle::Default.apply(&prompts, "What is Rust?"),
            "What is Rust?"
        );
        assert_eq!(
            AnswerStyle::BulletPoints.apply(&prompts, "What is Rust?"),
            "Answer using concise bullet points. What is Rust?"
        );
    }

    #[test]
    fn test_parse_round_trips_display() {
        for style in AnswerStyle::ALL {
            assert_eq!(style.to_string().parse::<AnswerStyle>().unwrap(), style);
        }
        assert_eq!("Bullet Points".parse::<AnswerStyle>().unwrap(), AnswerStyle::BulletPoints);
        assert!("haiku".parse::<AnswerStyle>().is_err());
    }
}
