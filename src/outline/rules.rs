//! Pattern rules for heading candidacy and level assignment.

use regex::Regex;

use crate::error::Result;
use crate::model::HeadingLevel;

/// A regex rule. Rules without a level only admit a span as a candidate.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub level: Option<HeadingLevel>,
}

impl PatternRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Ordered heading rules, evaluated before the font statistics.
///
/// The first matching rule with a level decides the heading level.
#[derive(Debug, Clone)]
pub struct HeadingRules {
    rules: Vec<PatternRule>,
    numbering: Regex,
}

impl HeadingRules {
    /// Create the default rule set.
    pub fn new() -> Self {
        let rule = |name, pattern: &str, level| PatternRule {
            name,
            pattern: Regex::new(pattern).unwrap(),
            level,
        };

        Self {
            rules: vec![
                rule("numbered", r"^\d+\.\s+", Some(HeadingLevel::H1)),
                rule("numbered_2", r"^\d+\.\d+\s+", Some(HeadingLevel::H2)),
                rule("numbered_3", r"^\d+\.\d+\.\d+\s+", Some(HeadingLevel::H3)),
                rule(
                    "chapter",
                    r"(?i)^(?:chapter|section)\s+\d+",
                    Some(HeadingLevel::H1),
                ),
                rule("all_caps", r"^[A-Z][A-Z\s]+$", None),
                rule("label", r"^[A-Z][a-z\s]+:$", None),
            ],
            numbering: Regex::new(r"^\d+\.(?:\d+\.?){0,2}\s*").unwrap(),
        }
    }

    /// Append a rule after the existing ones.
    pub fn with_rule(
        mut self,
        name: &'static str,
        pattern: &str,
        level: Option<HeadingLevel>,
    ) -> Result<Self> {
        self.rules.push(PatternRule {
            name,
            pattern: Regex::new(pattern)?,
            level,
        });
        Ok(self)
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Whether any rule matches.
    pub fn matches_any(&self, text: &str) -> bool {
        self.rules.iter().any(|r| r.is_match(text))
    }

    /// Level from the first matching rule that carries one.
    pub fn level_for(&self, text: &str) -> Option<HeadingLevel> {
        self.rules
            .iter()
            .filter(|r| r.level.is_some())
            .find(|r| r.is_match(text))
            .and_then(|r| r.level)
    }

    /// Remove leading section numbering ("1.", "1.2", "1.2.3.").
    pub fn strip_numbering(&self, text: &str) -> String {
        self.numbering.replace(text, "").trim().to_string()
    }
}

impl Default for HeadingRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Has at least one uppercase letter and no lowercase letters.
pub fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}
