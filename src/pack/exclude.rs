//! Rules deciding which directory entries are drivers rather than instances.

use crate::error::{Error, Result};
use glob::Pattern;

/// Entry name excluded when nothing else is configured.
pub const DEFAULT_DRIVER_NAME: &str = "script.py";

#[derive(Debug, Clone)]
pub enum ExcludeRule {
    Exact(String),
    Glob(Pattern),
}

impl ExcludeRule {
    /// Patterns with glob metacharacters compile to a glob, anything else
    /// matches the entry name literally.
    pub fn parse(pattern: &str) -> Result<Self> {
        if pattern.contains(['*', '?', '[']) {
            Pattern::new(pattern)
                .map(ExcludeRule::Glob)
                .map_err(|source| Error::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
        } else {
            Ok(ExcludeRule::Exact(pattern.to_string()))
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ExcludeRule::Exact(exact) => exact == name,
            ExcludeRule::Glob(pattern) => pattern.matches(name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExcludeRules {
    rules: Vec<ExcludeRule>,
}

impl ExcludeRules {
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rules = patterns
            .into_iter()
            .map(|p| ExcludeRule::parse(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// A rule set that treats every entry as an instance.
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(name))
    }
}

impl Default for ExcludeRules {
    fn default() -> Self {
        Self {
            rules: vec![ExcludeRule::Exact(DEFAULT_DRIVER_NAME.to_string())],
        }
    }
}
