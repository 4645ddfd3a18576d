use anyhow::{Context, Result};
use regex::Regex;

pub const DEFAULT_WEIGHT_PATTERN: &str = r"\d+\.\d+";

/// Pulls the rule weight out of a line: the first pattern match, or its
/// first capture group when the pattern has one.
#[derive(Debug, Clone)]
pub struct WeightExtractor {
    pattern: Regex,
}

impl WeightExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern =
            Regex::new(pattern).with_context(|| format!("invalid weight pattern: {pattern}"))?;
        Ok(Self { pattern })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn extract(&self, line_index: usize, line: &str) -> Result<f64> {
        let captures = self.pattern.captures(line).with_context(|| {
            format!(
                "line {line_index} has no weight matching `{}`: {}",
                self.pattern.as_str(),
                line.trim_end()
            )
        })?;

        let matched = captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str())
            .with_context(|| format!("line {line_index} produced an empty weight match"))?;

        matched
            .parse::<f64>()
            .with_context(|| format!("line {line_index} has an unparsable weight: {matched}"))
    }
}
