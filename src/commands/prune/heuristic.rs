use std::collections::BTreeSet;

use anyhow::{Context, Result};

use super::weight::WeightExtractor;
use crate::model::{GroupDecision, RuleGroup};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PruningMethod {
    TakeTop,
    DropBottom,
    /// Kept verbatim; selects nothing and drops nothing.
    Unrecognized(String),
}

impl PruningMethod {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "TakeTopPruning" => Self::TakeTop,
            "DropBottomPruning" => Self::DropBottom,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::TakeTop => "TakeTopPruning",
            Self::DropBottom => "DropBottomPruning",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct PrunePlan {
    pub decisions: Vec<GroupDecision>,
    pub dropped: BTreeSet<usize>,
}

/// Largest weight in the sub-group, starting from zero.
pub fn sub_group_maximum(
    lines: &[&str],
    sub_group: &[usize],
    extractor: &WeightExtractor,
) -> Result<f64> {
    let mut max_value = 0.0_f64;
    for &line_index in sub_group {
        let line = lines.get(line_index).with_context(|| {
            format!(
                "partition references line {line_index} but the rule file has {} lines",
                lines.len()
            )
        })?;
        let value = extractor.extract(line_index, line)?;
        if value > max_value {
            max_value = value;
        }
    }
    Ok(max_value)
}

// Strict comparisons keep the first occurrence on ties.
fn first_argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if best.is_none_or(|(_, current)| value > current) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

fn first_argmin(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if best.is_none_or(|(_, current)| value < current) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

pub fn decide_group(
    group_index: usize,
    group: &RuleGroup,
    lines: &[&str],
    method: &PruningMethod,
    extractor: &WeightExtractor,
) -> Result<GroupDecision> {
    let sub_group_maximums = group
        .iter()
        .map(|sub_group| sub_group_maximum(lines, sub_group, extractor))
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("failed to weigh rule group {group_index}"))?;

    let (selected_sub_group, dropped_lines) = match method {
        PruningMethod::TakeTop => {
            let top = first_argmax(&sub_group_maximums);
            let dropped = group
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != top)
                .flat_map(|(_, sub_group)| sub_group.iter().copied())
                .collect::<Vec<_>>();
            (top, dropped)
        }
        PruningMethod::DropBottom => {
            let bottom = first_argmin(&sub_group_maximums);
            let dropped = bottom
                .map(|index| group[index].clone())
                .unwrap_or_default();
            (bottom, dropped)
        }
        PruningMethod::Unrecognized(_) => (None, Vec::new()),
    };

    Ok(GroupDecision {
        group_index,
        sub_group_maximums,
        selected_sub_group,
        dropped_lines,
    })
}

pub fn plan_drops(
    lines: &[&str],
    groups: &[RuleGroup],
    method: &PruningMethod,
    extractor: &WeightExtractor,
) -> Result<PrunePlan> {
    let mut plan = PrunePlan::default();

    for (group_index, group) in groups.iter().enumerate() {
        let decision = decide_group(group_index, group, lines, method, extractor)?;
        plan.dropped.extend(decision.dropped_lines.iter().copied());
        plan.decisions.push(decision);
    }

    Ok(plan)
}
