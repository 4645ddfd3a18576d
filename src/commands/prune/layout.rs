use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use anyhow::{Result, bail};

use crate::model::{PartitionConfig, RuleGroup};
use crate::util::read_json;

/// Layout of the last.fm rule file the pruner was first written for.
pub fn builtin_partition() -> PartitionConfig {
    let groups: Vec<RuleGroup> = vec![
        vec![vec![0], vec![1], vec![2]],
        vec![vec![3], vec![4]],
        vec![vec![5], vec![6]],
        vec![vec![7], vec![8]],
        vec![vec![9, 10], vec![11, 12], vec![13, 14]],
        vec![vec![15, 16], vec![17, 18]],
    ];

    PartitionConfig {
        groups,
        weight_pattern: None,
    }
}

pub fn load_partition(path: Option<&Path>) -> Result<PartitionConfig> {
    let Some(path) = path else {
        return Ok(builtin_partition());
    };

    let config: PartitionConfig = read_json(path)?;
    validate_partition(&config)?;
    Ok(config)
}

pub fn validate_partition(config: &PartitionConfig) -> Result<()> {
    let mut seen: HashMap<usize, (usize, usize)> = HashMap::new();

    for (group_index, group) in config.groups.iter().enumerate() {
        for (sub_group_index, sub_group) in group.iter().enumerate() {
            for &line_index in sub_group {
                if let Some((first_group, first_sub_group)) =
                    seen.insert(line_index, (group_index, sub_group_index))
                {
                    bail!(
                        "line {line_index} appears in group {first_group} sub-group {first_sub_group} \
                         and again in group {group_index} sub-group {sub_group_index}"
                    );
                }
            }
        }
    }

    Ok(())
}

/// Rewrites the partition onto the line numbers of the pruned output.
/// Dropped lines disappear, and so do sub-groups and groups left empty.
pub fn remap_partition(
    config: &PartitionConfig,
    dropped: &BTreeSet<usize>,
    total_lines: usize,
) -> PartitionConfig {
    let mut new_index = vec![None; total_lines];
    let mut next = 0;
    for (line_index, slot) in new_index.iter_mut().enumerate() {
        if !dropped.contains(&line_index) {
            *slot = Some(next);
            next += 1;
        }
    }

    let groups = config
        .groups
        .iter()
        .map(|group| {
            group
                .iter()
                .map(|sub_group| {
                    sub_group
                        .iter()
                        .filter_map(|&line_index| new_index.get(line_index).copied().flatten())
                        .collect::<Vec<_>>()
                })
                .filter(|sub_group| !sub_group.is_empty())
                .collect::<RuleGroup>()
        })
        .filter(|group| !group.is_empty())
        .collect();

    PartitionConfig {
        groups,
        weight_pattern: config.weight_pattern.clone(),
    }
}
