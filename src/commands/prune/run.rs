use std::fs;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::emit::{retained_lines, split_lines, write_lines};
use super::heuristic::{PruningMethod, plan_drops};
use super::layout::{load_partition, remap_partition};
use super::weight::{DEFAULT_WEIGHT_PATTERN, WeightExtractor};
use crate::cli::PruneArgs;
use crate::model::PruneReport;
use crate::util::{now_utc_string, sha256_bytes, sha256_file, write_json_pretty};

const REPORT_VERSION: u32 = 1;

pub fn run(args: PruneArgs) -> Result<()> {
    let report = prune(&args)?;

    info!(
        method = %report.method,
        total = report.total_lines,
        retained = report.retained_lines,
        dropped = report.dropped_lines.len(),
        "prune completed"
    );

    if let Some(report_path) = &args.report {
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote prune report");
    }

    Ok(())
}

pub fn prune(args: &PruneArgs) -> Result<PruneReport> {
    let method = PruningMethod::parse(&args.method);
    if !method.is_recognized() {
        warn!(
            method = %args.method,
            "unrecognized pruning method, every rule is kept"
        );
    }

    let partition = load_partition(args.groups.as_deref())?;
    let pattern = args
        .weight_pattern
        .as_deref()
        .or(partition.weight_pattern.as_deref())
        .unwrap_or(DEFAULT_WEIGHT_PATTERN);
    let extractor = WeightExtractor::new(pattern)?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read rule file: {}", args.input.display()))?;
    let input_sha256 = sha256_bytes(text.as_bytes());
    let lines = split_lines(&text);

    info!(
        path = %args.input.display(),
        lines = lines.len(),
        groups = partition.groups.len(),
        "loaded rule file"
    );

    let plan = plan_drops(&lines, &partition.groups, &method, &extractor)
        .with_context(|| format!("failed to prune {}", args.input.display()))?;

    for decision in &plan.decisions {
        debug!(
            group = decision.group_index,
            maximums = ?decision.sub_group_maximums,
            selected = ?decision.selected_sub_group,
            dropped = ?decision.dropped_lines,
            "group decided"
        );
    }

    let retained = retained_lines(&lines, &plan.dropped);

    let output_sha256 = if args.dry_run {
        info!(path = %args.output.display(), "dry run, output not written");
        None
    } else {
        write_lines(&args.output, &retained)?;
        info!(
            path = %args.output.display(),
            lines = retained.len(),
            "wrote pruned rule file"
        );
        Some(sha256_file(&args.output)?)
    };

    if let Some(groups_out) = &args.groups_out {
        let mut remapped = remap_partition(&partition, &plan.dropped, lines.len());
        if args.weight_pattern.is_some() {
            remapped.weight_pattern = args.weight_pattern.clone();
        }
        write_json_pretty(groups_out, &remapped)?;
        info!(
            path = %groups_out.display(),
            groups = remapped.groups.len(),
            "wrote remapped partition"
        );
    }

    Ok(PruneReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        method: method.as_str().to_string(),
        method_recognized: method.is_recognized(),
        dry_run: args.dry_run,
        input_path: args.input.display().to_string(),
        output_path: args.output.display().to_string(),
        input_sha256,
        output_sha256,
        weight_pattern: extractor.pattern().to_string(),
        total_lines: lines.len(),
        retained_lines: retained.len(),
        dropped_lines: plan.dropped.into_iter().collect(),
        groups: plan.decisions,
    })
}
