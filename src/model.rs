use serde::{Deserialize, Serialize};

pub type SubGroup = Vec<usize>;
pub type RuleGroup = Vec<SubGroup>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionConfig {
    pub groups: Vec<RuleGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_pattern: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupDecision {
    pub group_index: usize,
    pub sub_group_maximums: Vec<f64>,
    /// Kept sub-group for top pruning, dropped sub-group for bottom pruning.
    pub selected_sub_group: Option<usize>,
    pub dropped_lines: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PruneReport {
    pub report_version: u32,
    pub generated_at: String,
    pub method: String,
    pub method_recognized: bool,
    pub dry_run: bool,
    pub input_path: String,
    pub output_path: String,
    pub input_sha256: String,
    pub output_sha256: Option<String>,
    pub weight_pattern: String,
    pub total_lines: usize,
    pub retained_lines: usize,
    pub dropped_lines: Vec<usize>,
    pub groups: Vec<GroupDecision>,
}
