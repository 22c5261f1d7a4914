use crate::io::read_json_file;
use crate::optimize::ConjugateRule;
use crate::projection::ProjSecantParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ProjectionDemoConfig {
    #[serde(default)]
    pub data: SyntheticDataConfig,
    pub target_dimension: usize,
    #[serde(default)]
    pub secants: SecantConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    /// Binary projection to resume from instead of the axis heuristic.
    #[serde(default)]
    pub initial_projection: Option<PathBuf>,
    pub output: ProjectionOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyntheticDataConfig {
    pub dimension: usize,
    pub parameters: Vec<f64>,
    pub points_per_set: usize,
    pub harmonics: usize,
}

impl Default for SyntheticDataConfig {
    fn default() -> Self {
        Self {
            dimension: 8,
            parameters: vec![0.0, 0.5, 1.0],
            points_per_set: 64,
            harmonics: 2,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SecantConfig {
    /// Merge secants within this angle; `None` keeps every secant.
    pub cull_degrees: Option<f64>,
    /// Optimize on unit-length secants.
    pub normalize: bool,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct OptimizerConfig {
    pub max_iterations: Option<usize>,
    pub line_search_alpha: Option<f64>,
    pub conjugate_rule: Option<ConjugateRule>,
    pub min_length_target: Option<f64>,
    pub collect_trace: Option<bool>,
}

impl OptimizerConfig {
    pub fn resolve(&self) -> ProjSecantParams {
        let mut p = ProjSecantParams::default();
        if let Some(v) = self.max_iterations {
            p.max_iterations = v;
        }
        if let Some(v) = self.line_search_alpha.filter(|v| v.is_finite() && *v > 0.0) {
            p.line_search_alpha = v;
        }
        if let Some(v) = self.conjugate_rule {
            p.conjugate_rule = v;
        }
        if let Some(v) = self.min_length_target {
            p.min_length_target = Some(v);
        }
        if let Some(v) = self.collect_trace {
            p.collect_trace = v;
        }
        p
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectionOutputConfig {
    pub dir: PathBuf,
    #[serde(default = "default_binary_name")]
    pub binary: String,
    #[serde(default = "default_csv_name")]
    pub csv: String,
    #[serde(default = "default_report_name")]
    pub report: String,
}

fn default_binary_name() -> String {
    "projection.bin".to_string()
}

fn default_csv_name() -> String {
    "projection.csv".to_string()
}

fn default_report_name() -> String {
    "report.json".to_string()
}

pub fn load_config(path: &Path) -> Result<ProjectionDemoConfig, String> {
    read_json_file(path)
}
