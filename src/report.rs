//! Rendering of a file assignment for the console.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::config::{CandidateEvaluation, PartitionConfig, TieBreak};
use crate::error::Result;
use crate::partition::Assignment;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerReport {
    pub worker: usize,
    pub total_bytes: u64,
    pub files: Vec<FileEntry>,
}

/// Serializable view of an assignment of files to workers.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub generated_at: DateTime<Utc>,
    pub workers_requested: usize,
    pub tie_break: TieBreak,
    pub evaluation: CandidateEvaluation,
    pub file_count: usize,
    pub total_bytes: u64,
    pub mean_bytes: f64,
    pub max_bytes: u64,
    pub aggregate_skew: f64,
    pub workers: Vec<WorkerReport>,
}

impl PlanReport {
    pub fn new(assignment: &Assignment<PathBuf>, config: &PartitionConfig) -> Self {
        let workers = assignment
            .workers
            .iter()
            .map(|w| WorkerReport {
                worker: w.worker,
                total_bytes: w.total_weight,
                files: w
                    .items
                    .iter()
                    .map(|i| FileEntry {
                        path: i.handle.display().to_string(),
                        bytes: i.weight,
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            workers_requested: config.workers,
            tie_break: config.tie_break,
            evaluation: config.evaluation,
            file_count: assignment.item_count(),
            total_bytes: assignment.total_weight(),
            mean_bytes: assignment.stats.mean_weight,
            max_bytes: assignment.stats.max_weight,
            aggregate_skew: assignment.aggregate_skew,
            workers,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Table => Ok(self.render_table()),
        }
    }

    /// One `Worker <n>: [files...]` line per worker, then a per-worker summary.
    fn render_table(&self) -> String {
        let mut lines: Vec<String> = self
            .workers
            .iter()
            .map(|worker| {
                let files: Vec<&str> = worker.files.iter().map(|f| f.path.as_str()).collect();
                format!("Worker {}: [{}]", worker.worker, files.join(", "))
            })
            .collect();

        lines.push(String::new());
        lines.push(format!("{:<8} {:<8} BYTES", "WORKER", "FILES"));
        lines.push("-".repeat(30));
        lines.extend(self.workers.iter().map(|worker| {
            format!(
                "{:<8} {:<8} {}",
                worker.worker,
                worker.files.len(),
                worker.total_bytes
            )
        }));
        lines.push(String::new());
        lines.push(format!(
            "Files: {}  Bytes: {}  Mean: {:.1}  Max: {}",
            self.file_count, self.total_bytes, self.mean_bytes, self.max_bytes
        ));
        lines.push(format!("Aggregate skew: {:.4}", self.aggregate_skew));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{partition, Item};

    fn sample_report() -> PlanReport {
        let items = vec![
            Item::new(PathBuf::from("/data/a.dat"), 100),
            Item::new(PathBuf::from("/data/b.dat"), 10),
            Item::new(PathBuf::from("/data/c.dat"), 10),
        ];
        let assignment = partition(items, 2).unwrap();
        PlanReport::new(&assignment, &PartitionConfig::new(2))
    }

    #[test]
    fn table_lists_each_worker() {
        let table = sample_report().render(OutputFormat::Table).unwrap();
        let mut lines = table.lines();
        assert_eq!(lines.next(), Some("Worker 1: [/data/a.dat]"));
        assert_eq!(lines.next(), Some("Worker 2: [/data/b.dat, /data/c.dat]"));
        assert!(table.contains("Files: 3  Bytes: 120  Mean: 60.0  Max: 100"));
        assert!(table.ends_with("Aggregate skew: 0.8000"));
    }

    #[test]
    fn table_summary_layout() {
        let table = sample_report().render(OutputFormat::Table).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "WORKER   FILES    BYTES");
        assert_eq!(lines[4], "-".repeat(30));
        assert_eq!(lines[5], "1        1        100");
        assert_eq!(lines[6], "2        2        20");
        assert!(!table.ends_with('\n'));
    }

    #[test]
    fn json_carries_totals_and_settings() {
        let json = sample_report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["workers_requested"], 2);
        assert_eq!(value["tie_break"], "first");
        assert_eq!(value["evaluation"], "closed_form");
        assert_eq!(value["total_bytes"], 120);
        assert_eq!(value["workers"][0]["total_bytes"], 100);
        assert_eq!(value["workers"][1]["files"][1]["path"], "/data/c.dat");
        assert_eq!(value["workers"][1]["files"][1]["bytes"], 10);
    }
}
