use std::path::PathBuf;

use clap::ValueEnum;
use serde::Serialize;

/// Worker count used when none is given.
pub const DEFAULT_WORKERS: usize = 4;

/// Extension of the files collected by a scan when none is given.
pub const DEFAULT_EXTENSION: &str = "dat";

/// Which candidate keeps the slot when two placements give exactly the same
/// aggregate skew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The lowest worker index wins.
    #[default]
    First,
    /// The highest worker index wins. Matches the older sorted-map heuristic,
    /// where later candidates overwrote earlier ones under an equal key.
    Last,
}

impl std::fmt::Display for TieBreak {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TieBreak::First => write!(f, "first"),
            TieBreak::Last => write!(f, "last"),
        }
    }
}

/// How the partitioner scores a candidate placement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum CandidateEvaluation {
    /// Score from worker totals alone without touching any worker.
    #[default]
    ClosedForm,
    /// Add the item to the candidate, refresh, score, then remove it again.
    Speculative,
}

impl std::fmt::Display for CandidateEvaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CandidateEvaluation::ClosedForm => write!(f, "closed-form"),
            CandidateEvaluation::Speculative => write!(f, "speculative"),
        }
    }
}

/// Configuration for a single partitioning run.
#[derive(Debug, Clone)]
pub struct PartitionConfig {
    /// Number of workers to spread items over. Must be at least 1.
    pub workers: usize,
    pub tie_break: TieBreak,
    pub evaluation: CandidateEvaluation,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            tie_break: TieBreak::default(),
            evaluation: CandidateEvaluation::default(),
        }
    }
}

impl PartitionConfig {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            ..Default::default()
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_evaluation(mut self, evaluation: CandidateEvaluation) -> Self {
        self.evaluation = evaluation;
        self
    }
}

/// Configuration for discovering input files.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory to enumerate. Not descended into recursively.
    pub dir: PathBuf,
    /// Extension without the leading dot, compared case-sensitively.
    pub extension: String,
}

impl ScanConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}
