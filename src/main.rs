use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use skewsplit::config::{
    CandidateEvaluation, PartitionConfig, ScanConfig, TieBreak, DEFAULT_EXTENSION,
    DEFAULT_WORKERS,
};
use skewsplit::error::SplitError;
use skewsplit::partition::Partitioner;
use skewsplit::report::{OutputFormat, PlanReport};
use skewsplit::scan::scan_directory;

const USAGE_MESSAGE: &str = "Proper Usage is: skewsplit <dir>";

#[derive(Parser, Debug)]
#[command(name = "skewsplit")]
#[command(version)]
#[command(about = "Spread the files of a directory over a fixed number of workers by size")]
struct Args {
    /// Directory holding the input files
    dir: PathBuf,

    /// Number of workers to spread files over
    #[arg(long, short = 'w', default_value_t = DEFAULT_WORKERS, value_parser = parse_workers)]
    workers: usize,

    /// Extension of the files to collect (without the dot)
    #[arg(long, short = 'e', default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Which worker wins when two placements give the same skew
    #[arg(long, value_enum, default_value_t = TieBreak::First)]
    tie_break: TieBreak,

    /// How candidate placements are scored
    #[arg(long, value_enum, default_value_t = CandidateEvaluation::ClosedForm)]
    evaluation: CandidateEvaluation,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

fn parse_workers(s: &str) -> Result<usize, String> {
    let workers: usize = s
        .parse()
        .map_err(|_| format!("`{}` is not a worker count", s))?;
    if workers == 0 {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(workers)
}

async fn run(args: Args) -> Result<(), SplitError> {
    let scan_config = ScanConfig::new(args.dir).with_extension(args.extension);
    let items = scan_directory(&scan_config).await?;

    let config = PartitionConfig::new(args.workers)
        .with_tie_break(args.tie_break)
        .with_evaluation(args.evaluation);
    let assignment = Partitioner::new(config.clone()).partition(items)?;

    tracing::info!(
        workers = assignment.len(),
        total_bytes = assignment.total_weight(),
        aggregate_skew = assignment.aggregate_skew,
        "Partitioned files"
    );

    let report = PlanReport::new(&assignment, &config);
    println!("{}", report.render(args.output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_usage() => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE_MESSAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            tracing::error!(error = %e, "Partitioning failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_workers_accepts_positive() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert_eq!(parse_workers("1"), Ok(1));
    }

    #[test]
    fn parse_workers_rejects_zero_and_garbage() {
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("-1").is_err());
        assert!(parse_workers("many").is_err());
    }

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["skewsplit", "/data"]).unwrap();
        assert_eq!(args.dir, PathBuf::from("/data"));
        assert_eq!(args.workers, 4);
        assert_eq!(args.extension, "dat");
        assert_eq!(args.tie_break, TieBreak::First);
        assert_eq!(args.evaluation, CandidateEvaluation::ClosedForm);
        assert_eq!(args.output, OutputFormat::Table);
    }

    #[test]
    fn args_overrides() {
        let args = Args::try_parse_from([
            "skewsplit",
            "/data",
            "-w",
            "8",
            "-e",
            "bin",
            "--tie-break",
            "last",
            "--evaluation",
            "speculative",
            "-o",
            "json",
        ])
        .unwrap();
        assert_eq!(args.workers, 8);
        assert_eq!(args.extension, "bin");
        assert_eq!(args.tie_break, TieBreak::Last);
        assert_eq!(args.evaluation, CandidateEvaluation::Speculative);
        assert_eq!(args.output, OutputFormat::Json);
    }

    #[test]
    fn args_require_single_directory() {
        assert!(Args::try_parse_from(["skewsplit"]).is_err());
        assert!(Args::try_parse_from(["skewsplit", "/a", "/b"]).is_err());
        assert!(Args::try_parse_from(["skewsplit", "/a", "-w", "0"]).is_err());
    }
}
