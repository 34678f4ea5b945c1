use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use knn::{load_csv, ClassifierConfig, KNNClassifier, SelectionMethod, StrategyKind};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Sequential,
    Parallel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SelectionArg {
    Sort,
    Heap,
}

/// Classify one query point against a labeled CSV dataset with k-nearest-neighbors.
#[derive(Parser, Debug)]
#[command(name = "knn", version)]
struct Args {
    /// CSV file: header line, then feature columns followed by an integer label
    dataset: PathBuf,

    /// Query feature vector (comma-separated)
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_values_t = [-0.0166, 0.0001, 0.0191]
    )]
    query: Vec<f64>,

    /// Number of neighbors that vote
    #[arg(short, default_value_t = 3)]
    k: usize,

    /// Execution strategy for the distance computation
    #[arg(long, value_enum, default_value = "parallel")]
    strategy: StrategyArg,

    /// Worker thread cap (defaults to all available processors)
    #[arg(long)]
    threads: Option<usize>,

    /// Nearest-neighbor selection method
    #[arg(long, value_enum, default_value = "sort")]
    selection: SelectionArg,
}

impl Args {
    fn config(&self) -> ClassifierConfig {
        let strategy = match self.strategy {
            StrategyArg::Sequential => StrategyKind::Sequential,
            StrategyArg::Parallel => StrategyKind::Parallel,
        };
        let selection = match self.selection {
            SelectionArg::Sort => SelectionMethod::FullSort,
            SelectionArg::Heap => SelectionMethod::BoundedHeap,
        };
        let config = ClassifierConfig::new(self.k)
            .with_strategy(strategy)
            .with_selection(selection);
        match self.threads {
            Some(threads) => config.with_threads(threads),
            None => config,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let dataset = load_csv(&args.dataset)
        .with_context(|| format!("failed to load {}", args.dataset.display()))?;
    let config = args.config();
    let classifier = KNNClassifier::from_config(dataset, &config)?;
    log::info!(
        "{:?} strategy, k = {}, {} instances of dimension {}",
        config.strategy,
        classifier.k(),
        classifier.dataset().len(),
        classifier.dataset().dimension()
    );
    let prediction = classifier.predict_timed(&args.query)?;

    if classifier.strategy().is_parallel() {
        println!("Number of processors: {}", prediction.workers);
    }
    println!("Predicted label: {}", prediction.label);
    println!("Time taken: {} ms", prediction.elapsed.as_millis());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["knn", "data.csv"]).unwrap();
        assert_eq!(args.query, vec![-0.0166, 0.0001, 0.0191]);
        assert_eq!(args.k, 3);
        let config = args.config();
        assert_eq!(config.strategy, StrategyKind::Parallel);
        assert_eq!(config.threads, None);
        assert_eq!(config.selection, SelectionMethod::FullSort);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "knn",
            "data.csv",
            "--query",
            "-1.5,2,0.25",
            "-k",
            "5",
            "--strategy",
            "sequential",
            "--threads",
            "2",
            "--selection",
            "heap",
        ])
        .unwrap();
        assert_eq!(args.query, vec![-1.5, 2.0, 0.25]);
        let config = args.config();
        assert_eq!(config.k, 5);
        assert_eq!(config.strategy, StrategyKind::Sequential);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.selection, SelectionMethod::BoundedHeap);
    }
}
