use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use review_pulse::{analyze, AnalyzeConfig};

/// Review Pulse - topic labeling and sentiment scoring for review batches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file: a .json array of review strings, or any other extension
    /// read as one review per non-empty line
    #[arg(short, long)]
    input: String,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: String,

    /// Number of LDA topics
    #[arg(long)]
    topics: Option<usize>,

    /// Maximum number of category labels
    #[arg(long)]
    labels: Option<usize>,

    /// Cosine similarity threshold for label assignment
    #[arg(long)]
    threshold: Option<f64>,

    /// Random seed for the topic model
    #[arg(long)]
    seed: Option<u64>,

    /// Term pinned to the front of the label set when present (repeatable)
    #[arg(long = "priority-term")]
    priority_terms: Vec<String>,
}

fn read_reviews(path: &str) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let reviews = if path.ends_with(".json") {
        serde_json::from_str::<Vec<String>>(&raw)
            .with_context(|| format!("parsing {path} as a JSON array of strings"))?
    } else {
        raw.lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect()
    };
    debug!("Input loaded - path={}, reviews={}", path, reviews.len());
    Ok(reviews)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    info!("Starting review-pulse");

    let args = Args::parse();
    let reviews = read_reviews(&args.input)?;

    let mut config = AnalyzeConfig::default();
    if let Some(t) = args.topics {
        config.topic_count = t;
    }
    if let Some(l) = args.labels {
        config.label_count = l;
    }
    if let Some(th) = args.threshold {
        config.similarity_threshold = th;
    }
    if let Some(s) = args.seed {
        config.random_seed = s;
    }
    config.priority_terms = args.priority_terms;

    let analysis = analyze(&reviews, &config)?;

    let out_dir = std::path::Path::new(&args.output_dir);
    std::fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    std::fs::write(
        out_dir.join("per_review.json"),
        serde_json::to_vec_pretty(&analysis.per_review)?,
    )?;
    debug!("Wrote per_review.json");

    std::fs::write(
        out_dir.join("categories.json"),
        serde_json::to_vec_pretty(&analysis.per_category)?,
    )?;
    debug!("Wrote categories.json");

    for summary in &analysis.per_category {
        info!(
            "Category summary - category={}, avg_sentiment={:.2}, avg_polarity={:.2}",
            summary.category, summary.average_sentiment, summary.average_polarity
        );
    }
    info!(
        "Output persisted - directory={}, reviews={}, categories={}",
        out_dir.display(),
        analysis.per_review.len(),
        analysis.per_category.len()
    );

    Ok(())
}
