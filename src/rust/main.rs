use inceptionv4::{LabelTable, LabelTableBuilder, ResourceManager, INCEPTION_V4_CLASS_COUNT};
use anyhow::{bail, Context};
use log::info;
use clap::Parser;
use ndarray::Array1;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(
    clap::ArgGroup::new("source")
        .required(true)
        .args(["labels", "manifest"]),
))]
struct Args {
    /// Label file to load
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// JSON manifest ({"url": ..., "sha256": ...}) of a label resource to download and cache
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Force a fresh download of the cached label resource
    #[arg(short, long, requires = "manifest")]
    fresh: bool,

    /// Number of entries the label resource must contain
    #[arg(long, default_value_t = INCEPTION_V4_CLASS_COUNT)]
    entries: usize,

    /// Print the label bound to this index (repeatable)
    #[arg(short, long = "index", allow_negative_numbers = true)]
    indices: Vec<i64>,

    /// File of whitespace-separated class scores to decode
    #[arg(short, long)]
    scores: Option<PathBuf>,

    /// Number of predictions to print for --scores
    #[arg(short, long, default_value_t = 5)]
    top: usize,
}

async fn load_cached(
    manifest: &Path,
    fresh: bool,
    builder: &LabelTableBuilder,
) -> anyhow::Result<LabelTable> {
    let info = ResourceManager::read_manifest(manifest)
        .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
    let manager = ResourceManager::new_default()?;

    if fresh {
        info!("Fresh download requested - removing any cached copy of {}...", info.name);
        manager.remove_download(&info)?;
    }

    Ok(manager.ensure_label_table(&info, builder).await?)
}

fn read_scores(path: &Path) -> anyhow::Result<Array1<f32>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scores from {}", path.display()))?;
    let scores = contents
        .split_whitespace()
        .map(str::parse::<f32>)
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Invalid score in {}", path.display()))?;
    Ok(Array1::from(scores))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start_time = Instant::now();
    let builder = LabelTable::builder().expected_entries(args.entries);
    let table = match (&args.labels, &args.manifest) {
        (Some(path), _) => builder
            .load_path(path)
            .with_context(|| format!("Failed to load labels from {}", path.display()))?,
        (None, Some(manifest)) => load_cached(manifest, args.fresh, &builder).await?,
        (None, None) => bail!("Either --labels or --manifest must be given"),
    };
    info!("Loaded {} labels (took {:.2?})", table.len(), start_time.elapsed());

    if args.indices.is_empty() && args.scores.is_none() {
        println!("{} labels", table.len());
        return Ok(());
    }

    for &index in &args.indices {
        let label = table.label(index)?;
        println!("{}\t{}", index, label);
    }

    if let Some(path) = &args.scores {
        let scores = read_scores(path)?;
        println!("\nTop {} predictions:", args.top.min(table.len()));
        for (rank, prediction) in table.top_k(&scores, args.top)?.iter().enumerate() {
            println!(
                "  {}. {} [{}]: {:.4}",
                rank + 1,
                prediction.label,
                prediction.index,
                prediction.score
            );
        }
    }

    Ok(())
}
