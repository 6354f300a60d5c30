use anyhow::Result;
use catalog::persist::{load_level_dataset, save_meta, save_shard, DataPaths};
use catalog::{partition, LEVELS};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "partitioner")]
#[command(about = "Split monolithic level datasets into per-section shards", long_about = None)]
struct Cli {
    /// Data directory holding {level}.json inputs; outputs land in
    /// {data}/{level}/
    #[arg(long, default_value = "./web/data")]
    data: String,
    /// Comma-separated level ids to partition
    #[arg(long, value_delimiter = ',')]
    levels: Option<Vec<String>>,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let levels: Vec<String> = cli
        .levels
        .unwrap_or_else(|| LEVELS.iter().map(|l| l.id.to_string()).collect());
    let paths = DataPaths::new(&cli.data);

    for level in &levels {
        if let Err(e) = partition_level(&paths, level) {
            // One bad level must not abort the batch.
            tracing::error!(level = level.as_str(), error = %e, "level partition failed, skipping");
        }
    }

    tracing::info!("granular data generation complete");
    Ok(())
}

fn partition_level(paths: &DataPaths, level: &str) -> Result<()> {
    let Some(dataset) = load_level_dataset(paths, level)? else {
        tracing::info!(level, "no dataset file, skipping");
        return Ok(());
    };

    let (meta, shards) = partition(&dataset);

    save_meta(paths, level, &meta)?;
    tracing::info!(level, sections = meta.sections.len(), "wrote meta.json");

    for (slug, shard) in &shards {
        save_shard(paths, level, slug, shard)?;
        tracing::info!(level, slug = slug.as_str(), years = shard.len(), "wrote shard");
    }
    Ok(())
}
