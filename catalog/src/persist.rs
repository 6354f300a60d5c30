use crate::model::LevelDataset;
use crate::partition::{MetaSummary, Shard};
use anyhow::Result;
use std::fs::{create_dir_all, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Layout of the data directory: `{root}/{level}.json` monolithic datasets,
/// `{root}/{level}/meta.json` and `{root}/{level}/{slug}.json` partitioner
/// artifacts.
pub struct DataPaths {
    pub root: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn level_file(&self, level: &str) -> PathBuf {
        self.root.join(format!("{level}.json"))
    }
    pub fn level_dir(&self, level: &str) -> PathBuf {
        self.root.join(level)
    }
    pub fn meta_file(&self, level: &str) -> PathBuf {
        self.level_dir(level).join("meta.json")
    }
    pub fn shard_file(&self, level: &str, slug: &str) -> PathBuf {
        self.level_dir(level).join(format!("{slug}.json"))
    }
}

/// Loads a level's monolithic dataset. `Ok(None)` when the file does not
/// exist (the level is simply skipped); `Err` when it exists but cannot be
/// parsed.
pub fn load_level_dataset(paths: &DataPaths, level: &str) -> Result<Option<LevelDataset>> {
    let file = paths.level_file(level);
    if !file.exists() {
        return Ok(None);
    }
    let f = File::open(&file)?;
    let dataset = serde_json::from_reader(BufReader::new(f))?;
    Ok(Some(dataset))
}

pub fn save_meta(paths: &DataPaths, level: &str, meta: &MetaSummary) -> Result<()> {
    create_dir_all(paths.level_dir(level))?;
    let mut f = File::create(paths.meta_file(level))?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &DataPaths, level: &str) -> Result<MetaSummary> {
    let f = File::open(paths.meta_file(level))?;
    let meta = serde_json::from_reader(BufReader::new(f))?;
    Ok(meta)
}

pub fn save_shard(paths: &DataPaths, level: &str, slug: &str, shard: &Shard) -> Result<()> {
    create_dir_all(paths.level_dir(level))?;
    let mut f = File::create(paths.shard_file(level, slug))?;
    let json = serde_json::to_string_pretty(shard)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_shard(paths: &DataPaths, level: &str, slug: &str) -> Result<Shard> {
    let f = File::open(paths.shard_file(level, slug))?;
    let shard = serde_json::from_reader(BufReader::new(f))?;
    Ok(shard)
}
