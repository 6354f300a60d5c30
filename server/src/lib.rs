use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use catalog::links::{encode_uri, marking_instructions_path, question_paper_path};
use catalog::persist::{load_level_dataset, load_meta, load_shard, DataPaths};
use catalog::{
    filter_questions, group_by_subsection, merge_shards, year_display_name, DatasetSource,
    FacetCount, IndexCache, LevelDataset, LevelInfo, QuestionPaper, LEVELS, YEARS,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Dataset loader over the artifact directory. Prefers the monolithic
/// `{level}.json`; when that is absent, reassembles the level from the
/// partitioner's `meta.json` + shard files. Each level is parsed at most
/// once per process. Unreadable files degrade to "level absent": selection
/// flows never surface errors.
pub struct FileSource {
    paths: DataPaths,
    levels: RwLock<HashMap<String, Option<Arc<LevelDataset>>>>,
}

impl FileSource {
    pub fn new<P: AsRef<std::path::Path>>(root: P) -> Self {
        Self { paths: DataPaths::new(root), levels: RwLock::new(HashMap::new()) }
    }

    fn level(&self, level: &str) -> Option<Arc<LevelDataset>> {
        if let Some(cached) = self.levels.read().get(level) {
            return cached.clone();
        }
        let loaded = self.load_level(level);
        let mut levels = self.levels.write();
        levels.entry(level.to_string()).or_insert(loaded).clone()
    }

    fn load_level(&self, level: &str) -> Option<Arc<LevelDataset>> {
        match load_level_dataset(&self.paths, level) {
            Ok(Some(dataset)) => return Some(Arc::new(dataset)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(level, error = %e, "level dataset unreadable, treating as absent");
                return None;
            }
        }

        let meta = match load_meta(&self.paths, level) {
            Ok(meta) => meta,
            Err(_) => return None,
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut shards = Vec::new();
        for section in meta.sections.values() {
            if !seen.insert(&section.slug) {
                continue;
            }
            match load_shard(&self.paths, level, &section.slug) {
                Ok(shard) => shards.push(shard),
                Err(e) => {
                    tracing::warn!(level, slug = section.slug.as_str(), error = %e,
                        "shard unreadable, skipping");
                }
            }
        }
        if shards.is_empty() {
            return None;
        }
        Some(Arc::new(merge_shards(shards.iter())))
    }
}

impl DatasetSource for FileSource {
    fn paper(&self, level: &str, year: &str) -> Option<QuestionPaper> {
        let dataset = self.level(level)?;
        dataset.get(&format!("{level}_{year}")).cloned()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<FileSource>,
    pub cache: Arc<IndexCache>,
    pub pdf_base: String,
}

pub fn build_app(data_dir: String, pdf_base: String) -> Router {
    let state = AppState {
        source: Arc::new(FileSource::new(&data_dir)),
        cache: Arc::new(IndexCache::new()),
        pdf_base,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/levels", get(levels_handler))
        .route("/levels/:level/sections", get(sections_handler))
        .route("/levels/:level/subsections", get(subsections_handler))
        .route("/levels/:level/questions", get(questions_handler))
        .with_state(state)
        .layer(cors)
}

async fn levels_handler() -> Json<Vec<LevelInfo>> {
    Json(LEVELS.to_vec())
}

async fn sections_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
) -> Json<Vec<FacetCount>> {
    let index = state.cache.build(&*state.source, &level);
    Json(index.sections().to_vec())
}

#[derive(Deserialize)]
pub struct SubsectionParams {
    pub section: String,
}

async fn subsections_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(params): Query<SubsectionParams>,
) -> Json<Vec<FacetCount>> {
    let index = state.cache.build(&*state.source, &level);
    Json(index.subsections(&params.section).to_vec())
}

#[derive(Deserialize)]
pub struct QuestionParams {
    pub section: Option<String>,
    pub subsection: Option<String>,
}

#[derive(Serialize)]
pub struct RowJson {
    pub question: u32,
    pub id: String,
    pub description: String,
    pub subsection: String,
    pub qp_url: String,
    pub mi_url: String,
}

#[derive(Serialize)]
pub struct GroupJson {
    pub subsection: String,
    pub rows: Vec<RowJson>,
}

#[derive(Serialize)]
pub struct YearJson {
    pub year: String,
    pub display_name: String,
    pub count: usize,
    pub groups: Vec<GroupJson>,
}

#[derive(Serialize)]
pub struct QuestionsResponse {
    pub level: String,
    pub section: Option<String>,
    pub subsection: Option<String>,
    /// Surviving subquestion rows across all years, the "N questions found"
    /// figure.
    pub total: usize,
    pub years: Vec<YearJson>,
}

async fn questions_handler(
    State(state): State<AppState>,
    Path(level): Path<String>,
    Query(params): Query<QuestionParams>,
) -> Json<QuestionsResponse> {
    let index = state.cache.build(&*state.source, &level);
    let mut total = 0;
    let mut years = Vec::new();

    for year in YEARS {
        let Some(paper) = index.paper(year) else {
            continue;
        };
        let filtered = filter_questions(
            &paper.question_map,
            params.section.as_deref(),
            params.subsection.as_deref(),
        );
        if filtered.is_empty() {
            continue;
        }
        let grouped = group_by_subsection(&filtered);
        let count = grouped.total_rows();
        total += count;

        // Groups stay in first-seen order; the UI decides whether a single
        // group under an active subsection filter gets a header.
        let groups = grouped
            .order
            .iter()
            .map(|name| GroupJson {
                subsection: name.to_string(),
                rows: grouped.groups[name]
                    .iter()
                    .map(|row| RowJson {
                        question: row.question,
                        id: row.id.to_string(),
                        description: row.description.to_string(),
                        subsection: row.subsection.to_string(),
                        qp_url: encode_uri(&question_paper_path(
                            &state.pdf_base,
                            &level,
                            year,
                            row.question,
                        )),
                        mi_url: encode_uri(&marking_instructions_path(
                            &state.pdf_base,
                            &level,
                            year,
                            row.question,
                            row.id,
                        )),
                    })
                    .collect(),
            })
            .collect();

        years.push(YearJson {
            year: year.to_string(),
            display_name: year_display_name(year).to_string(),
            count,
            groups,
        });
    }

    Json(QuestionsResponse {
        level,
        section: params.section,
        subsection: params.subsection,
        total,
        years,
    })
}
