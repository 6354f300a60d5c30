use crate::model::{QuestionPaper, YEARS};
use parking_lot::RwLock;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One facet badge: a section or subsection name with its subquestion
/// occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
    pub name: String,
    pub count: u32,
}

/// Supplies raw per-level, per-year papers. `None` means that year has no
/// data for the level, which is not an error.
pub trait DatasetSource {
    fn paper(&self, level: &str, year: &str) -> Option<QuestionPaper>;
}

/// Per-level facet index: lexicographically sorted section and subsection
/// counts, plus the year -> paper table retained so the filter engine never
/// re-fetches. Immutable once built.
pub struct FacetIndex {
    sections: Vec<FacetCount>,
    subsections: HashMap<String, Vec<FacetCount>>,
    papers: HashMap<String, QuestionPaper>,
}

impl FacetIndex {
    pub fn build(source: &dyn DatasetSource, level: &str) -> Self {
        let mut papers: HashMap<String, QuestionPaper> = HashMap::new();
        let mut section_counts: BTreeMap<String, u32> = BTreeMap::new();
        let mut sub_counts: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();

        for year in YEARS {
            let Some(paper) = source.paper(level, year) else {
                continue;
            };
            for q in &paper.question_map {
                for sq in &q.subquestions {
                    *section_counts.entry(sq.course_section.clone()).or_insert(0) += 1;
                    *sub_counts
                        .entry(sq.course_section.clone())
                        .or_default()
                        .entry(sq.course_subsection.clone())
                        .or_insert(0) += 1;
                }
            }
            papers.insert(year.to_string(), paper);
        }

        let sections = section_counts
            .into_iter()
            .map(|(name, count)| FacetCount { name, count })
            .collect();
        let subsections = sub_counts
            .into_iter()
            .map(|(section, counts)| {
                let list = counts
                    .into_iter()
                    .map(|(name, count)| FacetCount { name, count })
                    .collect();
                (section, list)
            })
            .collect();

        Self { sections, subsections, papers }
    }

    pub fn sections(&self) -> &[FacetCount] {
        &self.sections
    }

    /// Subsection facets for a section, empty when the section is unknown.
    pub fn subsections(&self, section: &str) -> &[FacetCount] {
        self.subsections.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn paper(&self, year: &str) -> Option<&QuestionPaper> {
        self.papers.get(year)
    }
}

/// Process-wide index cache, lazily populated once per level and read-only
/// afterwards. Owned by the application context and passed by handle.
#[derive(Default)]
pub struct IndexCache {
    levels: RwLock<HashMap<String, Arc<FacetIndex>>>,
}

impl IndexCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index for `level` on first call; later calls return the
    /// cached index without touching the source.
    pub fn build(&self, source: &dyn DatasetSource, level: &str) -> Arc<FacetIndex> {
        if let Some(index) = self.levels.read().get(level) {
            return Arc::clone(index);
        }
        let mut levels = self.levels.write();
        // Lost the race to another builder: reuse its result.
        if let Some(index) = levels.get(level) {
            return Arc::clone(index);
        }
        let index = Arc::new(FacetIndex::build(source, level));
        tracing::debug!(level, sections = index.sections.len(), "facet index built");
        levels.insert(level.to_string(), Arc::clone(&index));
        index
    }

    pub fn get(&self, level: &str) -> Option<Arc<FacetIndex>> {
        self.levels.read().get(level).cloned()
    }

    /// Section facets for a level, empty when the level was never indexed.
    pub fn sections(&self, level: &str) -> Vec<FacetCount> {
        self.get(level)
            .map(|index| index.sections.clone())
            .unwrap_or_default()
    }

    /// Subsection facets for a level+section, empty when either is unknown.
    pub fn subsections(&self, level: &str, section: &str) -> Vec<FacetCount> {
        self.get(level)
            .map(|index| index.subsections(section).to_vec())
            .unwrap_or_default()
    }

    pub fn reset(&self) {
        self.levels.write().clear();
    }
}
