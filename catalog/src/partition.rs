use crate::model::{LevelDataset, Question, QuestionPaper};
use crate::slug::slugify;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Aggregated per-level metadata written to `meta.json`. Section and
/// subsection keys keep the order they were first seen in the source
/// dataset, so repeated runs produce identical files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaSummary {
    pub sections: IndexMap<String, SectionMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionMeta {
    pub count: u32,
    pub slug: String,
    pub subsections: IndexMap<String, u32>,
}

/// One section's slice of a level dataset, in the original per-year shape.
pub type Shard = IndexMap<String, QuestionPaper>;

/// Splits a monolithic level dataset into per-section shards and the
/// aggregated metadata summary. A parent question is synthesized once per
/// (shard, year) entry and reused for every matching subquestion.
pub fn partition(dataset: &LevelDataset) -> (MetaSummary, IndexMap<String, Shard>) {
    let mut meta = MetaSummary::default();
    let mut shards: IndexMap<String, Shard> = IndexMap::new();

    for (year_key, paper) in dataset {
        for q in &paper.question_map {
            for sq in &q.subquestions {
                let slug = slugify(&sq.course_section);

                let section = meta
                    .sections
                    .entry(sq.course_section.clone())
                    .or_insert_with(|| SectionMeta {
                        slug: slug.clone(),
                        ..SectionMeta::default()
                    });
                section.count += 1;
                *section
                    .subsections
                    .entry(sq.course_subsection.clone())
                    .or_insert(0) += 1;

                let entry = shards
                    .entry(slug)
                    .or_default()
                    .entry(year_key.clone())
                    .or_insert_with(|| QuestionPaper {
                        extra: paper.extra.clone(),
                        question_map: Vec::new(),
                    });
                let pos = match entry.question_map.iter().position(|eq| eq.question == q.question) {
                    Some(pos) => pos,
                    None => {
                        entry.question_map.push(Question {
                            question: q.question,
                            extra: q.extra.clone(),
                            subquestions: Vec::new(),
                        });
                        entry.question_map.len() - 1
                    }
                };
                entry.question_map[pos].subquestions.push(sq.clone());
            }
        }
    }

    (meta, shards)
}

/// Reassembles a level dataset from section shards. Questions split across
/// shards are merged back by question number; subquestion multiset equals
/// the partition input's.
pub fn merge_shards<'a, I>(shards: I) -> LevelDataset
where
    I: IntoIterator<Item = &'a Shard>,
{
    let mut merged = LevelDataset::new();
    for shard in shards {
        for (year_key, paper) in shard {
            let entry = merged.entry(year_key.clone()).or_insert_with(|| QuestionPaper {
                extra: paper.extra.clone(),
                question_map: Vec::new(),
            });
            for q in &paper.question_map {
                let pos = match entry.question_map.iter().position(|eq| eq.question == q.question) {
                    Some(pos) => pos,
                    None => {
                        entry.question_map.push(Question {
                            question: q.question,
                            extra: q.extra.clone(),
                            subquestions: Vec::new(),
                        });
                        entry.question_map.len() - 1
                    }
                };
                entry.question_map[pos]
                    .subquestions
                    .extend(q.subquestions.iter().cloned());
            }
        }
    }
    merged
}
