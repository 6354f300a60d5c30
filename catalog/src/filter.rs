use crate::model::{Question, Subquestion};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A question reduced to the subquestions that matched the active facets.
#[derive(Debug, Serialize)]
pub struct FilteredQuestion<'a> {
    pub question: u32,
    pub subquestions: Vec<&'a Subquestion>,
}

/// Keeps subquestions matching the selected facets; an unset facet is a
/// wildcard. Questions left with no subquestions are dropped. Input order is
/// preserved for questions and for subquestions within each.
pub fn filter_questions<'a>(
    question_map: &'a [Question],
    section: Option<&str>,
    subsection: Option<&str>,
) -> Vec<FilteredQuestion<'a>> {
    let mut result = Vec::new();
    for q in question_map {
        let surviving: Vec<&Subquestion> = q
            .subquestions
            .iter()
            .filter(|sq| {
                section.map_or(true, |s| sq.course_section == s)
                    && subsection.map_or(true, |s| sq.course_subsection == s)
            })
            .collect();
        if !surviving.is_empty() {
            result.push(FilteredQuestion {
                question: q.question,
                subquestions: surviving,
            });
        }
    }
    result
}

/// One display row: a subquestion flattened with its parent question number.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow<'a> {
    pub question: u32,
    pub id: &'a str,
    pub description: &'a str,
    pub subsection: &'a str,
}

/// Filtered rows bucketed by subsection. `order` lists subsection names by
/// first appearance, which is the order the UI renders group headers in.
#[derive(Debug, Default, Serialize)]
pub struct Grouped<'a> {
    pub order: Vec<&'a str>,
    pub groups: HashMap<&'a str, Vec<GroupRow<'a>>>,
}

impl Grouped<'_> {
    /// Total subquestion rows across all groups. Any "N questions found"
    /// count downstream reports this, not the number of distinct questions.
    pub fn total_rows(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Flattens filtered questions in order and buckets rows by subsection name.
/// Rows within a group keep encounter order.
pub fn group_by_subsection<'a>(questions: &[FilteredQuestion<'a>]) -> Grouped<'a> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<GroupRow>> = HashMap::new();
    for q in questions {
        for sq in &q.subquestions {
            let key = sq.course_subsection.as_str();
            let rows = match groups.entry(key) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    order.push(key);
                    e.insert(Vec::new())
                }
            };
            rows.push(GroupRow {
                question: q.question,
                id: &sq.id,
                description: &sq.description,
                subsection: key,
            });
        }
    }
    Grouped { order, groups }
}
