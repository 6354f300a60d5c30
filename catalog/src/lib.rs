pub mod filter;
pub mod index;
pub mod links;
pub mod model;
pub mod partition;
pub mod persist;
pub mod slug;

pub use filter::{filter_questions, group_by_subsection, FilteredQuestion, GroupRow, Grouped};
pub use index::{DatasetSource, FacetCount, FacetIndex, IndexCache};
pub use model::{
    year_display_name, LevelDataset, LevelInfo, Question, QuestionPaper, Subquestion, LEVELS,
    YEARS,
};
pub use partition::{merge_shards, partition, MetaSummary, SectionMeta, Shard};
pub use slug::slugify;
