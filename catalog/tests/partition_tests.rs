use catalog::persist::{
    load_level_dataset, load_meta, load_shard, save_meta, save_shard, DataPaths,
};
use catalog::{merge_shards, partition, LevelDataset, Question, QuestionPaper, Subquestion};

fn sq(id: &str, section: &str, subsection: &str) -> Subquestion {
    Subquestion {
        id: id.into(),
        description: format!("describe {id}"),
        course_section: section.into(),
        course_subsection: subsection.into(),
        extra: Default::default(),
    }
}

fn question(number: u32, subquestions: Vec<Subquestion>) -> Question {
    Question { question: number, extra: Default::default(), subquestions }
}

fn paper(title: &str, questions: Vec<Question>) -> QuestionPaper {
    let mut extra = serde_json::Map::new();
    extra.insert("title".into(), title.into());
    QuestionPaper { extra, question_map: questions }
}

/// Two sections, one question split across both, two years.
fn sample_dataset() -> LevelDataset {
    let mut dataset = LevelDataset::new();
    dataset.insert(
        "N5_2023".into(),
        paper(
            "N5 2023",
            vec![
                question(
                    1,
                    vec![
                        sq("a", "Data Representation", "Binary"),
                        sq("b", "Security", "Encryption"),
                    ],
                ),
                question(2, vec![sq("a", "Security", "Encryption")]),
            ],
        ),
    );
    dataset.insert(
        "N5_2024".into(),
        paper(
            "N5 2024",
            vec![question(
                1,
                vec![sq("a", "Security", "Firewalls"), sq("b", "Security", "Encryption")],
            )],
        ),
    );
    dataset
}

fn triples(dataset: &LevelDataset) -> Vec<(String, u32, String)> {
    let mut out = Vec::new();
    for (year_key, paper) in dataset {
        for q in &paper.question_map {
            for sq in &q.subquestions {
                out.push((year_key.clone(), q.question, sq.id.clone()));
            }
        }
    }
    out.sort();
    out
}

#[test]
fn meta_counts_and_slugs() {
    let dataset = sample_dataset();
    let (meta, _) = partition(&dataset);

    let security = &meta.sections["Security"];
    assert_eq!(security.count, 4);
    assert_eq!(security.slug, "security");
    assert_eq!(security.subsections["Encryption"], 3);
    assert_eq!(security.subsections["Firewalls"], 1);

    let data_rep = &meta.sections["Data Representation"];
    assert_eq!(data_rep.count, 1);
    assert_eq!(data_rep.slug, "data_representation");

    // Sections appear in source encounter order, not sorted.
    let names: Vec<&String> = meta.sections.keys().collect();
    assert_eq!(names, vec!["Data Representation", "Security"]);
}

#[test]
fn shards_copy_paper_metadata_and_dedup_parent_questions() {
    let dataset = sample_dataset();
    let (_, shards) = partition(&dataset);

    let security = &shards["security"];
    assert_eq!(security["N5_2023"].extra["title"], "N5 2023");

    // Q1 of 2024 contributes two Security subquestions but one stub.
    let q_map = &security["N5_2024"].question_map;
    assert_eq!(q_map.len(), 1);
    assert_eq!(q_map[0].question, 1);
    assert_eq!(q_map[0].subquestions.len(), 2);

    // Q1 of 2023 is split: one subquestion per shard.
    assert_eq!(shards["data_representation"]["N5_2023"].question_map[0].subquestions.len(), 1);
    assert_eq!(security["N5_2023"].question_map[0].subquestions.len(), 1);
}

#[test]
fn partition_then_merge_round_trips_the_multiset() {
    let dataset = sample_dataset();
    let (_, shards) = partition(&dataset);
    let merged = merge_shards(shards.values());
    assert_eq!(triples(&merged), triples(&dataset));
}

#[test]
fn partition_is_deterministic() {
    let dataset = sample_dataset();
    let (meta_a, shards_a) = partition(&dataset);
    let (meta_b, shards_b) = partition(&dataset);
    assert_eq!(
        serde_json::to_string(&meta_a).unwrap(),
        serde_json::to_string(&meta_b).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&shards_a).unwrap(),
        serde_json::to_string(&shards_b).unwrap()
    );
}

#[test]
fn artifacts_round_trip_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    let dataset = sample_dataset();
    let (meta, shards) = partition(&dataset);

    save_meta(&paths, "N5", &meta).unwrap();
    for (slug, shard) in &shards {
        save_shard(&paths, "N5", slug, shard).unwrap();
    }

    assert_eq!(load_meta(&paths, "N5").unwrap(), meta);
    let security = load_shard(&paths, "N5", "security").unwrap();
    assert_eq!(
        serde_json::to_string(&security).unwrap(),
        serde_json::to_string(&shards["security"]).unwrap()
    );
}

#[test]
fn missing_level_file_is_none_but_malformed_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());

    assert!(load_level_dataset(&paths, "AH").unwrap().is_none());

    std::fs::write(paths.level_file("N5"), "{ not json").unwrap();
    assert!(load_level_dataset(&paths, "N5").is_err());
}

#[test]
fn level_dataset_parses_from_source_shaped_json() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::new(dir.path());
    std::fs::write(
        paths.level_file("N5"),
        r#"{
            "N5_2024": {
                "title": "National 5 2024",
                "question_map": [
                    { "question": 1, "subquestions": [
                        { "id": "a", "description": "d", "course_section": "Security",
                          "course_subsection": "Encryption" }
                    ] }
                ]
            }
        }"#,
    )
    .unwrap();

    let dataset = load_level_dataset(&paths, "N5").unwrap().unwrap();
    assert_eq!(dataset["N5_2024"].question_map[0].subquestions[0].id, "a");
}
