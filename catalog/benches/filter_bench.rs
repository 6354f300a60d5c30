use catalog::{filter_questions, group_by_subsection, Question, Subquestion};
use criterion::{criterion_group, criterion_main, Criterion};

const SECTIONS: [&str; 4] = ["Security", "Databases", "Networking", "Programming"];
const SUBSECTIONS: [&str; 3] = ["Concepts", "Implementation", "Evaluation"];

fn synthetic_question_map() -> Vec<Question> {
    (0..250u32)
        .map(|n| Question {
            question: n,
            extra: Default::default(),
            subquestions: (0..8)
                .map(|i| Subquestion {
                    id: format!("{}", (b'a' + i) as char),
                    description: format!("question {n} part {i}"),
                    course_section: SECTIONS[(n as usize + i as usize) % SECTIONS.len()].into(),
                    course_subsection: SUBSECTIONS[i as usize % SUBSECTIONS.len()].into(),
                    extra: Default::default(),
                })
                .collect(),
        })
        .collect()
}

fn bench_filter_group(c: &mut Criterion) {
    let map = synthetic_question_map();
    c.bench_function("filter_section", |b| {
        b.iter(|| filter_questions(&map, Some("Security"), None))
    });
    c.bench_function("filter_and_group", |b| {
        b.iter(|| {
            let filtered = filter_questions(&map, Some("Security"), Some("Concepts"));
            group_by_subsection(&filtered).total_rows()
        })
    });
}

criterion_group!(benches, bench_filter_group);
criterion_main!(benches);
