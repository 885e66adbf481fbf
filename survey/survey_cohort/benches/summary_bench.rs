use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use survey_cohort::{summarize_with, Population};
use survey_data::{read_respondents, ClusterProfiles, Respondent};
use survey_model::load_model;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn bench_summary(c: &mut Criterion) {
    let dir = data_dir();
    let model = load_model(dir.join("welcome_survey_clustering_pipeline_v2.json")).unwrap();
    let respondents = read_respondents(dir.join("welcome_survey_simple_v2.csv")).unwrap();
    let profiles =
        ClusterProfiles::read(dir.join("welcome_survey_cluster_names_and_descriptions_v2.json"))
            .unwrap();

    c.bench_function("label 229 respondents", |b| {
        b.iter(|| Population::label(model.as_ref(), black_box(respondents.clone())).unwrap())
    });

    let population = Population::label(model.as_ref(), respondents).unwrap();
    let me = Respondent::from_labels(["18-24", "Wyższe", "Koty", "Nad wodą", "Kobieta"]).unwrap();
    let cluster = model.predict(&[me]).unwrap().remove(0);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("summarize one cohort", |b| {
        b.iter(|| summarize_with(black_box(&cluster), &population, &profiles, 10, &mut rng).unwrap())
    });
}

criterion_group!(benches, bench_summary);
criterion_main!(benches);
