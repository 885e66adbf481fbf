use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use survey_cohort::{summarize_with, Evaluation, Population, SurveyConfig, SurveyContext};
use survey_data::{Attribute, ClusterId};
use survey_model::load_model;
use tests::{data_dir, draft, respondent, shipped_context};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn classification_is_deterministic() {
    init_logger();
    let ctx = shipped_context();
    let me = respondent(["18-24", "Wyższe", "Koty", "Nad wodą", "Kobieta"]);
    let first = ctx.classify(&me).unwrap();
    let second = ctx.classify(&me).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.as_str(), "Cluster 3");
}

#[test]
fn pinned_respondents() {
    let ctx = shipped_context();
    let cases = [
        (["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"], "Cluster 0"),
        (["55-64", "Średnie", "Inne", "W lesie", "Mężczyzna"], "Cluster 6"),
    ];
    for (labels, expected) in cases {
        assert_eq!(ctx.classify(&respondent(labels)).unwrap().as_str(), expected, "{labels:?}");
    }
}

#[test]
fn incomplete_draft_loads_nothing() {
    let ctx = shipped_context();
    let d = draft([Some("25-34"), None, Some("Psy"), Some("W lesie"), Some("Kobieta")]);
    let outcome = ctx.evaluate(&d).unwrap();
    assert_eq!(
        outcome,
        Evaluation::Incomplete {
            missing: vec![Attribute::EduLevel]
        }
    );
    let state = format!("{ctx:?}");
    assert!(state.contains("model_loaded: false"), "{state}");
    assert!(state.contains("population_loaded: false"), "{state}");
}

#[test]
fn complete_draft_summarizes_the_cohort() {
    let ctx = shipped_context();
    let d = draft([Some("18-24"), Some("Wyższe"), Some("Koty"), Some("Nad wodą"), Some("Kobieta")]);
    let Evaluation::Classified(summary) = ctx.evaluate(&d).unwrap() else {
        panic!("a complete draft must be classified");
    };
    let population = ctx.get_population().unwrap();

    assert_eq!(summary.cluster.as_str(), "Cluster 3");
    assert_eq!(summary.profile.name, "Młode kociary nad wodą");
    assert_eq!(summary.size, 36);
    assert_eq!(summary.share, 16);
    assert_eq!(summary.sample.len(), 10);

    let rows: BTreeSet<usize> = summary.sample.iter().map(|r| r.row).collect();
    assert_eq!(rows.len(), summary.sample.len(), "sample rows must be distinct");
    for r in &summary.sample {
        assert_eq!(r.cluster, summary.cluster);
        assert_eq!(&population.rows()[r.row], r);
    }
    for table in &summary.distributions {
        assert_eq!(table.total(), summary.size, "{}", table.attribute);
    }
}

#[test]
fn small_cohort_is_sampled_whole() {
    let ctx = shipped_context();
    let population = ctx.get_population().unwrap();
    let profiles = ctx.get_cluster_profiles().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let summary =
        summarize_with(&ClusterId::new("Cluster 7"), population, profiles, 50, &mut rng).unwrap();
    assert_eq!(summary.size, 17);
    assert_eq!(summary.sample.len(), 17);
}

#[test]
fn empty_population_yields_empty_cohort() {
    let ctx = shipped_context();
    let profiles = ctx.get_cluster_profiles().unwrap();
    let empty = Population::from_rows(Vec::new());
    let mut rng = StdRng::seed_from_u64(1);
    let summary =
        summarize_with(&ClusterId::new("Cluster 2"), &empty, profiles, 10, &mut rng).unwrap();
    assert_eq!(summary.size, 0);
    assert_eq!(summary.share, 0);
    assert!(summary.sample.is_empty());
    assert!(summary.distributions.iter().all(|t| t.is_empty()));
}

#[test]
fn kmodes_artifact_drives_the_same_flow() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("kmodes.json"),
        r#"{
            "metadata": {"id": "pets_and_places", "name": "Pets and places", "version": "1.0.0"},
            "algorithm": "kmodes",
            "label_prefix": "Grupa ",
            "features": [
                {"column": "fav_animals", "categories": ["Brak ulubionych", "Psy", "Koty", "Inne", "Koty i psy"]},
                {"column": "fav_place", "categories": ["Nad wodą", "W lesie", "W górach", "Inne"]}
            ],
            "modes": [
                {"fav_animals": "Psy", "fav_place": "W lesie"},
                {"fav_animals": "Koty", "fav_place": "Nad wodą"}
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("profiles.json"),
        r#"{
            "Grupa 0": {"name": "Psiarze z lasu", "description": "Psy i las."},
            "Grupa 1": {"name": "Kociarze znad wody", "description": "Koty i woda."}
        }"#,
    )
    .unwrap();
    let mut config = SurveyConfig::default().with_base_dir(dir.path());
    config.model.path = "kmodes.json".into();
    config.profiles.path = "profiles.json".into();
    config.dataset.path = data_dir().join("welcome_survey_simple_v2.csv");

    let ctx = SurveyContext::new(config);
    ctx.check_profiles_cover_model().unwrap();
    let d = draft([Some(">=65"), Some("Podstawowe"), Some("Koty"), Some("Nad wodą"), Some("Kobieta")]);
    let Evaluation::Classified(summary) = ctx.evaluate(&d).unwrap() else {
        panic!("a complete draft must be classified");
    };
    assert_eq!(summary.cluster.as_str(), "Grupa 1");
    assert!(summary.size > 0);

    let total: usize = ctx.cluster_overview().unwrap().iter().map(|o| o.size).sum();
    assert_eq!(total, 229);
}

#[test]
fn injected_model_is_used_as_is() {
    let model = load_model(data_dir().join("welcome_survey_clustering_pipeline_v2.json")).unwrap();
    let config = SurveyConfig::load(tests::repo_root().join("survey.toml")).unwrap();
    let ctx = SurveyContext::with_model(config, Arc::from(model));
    assert!(format!("{ctx:?}").contains("model_loaded: true"));
    let id = ctx
        .classify(&respondent(["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"]))
        .unwrap();
    assert_eq!(id.as_str(), "Cluster 0");
}
