//! Cohort summaries: size, share, a random sample and per-attribute
//! frequency tables for the respondents sharing one cluster id.

use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use survey_data::{Attribute, ClusterId, ClusterProfile, ClusterProfiles, Respondent};

use crate::error::SurveyError;
use crate::population::{LabeledRespondent, Population};

/// Default upper bound of sampled cohort rows.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub value: &'static str,
    pub count: usize,
}

/// Value counts for one attribute.
///
/// Buckets follow the attribute's natural order; values that do not occur
/// are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyTable {
    pub attribute: Attribute,
    pub buckets: Vec<Bucket>,
}

impl FrequencyTable {
    pub fn from_rows<'a, I>(attribute: Attribute, rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Respondent>,
    {
        let labels = attribute.labels();
        let mut counts = vec![0usize; labels.len()];
        for r in rows {
            counts[r.ordinal(attribute)] += 1;
        }
        let buckets = labels
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(value, count)| Bucket { value, count })
            .collect();
        Self { attribute, buckets }
    }

    pub fn count(&self, value: &str) -> usize {
        self.buckets
            .iter()
            .find(|b| b.value == value)
            .map(|b| b.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CohortSummary {
    pub cluster: ClusterId,
    pub profile: ClusterProfile,
    /// Number of population rows in the cohort
    pub size: usize,
    /// Cohort size as a whole percentage of the population (0-100)
    pub share: u32,
    pub sample: Vec<LabeledRespondent>,
    /// One table per attribute, in `Attribute::ALL` order
    pub distributions: Vec<FrequencyTable>,
}

impl CohortSummary {
    pub fn distribution(&self, attribute: Attribute) -> Option<&FrequencyTable> {
        self.distributions.iter().find(|t| t.attribute == attribute)
    }
}

/// `size / total` as a whole percentage, rounding half to even.
/// An empty population has share 0.
pub fn share_percent(size: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (size as f64 / total as f64 * 100.0).round_ties_even() as u32
}

/// Summarizes the cohort of `cluster` with an entropy-seeded sample of up to
/// [`DEFAULT_SAMPLE_SIZE`] rows.
pub fn summarize(
    cluster: &ClusterId,
    population: &Population,
    profiles: &ClusterProfiles,
) -> Result<CohortSummary, SurveyError> {
    let mut rng = StdRng::from_entropy();
    summarize_with(cluster, population, profiles, DEFAULT_SAMPLE_SIZE, &mut rng)
}

/// Like [`summarize`], with an explicit sample bound and random source.
pub fn summarize_with<R: Rng + ?Sized>(
    cluster: &ClusterId,
    population: &Population,
    profiles: &ClusterProfiles,
    sample_size: usize,
    rng: &mut R,
) -> Result<CohortSummary, SurveyError> {
    let profile = profiles
        .get(cluster)
        .cloned()
        .ok_or_else(|| SurveyError::UnknownCluster(cluster.clone()))?;

    let cohort = population.cohort(cluster);
    let size = cohort.len();
    let share = share_percent(size, population.len());

    let sample: Vec<LabeledRespondent> = cohort
        .choose_multiple(rng, sample_size.min(size))
        .map(|r| (*r).clone())
        .collect();

    let distributions = Attribute::ALL
        .into_iter()
        .map(|attr| FrequencyTable::from_rows(attr, cohort.iter().map(|r| &r.respondent)))
        .collect();

    debug!(
        "cohort '{}': {} of {} respondents ({}%), {} sampled",
        cluster,
        size,
        population.len(),
        share,
        sample.len()
    );

    Ok(CohortSummary {
        cluster: cluster.clone(),
        profile,
        size,
        share,
        sample,
        distributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use survey_data::{AgeBracket, EduLevel, FavAnimals, FavPlace, Gender};

    fn row(row: usize, labels: [&str; 5], cluster: &str) -> LabeledRespondent {
        LabeledRespondent {
            row,
            respondent: Respondent::from_labels(labels).unwrap(),
            cluster: ClusterId::new(cluster),
        }
    }

    fn profiles(ids: &[&str]) -> ClusterProfiles {
        ids.iter()
            .map(|id| {
                (
                    ClusterId::new(*id),
                    ClusterProfile::new(format!("Grupa {id}"), "Opis"),
                )
            })
            .collect()
    }

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn share_rounds_half_to_even() {
        assert_eq!(share_percent(1, 8), 12); // 12.5
        assert_eq!(share_percent(3, 8), 38); // 37.5
        assert_eq!(share_percent(1, 3), 33);
        assert_eq!(share_percent(2, 3), 67);
        assert_eq!(share_percent(5, 5), 100);
        assert_eq!(share_percent(0, 5), 0);
        assert_eq!(share_percent(0, 0), 0);
    }

    #[test]
    fn frequency_table_uses_natural_order_and_skips_absent_values() {
        let rows = [
            Respondent::from_labels([">=65", "Wyższe", "Psy", "Inne", "Kobieta"]).unwrap(),
            Respondent::from_labels(["<18", "Podstawowe", "Psy", "Inne", "Kobieta"]).unwrap(),
            Respondent::from_labels(["18-24", "Wyższe", "Koty", "Inne", "Kobieta"]).unwrap(),
            Respondent::from_labels([">=65", "Wyższe", "Koty", "Inne", "Kobieta"]).unwrap(),
        ];
        let table = FrequencyTable::from_rows(Attribute::Age, rows.iter());
        let values: Vec<&str> = table.buckets.iter().map(|b| b.value).collect();
        assert_eq!(values, vec!["<18", "18-24", ">=65"]);
        assert_eq!(table.count(">=65"), 2);
        assert_eq!(table.count("25-34"), 0);
        assert_eq!(table.total(), 4);
        assert_eq!(table.max_count(), 2);
    }

    #[test]
    fn summarizes_only_the_requested_cohort() {
        let population = Population::from_rows(vec![
            row(0, ["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"], "Cluster 0"),
            row(1, ["18-24", "Średnie", "Koty", "Nad wodą", "Kobieta"], "Cluster 1"),
            row(2, ["25-34", "Wyższe", "Psy", "W lesie", "Mężczyzna"], "Cluster 0"),
            row(3, ["45-54", "Wyższe", "Psy", "Nad wodą", "Kobieta"], "Cluster 0"),
        ]);
        let summary = summarize_with(
            &ClusterId::new("Cluster 0"),
            &population,
            &profiles(&["Cluster 0", "Cluster 1"]),
            10,
            &mut seeded(),
        )
        .unwrap();

        assert_eq!(summary.size, 3);
        assert_eq!(summary.share, 75);
        assert_eq!(summary.profile.name, "Grupa Cluster 0");
        assert_eq!(summary.sample.len(), 3);
        let mut rows: Vec<usize> = summary.sample.iter().map(|r| r.row).collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 2, 3]);

        assert_eq!(summary.distributions.len(), 5);
        let place = summary.distribution(Attribute::FavPlace).unwrap();
        assert_eq!(
            place.buckets,
            vec![
                Bucket { value: FavPlace::ByTheWater.label(), count: 2 },
                Bucket { value: FavPlace::InTheForest.label(), count: 1 },
            ]
        );
        let gender = summary.distribution(Attribute::Gender).unwrap();
        assert_eq!(gender.count(Gender::Male.label()), 2);
        assert_eq!(gender.count(Gender::Female.label()), 1);
        let animals = summary.distribution(Attribute::FavAnimals).unwrap();
        assert_eq!(animals.count(FavAnimals::Dogs.label()), 3);
        let edu = summary.distribution(Attribute::EduLevel).unwrap();
        assert_eq!(edu.count(EduLevel::Higher.label()), 3);
        let age = summary.distribution(Attribute::Age).unwrap();
        assert_eq!(age.buckets[0].value, AgeBracket::From25To34.label());
    }

    #[test]
    fn large_cohort_sample_is_capped() {
        let rows = (0..25)
            .map(|i| row(i, ["35-44", "Wyższe", "Koty", "W górach", "Kobieta"], "Cluster 1"))
            .collect();
        let population = Population::from_rows(rows);
        let summary = summarize(
            &ClusterId::new("Cluster 1"),
            &population,
            &profiles(&["Cluster 1"]),
        )
        .unwrap();
        assert_eq!(summary.sample.len(), DEFAULT_SAMPLE_SIZE);
        let unique: HashSet<usize> = summary.sample.iter().map(|r| r.row).collect();
        assert_eq!(unique.len(), DEFAULT_SAMPLE_SIZE);
        assert_eq!(summary.share, 100);
    }

    #[test]
    fn empty_cohort_is_not_an_error() {
        let population = Population::from_rows(vec![row(
            0,
            ["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"],
            "Cluster 0",
        )]);
        let summary = summarize(
            &ClusterId::new("Cluster 5"),
            &population,
            &profiles(&["Cluster 0", "Cluster 5"]),
        )
        .unwrap();
        assert_eq!(summary.size, 0);
        assert_eq!(summary.share, 0);
        assert!(summary.sample.is_empty());
        assert_eq!(summary.distributions.len(), 5);
        assert!(summary.distributions.iter().all(FrequencyTable::is_empty));
    }

    #[test]
    fn missing_profile_is_unknown_cluster() {
        let population = Population::from_rows(vec![row(
            0,
            ["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"],
            "Cluster 0",
        )]);
        let err = summarize(&ClusterId::new("Cluster 0"), &population, &profiles(&["Cluster 1"]))
            .unwrap_err();
        match err {
            SurveyError::UnknownCluster(id) => assert_eq!(id.as_str(), "Cluster 0"),
            other => panic!("expected UnknownCluster, got {other:?}"),
        }
    }

    #[test]
    fn summary_serializes_for_presentation() {
        let population = Population::from_rows(vec![row(
            0,
            ["25-34", "Wyższe", "Psy", "Nad wodą", "Mężczyzna"],
            "Cluster 0",
        )]);
        let summary = summarize(&ClusterId::new("Cluster 0"), &population, &profiles(&["Cluster 0"]))
            .unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["cluster"], "Cluster 0");
        assert_eq!(json["share"], 100);
        assert_eq!(json["distributions"][0]["attribute"], "age");
        assert_eq!(json["distributions"][0]["buckets"][0]["value"], "25-34");
        assert_eq!(json["sample"][0]["fav_place"], "Nad wodą");
    }

    fn respondent_strategy() -> impl Strategy<Value = Respondent> {
        (0..7usize, 0..3usize, 0..5usize, 0..4usize, 0..2usize).prop_map(|(a, e, f, p, g)| {
            Respondent::new(
                AgeBracket::ALL[a],
                EduLevel::ALL[e],
                FavAnimals::ALL[f],
                FavPlace::ALL[p],
                Gender::ALL[g],
            )
        })
    }

    proptest! {
        #[test]
        fn sample_and_share_invariants(
            rows in prop::collection::vec((respondent_strategy(), 0..4usize), 1..60),
            seed in any::<u64>(),
        ) {
            let ids = ["Cluster 0", "Cluster 1", "Cluster 2", "Cluster 3"];
            let population = Population::from_rows(
                rows.iter()
                    .enumerate()
                    .map(|(i, (r, c))| LabeledRespondent {
                        row: i,
                        respondent: *r,
                        cluster: ClusterId::new(ids[*c]),
                    })
                    .collect(),
            );
            let profiles = profiles(&ids);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut total = 0;
            for id in ids {
                let cluster = ClusterId::new(id);
                let summary = summarize_with(&cluster, &population, &profiles, 10, &mut rng).unwrap();
                total += summary.size;

                prop_assert!(summary.share <= 100);
                prop_assert_eq!(summary.sample.len(), summary.size.min(10));
                let unique: HashSet<usize> = summary.sample.iter().map(|r| r.row).collect();
                prop_assert_eq!(unique.len(), summary.sample.len());
                prop_assert!(summary.sample.iter().all(|r| r.cluster == cluster));
                for table in &summary.distributions {
                    prop_assert_eq!(table.total(), summary.size);
                    let ords: Vec<usize> = table
                        .buckets
                        .iter()
                        .map(|b| table.attribute.labels().iter().position(|l| *l == b.value).unwrap())
                        .collect();
                    prop_assert!(ords.windows(2).all(|w| w[0] < w[1]));
                }
            }
            prop_assert_eq!(total, population.len());
        }
    }
}
