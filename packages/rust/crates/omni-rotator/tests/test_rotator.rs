//! BannerRotator tests.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use omni_picker::{PickError, ScriptedSource, WeightedPicker};
use omni_rotator::{
    Banner, BannerCatalog, BannerFilter, BannerRotator, BannerSource, Campaign, RotatorError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn banner(id: &str, campaign: &str, weight: u8, is_active: bool) -> Banner {
    Banner {
        id: id.to_string(),
        campaign: campaign.to_string(),
        name: id.to_string(),
        url: format!("https://example.com/{id}"),
        weight,
        is_active,
    }
}

fn create_test_catalog() -> BannerCatalog {
    BannerCatalog::new(
        vec![Campaign::new("Spring"), Campaign::new("Winter")],
        vec![
            banner("spring-a", "spring", 3, true),
            banner("spring-b", "spring", 1, true),
            banner("spring-off", "spring", 10, false),
            banner("winter-a", "winter", 5, true),
            banner("winter-zero", "winter", 0, true),
        ],
    )
    .unwrap()
}

/// Source that counts how often it is queried.
struct CountingSource {
    inner: BannerCatalog,
    calls: Arc<AtomicUsize>,
}

impl BannerSource for CountingSource {
    fn source_name(&self) -> &'static str {
        "counting"
    }

    fn eligible_banners(&self, filter: &BannerFilter) -> Result<Vec<Banner>, RotatorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.eligible_banners(filter)
    }
}

#[test]
fn test_biased_choice_follows_scripted_draw() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let filter = BannerFilter::campaign("spring");

    // spring-a holds 3/4 of the weight.
    let mut source = ScriptedSource::new(vec![0.7, 0.8]);
    assert_eq!(rotator.biased_choice(&filter, &mut source).unwrap().id, "spring-a");
    assert_eq!(rotator.biased_choice(&filter, &mut source).unwrap().id, "spring-b");
}

#[test]
fn test_inactive_and_zero_weight_never_chosen() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut rng = StdRng::seed_from_u64(8);

    for _ in 0..5_000 {
        let chosen = rotator.biased_choice(&BannerFilter::any(), &mut rng).unwrap();
        assert_ne!(chosen.id, "spring-off");
        assert_ne!(chosen.id, "winter-zero");
    }
}

#[test]
fn test_campaign_scope_is_respected() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut rng = StdRng::seed_from_u64(9);

    for _ in 0..1_000 {
        let chosen = rotator
            .biased_choice(&BannerFilter::campaign("winter"), &mut rng)
            .unwrap();
        assert_eq!(chosen.campaign, "winter");
    }
}

#[test]
fn test_no_eligible_banners() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut source = ScriptedSource::new(vec![0.5]);

    let err = rotator
        .biased_choice(&BannerFilter::campaign("autumn"), &mut source)
        .unwrap_err();
    assert!(matches!(
        err,
        RotatorError::NoEligibleBanners { campaign: Some(ref slug) } if slug == "autumn"
    ));
    assert_eq!(source.consumed(), 0);
}

#[test]
fn test_all_zero_weights_is_pick_error() {
    let catalog = BannerCatalog::new(
        vec![Campaign::new("Quiet")],
        vec![banner("q1", "quiet", 0, true), banner("q2", "quiet", 0, true)],
    )
    .unwrap();
    let rotator = BannerRotator::with_defaults(catalog);
    let mut source = ScriptedSource::new(vec![0.5]);

    let err = rotator.biased_choice(&BannerFilter::any(), &mut source).unwrap_err();
    assert!(matches!(err, RotatorError::Pick(PickError::InvalidWeight(_))));
}

#[test]
fn test_biased_sample_is_distinct_and_capped() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut rng = StdRng::seed_from_u64(10);

    for _ in 0..500 {
        let sample = rotator
            .biased_sample(10, &BannerFilter::campaign("spring"), &mut rng)
            .unwrap();
        let ids: HashSet<&str> = sample.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(sample.len(), 2);
        assert_eq!(ids, HashSet::from(["spring-a", "spring-b"]));
    }
}

#[test]
fn test_biased_sample_skips_zero_weight() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut rng = StdRng::seed_from_u64(12);

    let sample = rotator
        .biased_sample(2, &BannerFilter::campaign("winter"), &mut rng)
        .unwrap();
    assert_eq!(sample.len(), 1);
    assert_eq!(sample[0].id, "winter-a");
}

#[test]
fn test_biased_sample_zero_count_skips_source() {
    let calls = Arc::new(AtomicUsize::new(0));
    let rotator = BannerRotator::with_defaults(CountingSource {
        inner: create_test_catalog(),
        calls: Arc::clone(&calls),
    });
    let mut source = ScriptedSource::default();

    let sample = rotator
        .biased_sample(0, &BannerFilter::campaign("autumn"), &mut source)
        .unwrap();
    assert!(sample.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    rotator.biased_choice(&BannerFilter::any(), &mut source).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(rotator.source().source_name(), "counting");
}

#[test]
fn test_biased_sample_without_eligible_fails() {
    let rotator = BannerRotator::with_defaults(create_test_catalog());
    let mut source = ScriptedSource::default();

    let err = rotator
        .biased_sample(2, &BannerFilter::campaign("autumn"), &mut source)
        .unwrap_err();
    assert!(matches!(err, RotatorError::NoEligibleBanners { .. }));
}

#[test]
fn test_simulate_reports_expected_shares() {
    let rotator = BannerRotator::new(create_test_catalog(), WeightedPicker::new());
    let mut rng = StdRng::seed_from_u64(13);

    let report = rotator
        .simulate(40_000, &BannerFilter::campaign("spring"), &mut rng)
        .unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report[0].banner, "spring-a");
    assert!((report[0].expected - 0.75).abs() < f64::EPSILON);
    assert!((report[0].observed - 0.75).abs() < 0.015);
    assert!((report[1].expected - 0.25).abs() < f64::EPSILON);
    assert!((report[1].observed - 0.25).abs() < 0.015);
    assert_eq!(*rotator.picker(), WeightedPicker::default());
}

#[test]
fn test_rotator_shared_across_threads() {
    let rotator = Arc::new(BannerRotator::with_defaults(create_test_catalog()));

    let handles: Vec<_> = (0..4_u64)
        .map(|seed| {
            let rotator = Arc::clone(&rotator);
            std::thread::spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..200)
                    .map(|_| {
                        rotator
                            .biased_choice(&BannerFilter::campaign("spring"), &mut rng)
                            .map(|b| b.campaign)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    for handle in handles {
        let campaigns = handle.join().expect("thread").expect("choices");
        assert!(campaigns.iter().all(|c| c == "spring"));
    }
}
