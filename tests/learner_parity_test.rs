//! Integration tests comparing the precise and fast new-word learners

use lexica::learning::{
    FastLearner, FlushReport, Learner, LearnerConfig, PreciseLearner, learn_from,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Letters used for filler text. `q`, `u`, `v`, `w` and `z` only appear in
/// the planted words.
const FILLER: &[u8] = b"abcdefghijklmnoprst";

/// 400 sentences of 20 random filler letters. Every fourth sentence carries
/// "qz" at a random interior position; every fourth, offset by two, carries
/// "uwvu", whose inner "wv" is always flanked by "u".
fn synthetic_corpus(seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..400)
        .map(|i| {
            let mut sentence: String = (0..20)
                .map(|_| FILLER[rng.random_range(0..FILLER.len())] as char)
                .collect();
            let position = rng.random_range(1..20);
            match i % 4 {
                0 => sentence.insert_str(position, "qz"),
                2 => sentence.insert_str(position, "uwvu"),
                _ => {}
            }
            sentence
        })
        .collect()
}

fn config() -> LearnerConfig {
    LearnerConfig {
        flush_interval: 100,
        ..Default::default()
    }
}

fn run<L: Learner>(mut learner: L, corpus: &[String]) -> (Vec<FlushReport>, L) {
    let mut reports = learn_from(&mut learner, corpus);
    let last = learner.flush();
    if last.sentences > 0 {
        reports.push(last);
    }
    (reports, learner)
}

fn assert_planted_words<L: Learner>(reports: &[FlushReport], learner: &L) {
    assert_eq!(reports.len(), 4);
    for report in reports {
        assert_eq!(report.sentences, 100);
        assert!(
            report.promoted.iter().any(|word| word == "qz"),
            "epoch {} missed qz: {:?}",
            report.epoch_id,
            report.promoted
        );
        assert!(report.promoted.iter().any(|word| word == "uwvu"));
        for frozen in ["wv", "uw", "vu", "uwv", "wvu"] {
            assert!(
                !report.promoted.iter().any(|word| word == frozen),
                "{frozen} promoted in epoch {}",
                report.epoch_id
            );
        }
    }

    let qz = learner.lexicon().get("qz").unwrap();
    assert_eq!(qz.valid_epoch_count, 4);
    assert_eq!(qz.total_freq, 100);
    assert!(qz.is_established(learner.epoch_id()));
    assert!(!learner.lexicon().contains("wv"));
}

#[test]
fn test_fast_learner_promotes_planted_word() {
    let corpus = synthetic_corpus(11);
    let (reports, learner) = run(FastLearner::new(config()).unwrap(), &corpus);
    assert_planted_words(&reports, &learner);
    assert_eq!(learner.epoch_id(), 5);
}

#[test]
fn test_precise_learner_promotes_planted_word() {
    let corpus = synthetic_corpus(11);
    let (reports, learner) = run(PreciseLearner::new(config()).unwrap(), &corpus);
    assert_planted_words(&reports, &learner);

    // Statistics for the planted word span the whole pass
    assert_eq!(learner.stat("qz").unwrap().total_freq, 100);
}

#[test]
fn test_variants_agree_on_first_epoch() {
    let corpus = synthetic_corpus(23);
    let (fast, _) = run(FastLearner::new(config()).unwrap(), &corpus);
    let (precise, _) = run(PreciseLearner::new(config()).unwrap(), &corpus);

    assert_eq!(fast[0], precise[0]);
    for (f, p) in fast.iter().zip(&precise) {
        assert_eq!(f.observed, p.observed);
    }
}

#[test]
fn test_learners_are_deterministic() {
    let corpus = synthetic_corpus(5);

    let (first, a) = run(FastLearner::new(config()).unwrap(), &corpus);
    let (second, b) = run(FastLearner::new(config()).unwrap(), &corpus);
    assert_eq!(first, second);
    assert_eq!(
        a.lexicon().to_frequency_table(),
        b.lexicon().to_frequency_table()
    );

    let (first, a) = run(PreciseLearner::new(config()).unwrap(), &corpus);
    let (second, b) = run(PreciseLearner::new(config()).unwrap(), &corpus);
    assert_eq!(first, second);
    assert_eq!(
        a.lexicon().to_frequency_table(),
        b.lexicon().to_frequency_table()
    );
}

#[test]
fn test_learners_behind_trait_objects() {
    let corpus = synthetic_corpus(3);
    let mut learners: Vec<Box<dyn Learner>> = vec![
        Box::new(FastLearner::new(config()).unwrap()),
        Box::new(PreciseLearner::new(config()).unwrap()),
    ];
    for learner in &mut learners {
        let reports = learn_from(learner.as_mut(), &corpus);
        assert_eq!(reports.len(), 4);
        // Every epoch closed automatically, nothing is left to flush
        assert_eq!(learner.flush().sentences, 0);
        assert!(learner.lexicon().contains("qz"));
    }
}
