//! Criterion benchmarks for Lexica.
//!
//! Covers the three hot paths:
//! - k-shortest-paths over word lattices
//! - new-word learning throughput
//! - fuzzy suggestion latency

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use lexica::graph::{KShortestPaths, LayeredDagSolver, WeightedGraph, k_shortest_paths};
use lexica::learning::{FastLearner, Learner, LearnerConfig, PreciseLearner, learn_from};
use lexica::spelling::{FuzzyCorrector, VocabularyCompiler};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// A layered lattice over `n` boundaries with edges spanning up to 5 steps.
fn generate_lattice(n: usize) -> WeightedGraph {
    let mut rng = StdRng::seed_from_u64(17);
    let mut graph = WeightedGraph::new();
    graph.add_node(0);
    for from in 0..n - 1 {
        for to in from + 1..n.min(from + 6) {
            if to == from + 1 || rng.random_bool(0.4) {
                graph
                    .add_edge(from, to, rng.random_range(0.5..12.0))
                    .unwrap();
            }
        }
    }
    graph
}

/// Random sentences with a handful of recurring planted words.
fn generate_corpus(count: usize) -> Vec<String> {
    let planted = ["qzx", "lexica", "vwy"];
    let mut rng = StdRng::seed_from_u64(29);
    (0..count)
        .map(|i| {
            let mut sentence: String = (0..30)
                .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
                .collect();
            let position = rng.random_range(1..30);
            sentence.insert_str(position, planted[i % planted.len()]);
            sentence
        })
        .collect()
}

fn generate_vocabulary(count: usize) -> Vec<(String, u64)> {
    let mut rng = StdRng::seed_from_u64(31);
    (0..count)
        .map(|_| {
            let len = rng.random_range(3..10);
            let word: String = (0..len)
                .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
                .collect();
            (word, rng.random_range(1..1_000))
        })
        .collect()
}

/// Benchmark shortest path ranking.
fn bench_k_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_shortest_paths");
    let graph = generate_lattice(40);

    group.bench_function("dijkstra_k10", |b| {
        b.iter(|| black_box(k_shortest_paths(black_box(&graph), 0, 39, 10)))
    });

    let layered = KShortestPaths::new(LayeredDagSolver);
    group.bench_function("layered_dag_k10", |b| {
        b.iter(|| black_box(layered.find(black_box(&graph), 0, 39, 10).unwrap()))
    });

    group.finish();
}

/// Benchmark learner throughput.
fn bench_learning(c: &mut Criterion) {
    let mut group = c.benchmark_group("learning");
    group.sample_size(10);

    let corpus = generate_corpus(2_000);
    let config = LearnerConfig {
        flush_interval: 500,
        ..Default::default()
    };
    group.throughput(Throughput::Elements(corpus.len() as u64));

    group.bench_function("fast_learner", |b| {
        b.iter(|| {
            let mut learner = FastLearner::new(config.clone()).unwrap();
            black_box(learn_from(&mut learner, &corpus));
            black_box(learner.flush())
        })
    });

    group.bench_function("precise_learner", |b| {
        b.iter(|| {
            let mut learner = PreciseLearner::new(config.clone()).unwrap();
            black_box(learn_from(&mut learner, &corpus));
            black_box(learner.flush())
        })
    });

    group.finish();
}

/// Benchmark fuzzy suggestions.
fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    group.sample_size(20);

    let mut compiler = VocabularyCompiler::new();
    compiler.extend(generate_vocabulary(20_000));
    let corrector = FuzzyCorrector::new(compiler.compile().unwrap());

    let queries = vec!["searc", "engin", "documnet", "qurey", "algortihm"];

    group.bench_function("suggest_single_word", |b| {
        b.iter(|| black_box(corrector.suggest(black_box("searc")).unwrap()))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("suggest_batch_words", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(corrector.suggest(black_box(query)).unwrap());
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_k_shortest_paths, bench_learning, bench_suggest);

criterion_main!(benches);
