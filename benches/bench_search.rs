use criterion::{criterion_group, criterion_main, Criterion};
use gridfill::{BoardBuilder, TileGrid, WordIndex};

const WORDS: &[&str] = &[
    "af", "ah", "al", "aar", "aas", "bi", "bo", "bar", "bes", "bel", "belt",
];

/// All words of `length` letters over `alphabet`.
fn all_words(alphabet: &str, length: usize) -> Vec<String> {
    let mut words = vec![String::new()];
    for _ in 0..length {
        words = words
            .iter()
            .flat_map(|word| alphabet.chars().map(move |ch| format!("{}{}", word, ch)))
            .collect();
    }
    words
}

fn bench_load(c: &mut Criterion) {
    let words = all_words("abcdefgh", 4);
    c.bench_function("index.load_words", |b| {
        b.iter(|| {
            let mut index = WordIndex::new();
            index.load_words(&words);
            index
        })
    });
}

fn bench_contains_prefix(c: &mut Criterion) {
    let index = WordIndex::from_words(WORDS);
    c.bench_function("index.contains_prefix", |b| {
        b.iter(|| index.contains_prefix("be", 4))
    });
}

fn bench_search(c: &mut Criterion, name: &str, rows: &[&str], alphabet: &str) {
    let grid = TileGrid::from_rows(rows).unwrap();
    let mut index = WordIndex::new();
    for length in 1..=grid.width().max(grid.height()) {
        index.load_words(all_words(alphabet, length));
    }
    let builder = BoardBuilder::new();
    c.bench_function(&format!("builder.{}", name), |b| {
        b.iter(|| builder.search(&index, &grid).stats.boards)
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    bench_load(c);
    bench_contains_prefix(c);
    bench_search(c, "square.3", &["OOO", "OOO", "OOO"], "abc");
    bench_search(c, "blocked.4", &["OOOX", "OXOO", "OOXO", "XOOO"], "abc");
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
