//! Benchmark of the tuple splitter, the field splitter and record extraction.
//!
//! Input is a synthetic `wp_posts`-shaped tuple list: every row carries
//! long text with embedded commas, parentheses, escaped quotes and
//! backslashes, which is the worst case for the quote-aware scanner.
//!
//! Row counts: 100, 1000, 10000.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sql_values_rs::{Columns, EscapePolicy, ParseOptions, extract, split_fields, split_rows};
use std::hint::black_box;

/// Column layout of the generated rows.
const COLUMNS: [&str; 8] = [
    "ID",
    "post_author",
    "post_date",
    "post_content",
    "post_title",
    "post_status",
    "post_parent",
    "post_type",
];

/// Words the generated content is drawn from, including the awkward ones.
const WORDS: [&str; 12] = [
    "lorem",
    "ipsum,",
    "(dolor)",
    "sit\\'s",
    "amet;",
    "\\\\path",
    "line\\n",
    "''quoted''",
    "x)",
    "(y",
    "NULL",
    "<p>",
];

fn random_text(rng: &mut StdRng, words: usize) -> String {
    (0..words)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `rows` tuples as a `VALUES` payload.
fn generate_values(rows: usize, rng: &mut StdRng) -> String {
    (0..rows)
        .map(|id| {
            let author: u32 = rng.random_range(1..20);
            let day: u32 = rng.random_range(1..29);
            let content = random_text(rng, 200);
            let title = random_text(rng, 6);
            let status = if rng.random_range(0..4) == 0 {
                "draft"
            } else {
                "publish"
            };
            format!(
                "({id},{author},'2019-03-{day:02} 10:00:00','{content}','{title}','{status}',NULL,'post')"
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn bench_split(c: &mut Criterion) {
    let columns = Columns::new(COLUMNS).expect("generated column names are unique");
    let options = ParseOptions::default().escape_policy(EscapePolicy::MySql);

    for rows in [100usize, 1000, 10_000] {
        let mut rng = StdRng::seed_from_u64(42 + rows as u64);
        let values = generate_values(rows, &mut rng);

        let mut group = c.benchmark_group(format!("split/{rows}"));
        group.throughput(Throughput::Bytes(values.len() as u64));

        group.bench_function("split_rows", |b| {
            b.iter(|| split_rows(black_box(&values)).expect("generated input is well formed"));
        });

        group.bench_function("split_fields", |b| {
            let spans = split_rows(&values).expect("generated input is well formed");
            b.iter(|| {
                for span in &spans {
                    black_box(split_fields(black_box(span.text())).expect("row splits"));
                }
            });
        });

        group.bench_function("extract", |b| {
            b.iter(|| {
                extract(black_box(&values), &columns, &options).expect("generated input is well formed")
            });
        });

        group.finish();
    }
}

criterion_group!(benches, bench_split);
criterion_main!(benches);
