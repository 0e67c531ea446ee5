use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tokcount_core::{
    SequenceConverter, TextSource, TokenCounter, TokenFilter, TokenPattern, VocabularyIndex,
    VocabularySelector,
};

const WORDS: &[&str] = &[
    "the", "of", "and", "a", "to", "in", "is", "you", "that", "it", "he", "was", "for", "on",
    "are", "as", "with", "his", "they", "I", "at", "be", "this", "have", "from", ".", ",", "!",
];

fn generate_text(lines: usize) -> String {
    let mut text = String::new();
    for line in 0..lines {
        for word in 0..16 {
            text.push_str(WORDS[(line * 7 + word * 13) % WORDS.len()]);
            text.push(' ');
        }
        text.push('\n');
    }
    text
}

fn bench_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting");

    for lines in [100, 1_000, 10_000] {
        let text = generate_text(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("match_all", lines), &text, |b, text| {
            b.iter(|| {
                let mut counter = TokenCounter::new();
                counter
                    .run([TextSource::from_text(text.as_str())])
                    .unwrap();
                black_box(counter.report())
            })
        });

        group.bench_with_input(BenchmarkId::new("regex_filter", lines), &text, |b, text| {
            b.iter(|| {
                let filter = TokenFilter::new(
                    TokenPattern::regex("[a-z]+"),
                    TokenPattern::regex("the|a|of"),
                );
                let mut counter = TokenCounter::with_filter(filter)
                    .with_selector(VocabularySelector::FixedSize { size: 10 });
                counter
                    .run([TextSource::from_text(text.as_str())])
                    .unwrap();
                let ranked = counter.report();
                let mut out = Vec::new();
                counter.write_report(&ranked, &mut out).unwrap();
                black_box(out)
            })
        });
    }

    group.finish();
}

fn bench_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("conversion");
    let vocabulary = VocabularyIndex::from_lines(WORDS.iter().skip(3), "bench").unwrap();
    let converter = SequenceConverter::new(&vocabulary, TokenPattern::default_separator());

    for lines in [100, 1_000, 10_000] {
        let text = generate_text(lines);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &text, |b, text| {
            b.iter(|| black_box(converter.convert_text(text).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_counting, bench_conversion);
criterion_main!(benches);
