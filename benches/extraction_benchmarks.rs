#![allow(missing_docs, unused_doc_comments, unused_attributes)]
//! Benchmarks for marc-discovery extraction.
//!
//! Records are synthesized in memory so the suite needs no fixture files.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use marc_discovery::extract::{creator, subject, title};
use marc_discovery::punctuation::{trim_trailing, Punctuation};
use marc_discovery::{ExtractionContext, ExtractorRegistry, Field, IndexMapping, Record};

fn field(tag: &str, ind1: char, ind2: char, subfields: &[(char, &str)]) -> Field {
    let mut field = Field::new(tag.to_string(), ind1, ind2);
    for &(code, value) in subfields {
        field.add_subfield_str(code, value);
    }
    field
}

/// A catalog record with linked alternates, subjects, and added entries.
fn sample_record(n: usize) -> Record {
    let title = format!("The collected papers of volume {n} :");
    Record::builder()
        .control_field_str("005", "20230115103045.0")
        .control_field_str("008", "970616s1997    enka          000 0 eng d")
        .field(field("050", ' ', '4', &[('a', "QA76.73.R87"), ('b', "S55 2023")]))
        .field(field(
            "100",
            '1',
            ' ',
            &[('6', "880-01"), ('a', "Smith, John,"), ('d', "1900-"), ('4', "aut")],
        ))
        .field(field("245", '1', '4', &[('a', &title), ('b', "a reader /"), ('c', "John Smith.")]))
        .field(field("490", '1', ' ', &[('a', "Studies ;"), ('v', "12")]))
        .field(field("505", '0', ' ', &[('a', "Part one--Part two -- Part three.")]))
        .field(field("650", ' ', '0', &[('a', "Programming languages"), ('x', "Design."), ('v', "Congresses.")]))
        .field(field("650", ' ', '2', &[('a', "Software.")]))
        .field(field("700", '1', ' ', &[('a', "Doe, Jane,"), ('e', "editor.")]))
        .field(field("830", ' ', '0', &[('a', "Studies ;"), ('v', "12.")]))
        .field(field("880", '1', ' ', &[('6', "100-01/(3/r"), ('a', "سميث، جون،"), ('d', "1900-")]))
        .build()
}

fn benchmark_trim_trailing(c: &mut Criterion) {
    let values = ["The title /", "Smith, John,", "Part one :", "Music.", "2nd ed."];

    c.bench_function("trim_trailing_all_classes", |b| {
        b.iter(|| {
            let mut total = 0;
            for value in values {
                for kind in Punctuation::ALL {
                    total += trim_trailing(kind, black_box(value)).len();
                }
            }
            total
        });
    });
}

fn benchmark_single_extractors(c: &mut Criterion) {
    let record = sample_record(0);
    let ctx = ExtractionContext::default();

    c.bench_function("title_show_and_sort", |b| {
        b.iter(|| (title::show(black_box(&record), &ctx), title::sort(&record, &ctx)));
    });
    c.bench_function("creator_show_with_alternates", |b| {
        b.iter(|| creator::show(black_box(&record), &ctx));
    });
    c.bench_function("subject_facet", |b| {
        b.iter(|| subject::facet(black_box(&record), &ctx));
    });
}

/// Benchmark full index documents, sequential vs rayon batch.
fn benchmark_index_1k(c: &mut Criterion) {
    let records: Vec<Record> = (0..1_000).map(sample_record).collect();
    let ctx = ExtractionContext::default();
    let mut mapping = IndexMapping::new();
    for key in ExtractorRegistry::default_registry().keys() {
        mapping
            .insert(key.to_string(), key)
            .unwrap_or_else(|e| panic!("duplicate mapping: {e}"));
    }
    let resolved = mapping
        .resolve(ExtractorRegistry::default_registry())
        .unwrap_or_else(|e| panic!("unresolvable mapping: {e}"));

    c.bench_function("index_1k_sequential", |b| {
        b.iter(|| {
            records
                .iter()
                .map(|record| resolved.index(record, &ctx).len())
                .sum::<usize>()
        });
    });
    c.bench_function("index_1k_batch", |b| {
        b.iter(|| resolved.index_batch(black_box(&records), &ctx).len());
    });
}

criterion_group!(
    benches,
    benchmark_trim_trailing,
    benchmark_single_extractors,
    benchmark_index_1k
);
criterion_main!(benches);
