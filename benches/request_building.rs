//! Benchmarks for request building performance
//!
//! This benchmark measures:
//! - URL templating with percent-encoded path parameters
//! - JSON body serialization for batches of input text
//! - Assembly of multipart uploads

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ai_service_rust::request::{construct_url, Method, RequestBuilder};
use serde::Serialize;

const BASE_URL: &str = "https://gateway.watsonplatform.net/language-translator/api";

#[derive(Serialize)]
struct TranslateBody {
    text: Vec<String>,
    model_id: &'static str,
}

fn bench_url_templating(c: &mut Criterion) {
    let mut group = c.benchmark_group("url_templating");

    group.bench_function("no_parameters", |b| {
        let none: [&str; 0] = [];
        b.iter(|| construct_url(black_box(BASE_URL), &["v3/models"], &none).unwrap())
    });

    group.bench_function("encoded_parameter", |b| {
        b.iter(|| {
            construct_url(
                black_box(BASE_URL),
                &["v3/models", "status"],
                &["custom model/v2?draft"],
            )
            .unwrap()
        })
    });

    group.finish();
}

fn bench_json_body(c: &mut Criterion) {
    let mut group = c.benchmark_group("json_body");

    for size in [1usize, 50, 500] {
        let body = TranslateBody {
            text: (0..size).map(|i| format!("Sentence number {} to translate.", i)).collect(),
            model_id: "en-es",
        };
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("translate", size), &body, |b, body| {
            b.iter(|| {
                let mut builder = RequestBuilder::new(Method::POST);
                builder
                    .construct_url(BASE_URL, &["v3/translate"], &[] as &[&str])
                    .unwrap()
                    .add_query("version", "2018-05-01");
                builder.set_json_body(black_box(body)).unwrap();
                builder.build().unwrap()
            })
        });
    }

    group.finish();
}

fn bench_multipart(c: &mut Criterion) {
    let mut group = c.benchmark_group("multipart");
    let corpus = vec![b'x'; 256 * 1024];
    group.throughput(Throughput::Bytes(corpus.len() as u64));

    group.bench_function("parallel_corpus_256k", |b| {
        b.iter(|| {
            let mut builder = RequestBuilder::new(Method::POST);
            builder
                .construct_url(BASE_URL, &["v3/models"], &[] as &[&str])
                .unwrap()
                .add_query("base_model_id", "en-fr");
            builder
                .set_form_data_part(
                    "parallel_corpus",
                    Some("corpus.tmx".to_string()),
                    "application/octet-stream",
                    corpus.clone(),
                )
                .unwrap();
            builder.build().unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_url_templating,
    bench_json_body,
    bench_multipart
);
criterion_main!(benches);
