use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use bodykit::{Assembler, Body, BodyFileDir, BodyType, BoxError, FileRef, KeyValue};

fn upper(text: &str) -> Result<String, BoxError> {
    Ok(text.to_uppercase())
}

fn no_schema(_: &serde_json::Value) -> Result<String, BoxError> {
    Ok("{}".to_string())
}

fn bench_form(c: &mut Criterion) {
    let assembler = Assembler::new(upper, no_schema, BodyFileDir::new("/body"));
    let mut body = Body::new(BodyType::FormData);
    body.kvs = (0..20)
        .map(|i| KeyValue::new(format!("field{i}"), format!("value{i}")))
        .collect();
    body.kvs
        .push(KeyValue::file("upload", vec![FileRef::new("f1", "x.png")]));

    c.bench_function("bodykit_assemble_form", |b| {
        b.iter(|| assembler.assemble(black_box(&body), "req"))
    });
}

fn bench_templated(c: &mut Criterion) {
    let assembler = Assembler::new(upper, no_schema, BodyFileDir::new("/body"));
    let mut body = Body::raw(
        BodyType::Json,
        r#"{"user":{"name":"alice","roles":{"primary":"admin"}},"note":"hello"}"#,
    );
    body.format = "JSON".to_string();
    body.json_schema = Some(serde_json::json!({}));

    c.bench_function("bodykit_assemble_templated_json", |b| {
        b.iter(|| assembler.assemble(black_box(&body), "req"))
    });
}

criterion_group!(benches, bench_form, bench_templated);
criterion_main!(benches);
