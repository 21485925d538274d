use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinspect_parser::{parse, serialize};

fn component_source(rows: usize) -> String {
    let mut source = String::from("import React from \"react\";\n\nexport default function Table({ items }) {\n  return (\n    <table className=\"mt-[8px]\">\n");
    for i in 0..rows {
        source.push_str(&format!(
            "      <tr key=\"{i}\" className=\"pt-[{i}px] pb-[4px]\">\n        <td>{{items[{i}].name}}</td>\n        <td>Row {i}</td>\n      </tr>\n"
        ));
    }
    source.push_str("    </table>\n  );\n}\n");
    source
}

fn parse_small_component(c: &mut Criterion) {
    let source = component_source(5);

    c.bench_function("parse_small_component", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn parse_large_component(c: &mut Criterion) {
    let source = component_source(500);

    c.bench_function("parse_large_component", |b| {
        b.iter(|| parse(black_box(&source)))
    });
}

fn serialize_large_component(c: &mut Criterion) {
    let module = parse(&component_source(500)).unwrap();

    c.bench_function("serialize_large_component", |b| {
        b.iter(|| serialize(black_box(&module)))
    });
}

criterion_group!(
    benches,
    parse_small_component,
    parse_large_component,
    serialize_large_component
);
criterion_main!(benches);
