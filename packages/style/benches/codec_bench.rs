use criterion::{black_box, criterion_group, criterion_main, Criterion};
use twinspect_style::{decode, encode, merge_class_names};

const CLASSES: &str = "flex items-center mt-[8px] mr-[4px] mb-[8px] ml-[4px] w-[240px] h-[48px] \
rounded-tl-[6px] rounded-tr-[6px] pt-[12px] pb-[12px] bg-[#f5f5f5] font-[600] text-[14px] \
leading-[20px] text-[#111] hover:opacity-80";

fn decode_classes(c: &mut Criterion) {
    c.bench_function("decode_classes", |b| b.iter(|| decode(black_box(CLASSES))));
}

fn encode_style(c: &mut Criterion) {
    let style = decode(CLASSES);
    c.bench_function("encode_style", |b| b.iter(|| encode(black_box(&style))));
}

fn merge_classes(c: &mut Criterion) {
    let style = decode(CLASSES);
    c.bench_function("merge_classes", |b| {
        b.iter(|| merge_class_names(black_box(CLASSES), black_box(&style)))
    });
}

criterion_group!(benches, decode_classes, encode_style, merge_classes);
criterion_main!(benches);
