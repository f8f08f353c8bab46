use criterion::{black_box, criterion_group, criterion_main, Criterion};
use inceptionv4::{LabelTable, INCEPTION_V4_CLASS_COUNT};
use ndarray::Array1;

fn labels_resource() -> String {
    (0..INCEPTION_V4_CLASS_COUNT)
        .map(|i| format!("n{:08} synthetic class number {}\n", i, i))
        .collect()
}

fn bench_loading(c: &mut Criterion) {
    let resource = labels_resource();
    let mut group = c.benchmark_group("Loading");
    group.sample_size(50);

    group.bench_function("from_reader", |b| b.iter(|| {
        LabelTable::from_reader(black_box(resource.as_bytes())).unwrap()
    }));

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let table = LabelTable::from_reader(labels_resource().as_bytes()).unwrap();
    let mut group = c.benchmark_group("Lookup");

    group.bench_function("label", |b| b.iter(|| {
        table.label(black_box(500)).unwrap().len()
    }));

    group.bench_function("out_of_range", |b| b.iter(|| {
        table.label(black_box(1001)).is_err()
    }));

    group.finish();
}

fn bench_decoding(c: &mut Criterion) {
    let table = LabelTable::from_reader(labels_resource().as_bytes()).unwrap();
    let scores = Array1::from_iter((0..INCEPTION_V4_CLASS_COUNT).map(|i| ((i * 7919) % 1001) as f32));
    let mut group = c.benchmark_group("Decoding");

    group.bench_function("predict", |b| b.iter(|| {
        table.predict(black_box(&scores)).unwrap()
    }));

    group.bench_function("top_5", |b| b.iter(|| {
        table.top_k(black_box(&scores), 5).unwrap()
    }));

    group.finish();
}

criterion_group!(benches, bench_loading, bench_lookup, bench_decoding);
criterion_main!(benches);
