use criterion::{Criterion, black_box, criterion_group, criterion_main};
use focusguard_core::Pipeline;

fn bench_predict(c: &mut Criterion) {
    let texts = vec![
        "Google Chrome YouTube - Lofi hip hop radio",
        "Google Chrome Reddit - r/programming",
        "Code main.rs - focusguard",
        "Terminal cargo test --workspace",
        "Slack #general - Acme",
        "Spotify Discover Weekly",
    ];
    let labels = vec![
        "distracting",
        "distracting",
        "productive",
        "productive",
        "neutral",
        "neutral",
    ];
    let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();

    c.bench_function("predict_single", |b| {
        b.iter(|| pipeline.predict(black_box("Google Chrome youtube.com")));
    });

    c.bench_function("predict_batch_6", |b| {
        b.iter(|| pipeline.predict_batch(black_box(&texts)));
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
