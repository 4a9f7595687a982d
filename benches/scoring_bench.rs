use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hitscope::{
    assess_track, extract_features, score_features, AudioBuffer, EngineConfig, FeatureVector,
    ScoringContext,
};

/// Synthetic 30-second program: a 440 Hz carrier with a 2 Hz amplitude
/// pulse so the onset detector has something to chew on
fn test_signal(sample_rate: u32, seconds: f32) -> Vec<f32> {
    let n = (sample_rate as f32 * seconds) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let envelope = 0.5 + 0.5 * (2.0 * std::f32::consts::PI * 2.0 * t).sin();
            envelope * (2.0 * std::f32::consts::PI * 440.0 * t).sin()
        })
        .collect()
}

fn bench_feature_extraction(c: &mut Criterion) {
    let samples = test_signal(44100, 30.0);
    let config = EngineConfig::default();

    c.bench_function("extract_features_30s", |b| {
        b.iter(|| {
            let buffer = AudioBuffer::new(black_box(&samples), 44100, 1);
            extract_features(&buffer, &config).unwrap()
        })
    });
}

fn bench_scoring(c: &mut Criterion) {
    let features = FeatureVector::builder()
        .tempo_bpm(120.0)
        .danceability(0.8)
        .energy(0.75)
        .valence(0.7)
        .build();
    let context = ScoringContext {
        genre: Some("Pop".to_string()),
        ..ScoringContext::default()
    };

    c.bench_function("score_features", |b| {
        b.iter(|| score_features(black_box(&features), black_box(&context)))
    });
}

fn bench_full_assessment(c: &mut Criterion) {
    let samples = test_signal(44100, 30.0);
    let config = EngineConfig::default();
    let context = ScoringContext {
        genre: Some("Pop".to_string()),
        ..ScoringContext::default()
    };

    c.bench_function("assess_track_30s", |b| {
        b.iter(|| {
            let buffer = AudioBuffer::new(black_box(&samples), 44100, 1);
            assess_track(&buffer, &context, &config).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_feature_extraction,
    bench_scoring,
    bench_full_assessment
);
criterion_main!(benches);
