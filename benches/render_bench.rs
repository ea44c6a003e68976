use criterion::{criterion_group, criterion_main, Criterion};

use snapdeck::{render_slide, CodeRenderer, Highlighter, SegmentOptions, StyleConfig};

/// Bench: segment a few paragraphs of prose
fn bench_segment(c: &mut Criterion) {
    let text = "Building a habit takes repetition. Start with something small enough that skipping it feels silly. Track the streak somewhere visible. \
\n\nMomentum compounds faster than motivation. A tiny daily win beats a heroic weekly push. Protect the streak and the results follow."
        .repeat(10);
    let opts = SegmentOptions::carousel();

    c.bench_function("segment_paragraphs", |b| {
        b.iter(|| snapdeck::segment(&text, &opts))
    });
}

/// Bench: tokenize a realistic source line
fn bench_tokenize(c: &mut Criterion) {
    let hl = Highlighter::new();
    let line = r#"const result = items.filter(x => x.score > 0.5).map(format); // keep winners"#;

    c.bench_function("tokenize_line", |b| b.iter(|| hl.tokenize(line)));
}

/// Bench: full code frame render including PNG encoding
fn bench_render_code(c: &mut Criterion) {
    let renderer = CodeRenderer::new();
    let code = (0..30)
        .map(|i| format!("const value{i} = compute({i}) + \"suffix\"; // line {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("render_code_frame", |b| b.iter(|| renderer.render(&code).unwrap()));
}

/// Bench: full slide render including PNG encoding
fn bench_render_slide(c: &mut Criterion) {
    let style = StyleConfig::default();
    let content = "Momentum compounds faster than motivation and a tiny daily win beats a heroic weekly push";

    c.bench_function("render_slide", |b| {
        b.iter(|| render_slide(content, &style, 2, 5).unwrap())
    });
}

criterion_group!(
    benches,
    bench_segment,
    bench_tokenize,
    bench_render_code,
    bench_render_slide
);
criterion_main!(benches);
