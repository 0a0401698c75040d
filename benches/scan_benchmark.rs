//! Scanner benchmark: Measure block boundary detection on growing buffers.
//!
//! Target: < 100µs for a 32KB buffer, since every render tick rescans

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flywheel_markup::{preview, scan, BlockKinds};

/// Build a document of `blocks` mixed blocks followed by an open paragraph.
fn create_test_markup(blocks: usize) -> String {
    let mut out = String::new();
    for i in 0..blocks {
        match i % 4 {
            0 => out.push_str("<h2>Section heading</h2>"),
            1 => out.push_str("<p>Some <strong>bold</strong> paragraph text with a <a href=\"#\">link</a>.</p>"),
            2 => out.push_str("<ul><li>one</li><li>two <ul><li>nested</li></ul></li></ul>"),
            _ => out.push_str("<blockquote><p>quote</p><blockquote><p>inner</p></blockquote></blockquote>"),
        }
    }
    out.push_str("<p>Still typing <em>this");
    out
}

fn scan_small(c: &mut Criterion) {
    let markup = create_test_markup(4);
    c.bench_function("scan_4_blocks", |b| b.iter(|| scan(black_box(&markup))));
}

fn scan_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_scale");

    for blocks in [16, 128, 512] {
        let markup = create_test_markup(blocks);
        group.bench_with_input(BenchmarkId::new("blocks", blocks), &markup, |b, markup| {
            b.iter(|| scan(black_box(markup)).blocks.len());
        });
    }

    group.finish();
}

fn scan_unclosed_complex(c: &mut Criterion) {
    // Worst case: one list that never closes, searched to the end every tick
    let mut markup = String::from("<ul>");
    for _ in 0..500 {
        markup.push_str("<li>item <ul><li>x</li></ul></li>");
    }

    c.bench_function("scan_unclosed_list_500_items", |b| {
        b.iter(|| scan(black_box(&markup)));
    });
}

fn preview_fragment(c: &mut Criterion) {
    let fragment = "<p>A long paragraph that is still streaming with <strong>inline</strong> markup and a dangling <a hr";

    c.bench_function("preview_simple_fragment", |b| {
        b.iter(|| preview(black_box(fragment), BlockKinds::SIMPLE));
    });
}

criterion_group!(
    benches,
    scan_small,
    scan_scale,
    scan_unclosed_complex,
    preview_fragment,
);
criterion_main!(benches);
