use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;
use textfill_core::{fit, Axis, Callbacks, FitTarget, Size, SizingRequest, TextFiller};

/// Synthetic element: extents grow linearly with the font size.
struct Block {
    container: Size,
    font_size: f32,
}

impl FitTarget for Block {
    fn container_size(&self) -> Size {
        self.container
    }
    fn font_size(&self) -> f32 {
        self.font_size
    }
    fn line_height(&self) -> f32 {
        self.font_size * 1.2
    }
    fn set_font_size(&mut self, px: f32) {
        self.font_size = px;
    }
    fn set_no_wrap(&mut self) {}
    fn set_line_height(&mut self, _px: f32) {}
    fn measure(&mut self, axis: Axis) -> f32 {
        match axis {
            Axis::Width => self.font_size * 5.3,
            Axis::Height => self.font_size * 1.2,
        }
    }
}

fn bench_fit_default_range(c: &mut Criterion) {
    c.bench_function("fit_4_to_40", |b| {
        b.iter(|| fit(&mut |s: u32| s as f32 * 3.0, black_box(100.0), 4, 40));
    });
}

fn bench_fit_wide_range(c: &mut Criterion) {
    let request = SizingRequest::new(Axis::Width, 12_345.0, 1, 100_000);
    c.bench_function("fit_1_to_100k", |b| {
        b.iter(|| request.run(&mut |s: u32| black_box(s as f32 * 0.77)));
    });
}

fn bench_fill_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch");
    group.throughput(Throughput::Elements(1_000));

    let filler = TextFiller::default();
    group.bench_function("fill_all_1k", |b| {
        b.iter(|| {
            let targets = (0..1_000).map(|i| Block {
                container: Size::new(200.0 + i as f32, 48.0),
                font_size: 16.0,
            });
            black_box(filler.fill_all(targets, &mut Callbacks::new()))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_fit_default_range, bench_fit_wide_range, bench_fill_batch);
criterion_main!(benches);
