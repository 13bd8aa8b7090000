use criterion::{black_box, criterion_group, criterion_main, Criterion};
use xpm_raster::basics::{Line, Point};
use xpm_raster::clip_cohen_sutherland::Window;
use xpm_raster::color::Color;
use xpm_raster::line_bresenham::draw_line;
use xpm_raster::pipeline::Pipeline;
use xpm_raster::raster_surface::RasterSurface;
use xpm_raster::trans_affine::{AffineOp, TransformPipeline};

const SIZE: u32 = 512;

/// Lines from the center to every tenth border pixel, overshooting the
/// surface by half its size.
fn fan() -> Vec<Line> {
    let c = SIZE as i32 / 2;
    let far = SIZE as i32 + c;
    (-c..far)
        .step_by(10)
        .flat_map(|t| {
            [
                Line::from_coords(c, c, t, -c),
                Line::from_coords(c, c, t, far),
                Line::from_coords(c, c, -c, t),
                Line::from_coords(c, c, far, t),
            ]
        })
        .collect()
}

fn surface() -> RasterSurface {
    RasterSurface::new(SIZE, SIZE, [Color::new(0, 0, 255, "b")]).unwrap()
}

fn bresenham(c: &mut Criterion) {
    let line = Line::from_coords(0, 0, SIZE as i32 - 1, SIZE as i32 / 3);
    let mut s = surface();
    c.bench_function("bresenham 512px", |b| {
        b.iter(|| draw_line(&mut s, black_box(&line), "b").unwrap())
    });
}

fn clip(c: &mut Criterion) {
    let lines = fan();
    let window = Window::new(0, 0, SIZE as i32 - 1, SIZE as i32 - 1).unwrap();
    c.bench_function("cohen-sutherland fan", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(window.clip(black_box(line)).unwrap());
            }
        })
    });
}

fn pipeline(c: &mut Criterion) {
    let lines = fan();
    let pivot = Point::new(SIZE as i32 / 2, SIZE as i32 / 2);
    let rotate = AffineOp::Rotate {
        pivot,
        degrees: 30.0,
    };
    let scale = AffineOp::Scale {
        pivot,
        sx: 0.8,
        sy: 1.2,
    };
    let last = SIZE as i32 - 1;
    let pipeline = Pipeline::new()
        .with_transforms(TransformPipeline::new().then(rotate).then(scale))
        .with_window(Window::new(0, 0, last, last).unwrap());
    let mut s = surface();

    c.bench_function("pipeline fan + serialize", |b| {
        b.iter(|| {
            s.clear();
            black_box(pipeline.render(&lines, &mut s, "b"));
            black_box(s.serialize().unwrap());
        })
    });
}

criterion_group!(benches, bresenham, clip, pipeline);
criterion_main!(benches);
