use xpm_raster::clip_cohen_sutherland::Window;
use xpm_raster::color::Color;
use xpm_raster::error::RasterError;
use xpm_raster::pipeline::Pipeline;
use xpm_raster::raster_surface::RasterSurface;
use xpm_raster::script::{parse_lines, parse_transforms};
use xpm_raster::trans_affine::TransformPipeline;

fn blue_surface(w: u32, h: u32) -> RasterSurface {
    RasterSurface::new(w, h, [Color::new(0, 0, 255, "b")]).unwrap()
}

#[test]
fn test_script_to_xpm() {
    let lines = parse_lines("%%%BEGIN\n-3 0 0 3 Line\n0 0 8 0 Line\n%%%END\n").unwrap();
    let ops = parse_transforms("t 1 0\n").unwrap();

    let mut surface = blue_surface(6, 4);
    let report = Pipeline::new()
        .with_transforms(TransformPipeline::from(ops))
        .with_window(Window::new(0, 0, 5, 3).unwrap())
        .render(&lines, &mut surface, "b");
    assert!(report.is_clean());
    assert_eq!(report.drawn, 2);

    let xpm = String::from_utf8(surface.serialize().unwrap()).unwrap();
    assert_eq!(
        xpm,
        "/* XPM */\n\
         static char* XPM[] = {\n\
         \"6 4 2 1\",\n\
         \"~ c #FFFFFF\",\n\
         \"b c #0000FF\",\n\
         \"~b~~~~\",\n\
         \"b~~~~~\",\n\
         \"~~~~~~\",\n\
         \"~bbbbb\"\n\
         }\n"
    );
}

#[test]
fn test_unclipped_overflow_is_reported() {
    let lines = parse_lines("0 1 9 1 Line 0 0 2 0 Line").unwrap();
    let mut surface = blue_surface(4, 3);
    let report = Pipeline::new().render(&lines, &mut surface, "b");

    assert_eq!(report.drawn, 1);
    assert_eq!(
        report.failures,
        [(
            0,
            RasterError::OutOfBounds {
                x: 4,
                y: 1,
                width: 4,
                height: 3
            }
        )]
    );
    assert_eq!(surface.pixel_cartesian(3, 1), Some("b"));
    assert_eq!(surface.pixel_cartesian(2, 0), Some("b"));
}

#[test]
fn test_rotation_about_center() {
    let lines = parse_lines("2 4 6 4 Line").unwrap();
    let ops = parse_transforms("r 4 4 90").unwrap();
    let mut surface = blue_surface(9, 9);
    let report = Pipeline::new()
        .with_transforms(TransformPipeline::from(ops))
        .render(&lines, &mut surface, "b");
    assert!(report.is_clean());

    for y in 2..=6 {
        assert_eq!(surface.pixel_cartesian(4, y), Some("b"), "y = {}", y);
    }
    assert_eq!(surface.pixel_cartesian(2, 4), Some("~"));
}

#[test]
fn test_scaling_then_clipping() {
    let lines = parse_lines("1 1 3 1 Line").unwrap();
    let ops = parse_transforms("s 0 0 3 1").unwrap();
    let window = Window::new(0, 0, 4, 4).unwrap();
    let prepared = Pipeline::new()
        .with_transforms(TransformPipeline::from(ops))
        .with_window(window)
        .prepare(&lines);

    // Scaled to (3, 1)-(9, 1), then cut at the right edge.
    let visible = prepared[0].clone().unwrap().unwrap();
    let mut xs = [visible.a.x, visible.b.x];
    xs.sort_unstable();
    assert_eq!(xs, [3, 4]);
    assert_eq!((visible.a.y, visible.b.y), (1, 1));
}
