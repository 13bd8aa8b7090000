// Command-line driver for xpm-raster.
//
// Usage:
//   xpm-draw draw -f <input.ps> -w <width> -H <height> [-o output.xpm] [-t ops.tsf]
//                 [--wl L] [--wb B] [--wr R] [--wt T] [--color RRGGBB]
//   xpm-draw gradient [-o red-gradient.xpm] [--size 50]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use xpm_raster::clip_cohen_sutherland::Window;
use xpm_raster::color::Color;
use xpm_raster::pipeline::Pipeline;
use xpm_raster::raster_surface::RasterSurface;
use xpm_raster::script::{parse_lines, parse_transforms};
use xpm_raster::trans_affine::TransformPipeline;

/// Palette code every drawn line uses.
const LINE_CODE: &str = "b";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the lines of a PostScript-style file into an XPM image.
    Draw(DrawArgs),
    /// Write a black-to-red vertical gradient.
    Gradient(GradientArgs),
}

#[derive(clap::Args, Debug)]
struct DrawArgs {
    /// Line description file (`x1 y1 x2 y2 Line` statements).
    #[arg(short = 'f', long)]
    input: PathBuf,

    #[arg(short, long)]
    width: u32,

    #[arg(short = 'H', long)]
    height: u32,

    #[arg(short, long, default_value = "./output.xpm")]
    output: PathBuf,

    /// Transformation file (`t`, `r`, `s` operations) applied before clipping.
    #[arg(short, long)]
    transforms: Option<PathBuf>,

    /// Left edge of the clip window [default: 0].
    #[arg(long, allow_hyphen_values = true)]
    wl: Option<i32>,

    /// Bottom edge of the clip window [default: 0].
    #[arg(long, allow_hyphen_values = true)]
    wb: Option<i32>,

    /// Right edge of the clip window [default: width - 1].
    #[arg(long, allow_hyphen_values = true)]
    wr: Option<i32>,

    /// Top edge of the clip window [default: height - 1].
    #[arg(long, allow_hyphen_values = true)]
    wt: Option<i32>,

    /// Line color as RRGGBB.
    #[arg(long, default_value = "0000FF")]
    color: String,
}

#[derive(clap::Args, Debug)]
struct GradientArgs {
    #[arg(short, long, default_value = "red-gradient.xpm")]
    output: PathBuf,

    /// Edge length of the square image.
    #[arg(long, default_value_t = 50)]
    size: u32,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Draw(args) => cmd_draw(&args),
        Command::Gradient(args) => cmd_gradient(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// draw
// ============================================================================

fn cmd_draw(args: &DrawArgs) -> Result<()> {
    if args.width == 0 || args.height == 0 {
        bail!("width and height must be greater than 0");
    }

    let text = read(&args.input)?;
    let lines = parse_lines(&text).with_context(|| format!("parsing {}", args.input.display()))?;

    let transforms = match &args.transforms {
        Some(path) => {
            let text = read(path)?;
            let ops = parse_transforms(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            TransformPipeline::from(ops)
        }
        None => TransformPipeline::new(),
    };

    let [r, g, b] = Color::parse_rgb(&args.color)
        .with_context(|| format!("invalid color {:?}, expected RRGGBB", args.color))?;
    let line_color = Color::new(r, g, b, LINE_CODE);
    let mut surface = RasterSurface::new(args.width, args.height, [line_color])?;

    let mut pipeline = Pipeline::new().with_transforms(transforms);
    if let Some(window) = window_from_args(args)? {
        pipeline = pipeline.with_window(window);
    }

    let report = pipeline.render(&lines, &mut surface, LINE_CODE);
    info!(
        "{} line(s): {} drawn, {} clipped away, {} failed",
        lines.len(),
        report.drawn,
        report.clipped_away,
        report.failures.len()
    );

    write_surface(&surface, &args.output)
}

/// Clip window from the `--w*` flags; `None` when none of them is given.
fn window_from_args(args: &DrawArgs) -> Result<Option<Window>> {
    if args.wl.is_none() && args.wb.is_none() && args.wr.is_none() && args.wt.is_none() {
        return Ok(None);
    }

    let last = |n: u32| i32::try_from(n - 1).unwrap_or(i32::MAX);
    let wl = args.wl.unwrap_or(0);
    let wb = args.wb.unwrap_or(0);
    let wr = args.wr.unwrap_or_else(|| last(args.width));
    let wt = args.wt.unwrap_or_else(|| last(args.height));

    if wl > wr || wb > wt {
        bail!("clip window needs wl <= wr and wb <= wt (got {wl}, {wb}, {wr}, {wt})");
    }
    Ok(Some(Window::new(wl, wb, wr, wt)?))
}

// ============================================================================
// gradient
// ============================================================================

fn cmd_gradient(args: &GradientArgs) -> Result<()> {
    let surface = gradient_surface(args.size)?;
    write_surface(&surface, &args.output)
}

/// Single-character codes that are neither the `~` background nor need
/// escaping inside an XPM string.
fn palette_codes() -> impl Iterator<Item = char> {
    ('#'..'~').filter(|&c| c != '\\')
}

/// Square surface whose rows fade from black (top) to red (bottom).
fn gradient_surface(size: u32) -> Result<RasterSurface> {
    let available = palette_codes().count();
    if size == 0 || size as usize > available {
        bail!("gradient size must be between 1 and {}", available);
    }

    let mut surface = RasterSurface::new(size, size, std::iter::empty())?;
    for (row, code) in palette_codes().take(size as usize).enumerate() {
        let red = if size == 1 {
            255
        } else {
            (row as f64 / (size - 1) as f64 * 255.0) as u8
        };
        let code = code.to_string();
        surface.add_color(red, 0, 0, &code)?;
        for x in 0..size as i32 {
            surface.set_pixel(x, row as i32, &code)?;
        }
    }
    Ok(surface)
}

// ============================================================================
// I/O
// ============================================================================

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_surface(surface: &RasterSurface, path: &Path) -> Result<()> {
    let bytes = surface.serialize()?;
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Saved: {}", path.display());
    Ok(())
}
