//! Converts the `<line>` elements of an SVG file into `<polyline>` elements.
//!
//! Lines sharing an endpoint and a stroke width get merged. Everything else in
//! the input document is dropped.
//!
//! `usvg` turns every shape into a path and forgets which element it came from,
//! so what we actually pick up is any stroked path made of a single straight
//! piece. Besides `<line>`, that includes one-segment `<path>` and `<polyline>`
//! elements.
//!
//! Coordinates stay in `f32`, which is what `usvg` parses them into. Chaining
//! compares exactly those values, and they're written back out in their shortest
//! `f32` form.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use ordered_float::NotNan;
use polylines::{polylinize, Options, Polyline, Segment};
use usvg::tiny_skia_path::PathSegment;

type Float = NotNan<f32>;

#[derive(Parser)]
struct Args {
    input: PathBuf,
    output: PathBuf,

    /// Connect endpoints that fall in the same grid cell of this size,
    /// instead of requiring them to be exactly equal.
    #[arg(long)]
    tolerance: Option<f32>,

    #[arg(long)]
    parallel: bool,
}

/// Collects every path that consists of a single straight piece.
///
/// `usvg` turns `<line>` elements into paths, so this is how we find them again.
fn svg_to_segments(tree: &usvg::Tree) -> anyhow::Result<Vec<Segment<Float>>> {
    fn add_group(group: &usvg::Group, ret: &mut Vec<Segment<Float>>) -> anyhow::Result<()> {
        for child in group.children() {
            match child {
                usvg::Node::Group(group) => add_group(group, ret)?,
                usvg::Node::Path(path) => {
                    let pieces: Vec<_> = path.data().segments().collect();
                    let [PathSegment::MoveTo(p), PathSegment::LineTo(q)] = pieces[..] else {
                        continue;
                    };
                    let width = path
                        .stroke()
                        .map(|s| s.width().get())
                        .with_context(|| format!("line {:?} has no stroke", path.id()))?;
                    // Widening to f64 and narrowing back in `try_new` is lossless.
                    ret.push(Segment::try_new(
                        p.x.into(),
                        p.y.into(),
                        q.x.into(),
                        q.y.into(),
                        width.into(),
                    )?);
                }
                _ => {}
            }
        }
        Ok(())
    }

    let mut ret = Vec::new();
    add_group(tree.root(), &mut ret)?;
    Ok(ret)
}

fn points_attribute(poly: &Polyline<Float>) -> String {
    let points: Vec<_> = poly
        .points()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect();
    points.join(" ")
}

fn polyline_element(poly: &Polyline<Float>) -> svg::node::element::Polyline {
    svg::node::element::Polyline::new()
        .set("fill", "none")
        .set("stroke", "#000")
        .set("stroke-width", poly.width().to_string())
        .set("points", points_attribute(poly))
}

fn file_size(path: &Path) -> anyhow::Result<u64> {
    Ok(std::fs::metadata(path)
        .with_context(|| format!("reading metadata of {}", path.display()))?
        .len())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("Parsing '{}'...", args.input.display());
    let input = std::fs::read_to_string(&args.input)?;
    let tree = usvg::Tree::from_str(&input, &usvg::Options::default())?;
    let segments = svg_to_segments(&tree)?;
    println!("{} line segments found", segments.len());

    let options = Options {
        tolerance: args.tolerance.map(NotNan::new).transpose()?,
        parallel: args.parallel,
    };
    let polylines = polylinize(segments, &options)?;
    for bucket in &polylines.buckets {
        println!(
            "  strokeWidth: {} ({} lines, {} overlapping points) -> {} polylines",
            bucket.width, bucket.segments, bucket.shared_endpoints, bucket.polylines
        );
    }
    println!("{} polyline(s) found in total", polylines.len());

    println!("Writing '{}'...", args.output.display());
    let mut document = svg::Document::new()
        .set("width", "100%")
        .set("height", "100%")
        .set("version", "1.1");
    for poly in &polylines {
        document = document.add(polyline_element(poly));
    }
    svg::save(&args.output, &document)?;

    let in_size = file_size(&args.input)?;
    let out_size = file_size(&args.output)?;
    println!(
        "Original file size: {:.2}KiB, new file size: {:.2}KiB ({:.2})",
        in_size as f64 / 1024.0,
        out_size as f64 / 1024.0,
        out_size as f64 / in_size as f64 * 100.0
    );

    Ok(())
}
