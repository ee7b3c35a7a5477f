//! Point files shared with the plotting tools.
//!
//! Text dump: a count line followed by that many `x y` lines. The point block
//! comes first; an optional second block holds the hull in clockwise order.
//!
//! Viewer binary: a flat little-endian `f32` array of interleaved `x, y`.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use hull2::Point;

/// Contents of a text dump.
#[derive(Clone, Debug, PartialEq)]
pub struct Dump {
    pub points: Vec<Point>,
    pub hull: Option<Vec<Point>>,
}

fn push_block(out: &mut String, block: &[Point]) {
    // writing into a String cannot fail
    let _ = writeln!(out, "{}", block.len());
    for p in block {
        let _ = writeln!(out, "{} {}", p.x, p.y);
    }
}

/// Render points and an optional hull; an empty hull writes no second block.
pub fn format_text(points: &[Point], hull: Option<&[Point]>) -> String {
    let mut out = String::new();
    push_block(&mut out, points);
    if let Some(hull) = hull.filter(|h| !h.is_empty()) {
        push_block(&mut out, hull);
    }
    out
}

fn parse_block<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> Result<Option<Vec<Point>>> {
    let Some((line_no, header)) = lines.next() else {
        return Ok(None);
    };
    let count: usize = header
        .parse()
        .with_context(|| format!("line {}: bad {what} count `{header}`", line_no + 1))?;
    let mut block = Vec::with_capacity(count);
    for _ in 0..count {
        let (line_no, line) = lines
            .next()
            .with_context(|| format!("{what} block ends after {} of {count} points", block.len()))?;
        let mut fields = line.split_whitespace();
        let (Some(x), Some(y), None) = (fields.next(), fields.next(), fields.next()) else {
            bail!("line {}: expected `x y`, got `{line}`", line_no + 1);
        };
        let x: f64 = x
            .parse()
            .with_context(|| format!("line {}: bad x `{x}`", line_no + 1))?;
        let y: f64 = y
            .parse()
            .with_context(|| format!("line {}: bad y `{y}`", line_no + 1))?;
        block.push(Point::new(x, y));
    }
    Ok(Some(block))
}

pub fn parse_text(text: &str) -> Result<Dump> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i, l.trim()))
        .filter(|(_, l)| !l.is_empty());
    let points = parse_block(&mut lines, "point")?.context("empty dump")?;
    let hull = parse_block(&mut lines, "hull")?;
    if let Some((line_no, extra)) = lines.next() {
        bail!("line {}: unexpected trailing content `{extra}`", line_no + 1);
    }
    Ok(Dump { points, hull })
}

pub fn write_text(path: &Path, points: &[Point], hull: Option<&[Point]>) -> Result<()> {
    create_parent(path)?;
    fs::write(path, format_text(points, hull))
        .with_context(|| format!("writing {}", path.display()))
}

pub fn read_text(path: &Path) -> Result<Dump> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_text(&text).with_context(|| format!("parsing {}", path.display()))
}

/// Coordinates are narrowed to `f32`.
pub fn encode_viewer(points: &[Point]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(points.len() * 8);
    for p in points {
        bytes.extend_from_slice(&(p.x as f32).to_le_bytes());
        bytes.extend_from_slice(&(p.y as f32).to_le_bytes());
    }
    bytes
}

pub fn decode_viewer(bytes: &[u8]) -> Result<Vec<Point>> {
    ensure!(
        bytes.len() % 4 == 0,
        "viewer file length {} is not a whole number of f32 values",
        bytes.len()
    );
    let floats: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    ensure!(
        floats.len() % 2 == 0,
        "viewer file holds {} floats; x and y must pair up",
        floats.len()
    );
    Ok(floats
        .chunks_exact(2)
        .map(|xy| Point::new(f64::from(xy[0]), f64::from(xy[1])))
        .collect())
}

pub fn write_viewer(path: &Path, points: &[Point]) -> Result<()> {
    create_parent(path)?;
    fs::write(path, encode_viewer(points)).with_context(|| format!("writing {}", path.display()))
}

pub fn read_viewer(path: &Path) -> Result<Vec<Point>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    decode_viewer(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 4.5),
            Point::new(4.0, 4.0),
            Point::new(4.25, 0.0),
        ]
    }

    #[test]
    fn text_layout_matches_plot_tools() {
        let pts = [Point::new(1.5, 2.0), Point::new(3.0, 4.0)];
        assert_eq!(format_text(&pts, None), "2\n1.5 2\n3 4\n");
        assert_eq!(format_text(&pts, Some(&[])), "2\n1.5 2\n3 4\n");
        assert_eq!(format_text(&pts, Some(&pts[..1])), "2\n1.5 2\n3 4\n1\n1.5 2\n");
    }

    #[test]
    fn text_dump_round_trips_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/test.txt");
        let pts = square();
        let hull = vec![pts[0], pts[1], pts[2], pts[3]];
        write_text(&path, &pts, Some(&hull)).unwrap();
        let dump = read_text(&path).unwrap();
        assert_eq!(dump.points, pts);
        assert_eq!(dump.hull, Some(hull));

        write_text(&path, &pts, None).unwrap();
        assert_eq!(read_text(&path).unwrap().hull, None);
    }

    #[test]
    fn text_parser_reports_broken_files() {
        assert!(parse_text("").is_err());
        assert!(parse_text("3\n0 0\n1 1\n").is_err());
        assert!(parse_text("1\n0 zero\n").is_err());
        assert!(parse_text("1\n0 0 0\n").is_err());
        assert!(parse_text("1\n0 0\n1\n2 2\n9\n").is_err());
        let ok = parse_text("\n2\n 0 0 \n1 1\n\n").unwrap();
        assert_eq!(ok.points.len(), 2);
    }

    #[test]
    fn viewer_binary_is_interleaved_f32() {
        let pts = [Point::new(1.0, -2.0)];
        let bytes = encode_viewer(&pts);
        assert_eq!(&bytes[..4], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[4..], &(-2.0f32).to_le_bytes());

        let dir = tempdir().unwrap();
        let path = dir.path().join("points.bin");
        write_viewer(&path, &square()).unwrap();
        assert_eq!(read_viewer(&path).unwrap(), square());
    }

    #[test]
    fn viewer_reader_rejects_unpaired_floats() {
        let bytes = 1.0f32.to_le_bytes();
        assert!(decode_viewer(&bytes).is_err());
        assert!(decode_viewer(&bytes[..3]).is_err());
        assert!(decode_viewer(&[]).unwrap().is_empty());
    }
}
