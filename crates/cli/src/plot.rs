//! Terminal scatter plot of a dump: `.` for points, `#` for hull vertices.

use hull2::Point;

struct Frame {
    min: Point,
    span: Point,
    width: usize,
    height: usize,
}

impl Frame {
    fn fit(points: &[Point], width: usize, height: usize) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        Some(Self {
            min,
            span: max - min,
            width: width.max(1),
            height: height.max(1),
        })
    }

    fn axis(value: f64, min: f64, span: f64, cells: usize) -> usize {
        if span <= 0.0 {
            return 0;
        }
        let t = ((value - min) / span).clamp(0.0, 1.0);
        (t * (cells - 1) as f64).round() as usize
    }

    /// Row 0 is the top of the plot.
    fn cell(&self, p: Point) -> (usize, usize) {
        let col = Self::axis(p.x, self.min.x, self.span.x, self.width);
        let row = Self::axis(p.y, self.min.y, self.span.y, self.height);
        (self.height - 1 - row, col)
    }
}

/// Rasterize `points` and `hull` into `height` lines of `width` characters.
pub fn render(points: &[Point], hull: Option<&[Point]>, width: usize, height: usize) -> String {
    let hull = hull.unwrap_or(&[]);
    let all: Vec<Point> = points.iter().chain(hull).copied().collect();
    let Some(frame) = Frame::fit(&all, width, height) else {
        return String::new();
    };
    let mut grid = vec![vec![' '; frame.width]; frame.height];
    for &p in points {
        let (r, c) = frame.cell(p);
        grid[r][c] = '.';
    }
    for &p in hull {
        let (r, c) = frame.cell(p);
        grid[r][c] = '#';
    }
    let mut out = String::with_capacity(frame.height * (frame.width + 1));
    for row in grid {
        out.extend(row.iter().copied().collect::<String>().trim_end().chars());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_land_on_grid_corners() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(5.0, 5.0),
        ];
        let hull = [pts[3], pts[2], pts[1], pts[0]];
        let out = render(&pts, Some(&hull), 5, 3);
        assert_eq!(out, "#   #\n  .\n#   #\n");
    }

    #[test]
    fn empty_and_degenerate_inputs() {
        assert_eq!(render(&[], None, 10, 4), "");
        let single = [Point::new(3.0, 3.0)];
        assert_eq!(render(&single, None, 3, 2), "\n.\n");
    }
}
