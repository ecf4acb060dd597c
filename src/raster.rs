//! Integer line drawing between grid cells.

use crate::grid::CellPos;

/// Cells on the digital line from `(x0, y0)` to `(x1, y1)`, both endpoints
/// included, in order from the start point.
///
/// Consecutive cells are 8-connected and the line has exactly
/// `max(|dx|, |dy|) + 1` cells. Ties are broken the same way in absolute
/// terms whichever end the line starts from, so `rasterize(b, a)` yields
/// `rasterize(a, b)` reversed. Cells are produced lazily; any `i32`
/// endpoints are accepted.
pub fn rasterize(x0: i32, y0: i32, x1: i32, y1: i32) -> Line {
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    Line {
        x: x0,
        y: y0,
        dx,
        dy,
        sx: if x0 < x1 { 1 } else { -1 },
        sy: if y0 < y1 { 1 } else { -1 },
        err: dx - dy,
        remaining: dx.max(dy) as u64 + 1,
        // Lines walked against the canonical direction take ties inclusively
        inclusive_ties: (x1, y1) < (x0, y0),
    }
}

/// Iterator over the cells of one rasterized line
#[derive(Debug, Clone)]
pub struct Line {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    remaining: u64,
    inclusive_ties: bool,
}

impl Line {
    fn step(&mut self) {
        let e2 = self.err * 2;
        let (step_x, step_y) = if self.inclusive_ties {
            (e2 >= -self.dy, e2 <= self.dx)
        } else {
            (e2 > -self.dy, e2 < self.dx)
        };
        if step_x {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if step_y {
            self.err += self.dx;
            self.y += self.sy;
        }
    }
}

impl Iterator for Line {
    type Item = CellPos;

    fn next(&mut self) -> Option<CellPos> {
        if self.remaining == 0 {
            return None;
        }
        // Every cell lies between the endpoints, so it fits back into i32
        let cell = CellPos::new(self.x as i32, self.y as i32);
        self.remaining -= 1;
        if self.remaining > 0 {
            self.step();
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl ExactSizeIterator for Line {}

/// Clip the segment `from`-`to` to the square `[min, max]` on both axes.
///
/// Returns the clipped endpoints rounded to cells, or `None` when the
/// segment misses the square. Segments already inside are returned as is.
pub fn clip_line(from: CellPos, to: CellPos, min: i32, max: i32) -> Option<(CellPos, CellPos)> {
    let inside = |p: CellPos| (min..=max).contains(&p.x) && (min..=max).contains(&p.y);
    if inside(from) && inside(to) {
        return Some((from, to));
    }

    let (x0, y0) = (from.x as f64, from.y as f64);
    let (dx, dy) = (to.x as f64 - x0, to.y as f64 - y0);
    let (lo, hi) = (min as f64, max as f64);

    // Liang-Barsky
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0 - lo), (dx, hi - x0), (-dy, y0 - lo), (dy, hi - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        CellPos::new(
            (x0 + t * dx).round().clamp(lo, hi) as i32,
            (y0 + t * dy).round().clamp(lo, hi) as i32,
        )
    };
    Some((at(t0), at(t1)))
}
