use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle. `y` grows northward.
#[derive(Copy, Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// One of the four children of a subdivided node, in child-slot order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    NW = 0,
    NE = 1,
    SW = 2,
    SE = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Quadrant::NW, Quadrant::NE, Quadrant::SW, Quadrant::SE];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Rect {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Rect { min_x, min_y, max_x, max_y }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point {
            x: midpoint(self.min_x, self.max_x),
            y: midpoint(self.min_y, self.max_y),
        }
    }

    // A span that overflows f64 is degenerate too; NaN fails the `> 0.0` test.
    pub fn is_degenerate(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        !w.is_finite() || !h.is_finite() || !(w > 0.0) || !(h > 0.0)
    }

    /// Closed containment: points on any edge are inside.
    pub fn covers(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    // Closed: rectangles sharing only an edge still intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x && self.max_x >= other.min_x && self.min_y <= other.max_y && self.max_y >= other.min_y
    }

    // only meaningful for finite points
    pub fn clamp(&self, point: &Point) -> Point {
        Point {
            x: point.x.clamp(self.min_x, self.max_x),
            y: point.y.clamp(self.min_y, self.max_y),
        }
    }

    /// Tight bounds of `points`; `None` if empty or if any point is non-finite.
    ///
    /// A single point, or points sharing an x or y, give a zero-area box that
    /// `build` rejects as degenerate. Use [`Rect::bounding_box_padded`] to get
    /// a usable extent in that case.
    pub fn bounding_box(points: &[Point]) -> Option<Rect> {
        let (first, rest) = points.split_first()?;
        if !first.is_finite() {
            return None;
        }
        let mut r = Rect::new(first.x, first.y, first.x, first.y);
        for p in rest {
            if !p.is_finite() {
                return None;
            }
            r.min_x = r.min_x.min(p.x);
            r.min_y = r.min_y.min(p.y);
            r.max_x = r.max_x.max(p.x);
            r.max_y = r.max_y.max(p.y);
        }
        Some(r)
    }

    /// [`Rect::bounding_box`] grown by `pad` on every side.
    pub fn bounding_box_padded(points: &[Point], pad: f64) -> Option<Rect> {
        let r = Rect::bounding_box(points)?;
        Some(Rect::new(r.min_x - pad, r.min_y - pad, r.max_x + pad, r.max_y + pad))
    }

    // Tie rule: a coordinate equal to the midpoint goes east / north.
    #[inline]
    pub fn quadrant_of(&self, p: &Point) -> Quadrant {
        let c = self.center();
        match (p.x >= c.x, p.y >= c.y) {
            (false, true) => Quadrant::NW,
            (true, true) => Quadrant::NE,
            (false, false) => Quadrant::SW,
            (true, false) => Quadrant::SE,
        }
    }

    /// The four child rectangles, in `[NW, NE, SW, SE]` order.
    pub fn quarters(&self) -> [Rect; 4] {
        let c = self.center();
        [
            Rect { min_x: self.min_x, min_y: c.y,        max_x: c.x,        max_y: self.max_y }, // NW
            Rect { min_x: c.x,        min_y: c.y,        max_x: self.max_x, max_y: self.max_y }, // NE
            Rect { min_x: self.min_x, min_y: self.min_y, max_x: c.x,        max_y: c.y        }, // SW
            Rect { min_x: c.x,        min_y: self.min_y, max_x: self.max_x, max_y: c.y        }, // SE
        ]
    }
}

// min + half the span stays finite where (min + max) would overflow.
#[inline]
fn midpoint(min: f64, max: f64) -> f64 {
    let span = max - min;
    if span.is_finite() {
        min + 0.5 * span
    } else {
        0.5 * min + 0.5 * max
    }
}
