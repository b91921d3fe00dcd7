//! Axis-aligned rectangles and glyph quadrilaterals.
//!
//! The engine only ever reasons about axis-aligned bounding rectangles
//! (spec.md §3: "the engine only uses the axis-aligned bounding rectangle
//! of the quad"); `Quad` exists solely to carry the four corner points a
//! caller supplies and to compute the leftmost/rightmost x used by the
//! projection builder (spec.md §4.1).

/// An axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Whether `self` and `other` share any area (touching edges count as
    /// intersecting, matching the table-envelope intersection test of
    /// spec.md §4.5 and §4.7).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x0 <= other.x1 && self.x1 >= other.x0 && self.y0 <= other.y1 && self.y1 >= other.y0
    }

    /// Whether `other` is fully contained within `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && self.x1 >= other.x1 && self.y0 <= other.y0 && self.y1 >= other.y1
    }

    /// Whether the point lies within `self`, edges inclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Whether the center of `other` lies within `self` — the containment
    /// rule content migration uses to decide which characters move
    /// (spec.md §4.8).
    pub fn contains_center_of(&self, other: &Rect) -> bool {
        let (cx, cy) = other.center();
        self.contains_point(cx, cy)
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Union over an iterator of rectangles; `None` for an empty iterator.
    pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects.into_iter().copied().reduce(|a, b| a.union(&b))
    }
}

/// A glyph's quadrilateral bounding box: four corner points, not
/// necessarily axis-aligned in the source representation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quad {
    pub lower_left: (f64, f64),
    pub lower_right: (f64, f64),
    pub upper_left: (f64, f64),
    pub upper_right: (f64, f64),
}

impl Quad {
    pub fn new(
        lower_left: (f64, f64),
        lower_right: (f64, f64),
        upper_left: (f64, f64),
        upper_right: (f64, f64),
    ) -> Self {
        Self {
            lower_left,
            lower_right,
            upper_left,
            upper_right,
        }
    }

    /// An axis-aligned quad spanning `rect` — convenience for tests and for
    /// callers that have no skew to represent.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            lower_left: (rect.x0, rect.y0),
            lower_right: (rect.x1, rect.y0),
            upper_left: (rect.x0, rect.y1),
            upper_right: (rect.x1, rect.y1),
        }
    }

    /// Leftmost x: the minimum of the lower-left and upper-left corners
    /// (spec.md §4.1).
    pub fn left_x(&self) -> f64 {
        self.lower_left.0.min(self.upper_left.0)
    }

    /// Rightmost x: the maximum of the lower-right and upper-right corners
    /// (spec.md §4.1).
    pub fn right_x(&self) -> f64 {
        self.lower_right.0.max(self.upper_right.0)
    }

    /// The axis-aligned bounding rectangle of the quad.
    pub fn bbox(&self) -> Rect {
        let xs = [
            self.lower_left.0,
            self.lower_right.0,
            self.upper_left.0,
            self.upper_right.0,
        ];
        let ys = [
            self.lower_left.1,
            self.lower_right.1,
            self.upper_left.1,
            self.upper_right.1,
        ];
        Rect::new(
            xs.iter().cloned().fold(f64::INFINITY, f64::min),
            ys.iter().cloned().fold(f64::INFINITY, f64::min),
            xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        )
    }
}
