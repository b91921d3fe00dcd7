//! Per-axis grid positions and the cell grid they index into
//! (spec.md §3).

/// One inferred divider position on one axis.
///
/// Invariants (spec.md §3): `min <= pos <= max`; a `GridPositions` list is
/// strictly ordered by `pos`; the first and last entries have
/// `uncertainty == 0` and `min == pos == max` equal to the page edge on
/// that side; `reinforcement` counts vector endpoints snapped here.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridPosition {
    pub pos: f64,
    pub min: f64,
    pub max: f64,
    pub uncertainty: u32,
    pub reinforcement: u32,
}

impl GridPosition {
    pub fn new(pos: f64, min: f64, max: f64, uncertainty: u32) -> Self {
        Self {
            pos,
            min,
            max,
            uncertainty,
            reinforcement: 0,
        }
    }

    /// An edge position: zero uncertainty, a degenerate `[pos, pos]`
    /// interval at the page boundary (spec.md §4.2 step 2).
    pub fn edge(pos: f64) -> Self {
        Self::new(pos, pos, pos, 0)
    }

    /// Snaps `x` into this position's running mean: `pos_new = (pos_old *
    /// r + x) / (r + 1)`, `r` read before increment, then `reinforcement`
    /// is incremented (spec.md §4.3). This must read `r` first — the
    /// formula divides by `r + 1` but the numerator uses the pre-increment
    /// `r`, so reading `reinforcement` after bumping it would double-count
    /// the new sample.
    pub fn reinforce(&mut self, x: f64) {
        let r = self.reinforcement as f64;
        self.pos = (self.pos * r + x) / (r + 1.0);
        self.reinforcement += 1;
    }
}

/// Ordered, per-axis sequence of grid positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridPositions {
    positions: Vec<GridPosition>,
}

impl GridPositions {
    pub fn new(positions: Vec<GridPosition>) -> Self {
        Self { positions }
    }

    pub fn as_slice(&self) -> &[GridPosition] {
        &self.positions
    }

    pub fn as_mut_slice(&mut self) -> &mut [GridPosition] {
        &mut self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&GridPosition> {
        self.positions.get(i)
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut GridPosition> {
        self.positions.get_mut(i)
    }

    pub fn remove(&mut self, i: usize) -> GridPosition {
        self.positions.remove(i)
    }

    pub fn push(&mut self, p: GridPosition) {
        self.positions.push(p);
    }

    pub fn is_strictly_ordered(&self) -> bool {
        self.positions.windows(2).all(|w| w[0].pos < w[1].pos)
    }

    /// The envelope spanned by the first and last positions.
    pub fn span(&self) -> Option<(f64, f64)> {
        match (self.positions.first(), self.positions.last()) {
            (Some(a), Some(b)) => Some((a.pos, b.pos)),
            _ => None,
        }
    }

    /// `snap(x, expand)` (spec.md §4.3): returns the index of the position
    /// whose `[min, max]` interval contains `x`. If `x` falls outside
    /// every interval and `expand` is true, extends to whichever
    /// neighboring position is closer, splitting at the midpoint between
    /// the previous `max` and next `min`. Returns `None` on failure.
    ///
    /// On a successful snap, reinforces the chosen position's `pos`
    /// towards `x` via [`GridPosition::reinforce`].
    pub fn snap(&mut self, x: f64, expand: bool) -> Option<usize> {
        for (i, p) in self.positions.iter().enumerate() {
            if x >= p.min && x <= p.max {
                self.positions[i].reinforce(x);
                return Some(i);
            }
        }
        if !expand {
            return None;
        }
        // Find the two positions whose gap contains x, then decide which
        // side of the midpoint between their max/min it falls on.
        for i in 0..self.positions.len().saturating_sub(1) {
            let (left, right) = (&self.positions[i], &self.positions[i + 1]);
            if x > left.max && x < right.min {
                let mid = (left.max + right.min) / 2.0;
                let idx = if x <= mid { i } else { i + 1 };
                self.positions[idx].reinforce(x);
                return Some(idx);
            }
        }
        None
    }
}

/// Ruled-line and crossing state for one cell in the grid.
///
/// All four fields are accumulated as non-negative counters (spec.md §3)
/// but compared by truthiness wherever the algorithm asks "is there a
/// line" / "is there a crossing" / "is this cell full" — see
/// [`CellFlags::has_h_line`] etc. The design note in spec.md §9 is explicit
/// that the source compares `!!a->h_line != !!b->h_line`, i.e. truthiness,
/// while still keeping the raw count for diagnostics; routing every
/// mergeability check through these helpers instead of the raw `u32`
/// fields makes that the only way to read the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    pub h_line: u32,
    pub v_line: u32,
    pub h_crossed: u32,
    pub v_crossed: u32,
    pub full: u32,
}

impl CellFlags {
    pub fn has_h_line(&self) -> bool {
        self.h_line > 0
    }

    pub fn has_v_line(&self) -> bool {
        self.v_line > 0
    }

    pub fn has_h_crossed(&self) -> bool {
        self.h_crossed > 0
    }

    pub fn has_v_crossed(&self) -> bool {
        self.v_crossed > 0
    }

    pub fn is_full(&self) -> bool {
        self.full > 0
    }
}

/// The W x H matrix of cell descriptors (spec.md §3).
///
/// The rightmost column and bottommost row are padding carrying the right
/// and bottom border of the real `(W-1) x (H-1)` cells; they never hold
/// content, so `full` must remain 0 there (spec.md §3, §8).
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    w: usize,
    h: usize,
    cells: Vec<CellFlags>,
}

impl CellGrid {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![CellFlags::default(); w * h],
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    pub fn get(&self, x: usize, y: usize) -> &CellFlags {
        &self.cells[self.index(x, y)]
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> &mut CellFlags {
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Whether every cell of the padding column/row is empty of content,
    /// the universal invariant of spec.md §8.
    pub fn padding_is_clean(&self) -> bool {
        (0..self.h).all(|y| !self.get(self.w - 1, y).is_full())
            && (0..self.w).all(|x| !self.get(x, self.h - 1).is_full())
    }

    /// Zeroes `full` and both crossing counters across the padding column
    /// and row (spec.md §8: "full == 0 after erase phase"). The crossing
    /// recorder's `find_cell` can legitimately land a char's far edge
    /// exactly on the table's outer envelope position, which resolves to
    /// the padding index under its `v == pos[len-1]` rule — this erase
    /// pass is what keeps the padding invariant true afterwards. `h_line`
    /// and `v_line` are left untouched: those carry a real ruled border
    /// the harvester may have stamped on the envelope's own edge.
    pub fn erase_padding(&mut self) {
        let w = self.w;
        let h = self.h;
        for y in 0..h {
            let c = self.get_mut(w - 1, y);
            c.full = 0;
            c.v_crossed = 0;
            c.h_crossed = 0;
        }
        for x in 0..w {
            let c = self.get_mut(x, h - 1);
            c.full = 0;
            c.v_crossed = 0;
            c.h_crossed = 0;
        }
    }

    /// Removes column `x`, shrinking width by one. Used by the grid
    /// simplifier (spec.md §4.6).
    pub fn remove_column(&mut self, x: usize) {
        let mut new_cells = Vec::with_capacity((self.w - 1) * self.h);
        for y in 0..self.h {
            for cx in 0..self.w {
                if cx != x {
                    new_cells.push(self.cells[y * self.w + cx]);
                }
            }
        }
        self.w -= 1;
        self.cells = new_cells;
    }

    /// Removes row `y`, shrinking height by one.
    pub fn remove_row(&mut self, y: usize) {
        let mut new_cells = Vec::with_capacity(self.w * (self.h - 1));
        for cy in 0..self.h {
            if cy == y {
                continue;
            }
            for cx in 0..self.w {
                new_cells.push(self.cells[cy * self.w + cx]);
            }
        }
        self.h -= 1;
        self.cells = new_cells;
    }
}
