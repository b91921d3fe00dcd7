//! Grid simplifier (spec.md §4.6).
//!
//! Iteratively merges adjacent columns, then adjacent rows, whose cells
//! are all pairwise mergeable, coarsening an over-segmented grid back down
//! to its real row/column count.

use crate::model::{CellFlags, CellGrid, GridPositions};

fn column_pairwise_mergeable(left: &CellFlags, right: &CellFlags) -> bool {
    !right.has_v_line()
        && (!left.is_full()
            || !right.is_full()
            || (left.has_h_line() == right.has_h_line() && right.has_v_crossed()))
}

fn row_pairwise_mergeable(top: &CellFlags, bottom: &CellFlags) -> bool {
    !bottom.has_h_line()
        && (!top.is_full()
            || !bottom.is_full()
            || (top.has_v_line() == bottom.has_v_line() && bottom.has_h_crossed()))
}

fn columns_mergeable(grid: &CellGrid, x: usize) -> bool {
    (0..grid.height().saturating_sub(1)).all(|y| column_pairwise_mergeable(grid.get(x, y), grid.get(x + 1, y)))
}

fn rows_mergeable(grid: &CellGrid, y: usize) -> bool {
    (0..grid.width().saturating_sub(1)).all(|x| row_pairwise_mergeable(grid.get(x, y), grid.get(x, y + 1)))
}

/// Fuses column `x` with `x + 1`: `full` and `h_crossed` accumulate from
/// both, `h_line`/`v_line`/`v_crossed` are kept from the left column
/// (equal to the right's `h_line` by the mergeability rule), then column
/// `x + 1` is dropped.
fn fuse_columns(grid: &mut CellGrid, x: usize) {
    for y in 0..grid.height() {
        let right = *grid.get(x + 1, y);
        let left = grid.get_mut(x, y);
        left.full += right.full;
        left.h_crossed += right.h_crossed;
    }
    grid.remove_column(x + 1);
}

/// Fuses row `y` with `y + 1`, symmetric to [`fuse_columns`].
fn fuse_rows(grid: &mut CellGrid, y: usize) {
    for x in 0..grid.width() {
        let bottom = *grid.get(x, y + 1);
        let top = grid.get_mut(x, y);
        top.full += bottom.full;
        top.v_crossed += bottom.v_crossed;
    }
    grid.remove_row(y + 1);
}

// The rightmost column / bottommost row is padding (spec.md §3): real
// columns are indices `0..=(width-2)`, so a mergeable pair `(x, x+1)` must
// keep `x + 1` within that range, i.e. `x <= width - 3`. Requires at least
// two real columns (width >= 3) for any pair to exist at all.

fn simplify_columns(grid: &mut CellGrid, xs: &mut GridPositions) {
    loop {
        if grid.width() < 3 {
            break;
        }
        let mut merged_any = false;
        let mut x = grid.width() - 3;
        loop {
            if columns_mergeable(grid, x) {
                fuse_columns(grid, x);
                xs.remove(x + 1);
                merged_any = true;
            }
            if x == 0 {
                break;
            }
            x -= 1;
        }
        if !merged_any {
            break;
        }
    }
}

fn simplify_rows(grid: &mut CellGrid, ys: &mut GridPositions) {
    loop {
        if grid.height() < 3 {
            break;
        }
        let mut merged_any = false;
        let mut y = grid.height() - 3;
        loop {
            if rows_mergeable(grid, y) {
                fuse_rows(grid, y);
                ys.remove(y + 1);
                merged_any = true;
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }
        if !merged_any {
            break;
        }
    }
}

/// Simplifies `grid` (and the matching `xs`/`ys` position lists) in place:
/// columns first, then rows, each to a fixpoint (spec.md §4.6).
pub fn simplify_grid(grid: &mut CellGrid, xs: &mut GridPositions, ys: &mut GridPositions) {
    simplify_columns(grid, xs);
    simplify_rows(grid, ys);
}
