//! Grid-line harvester (spec.md §4.4).
//!
//! Walks the Vector blocks of a subtree — descending into `Struct`
//! children, unlike the projection builder — classifies each rectangle as
//! a horizontal rule, a vertical rule, or a framed cell (both), snaps its
//! endpoints onto the candidate grid positions, and stamps `h_line` /
//! `v_line` onto the cell grid. A rule that fails to snap is retried once
//! merged with immediately subsequent vector blocks that plausibly
//! continue it.

use crate::model::{Block, CellGrid, GridPositions, Rect};

const THIN: f64 = 1.0;

enum Rule {
    Horizontal { x0: f64, x1: f64, y: f64 },
    Vertical { y0: f64, y1: f64, x: f64 },
}

fn classify(r: Rect) -> Vec<Rule> {
    let w = r.width();
    let h = r.height();
    if h < THIN && w > h {
        vec![Rule::Horizontal {
            x0: r.x0,
            x1: r.x1,
            y: (r.y0 + r.y1) / 2.0,
        }]
    } else if w < THIN && h > w {
        vec![Rule::Vertical {
            y0: r.y0,
            y1: r.y1,
            x: (r.x0 + r.x1) / 2.0,
        }]
    } else {
        vec![
            Rule::Horizontal { x0: r.x0, x1: r.x1, y: r.y0 },
            Rule::Horizontal { x0: r.x0, x1: r.x1, y: r.y1 },
            Rule::Vertical { y0: r.y0, y1: r.y1, x: r.x0 },
            Rule::Vertical { y0: r.y0, y1: r.y1, x: r.x1 },
        ]
    }
}

/// Collects every Vector block's rectangle in document order, descending
/// into Struct children (spec.md §4.4: "Harvester descends into Struct
/// children").
fn collect_vector_rects(blocks: &[Block], out: &mut Vec<Rect>) {
    for block in blocks {
        match block {
            Block::Vector(v) => out.push(v.rect),
            Block::Struct(s) => collect_vector_rects(&s.children, out),
            Block::Text(_) | Block::Grid(_) => {}
        }
    }
}

fn apply_horizontal(
    x0: f64,
    x1: f64,
    y: f64,
    xs: &mut GridPositions,
    ys: &mut GridPositions,
    grid: &mut CellGrid,
) -> bool {
    // The cross axis is snapped (and reinforced) first: a rule that fails to
    // land on a row must not have already drifted the x endpoints it never
    // ends up stamping.
    let Some(y_idx) = ys.snap(y, false) else {
        return false;
    };
    let (Some(x_start), Some(x_end)) = (xs.snap(x0, true), xs.snap(x1, true)) else {
        return false;
    };
    if x_start >= x_end {
        return false;
    }
    for i in x_start..x_end {
        grid.get_mut(i, y_idx).h_line += 1;
    }
    true
}

fn apply_vertical(
    y0: f64,
    y1: f64,
    x: f64,
    xs: &mut GridPositions,
    ys: &mut GridPositions,
    grid: &mut CellGrid,
) -> bool {
    let Some(x_idx) = xs.snap(x, false) else {
        return false;
    };
    let (Some(y_start), Some(y_end)) = (ys.snap(y0, true), ys.snap(y1, true)) else {
        return false;
    };
    if y_start >= y_end {
        return false;
    }
    for j in y_start..y_end {
        grid.get_mut(x_idx, j).v_line += 1;
    }
    true
}

/// Tries merging `rects[i]` with subsequent rectangles that share the
/// invariant axis (same y-range for a horizontal candidate, same x-range
/// for vertical) and whose free axis nearly abuts, within `tolerance`
/// (spec.md §4.4). Returns the union rectangle and how many subsequent
/// entries it consumed, or `None` if no merge is possible.
fn try_merge(rects: &[Rect], i: usize, horizontal: bool, tolerance: f64) -> Option<(Rect, usize)> {
    let mut union = rects[i];
    let mut consumed = 0;
    let mut j = i + 1;
    while j < rects.len() {
        let cand = rects[j];
        let shares_invariant_axis = if horizontal {
            (cand.y0 - union.y0).abs() < f64::EPSILON && (cand.y1 - union.y1).abs() < f64::EPSILON
        } else {
            (cand.x0 - union.x0).abs() < f64::EPSILON && (cand.x1 - union.x1).abs() < f64::EPSILON
        };
        if !shares_invariant_axis {
            break;
        }
        let abuts = if horizontal {
            (cand.x0 - union.x1).abs() <= tolerance || (union.x0 - cand.x1).abs() <= tolerance
        } else {
            (cand.y0 - union.y1).abs() <= tolerance || (union.y0 - cand.y1).abs() <= tolerance
        };
        if !abuts {
            break;
        }
        union = union.union(&cand);
        consumed += 1;
        j += 1;
    }
    if consumed == 0 {
        None
    } else {
        Some((union, consumed))
    }
}

/// Harvests ruled lines from `blocks` onto `grid`, snapping against `xs`
/// and `ys` (spec.md §4.4). `tolerance` bounds the merge-and-retry abutment
/// check.
pub fn harvest_grid_lines(
    blocks: &[Block],
    xs: &mut GridPositions,
    ys: &mut GridPositions,
    grid: &mut CellGrid,
    tolerance: f64,
) {
    let mut rects = Vec::new();
    collect_vector_rects(blocks, &mut rects);

    let mut skip = vec![false; rects.len()];
    for i in 0..rects.len() {
        if skip[i] {
            continue;
        }
        for rule in classify(rects[i]) {
            let (ok, horizontal) = match rule {
                Rule::Horizontal { x0, x1, y } => (apply_horizontal(x0, x1, y, xs, ys, grid), true),
                Rule::Vertical { y0, y1, x } => (apply_vertical(y0, y1, x, xs, ys, grid), false),
            };
            if ok {
                continue;
            }
            if let Some((union, consumed)) = try_merge(&rects, i, horizontal, tolerance) {
                let retried = match horizontal {
                    true => apply_horizontal(union.x0, union.x1, (union.y0 + union.y1) / 2.0, xs, ys, grid),
                    false => apply_vertical(union.y0, union.y1, (union.x0 + union.x1) / 2.0, xs, ys, grid),
                };
                if retried {
                    for s in skip.iter_mut().skip(i + 1).take(consumed) {
                        *s = true;
                    }
                }
            }
        }
    }
}
