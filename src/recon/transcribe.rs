//! Table transcriber and content migration (spec.md §4.7, §4.8).
//!
//! Walks the simplified cell grid, decides each cell's column/row span
//! from crossing flags and divider uncertainty, builds the Table/Row/Cell
//! struct hierarchy, and moves the blocks/lines/characters that fall
//! inside each cell's rectangle out of the parent and into the new cell.

use std::collections::HashMap;

use crate::model::{
    insert_struct_sibling, Block, CellGrid, GridPositions, Line, Rect, StructBlock, StructRole, TextBlock,
};

fn envelope(xs: &GridPositions, ys: &GridPositions) -> Option<Rect> {
    let (x0, x1) = xs.span()?;
    let (y0, y1) = ys.span()?;
    Some(Rect::new(x0, y0, x1, y1))
}

/// How many real columns, starting at `x`, the cell at `(x, y)` spans
/// (spec.md §4.7 step 1): extends right while the candidate boundary
/// carries no ruling, the divider has nonzero uncertainty, and content
/// straddles it.
fn column_span(grid: &CellGrid, xs: &GridPositions, x: usize, y: usize, w_real: usize) -> usize {
    let mut k = 1;
    while x + k < w_real {
        let boundary = grid.get(x + k, y);
        let uncertain = xs.get(x + k).is_some_and(|p| p.uncertainty > 0);
        if !boundary.has_v_line() && uncertain && boundary.has_v_crossed() {
            k += 1;
        } else {
            break;
        }
    }
    k
}

/// How many real rows, starting at `y`, a cell already `cellw` wide spans
/// downward (spec.md §4.7 step 2).
fn row_span(grid: &CellGrid, xs: &GridPositions, ys: &GridPositions, x: usize, y: usize, cellw: usize, h_real: usize) -> usize {
    let mut k = 1;
    while y + k < h_real {
        let cand_y = y + k;
        let uncertain = ys.get(cand_y).is_some_and(|p| p.uncertainty > 0);
        if !uncertain {
            break;
        }
        let mut blocked = false;
        let mut any_h_crossed = false;
        for xi in x..x + cellw {
            let cell = grid.get(xi, cand_y);
            if cell.has_h_line() {
                blocked = true;
                break;
            }
            if xi > x {
                let interior_break_clean = !cell.has_v_line() && xs.get(xi).is_some_and(|p| p.uncertainty > 0);
                if !interior_break_clean {
                    blocked = true;
                    break;
                }
            }
            if cell.has_h_crossed() {
                any_h_crossed = true;
            }
        }
        if blocked || !any_h_crossed {
            break;
        }
        k += 1;
    }
    k
}

/// Splits `line` against `rect` by character-center containment (spec.md
/// §4.8), returning (retained, moved).
fn split_line(line: Line, rect: Rect) -> (Option<Line>, Option<Line>) {
    let mut kept = Vec::new();
    let mut moved = Vec::new();
    for ch in line.chars {
        if rect.contains_center_of(&ch.bbox()) {
            moved.push(ch);
        } else {
            kept.push(ch);
        }
    }
    let writing_mode = line.writing_mode;
    let kept = if kept.is_empty() {
        None
    } else {
        Some(Line { chars: kept, writing_mode })
    };
    let moved = if moved.is_empty() {
        None
    } else {
        Some(Line { chars: moved, writing_mode })
    };
    (kept, moved)
}

/// Splits a Text block against `rect`, line by line (spec.md §4.8).
fn split_text(text: TextBlock, rect: Rect) -> (Option<TextBlock>, Option<TextBlock>) {
    let mut kept_lines = Vec::new();
    let mut moved_lines = Vec::new();
    for line in text.lines {
        let lbbox = line.bbox();
        if !lbbox.intersects(&rect) {
            kept_lines.push(line);
        } else if rect.contains_rect(&lbbox) {
            moved_lines.push(line);
        } else {
            let (kept, moved) = split_line(line, rect);
            kept_lines.extend(kept);
            moved_lines.extend(moved);
        }
    }
    let kept = if kept_lines.is_empty() {
        None
    } else {
        Some(TextBlock::new(kept_lines))
    };
    let moved = if moved_lines.is_empty() {
        None
    } else {
        Some(TextBlock::new(moved_lines))
    };
    (kept, moved)
}

/// Moves every block (or part of a block) from `parent` whose content
/// falls inside `rect` out of `parent` and returns it (spec.md §4.8).
fn migrate_content(parent: &mut Vec<Block>, rect: Rect) -> Vec<Block> {
    let mut moved = Vec::new();
    let mut i = 0;
    while i < parent.len() {
        let bbox = parent[i].bbox();
        if !bbox.intersects(&rect) {
            i += 1;
            continue;
        }
        if rect.contains_rect(&bbox) {
            moved.push(parent.remove(i));
            continue;
        }
        match parent[i] {
            Block::Text(_) => {
                let Block::Text(text) = parent.remove(i) else {
                    unreachable!()
                };
                let (kept, migrated) = split_text(text, rect);
                if let Some(kept) = kept {
                    parent.insert(i, Block::Text(kept));
                    i += 1;
                }
                if let Some(migrated) = migrated {
                    moved.push(Block::Text(migrated));
                }
            }
            _ => i += 1,
        }
    }
    moved
}

fn cell_bbox(children: &[Block], fallback: Rect) -> Rect {
    Rect::union_all(children.iter().map(|b| b.bbox()).collect::<Vec<_>>().iter()).unwrap_or(fallback)
}

/// Transcribes the detected table: builds Table/TableRow/TableCell structs
/// from `grid` and migrates content out of `parent`, inserting the new
/// Table struct at the position spec.md §4.7 describes. Returns the
/// inserted Table's index in `parent`, or `None` if there is no envelope
/// to transcribe (degenerate input — spec.md §7).
pub fn transcribe_table(parent: &mut Vec<Block>, grid: &CellGrid, xs: &GridPositions, ys: &GridPositions) -> Option<usize> {
    let env = envelope(xs, ys)?;
    let w_real = grid.width().saturating_sub(1);
    let h_real = grid.height().saturating_sub(1);
    if w_real == 0 || h_real == 0 {
        return None;
    }

    let mut sent = vec![false; w_real * h_real];
    let mut table_children: Vec<Block> = Vec::new();
    let mut row_pos_for_y: HashMap<usize, usize> = HashMap::new();

    for y in 0..h_real {
        if (0..w_real).all(|x| sent[y * w_real + x]) {
            continue;
        }
        let row_pos = table_children.len();
        table_children.push(Block::Struct(StructBlock {
            role: StructRole::TableRow,
            bbox: Rect::new(0.0, 0.0, 0.0, 0.0),
            children: Vec::new(),
            sibling_index: row_pos as u32,
        }));
        row_pos_for_y.insert(y, row_pos);

        for x in 0..w_real {
            if sent[y * w_real + x] {
                continue;
            }
            let cellw = column_span(grid, xs, x, y, w_real);
            let cellh = row_span(grid, xs, ys, x, y, cellw, h_real);

            let rect = Rect::new(
                xs.get(x).map(|p| p.pos).unwrap_or(env.x0),
                ys.get(y).map(|p| p.pos).unwrap_or(env.y0),
                xs.get(x + cellw).map(|p| p.pos).unwrap_or(env.x1),
                ys.get(y + cellh).map(|p| p.pos).unwrap_or(env.y1),
            );

            for yy in y..y + cellh {
                for xx in x..x + cellw {
                    sent[yy * w_real + xx] = true;
                }
            }

            let moved = migrate_content(parent, rect);
            let bbox = cell_bbox(&moved, rect);

            if let Block::Struct(row) = &mut table_children[row_pos] {
                let cell_idx = row.children.len() as u32;
                row.children.push(Block::Struct(StructBlock {
                    role: StructRole::TableCell,
                    bbox,
                    children: moved,
                    sibling_index: cell_idx,
                }));
                row.bbox = if cell_idx == 0 { bbox } else { row.bbox.union(&bbox) };
            }
        }
    }

    // Computed against the now-migrated `parent`: every block that used to
    // intersect the envelope has already been removed or shrunk by
    // `migrate_content` above, so indexing against the pre-migration vector
    // here would run past its new, shorter length.
    let insert_at = parent
        .iter()
        .enumerate()
        .filter(|(_, b)| b.bbox().intersects(&env))
        .map(|(i, _)| i)
        .max()
        .map(|i| i + 1)
        .unwrap_or(0);

    let table_bbox = cell_bbox(&table_children, env);
    let table = StructBlock {
        role: StructRole::Table,
        bbox: table_bbox,
        children: table_children,
        sibling_index: 0,
    };
    insert_struct_sibling(parent, insert_at, table);
    Some(insert_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Char, GridPosition, Quad, VectorBlock};

    fn axis(points: &[(f64, u32)]) -> GridPositions {
        GridPositions::new(
            points
                .iter()
                .map(|&(p, u)| GridPosition::new(p, p, p, u))
                .collect(),
        )
    }

    fn ch(x0: f64, y0: f64, x1: f64, y1: f64, c: char) -> Char {
        Char::new(Quad::from_rect(Rect::new(x0, y0, x1, y1)), c)
    }

    #[test]
    fn plain_grid_produces_one_cell_per_position() {
        // 3x3 grid, W=4,H=4 positions (3x3 real cells), no spans.
        let xs = axis(&[(0.0, 0), (10.0, 0), (20.0, 0), (30.0, 0)]);
        let ys = axis(&[(0.0, 0), (10.0, 0), (20.0, 0), (30.0, 0)]);
        let grid = CellGrid::new(4, 4);
        let mut parent = vec![Block::Text(TextBlock::new(vec![Line::new(vec![ch(
            2.0, 2.0, 3.0, 3.0, 'a',
        )])]))];
        let idx = transcribe_table(&mut parent, &grid, &xs, &ys).unwrap();
        let table = parent[idx].as_struct().unwrap();
        assert_eq!(table.role, StructRole::Table);
        assert_eq!(table.children.len(), 3); // three rows
        let row0 = table.children[0].as_struct().unwrap();
        assert_eq!(row0.children.len(), 3); // three cells
    }

    #[test]
    fn spanned_header_merges_into_one_wide_cell() {
        let xs = axis(&[(0.0, 0), (10.0, 1), (20.0, 1), (30.0, 0)]);
        let ys = axis(&[(0.0, 0), (10.0, 0)]);
        let mut grid = CellGrid::new(4, 2);
        // header text straddles both internal dividers.
        grid.get_mut(1, 0).v_crossed = 1;
        grid.get_mut(2, 0).v_crossed = 1;
        let mut parent = vec![Block::Text(TextBlock::new(vec![Line::new(vec![ch(
            0.0, 0.0, 30.0, 10.0, 'a',
        )])]))];
        let idx = transcribe_table(&mut parent, &grid, &xs, &ys).unwrap();
        let table = parent[idx].as_struct().unwrap();
        let row0 = table.children[0].as_struct().unwrap();
        assert_eq!(row0.children.len(), 1);
        let cell = row0.children[0].as_struct().unwrap();
        assert_eq!(cell.bbox, Rect::new(0.0, 0.0, 30.0, 10.0));
    }

    #[test]
    fn content_outside_envelope_is_left_in_parent() {
        let xs = axis(&[(0.0, 0), (10.0, 0), (20.0, 0), (30.0, 0)]);
        let ys = axis(&[(0.0, 0), (10.0, 0), (20.0, 0), (30.0, 0)]);
        let grid = CellGrid::new(4, 4);
        let outside = Block::Vector(VectorBlock::new(Rect::new(100.0, 100.0, 110.0, 110.0)));
        let mut parent = vec![outside.clone()];
        let idx = transcribe_table(&mut parent, &grid, &xs, &ys).unwrap();
        assert!(parent.iter().any(|b| *b == outside));
        assert_eq!(parent[idx].as_struct().unwrap().role, StructRole::Table);
    }

    #[test]
    fn partial_text_overlap_splits_line_by_char_center() {
        let xs = axis(&[(0.0, 0), (10.0, 0)]);
        let ys = axis(&[(0.0, 0), (10.0, 0)]);
        let grid = CellGrid::new(2, 2);
        // One char inside the cell, one char far outside it on the same line.
        let line = Line::new(vec![ch(2.0, 2.0, 3.0, 3.0, 'a'), ch(50.0, 2.0, 51.0, 3.0, 'b')]);
        let mut parent = vec![Block::Text(TextBlock::new(vec![line]))];
        transcribe_table(&mut parent, &grid, &xs, &ys).unwrap();
        // the 'b' char, far outside the table envelope and rect, stays behind
        // as a retained Text block since its bbox doesn't intersect the cell
        // rect at all -- it's untouched, not split.
        let retained: Vec<&Block> = parent.iter().filter(|b| matches!(b, Block::Text(_))).collect();
        assert_eq!(retained.len(), 1);
        if let Block::Text(t) = retained[0] {
            assert_eq!(t.lines[0].chars.len(), 1);
            assert_eq!(t.lines[0].chars[0].code_point, 'b');
        }
    }
}
