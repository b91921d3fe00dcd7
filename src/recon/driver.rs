//! Top-level driver (spec.md §4.9): the recursive descent that applies the
//! full detection pipeline to every structural subtree of a page.

use tracing::debug;

use crate::model::{Block, CellGrid, GridBlock, Rect, StructuredPage};
use crate::recon::config::ReconConfig;
use crate::recon::crossing::record_crossings;
use crate::recon::divider::infer_dividers;
use crate::recon::harvester::harvest_grid_lines;
use crate::recon::projection::build_projections;
use crate::recon::simplify::simplify_grid;
use crate::recon::transcribe::transcribe_table;

/// Runs table detection over `page`'s entire block tree, recursing into
/// pre-existing structural children before trying each level itself.
/// Returns the number of tables created.
pub fn detect_tables(page: &mut StructuredPage, config: &ReconConfig) -> crate::error::Result<usize> {
    detect_tables_in_blocks(&mut page.blocks, config)
}

/// Same as [`detect_tables`] but operating directly on a block list — used
/// both at the page root and for recursion into a Struct's children.
pub fn detect_tables_in_blocks(blocks: &mut Vec<Block>, config: &ReconConfig) -> crate::error::Result<usize> {
    if blocks.is_empty() {
        return Ok(0);
    }

    let mut found = 0;
    for block in blocks.iter_mut() {
        if let Block::Struct(s) = block {
            found += detect_tables_in_blocks(&mut s.children, config)?;
        }
    }

    let count_of_interest = blocks
        .iter()
        .filter(|b| matches!(b, Block::Text(_) | Block::Struct(_)))
        .count();
    if count_of_interest <= 1 {
        return Ok(found);
    }

    let Some(envelope) = Rect::union_all(blocks.iter().map(|b| b.bbox()).collect::<Vec<_>>().iter()) else {
        return Ok(found);
    };

    let (xs_proj, ys_proj) = build_projections(blocks);
    let x_result = infer_dividers(xs_proj, envelope.x0, envelope.x1);
    let y_result = infer_dividers(ys_proj, envelope.y0, envelope.y1);

    if x_result.positions.len() < config.min_dividers_per_axis || y_result.positions.len() < config.min_dividers_per_axis {
        debug!(
            x = x_result.positions.len(),
            y = y_result.positions.len(),
            "too few grid positions, bailing out of this subtree"
        );
        return Ok(found);
    }

    let mut xs = x_result.positions;
    let mut ys = y_result.positions;
    let mut grid = CellGrid::new(xs.len(), ys.len());

    harvest_grid_lines(blocks, &mut xs, &mut ys, &mut grid, config.rule_merge_tolerance);
    record_crossings(blocks, &xs, &ys, &mut grid);
    // A char whose far edge lands exactly on the envelope's outer position
    // resolves through find_cell's `v == pos[len-1]` rule into the padding
    // index; erase what that spuriously marks before simplifying.
    grid.erase_padding();
    simplify_grid(&mut grid, &mut xs, &mut ys);

    if grid.width() < config.min_grid_dimension || grid.height() < config.min_grid_dimension {
        debug!(w = grid.width(), h = grid.height(), "grid collapsed below minimum, no table");
        return Ok(found);
    }

    if let Some(table_idx) = transcribe_table(blocks, &grid, &xs, &ys) {
        if let Block::Struct(table) = &mut blocks[table_idx] {
            let grid_bbox = Rect::new(
                xs.as_slice().first().map(|p| p.pos).unwrap_or(envelope.x0),
                ys.as_slice().first().map(|p| p.pos).unwrap_or(envelope.y0),
                xs.as_slice().last().map(|p| p.pos).unwrap_or(envelope.x1),
                ys.as_slice().last().map(|p| p.pos).unwrap_or(envelope.y1),
            );
            table.children.insert(
                0,
                Block::Grid(GridBlock {
                    bbox: grid_bbox,
                    x_positions: xs.as_slice().to_vec(),
                    y_positions: ys.as_slice().to_vec(),
                }),
            );
        }
        debug!(w = grid.width(), h = grid.height(), "table detected");
        found += 1;
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Char, Line, Quad, StructBlock, StructRole, TextBlock, VectorBlock};

    fn ch(x0: f64, y0: f64, x1: f64, y1: f64, c: char) -> Char {
        Char::new(Quad::from_rect(Rect::new(x0, y0, x1, y1)), c)
    }

    fn grid_cell_text(x: f64, y: f64, c: char) -> Block {
        Block::Text(TextBlock::new(vec![Line::new(vec![ch(x + 4.0, y + 4.0, x + 5.0, y + 5.0, c)])]))
    }

    /// Nine cells, 10x10 each, one letter centred in each (spec.md §8
    /// scenario 1: pure grid).
    fn pure_grid_blocks() -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut c = 'a';
        for row in 0..3 {
            for col in 0..3 {
                blocks.push(grid_cell_text(col as f64 * 10.0, row as f64 * 10.0, c));
                c = ((c as u8) + 1) as char;
            }
        }
        blocks
    }

    #[test]
    fn empty_subtree_returns_zero() {
        let mut blocks = Vec::new();
        assert_eq!(detect_tables_in_blocks(&mut blocks, &ReconConfig::default()).unwrap(), 0);
    }

    #[test]
    fn single_child_of_interest_returns_without_detection() {
        let mut blocks = vec![Block::Text(TextBlock::new(vec![Line::new(vec![ch(0.0, 0.0, 1.0, 1.0, 'a')])]))];
        assert_eq!(detect_tables_in_blocks(&mut blocks, &ReconConfig::default()).unwrap(), 0);
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn single_paragraph_is_not_a_table() {
        // One Text block, many lines, no internal runs forming a grid.
        let mut blocks = vec![
            Block::Text(TextBlock::new(vec![Line::new(vec![
                ch(0.0, 0.0, 5.0, 10.0, 'h'),
                ch(5.0, 0.0, 10.0, 10.0, 'i'),
            ])])),
            Block::Vector(VectorBlock::new(Rect::new(0.0, 0.0, 1.0, 1.0))),
        ];
        let found = detect_tables_in_blocks(&mut blocks, &ReconConfig::default()).unwrap();
        assert_eq!(found, 0);
    }

    #[test]
    fn pure_grid_is_detected_as_one_table() {
        let mut blocks = pure_grid_blocks();
        let found = detect_tables_in_blocks(&mut blocks, &ReconConfig::default()).unwrap();
        assert_eq!(found, 1);
        assert_eq!(blocks.len(), 1);
        let table = blocks[0].as_struct().unwrap();
        assert_eq!(table.role, StructRole::Table);
        assert!(matches!(table.children[0], Block::Grid(_)));
    }

    #[test]
    fn running_twice_is_idempotent() {
        let mut blocks = pure_grid_blocks();
        let config = ReconConfig::default();
        let first = detect_tables_in_blocks(&mut blocks, &config).unwrap();
        let second = detect_tables_in_blocks(&mut blocks, &config).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[test]
    fn nested_section_detects_table_without_conflating_body_text() {
        let section_table = pure_grid_blocks();
        let section = Block::Struct(StructBlock {
            children: section_table,
            ..StructBlock::new(StructRole::Other("section".into()), Rect::new(0.0, 0.0, 30.0, 30.0))
        });
        let body = Block::Text(TextBlock::new(vec![Line::new(vec![ch(100.0, 100.0, 105.0, 110.0, 'x')])]));
        let mut blocks = vec![section, body];
        let found = detect_tables_in_blocks(&mut blocks, &ReconConfig::default()).unwrap();
        assert_eq!(found, 1);
        let section_block = blocks[0].as_struct().unwrap();
        assert_eq!(section_block.children.len(), 1);
        assert_eq!(section_block.children[0].as_struct().unwrap().role, StructRole::Table);
        // body text untouched
        assert!(matches!(blocks[1], Block::Text(_)));
    }
}
