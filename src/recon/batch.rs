//! Parallel fan-out across independent pages (spec.md §5: the detection
//! pipeline carries no state across pages, so batches are trivially
//! parallelizable).
//!
//! Mirrors the teacher's `performance::parallel_generation` shape: a Rayon
//! path behind the `rayon` feature, a plain sequential loop otherwise, same
//! return type either way.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::error::Result;
use crate::model::StructuredPage;
use crate::recon::config::ReconConfig;
use crate::recon::driver::detect_tables;

/// Runs [`detect_tables`] over every page in `pages`, independently.
/// Returns the per-page table counts in the same order as the input.
///
/// With the `rayon` feature enabled this fans out across `pages` using a
/// work-stealing pool; without it, pages are processed sequentially. Either
/// way a single page's allocation failure fails the whole batch — spec.md
/// §7 treats allocation failure as a real, propagating error.
#[cfg(feature = "rayon")]
pub fn detect_tables_in_pages(pages: &mut [StructuredPage], config: &ReconConfig) -> Result<Vec<usize>> {
    pages.par_iter_mut().map(|page| detect_tables(page, config)).collect()
}

#[cfg(not(feature = "rayon"))]
pub fn detect_tables_in_pages(pages: &mut [StructuredPage], config: &ReconConfig) -> Result<Vec<usize>> {
    pages.iter_mut().map(|page| detect_tables(page, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Char, Line, Quad, Rect, TextBlock};

    fn ch(x0: f64, y0: f64, x1: f64, y1: f64, c: char) -> Char {
        Char::new(Quad::from_rect(Rect::new(x0, y0, x1, y1)), c)
    }

    fn grid_cell_text(x: f64, y: f64, c: char) -> Block {
        Block::Text(TextBlock::new(vec![Line::new(vec![ch(x + 4.0, y + 4.0, x + 5.0, y + 5.0, c)])]))
    }

    fn pure_grid_page() -> StructuredPage {
        let mut blocks = Vec::new();
        let mut c = 'a';
        for row in 0..3 {
            for col in 0..3 {
                blocks.push(grid_cell_text(col as f64 * 10.0, row as f64 * 10.0, c));
                c = ((c as u8) + 1) as char;
            }
        }
        StructuredPage { blocks }
    }

    fn empty_page() -> StructuredPage {
        StructuredPage { blocks: Vec::new() }
    }

    #[test]
    fn batch_runs_each_page_independently() {
        let mut pages = vec![pure_grid_page(), empty_page(), pure_grid_page()];
        let counts = detect_tables_in_pages(&mut pages, &ReconConfig::default()).unwrap();
        assert_eq!(counts, vec![1, 0, 1]);
        assert_eq!(pages[0].blocks.len(), 1);
        assert_eq!(pages[1].blocks.len(), 0);
        assert_eq!(pages[2].blocks.len(), 1);
    }

    #[test]
    fn empty_batch_returns_empty_result() {
        let mut pages: Vec<StructuredPage> = Vec::new();
        let counts = detect_tables_in_pages(&mut pages, &ReconConfig::default()).unwrap();
        assert!(counts.is_empty());
    }
}
