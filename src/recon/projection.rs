//! Projection builder (spec.md §4.1).
//!
//! Scans a subtree's *direct* blocks (never descending into `Struct`
//! children — that is the driver's job) and produces two sorted
//! projection lists: `ys` from line extents, `xs` from runs of non-space
//! glyphs within each line.

use crate::model::{Block, ProjectionList, Side};

/// A maximal run of non-space characters within one line, delimited by a
/// run of two-or-more spaces or a single trailing space at end of line
/// (spec.md §4.1). A lone interior space does not end a run.
struct Run {
    left_x: f64,
    right_x: f64,
}

fn runs_in_line(line: &crate::model::Line) -> Vec<Run> {
    let mut runs = Vec::new();
    let chars = &line.chars;
    let mut i = 0;
    while i < chars.len() {
        if chars[i].is_space() {
            i += 1;
            continue;
        }
        let start = i;
        let mut end = i; // inclusive index of last non-space char in the run
        let mut j = i + 1;
        loop {
            if j >= chars.len() {
                break;
            }
            if !chars[j].is_space() {
                end = j;
                j += 1;
                continue;
            }
            // chars[j] is a space: count the run of consecutive spaces.
            let space_start = j;
            let mut k = j;
            while k < chars.len() && chars[k].is_space() {
                k += 1;
            }
            let space_run_len = k - space_start;
            let trailing = k >= chars.len();
            if space_run_len >= 2 || trailing {
                j = k;
                break;
            }
            // A single interior space does not end the run.
            end = k; // k is the next non-space index (< len, guaranteed by trailing check above)
            j = k + 1;
        }
        runs.push(Run {
            left_x: chars[start].quad.left_x(),
            right_x: chars[end].quad.right_x(),
        });
        i = j;
    }
    runs
}

/// Builds the `xs` and `ys` projection lists for the direct blocks of one
/// subtree. Returns empty lists for an empty subtree or text with no runs
/// (spec.md §4.1 "fails softly").
pub fn build_projections(blocks: &[Block]) -> (ProjectionList, ProjectionList) {
    let mut xs = ProjectionList::new();
    let mut ys = ProjectionList::new();

    for block in blocks {
        let text = match block {
            Block::Text(t) => t,
            _ => continue, // Vector skipped, Struct/Grid not descended into here
        };

        for line in &text.lines {
            if line.is_empty() {
                continue;
            }
            ys.push(Side::Start, line.top());
            ys.push(Side::End, line.bottom());

            for run in runs_in_line(line) {
                xs.push(Side::Start, run.left_x);
                xs.push(Side::End, run.right_x);
            }
        }
    }

    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Char, Line, Quad, Rect, TextBlock};

    fn ch(x0: f64, x1: f64, c: char) -> Char {
        Char::new(Quad::from_rect(Rect::new(x0, 0.0, x1, 10.0)), c)
    }

    fn line_of(s: &str) -> Line {
        let mut chars = Vec::new();
        let mut x = 0.0;
        for c in s.chars() {
            chars.push(ch(x, x + 1.0, c));
            x += 1.0;
        }
        Line::new(chars)
    }

    #[test]
    fn single_interior_space_does_not_split_run() {
        let line = line_of("ab cd");
        let runs = runs_in_line(&line);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].left_x, 0.0);
        assert_eq!(runs[0].right_x, 5.0);
    }

    #[test]
    fn double_space_splits_runs() {
        let line = line_of("ab  cd");
        let runs = runs_in_line(&line);
        assert_eq!(runs.len(), 2);
    }

    #[test]
    fn trailing_space_ends_run_even_if_single() {
        let line = line_of("ab ");
        let runs = runs_in_line(&line);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].right_x, 2.0);
    }

    #[test]
    fn leading_spaces_are_skipped() {
        let line = line_of("  ab");
        let runs = runs_in_line(&line);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].left_x, 2.0);
    }

    #[test]
    fn empty_subtree_yields_empty_projections() {
        let (xs, ys) = build_projections(&[]);
        assert!(xs.is_empty());
        assert!(ys.is_empty());
    }

    #[test]
    fn vector_and_struct_blocks_are_skipped() {
        let blocks = vec![
            Block::Vector(crate::model::VectorBlock::new(Rect::new(0.0, 0.0, 1.0, 1.0))),
            Block::Struct(crate::model::StructBlock::new(
                crate::model::StructRole::Other("section".into()),
                Rect::new(0.0, 0.0, 1.0, 1.0),
            )),
        ];
        let (xs, ys) = build_projections(&blocks);
        assert!(xs.is_empty());
        assert!(ys.is_empty());
    }

    #[test]
    fn y_projection_pushes_top_as_start_bottom_as_end() {
        let blocks = vec![Block::Text(TextBlock::new(vec![line_of("ab cd")]))];
        let (_, ys) = build_projections(&blocks);
        assert_eq!(ys.len(), 2);
        assert_eq!(ys.entries()[0].position, 0.0);
        assert_eq!(ys.entries()[1].position, 10.0);
    }
}
