//! Results table below the target face
//!
//! Layout is computed first as plain data ([`TableLayout::plan`]) and only
//! then turned into draw calls, which keeps the row partitioning and the sum
//! bookkeeping testable without a surface.

use super::arrow::draw_arrow;
use super::geometry::table;
use super::{Anchor, Surface, TextStyle};
use crate::config::Rgba;
use crate::domain::{DesignPoint, PixelRect, Precision, Score, Shot, round_tenth, to_pixel};

/// One score in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry {
    pub row: usize,
    pub column: usize,
    pub score: Score,
}

/// Scores partitioned into rows of five with partial and grand sums
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGrid {
    pub rows: usize,
    /// One entry per shot, in shot order
    pub entries: Vec<Entry>,
    /// Sum of each completed row, keyed by row
    pub partial_sums: Vec<(usize, Score)>,
    /// Sum over all shots
    pub total: Score,
}

impl ScoreGrid {
    /// Cells in the summary column, the grand total included
    pub fn summary_cells(&self) -> usize {
        self.rows + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableLayout {
    /// Only the smallest teiler, rounded to a tenth
    TeilerOnly { best: f64 },
    Standard(ScoreGrid),
}

impl TableLayout {
    /// Lay out the table for `shots`.
    ///
    /// Returns None in teiler-only mode when there is nothing to report.
    pub fn plan(shots: &[Shot], teiler_only: bool, precision: Precision) -> Option<Self> {
        if teiler_only {
            let best = shots.iter().map(Shot::teiler).reduce(f64::min)?;
            return Some(TableLayout::TeilerOnly {
                best: round_tenth(best),
            });
        }

        let mut entries = Vec::with_capacity(shots.len());
        let mut partial_sums = Vec::new();
        let mut partial = Score::zero(precision);
        let mut total = Score::zero(precision);

        for (i, shot) in shots.iter().enumerate() {
            let score = shot.value(precision);
            let (row, column) = (i / table::COLUMNS, i % table::COLUMNS);
            entries.push(Entry { row, column, score });

            partial += score;
            total += score;
            if column == table::COLUMNS - 1 {
                partial_sums.push((row, partial.rounded()));
                partial = Score::zero(precision);
            }
        }

        Some(TableLayout::Standard(ScoreGrid {
            rows: shots.len().div_ceil(table::COLUMNS),
            entries,
            partial_sums,
            total: total.rounded(),
        }))
    }
}

/// Places table parts in design units and converts them to pixels
struct Placer {
    left: f64,
    top: f64,
    scale: f64,
}

impl Placer {
    fn rect(&self, left: f64, top: f64, right: f64, bottom: f64) -> PixelRect {
        PixelRect::from_design(
            DesignPoint::new(self.left + left, self.top + top),
            DesignPoint::new(self.left + right, self.top + bottom),
            self.scale,
        )
    }

    fn line<S: Surface>(&self, surface: &mut S, from: (f64, f64), to: (f64, f64), width: u32) {
        surface.line(
            to_pixel(DesignPoint::new(self.left + from.0, self.top + from.1), self.scale),
            to_pixel(DesignPoint::new(self.left + to.0, self.top + to.1), self.scale),
            Rgba::BLACK,
            width,
        );
    }

    /// Right-aligned text ending `TEXT_MARGIN` before `right`, centered in `row`
    fn text<S: Surface>(&self, surface: &mut S, right: f64, row: usize, text: &str) {
        let at = DesignPoint::new(
            self.left + right - table::TEXT_MARGIN,
            self.top + table::CELL / 2.0 + table::CELL * row as f64,
        );
        surface.text(
            to_pixel(at, self.scale),
            text,
            TextStyle::new(table::FONT_PX, Anchor::RightMiddle),
            Rgba::BLACK,
        );
    }

    /// Anchor of the arrow in the upper-right part of a score cell
    fn arrow_anchor(&self, row: usize, column: usize) -> DesignPoint {
        DesignPoint::new(
            self.left + (column + 1) as f64 * table::CELL - table::TEXT_MARGIN * 2.0,
            self.top + table::TEXT_MARGIN * 2.0 + table::CELL * row as f64,
        )
    }
}

/// Draw the table with its top-left corner at `origin`
pub fn draw_table<S: Surface>(
    surface: &mut S,
    layout: &TableLayout,
    shots: &[Shot],
    origin: DesignPoint,
    scale: f64,
) {
    let placer = Placer {
        left: origin.x,
        top: origin.y,
        scale,
    };
    match layout {
        TableLayout::TeilerOnly { best } => draw_teiler_cell(surface, &placer, *best),
        TableLayout::Standard(grid) => draw_grid(surface, &placer, grid, shots),
    }
}

fn draw_teiler_cell<S: Surface>(surface: &mut S, placer: &Placer, best: f64) {
    let cell_left = table::CELL * 4.0;
    let cell_right = cell_left + table::TEILER_COLUMN;
    surface.rectangle(
        placer.rect(cell_left, 0.0, cell_right, table::CELL),
        Rgba::BLACK,
        table::BORDER_PX,
    );
    placer.text(surface, cell_left, 0, table::TEILER_LABEL);
    placer.text(surface, cell_right, 0, &format!("{best:.1}"));
}

fn draw_grid<S: Surface>(surface: &mut S, placer: &Placer, grid: &ScoreGrid, shots: &[Shot]) {
    let cell = table::CELL;
    let sum_left = cell * table::COLUMNS as f64;
    let sum_right = sum_left + table::SUM_COLUMN;
    let grid_bottom = cell * grid.rows as f64;

    for row in 0..grid.rows {
        let top = cell * row as f64;
        surface.rectangle(placer.rect(0.0, top, sum_right, top + cell), Rgba::BLACK, 1);
    }

    for column in 1..table::COLUMNS {
        let x = cell * column as f64;
        placer.line(surface, (x, 0.0), (x, grid_bottom), 1);
    }

    surface.rectangle(
        placer.rect(sum_left, 0.0, sum_right, cell * grid.summary_cells() as f64),
        Rgba::BLACK,
        table::BORDER_PX,
    );
    placer.line(
        surface,
        (sum_left, grid_bottom),
        (sum_right, grid_bottom),
        table::BORDER_PX,
    );

    let mut partial_sums = grid.partial_sums.iter().peekable();
    for (entry, shot) in grid.entries.iter().zip(shots) {
        let right = cell * (entry.column + 1) as f64;
        placer.text(surface, right, entry.row, &entry.score.to_string());
        draw_arrow(
            surface,
            placer.arrow_anchor(entry.row, entry.column),
            shot,
            placer.scale,
        );

        let row_done = entry.column == table::COLUMNS - 1;
        if let Some((_, sum)) = partial_sums.next_if(|(row, _)| row_done && *row == entry.row) {
            placer.text(surface, sum_right, entry.row, &sum.to_string());
        }
    }

    placer.text(surface, sum_left, grid.rows, table::SUM_LABEL);
    placer.text(surface, sum_right, grid.rows, &grid.total.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PixelPoint;
    use crate::render::recording::{DrawCall, RecordingSurface};

    fn shots(n: usize) -> Vec<Shot> {
        // Alternate between a ten (teiler 200), a nine (400) and a seven (900)
        (0..n)
            .map(|i| match i % 3 {
                0 => Shot::at(120.0, 160.0),
                1 => Shot::at(-240.0, 320.0),
                _ => Shot::at(0.0, -900.0),
            })
            .collect()
    }

    fn grid(layout: Option<TableLayout>) -> ScoreGrid {
        match layout {
            Some(TableLayout::Standard(grid)) => grid,
            other => panic!("expected a grid, got {other:?}"),
        }
    }

    #[test]
    fn test_seven_shots_make_two_rows() {
        let shots = shots(7);
        let grid = grid(TableLayout::plan(&shots, false, Precision::Whole));
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.entries.len(), 7);
        assert_eq!((grid.entries[5].row, grid.entries[5].column), (1, 0));

        // 10 + 9 + 7 + 10 + 9
        assert_eq!(grid.partial_sums, vec![(0, Score::new(45.0, Precision::Whole))]);
        // ... + 7 + 10
        assert_eq!(grid.total, Score::new(62.0, Precision::Whole));
    }

    #[test]
    fn test_twelve_shots_make_three_rows() {
        let grid = grid(TableLayout::plan(&shots(12), false, Precision::Whole));
        assert_eq!(grid.rows, 3);
        let per_row: Vec<usize> = (0..3)
            .map(|r| grid.entries.iter().filter(|e| e.row == r).count())
            .collect();
        assert_eq!(per_row, vec![5, 5, 2]);
        assert_eq!(grid.summary_cells(), 4);
        // Partial sums reset after every fifth shot
        let rows: Vec<usize> = grid.partial_sums.iter().map(|(r, _)| *r).collect();
        assert_eq!(rows, vec![0, 1]);
        assert_eq!(grid.partial_sums[1].1.value, 7.0 + 10.0 + 9.0 + 7.0 + 10.0);
    }

    #[test]
    fn test_tenth_sums_are_rounded() {
        let shots = vec![
            Shot::measured(10.0, 0.0, 10.0, 10.1),
            Shot::measured(10.0, 0.0, 10.0, 10.2),
            Shot::measured(10.0, 0.0, 10.0, 9.7),
            Shot::measured(10.0, 0.0, 10.0, 9.9),
            Shot::measured(10.0, 0.0, 10.0, 10.4),
        ];
        let grid = grid(TableLayout::plan(&shots, false, Precision::Tenth));
        assert_eq!(grid.partial_sums[0].1.to_string(), "50.3");
        assert_eq!(grid.total.to_string(), "50.3");
    }

    #[test]
    fn test_shot_just_outside_rings_prints_zero() {
        let shots = vec![Shot::at(2750.0, 0.0), Shot::at(0.0, 0.0)];
        let layout = TableLayout::plan(&shots, false, Precision::Whole).expect("layout");
        let mut surface = RecordingSurface::new(1000);
        draw_table(&mut surface, &layout, &shots, DesignPoint::new(250.0, 5000.0), 0.2);
        assert_eq!(surface.texts(), vec!["0", "10", "Summe:", "10"]);
    }

    #[test]
    fn test_teiler_only_reports_minimum() {
        let shots = vec![Shot::at(300.0, 400.0), Shot::at(30.0, 40.04), Shot::at(0.0, 90.0)];
        assert_eq!(
            TableLayout::plan(&shots, true, Precision::Tenth),
            Some(TableLayout::TeilerOnly { best: 50.0 })
        );
    }

    #[test]
    fn test_teiler_only_without_shots_is_nothing() {
        assert_eq!(TableLayout::plan(&[], true, Precision::Whole), None);
    }

    #[test]
    fn test_empty_standard_table_has_only_total() {
        let grid = grid(TableLayout::plan(&[], false, Precision::Whole));
        assert_eq!(grid.rows, 0);
        assert!(grid.entries.is_empty());
        assert_eq!(grid.total.to_string(), "0");
    }

    #[test]
    fn test_draw_teiler_cell() {
        let shots = vec![Shot::at(300.0, 400.0), Shot::at(120.0, 160.0)];
        let layout = TableLayout::plan(&shots, true, Precision::Whole).expect("layout");
        let mut surface = RecordingSurface::new(1000);
        draw_table(&mut surface, &layout, &shots, DesignPoint::new(250.0, 5000.0), 0.2);

        assert_eq!(surface.texts(), vec!["Teiler:", "200.0"]);
        // No per-shot values and no arrows
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 0);
        assert_eq!(
            surface.calls[0],
            DrawCall::Rectangle {
                bounds: PixelRect::new(626, 1000, 866, 1144),
                outline: Rgba::BLACK,
                width: table::BORDER_PX,
            }
        );
    }

    #[test]
    fn test_draw_grid() {
        let shots = shots(7);
        let layout = TableLayout::plan(&shots, false, Precision::Whole).expect("layout");
        let mut surface = RecordingSurface::new(1000);
        draw_table(&mut surface, &layout, &shots, DesignPoint::new(250.0, 5000.0), 0.2);

        assert_eq!(
            surface.texts(),
            vec!["10", "9", "7", "10", "9", "45", "7", "10", "Summe:", "62"]
        );

        // Two row outlines and the thick summary column spanning three cells
        let rects: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Rectangle { bounds, width, .. } => Some((*bounds, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (PixelRect::new(50, 1000, 950, 1144), 1),
                (PixelRect::new(50, 1144, 950, 1288), 1),
                (PixelRect::new(770, 1000, 950, 1432), table::BORDER_PX),
            ]
        );

        // Four column separators, one grand-total separator, three lines per arrow
        assert_eq!(
            surface.count(|c| matches!(c, DrawCall::Line { .. })),
            4 + 1 + 7 * 3
        );

        // The first score sits right-aligned in the first cell
        let first_text = surface
            .calls
            .iter()
            .find_map(|c| match c {
                DrawCall::Text { at, style, .. } => Some((*at, style.anchor)),
                _ => None,
            })
            .expect("text");
        assert_eq!(first_text, (PixelPoint::new(186, 1072), Anchor::RightMiddle));
    }
}
