use std::collections::{BTreeSet, HashMap};

use chrono::Datelike;

use crate::core::week_grid::{DAYS_PER_WEEK, WeekGrid};

/// Axis-aligned segment in grid units (x = week column edge, y = row edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridSegment {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl GridSegment {
    #[must_use]
    pub fn is_horizontal(self) -> bool {
        self.y1 == self.y2
    }

    #[must_use]
    pub fn length(self) -> i64 {
        (self.x2 - self.x1).abs() + (self.y2 - self.y1).abs()
    }
}

/// Boundary segments separating calendar months over the occupied cells.
///
/// A cell edge is part of the outline when the cell across it belongs to a
/// different month or is not displayed at all. Edges shared by two months
/// appear once, and collinear unit edges are merged into maximal runs.
#[must_use]
pub fn month_outline_segments(grid: &WeekGrid) -> Vec<GridSegment> {
    let months: HashMap<(i64, i64), i32> = grid
        .cells()
        .map(|(date, coordinate)| {
            (
                (
                    i64::from(coordinate.week_index),
                    i64::from(coordinate.weekday_row),
                ),
                date.year() * 12 + date.month0() as i32,
            )
        })
        .collect();

    let same_month = |cell: (i64, i64), month: i32| months.get(&cell) == Some(&month);

    // Unit edges keyed by (row line, column) and (column line, row).
    let mut horizontal: BTreeSet<(i64, i64)> = BTreeSet::new();
    let mut vertical: BTreeSet<(i64, i64)> = BTreeSet::new();
    let last_row = i64::from(DAYS_PER_WEEK) - 1;

    for (&(week, row), &month) in &months {
        if row == 0 || !same_month((week, row - 1), month) {
            horizontal.insert((row, week));
        }
        if row == last_row || !same_month((week, row + 1), month) {
            horizontal.insert((row + 1, week));
        }
        if !same_month((week - 1, row), month) {
            vertical.insert((week, row));
        }
        if !same_month((week + 1, row), month) {
            vertical.insert((week + 1, row));
        }
    }

    let mut segments = merge_runs(&horizontal, |y, x_start, x_end| GridSegment {
        x1: x_start,
        y1: y,
        x2: x_end,
        y2: y,
    });
    segments.extend(merge_runs(&vertical, |x, y_start, y_end| GridSegment {
        x1: x,
        y1: y_start,
        x2: x,
        y2: y_end,
    }));
    segments
}

fn merge_runs(
    edges: &BTreeSet<(i64, i64)>,
    make: impl Fn(i64, i64, i64) -> GridSegment,
) -> Vec<GridSegment> {
    let mut segments = Vec::new();
    let mut current: Option<(i64, i64, i64)> = None;

    for &(line, position) in edges {
        current = match current {
            Some((run_line, run_start, run_end)) if run_line == line && run_end == position => {
                Some((run_line, run_start, position + 1))
            }
            Some((run_line, run_start, run_end)) => {
                segments.push(make(run_line, run_start, run_end));
                Some((line, position, position + 1))
            }
            None => Some((line, position, position + 1)),
        };
    }
    if let Some((line, start, end)) = current {
        segments.push(make(line, start, end));
    }
    segments
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{GridSegment, merge_runs};

    #[test]
    fn merge_runs_joins_contiguous_unit_edges_only() {
        let edges: BTreeSet<(i64, i64)> = [(0, 0), (0, 1), (0, 2), (0, 4), (3, 4)]
            .into_iter()
            .collect();
        let merged = merge_runs(&edges, |y, a, b| GridSegment {
            x1: a,
            y1: y,
            x2: b,
            y2: y,
        });
        assert_eq!(
            merged,
            vec![
                GridSegment { x1: 0, y1: 0, x2: 3, y2: 0 },
                GridSegment { x1: 4, y1: 0, x2: 5, y2: 0 },
                GridSegment { x1: 4, y1: 3, x2: 5, y2: 3 },
            ]
        );
    }
}
