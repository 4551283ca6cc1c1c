//! Bitmap grid model

use crate::{
    constants::UNSET_CELL,
    error::{AppError, AppResult},
};

/// Rectangular grid of binary cells.
///
/// Every row has the same length. Grids are immutable once built; a zero-area
/// grid can be constructed but is rejected by scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapGrid {
    rows: Vec<Vec<bool>>,
}

impl BitmapGrid {
    /// Parse grid text whose rows are joined by `separator`.
    ///
    /// `'0'` is an unset cell, any other character is set. Widths are counted in
    /// characters and every row must match the first one.
    pub fn parse(text: &str, separator: &str) -> AppResult<Self> {
        let rows: Vec<Vec<bool>> = text
            .split(separator)
            .map(|line| line.chars().map(|dot| dot != UNSET_CELL).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// Build a grid from explicit rows
    pub fn from_rows(rows: Vec<Vec<bool>>) -> AppResult<Self> {
        if let Some(first) = rows.first() {
            let expected = first.len();
            if let Some((row, line)) = rows
                .iter()
                .enumerate()
                .find(|(_, line)| line.len() != expected)
            {
                return Err(AppError::Format {
                    expected,
                    actual: line.len(),
                    row,
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row, 0 for a grid without rows
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<bool> {
        self.rows.get(row).and_then(|line| line.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Number of positions where the two grids disagree.
    ///
    /// Only meaningful for grids of equal dimensions.
    pub(crate) fn count_mismatches(&self, other: &BitmapGrid) -> usize {
        self.rows
            .iter()
            .zip(&other.rows)
            .flat_map(|(a, b)| a.iter().zip(b))
            .filter(|(a, b)| a != b)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submission() {
        let grid = BitmapGrid::parse("010\r\n1x1", "\r\n").unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.cell(0, 0), Some(false));
        assert_eq!(grid.cell(0, 1), Some(true));
        // any non-zero character is a set cell
        assert_eq!(grid.cell(1, 1), Some(true));
        assert_eq!(grid.cell(2, 0), None);
    }

    #[test]
    fn test_parse_reports_irregular_row() {
        let err = BitmapGrid::parse("000 00 000", " ").unwrap_err();
        match err {
            AppError::Format {
                expected,
                actual,
                row,
            } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_trailing_separator_is_a_short_row() {
        let err = BitmapGrid::parse("01\r\n10\r\n", "\r\n").unwrap_err();
        assert!(matches!(
            err,
            AppError::Format {
                expected: 2,
                actual: 0,
                row: 2
            }
        ));
    }

    #[test]
    fn test_empty_input_parses_to_zero_area() {
        let grid = BitmapGrid::parse("", "\r\n").unwrap();
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.width(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_width_counts_characters() {
        let grid = BitmapGrid::parse("é0 01", " ").unwrap();
        assert_eq!(grid.width(), 2);
    }

    #[test]
    fn test_count_mismatches() {
        let a = BitmapGrid::parse("00 00", " ").unwrap();
        let b = BitmapGrid::parse("00 01", " ").unwrap();
        assert_eq!(a.count_mismatches(&b), 1);
        assert_eq!(a.count_mismatches(&a), 0);
    }
}
