//! Row cursor with one row of lookahead.

use crate::keyword::Keyword;
use crate::source::Row;

/// A position over a slice of rows.
///
/// The reader hands one cursor down the recursion by `&mut`; it is the only
/// mutable state while parsing.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    rows: &'a [Row],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(rows: &'a [Row]) -> Self {
        Self { rows, position: 0 }
    }

    /// The row at the current position, `None` at end of input.
    pub fn peek(&self) -> Option<&'a Row> {
        self.rows.get(self.position)
    }

    /// Keyword of the row at the current position.
    pub fn peek_keyword(&self) -> Option<Keyword> {
        self.peek().map(|row| Keyword::classify(row.keyword()))
    }

    /// Return the current row and advance, even past the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a Row> {
        let row = self.peek();
        self.position += 1;
        row
    }

    /// Undo the last [`Cursor::next`]. Stays at zero if nothing was taken.
    pub fn back(&mut self) {
        debug_assert!(self.position > 0, "Cursor::back without a preceding next");
        self.position = self.position.saturating_sub(1);
    }

    /// Whether the position is at or past the last row.
    pub fn is_eof(&self) -> bool {
        self.position >= self.rows.len()
    }

    /// Current index into the rows.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RowSource;

    fn source(n: usize) -> RowSource {
        RowSource::from_rows((0..n).map(|i| vec![format!("r{}", i)]))
    }

    #[test]
    fn test_peek_does_not_advance() {
        let src = source(2);
        let cursor = Cursor::new(src.rows());
        assert_eq!(cursor.peek().unwrap().keyword(), "r0");
        assert_eq!(cursor.peek().unwrap().keyword(), "r0");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_next_past_end_is_allowed() {
        let src = source(1);
        let mut cursor = Cursor::new(src.rows());
        assert!(cursor.next().is_some());
        assert!(cursor.is_eof());
        assert!(cursor.next().is_none());
        assert!(cursor.peek().is_none());
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_back_undoes_next() {
        let src = source(3);
        let mut cursor = Cursor::new(src.rows());
        cursor.next();
        cursor.next();
        cursor.back();
        assert_eq!(cursor.peek().unwrap().keyword(), "r1");
    }

    #[test]
    fn test_position_equals_unmatched_nexts() {
        let src = source(4);
        let mut cursor = Cursor::new(src.rows());
        // next next back next next back next => 5 nexts, 2 backs
        let ops = [true, true, false, true, true, false, true];
        let mut expected = 0usize;
        for op in ops {
            if op {
                cursor.next();
                expected += 1;
            } else {
                cursor.back();
                expected -= 1;
            }
            assert_eq!(cursor.position(), expected);
        }
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn test_empty_source_is_eof() {
        let src = source(0);
        let cursor = Cursor::new(src.rows());
        assert!(cursor.is_eof());
        assert!(cursor.peek_keyword().is_none());
    }
}
