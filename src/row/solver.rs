// vim: set ai et ts=4 sts=4 sw=4:
use super::{Row, Placements};
use super::super::grid::{SquareStatus, SquareStatus::*, Error};

fn compatible(known: &[SquareStatus], candidate: &[SquareStatus]) -> bool {
    known.iter()
         .zip(candidate)
         .all(|(&b, &c)| b == Unknown || b == c)
}

// pointwise intersection: positions where the candidate disagrees with the
// accumulator fall back to Unknown
fn merge(accumulator: &mut [SquareStatus], candidate: &[SquareStatus]) {
    for (a, &c) in accumulator.iter_mut().zip(candidate) {
        if *a != c {
            *a = Unknown;
        }
    }
}

impl Row {
    // tightens this line to the intersection of all placements of its runs
    // that agree with the currently known squares; returns how many squares
    // became determined. candidates are only ever filtered against the
    // snapshot taken up front, so a known square can never be weakened.
    pub fn refine(&mut self) -> Result<usize, Error> {
        let known = self.cells()?;

        let mut merged: Option<Vec<SquareStatus>> = None;
        for candidate in Placements::new(self.length, &self.run_lengths) {
            if !compatible(&known, &candidate) {
                continue;
            }
            match merged {
                None              => merged = Some(candidate),
                Some(ref mut acc) => merge(acc, &candidate),
            }
        }

        let merged = match merged {
            Some(m) => m,
            None    => return Err(Error::IncompatibleLine {
                           direction: self.direction,
                           index:     self.index,
                       }),
        };

        let mut newly_determined = 0;
        for (i, &status) in merged.iter().enumerate() {
            if known[i] == Unknown && status != Unknown {
                self.set_square(i, status)?;
                newly_determined += 1;
            }
        }
        Ok(newly_determined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::cell::RefCell;
    use crate::grid::Grid;
    use crate::util::Direction::*;

    fn row_over(cells: &str, run_lengths: &[usize]) -> Row {
        let width = cells.len();
        let statuses: Vec<SquareStatus> = cells.chars()
                                               .map(|c| match c {
                                                   'x' => FilledIn,
                                                   '.' => CrossedOut,
                                                   _   => Unknown,
                                               })
                                               .collect();
        let grid = Rc::new(RefCell::new(Grid::new(width, 1, |x, _| statuses[x])));
        Row::new(&grid, Horizontal, 0, run_lengths)
    }

    fn rendered(row: &Row) -> String {
        row.cells().unwrap()
           .iter()
           .map(|s| s.to_codec_char())
           .collect()
    }

    #[test]
    fn overlap_of_a_long_run_is_forced() {
        // both placements of a 4-run in 5 squares share the middle three
        let mut row = row_over("?????", &[4]);
        assert_eq!(row.refine().unwrap(), 3);
        assert_eq!(rendered(&row), "?xxx?");
    }

    #[test]
    fn known_squares_restrict_the_candidates() {
        // with the first square filled, only xx.x. and xx..x survive
        let mut row = row_over("x????", &[2, 1]);
        row.refine().unwrap();
        assert_eq!(rendered(&row), "xx.??");
    }

    #[test]
    fn empty_constraint_crosses_out_the_line() {
        let mut row = row_over("???", &[]);
        assert_eq!(row.refine().unwrap(), 3);
        assert_eq!(rendered(&row), "...");
    }

    #[test]
    fn fully_determined_lines_are_left_alone() {
        let mut row = row_over("xx.x", &[2, 1]);
        assert_eq!(row.refine().unwrap(), 0);
        assert_eq!(rendered(&row), "xx.x");
    }

    #[test]
    fn known_squares_are_never_weakened() {
        let mut row = row_over("?.???", &[1, 1]);
        row.refine().unwrap();
        assert_eq!(row.get_square(1).unwrap(), CrossedOut);
    }

    #[test]
    fn contradictory_line_reports_incompatibility() {
        // a filled square cannot appear in a line whose constraint is empty
        let mut row = row_over("x??", &[]);
        assert!(matches!(row.refine(),
                         Err(Error::IncompatibleLine { index: 0, .. })));
    }

    #[test]
    fn unsatisfiable_runs_report_incompatibility() {
        let mut row = row_over("???", &[2, 2]);
        assert!(matches!(row.refine(), Err(Error::IncompatibleLine { .. })));
    }

    #[test]
    fn refine_is_idempotent() {
        let mut row = row_over("?????", &[4]);
        row.refine().unwrap();
        assert_eq!(row.refine().unwrap(), 0);
        assert_eq!(rendered(&row), "?xxx?");
    }
}
