// vim: set ai et ts=4 sw=4 sts=4:
mod combinations;
mod solver;

pub use self::combinations::Placements;

use std::rc::Rc;
use std::cell::RefCell;
use ansi_term::{Colour, Style, ANSIString};

use super::util::{Direction, Direction::*};
use super::grid::{Grid, SquareStatus, Error};

// a directional view over one line of the shared grid: reads and writes go
// straight through to the backing squares, so a row view and a column view
// alias each other at their intersection
#[derive(Debug)]
pub struct Row {
    pub direction:   Direction,
    pub index:       usize,
    pub length:      usize,
    pub run_lengths: Vec<usize>,
    pub grid:        Rc<RefCell<Grid>>,
}

impl Row {
    pub fn new(grid: &Rc<RefCell<Grid>>,
               direction: Direction,
               index: usize,
               run_lengths: &[usize]) -> Self
    {
        let length = match direction {
            Horizontal => grid.borrow().width(),
            Vertical   => grid.borrow().height(),
        };
        Row {
            direction:   direction,
            index:       index,
            length:      length,
            run_lengths: run_lengths.to_vec(),
            grid:        Rc::clone(grid),
        }
    }

    pub fn square_index(&self, at: usize) -> (usize, usize) {
        match self.direction {
            Horizontal => (at, self.index),
            Vertical   => (self.index, at),
        }
    }
    pub fn get_square(&self, at: usize) -> Result<SquareStatus, Error> {
        let (x, y) = self.square_index(at);
        self.grid.borrow().get(x, y)
    }
    pub fn set_square(&self, at: usize, status: SquareStatus) -> Result<(), Error> {
        let (x, y) = self.square_index(at);
        self.grid.borrow_mut().set(x, y, status)
    }

    // snapshot of the line's current squares
    pub fn cells(&self) -> Result<Vec<SquareStatus>, Error> {
        (0..self.length).map(|i| self.get_square(i)).collect()
    }

    pub fn unknown_count(&self) -> usize {
        (0..self.length).filter(|&i| matches!(self.get_square(i), Ok(SquareStatus::Unknown)))
                        .count()
    }
    pub fn is_completed(&self) -> bool {
        self.unknown_count() == 0
    }

    pub fn clue_strings(&self) -> Vec<ANSIString> {
        let style = match self.is_completed() {
            true  => Style::new().fg(Colour::Fixed(241)),
            false => Style::default(),
        };
        self.run_lengths.iter()
                        .map(|n| style.paint(n.to_string()))
                        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;
    use std::cell::RefCell;
    use crate::grid::SquareStatus::*;

    fn shared_grid(width: usize, height: usize) -> Rc<RefCell<Grid>> {
        Rc::new(RefCell::new(Grid::new(width, height, |_, _| Unknown)))
    }

    #[test]
    fn view_lengths_follow_direction() {
        let grid = shared_grid(4, 3);
        assert_eq!(Row::new(&grid, Horizontal, 0, &[]).length, 4);
        assert_eq!(Row::new(&grid, Vertical, 0, &[]).length, 3);
    }

    #[test]
    fn views_alias_the_backing_grid() {
        let grid = shared_grid(4, 3);
        let row = Row::new(&grid, Horizontal, 1, &[2]);
        let col = Row::new(&grid, Vertical, 2, &[1]);

        // the row and column views cross at (x=2, y=1)
        row.set_square(2, FilledIn).unwrap();
        assert_eq!(col.get_square(1).unwrap(), FilledIn);
        assert_eq!(grid.borrow().get(2, 1).unwrap(), FilledIn);

        col.set_square(0, CrossedOut).unwrap();
        assert_eq!(grid.borrow().get(2, 0).unwrap(), CrossedOut);
    }

    #[test]
    fn out_of_range_view_access_is_an_error() {
        let grid = shared_grid(2, 2);
        let row = Row::new(&grid, Horizontal, 0, &[]);
        assert!(matches!(row.get_square(2), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn completion_tracks_unknown_squares() {
        let grid = shared_grid(2, 1);
        let row = Row::new(&grid, Horizontal, 0, &[1]);
        assert!(!row.is_completed());
        row.set_square(0, FilledIn).unwrap();
        row.set_square(1, CrossedOut).unwrap();
        assert!(row.is_completed());
        assert_eq!(row.unknown_count(), 0);
    }
}
