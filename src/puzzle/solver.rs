// vim: set ai et ts=4 sts=4 sw=4:
use super::Puzzle;
use super::super::grid::{Grid, SquareStatus, Error};

impl Puzzle {
    // iterates line refinement to a fixed point: refine every row in order,
    // then every column, as one round; stop as soon as a full round leaves
    // the number of unknown squares unchanged. refinement is monotonic, so
    // the unknown count can only decrease and termination is guaranteed.
    // the grid may still contain unknown squares afterwards if line-local
    // reasoning alone cannot disambiguate the puzzle.
    pub fn solve(&mut self) -> Result<(), Error> {
        let mut previous: Option<usize> = None;
        let mut current = self.unknown_count();
        let mut round: usize = 0;

        while previous != Some(current) {
            round += 1;
            for row in self.rows.iter_mut() {
                row.refine()?;
            }
            for col in self.cols.iter_mut() {
                col.refine()?;
            }
            previous = Some(current);
            current = self.unknown_count();
            log::debug!("round {}: {} unknown squares left", round, current);
        }

        if current == 0 {
            log::info!("puzzle solved after {} rounds", round);
        } else {
            log::info!("propagation stopped after {} rounds with {} unknown squares",
                       round, current);
        }
        Ok(())
    }
}

// a puzzle counts as valid when re-solving it from its own derived
// constraints determines every square; this certifies solvability by line
// propagation alone, not global uniqueness under full search
pub fn is_valid_puzzle(grid: &Grid) -> Result<bool, Error> {
    let (col_constraints, row_constraints) = grid.derive_constraints()?;
    let mut puzzle = Puzzle::from_constraints(&col_constraints, &row_constraints)?;
    puzzle.solve()?;
    let solved = !puzzle.grid.borrow().contains(SquareStatus::Unknown);
    Ok(solved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::parse_constraint_line_text;

    fn solved_render(row_text: &str, col_text: &str) -> String {
        let rows = parse_constraint_line_text(row_text).unwrap();
        let cols = parse_constraint_line_text(col_text).unwrap();
        let mut puzzle = Puzzle::from_constraints(&cols, &rows).unwrap();
        puzzle.solve().unwrap();
        let render = puzzle.grid.borrow().render();
        render
    }

    #[test]
    fn plus_pattern_is_fully_determined() {
        assert_eq!(solved_render("1;3;1", "1;3;1"), ".x.\nxxx\n.x.");
    }

    #[test]
    fn ambiguous_puzzle_stays_partially_unknown() {
        // two diagonal solutions exist; line-local reasoning cannot pick one
        assert_eq!(solved_render("1;1", "1;1"), "??\n??");
    }

    #[test]
    fn empty_puzzle_crosses_everything_out() {
        assert_eq!(solved_render(";", ";"), "..\n..");
    }

    #[test]
    fn box_pattern_round_trips_through_derive_and_solve() {
        let image = "xxxxx\nx...x\nx...x\nx...x\nxxxxx";
        let grid = Grid::from_image_text(image).unwrap();
        let (cols, rows) = grid.derive_constraints().unwrap();
        let mut puzzle = Puzzle::from_constraints(&cols, &rows).unwrap();
        puzzle.solve().unwrap();
        assert_eq!(puzzle.grid.borrow().render(), image);
    }

    #[test]
    fn solve_is_idempotent_at_the_fixed_point() {
        let rows = parse_constraint_line_text("1;3;1").unwrap();
        let cols = parse_constraint_line_text("1;3;1").unwrap();
        let mut puzzle = Puzzle::from_constraints(&cols, &rows).unwrap();
        puzzle.solve().unwrap();
        let first = puzzle.grid.borrow().render();
        puzzle.solve().unwrap();
        assert_eq!(puzzle.grid.borrow().render(), first);
    }

    #[test]
    fn contradictory_constraints_surface_as_incompatible_lines() {
        // the row wants an empty line, the column wants a filled square
        let mut puzzle = Puzzle::from_constraints(&[vec![1]], &[vec![]]).unwrap();
        assert!(matches!(puzzle.solve(), Err(Error::IncompatibleLine { .. })));
    }

    #[test]
    fn validity_check_accepts_propagation_solvable_grids() {
        let grid = Grid::from_image_text(".x.\nxxx\n.x.").unwrap();
        assert!(is_valid_puzzle(&grid).unwrap());
    }

    #[test]
    fn validity_check_rejects_ambiguous_grids() {
        let grid = Grid::from_image_text("x.\n.x").unwrap();
        assert!(!is_valid_puzzle(&grid).unwrap());
    }

    #[test]
    fn validity_check_does_not_mutate_its_input() {
        let grid = Grid::from_image_text("x.\n.x").unwrap();
        let before = grid.render();
        is_valid_puzzle(&grid).unwrap();
        assert_eq!(grid.render(), before);
    }
}
