// vim: set ai et ts=4 sw=4 sts=4:
mod solver;

pub use self::solver::is_valid_puzzle;

use std::fmt;
use std::rc::Rc;
use std::cell::RefCell;
use std::convert::TryFrom;
use yaml_rust::Yaml;
use ansi_term::ANSIString;

use super::grid::{Grid, SquareStatus, Error};
use super::util::{ralign, lalign_colored, ralign_joined_coloreds, Direction::*};
use super::row::Row;

#[derive(Debug)]
pub struct Puzzle {
    pub rows: Vec<Row>,
    pub cols: Vec<Row>,
    pub grid: Rc<RefCell<Grid>>,
}

impl Puzzle {
    pub fn new(grid: &Rc<RefCell<Grid>>,
               row_run_lengths: &[Vec<usize>],
               col_run_lengths: &[Vec<usize>]) -> Self
    {
        let rows = (0..grid.borrow().height()).map(|y| Row::new(grid, Horizontal, y, &row_run_lengths[y]))
                                              .collect::<Vec<_>>();
        let cols = (0..grid.borrow().width()).map(|x| Row::new(grid, Vertical, x, &col_run_lengths[x]))
                                             .collect::<Vec<_>>();
        Puzzle {
            rows: rows,
            cols: cols,
            grid: Rc::clone(grid),
        }
    }
    pub fn width(&self) -> usize { self.grid.borrow().width() }
    pub fn height(&self) -> usize { self.grid.borrow().height() }

    // builds an all-unknown puzzle; the grid's dimensions are derived from
    // the lengths of the constraint lists
    pub fn from_constraints(col_constraints: &[Vec<usize>],
                            row_constraints: &[Vec<usize>]) -> Result<Puzzle, Error>
    {
        if col_constraints.is_empty() || row_constraints.is_empty() {
            return Err(Error::MalformedConstraintInput(
                "a puzzle needs at least one row and one column".to_string()));
        }
        let grid = Rc::new(RefCell::new(
            Grid::new(col_constraints.len(), row_constraints.len(), |_, _| SquareStatus::Unknown)
        ));
        Ok(Puzzle::new(&grid, row_constraints, col_constraints))
    }

    pub fn from_yaml(doc: &Yaml) -> Result<Puzzle, Error>
    {
        let row_run_lengths = Self::parse_yaml_constraints(&doc["rows"], "rows")?;
        let col_run_lengths = Self::parse_yaml_constraints(&doc["cols"], "cols")?;
        Self::from_constraints(&col_run_lengths, &row_run_lengths)
    }

    fn parse_yaml_constraints(input: &Yaml, key: &str) -> Result<Vec<Vec<usize>>, Error> {
        let list: &Vec<Yaml> = input.as_vec().ok_or_else(|| Error::MalformedConstraintInput(
            format!("'{}' must be a list of run length entries", key)))?;
        list.iter()
            .map(Self::parse_yaml_runs)
            .collect()
    }

    fn parse_yaml_runs(input: &Yaml) -> Result<Vec<usize>, Error> {
        match input {
            Yaml::String(s)  => s.split_whitespace()
                                 .map(|part| parse_run_length(part.trim()))
                                 .collect(),
            Yaml::Integer(n) => match usize::try_from(*n) {
                                    Ok(v) if v > 0 => Ok(vec![v]),
                                    _ => Err(Error::MalformedConstraintInput(
                                             format!("'{}' is not a positive run length", n))),
                                },
            Yaml::Null       => Ok(vec![]),
            _ => Err(Error::MalformedConstraintInput(
                     format!("unexpected run length entry: {:?}", input))),
        }
    }

    pub fn unknown_count(&self) -> usize {
        self.grid.borrow().count(|s| s == SquareStatus::Unknown)
    }
    pub fn is_solved(&self) -> bool {
        !self.grid.borrow().contains(SquareStatus::Unknown)
    }
}

fn parse_run_length(text: &str) -> Result<usize, Error> {
    let n: usize = text.parse().map_err(|_| Error::MalformedConstraintInput(
        format!("'{}' is not a run length", text)))?;
    if n == 0 {
        return Err(Error::MalformedConstraintInput("run lengths must be positive".to_string()));
    }
    Ok(n)
}

// the degenerate text encoding of a constraint list: ';' separates lines,
// ',' separates run lengths, an empty segment is an all-empty line
pub fn parse_constraint_line_text(text: &str) -> Result<Vec<Vec<usize>>, Error> {
    text.split(';')
        .map(|segment| {
            let segment = segment.trim();
            if segment.is_empty() {
                Ok(Vec::new())
            } else {
                segment.split(',')
                       .map(|part| parse_run_length(part.trim()))
                       .collect()
            }
        })
        .collect()
}

pub fn constraint_line_text(constraints: &[Vec<usize>]) -> String {
    constraints.iter()
               .map(|ns| ns.iter()
                           .map(|n| n.to_string())
                           .collect::<Vec<_>>()
                           .join(","))
               .collect::<Vec<_>>()
               .join(";")
}

impl Puzzle {
    // helper functions for the board rendering
    fn fmt_line(prefix: &str,
                left_delim: &str,
                right_delim: &str,
                columnwise_separator: &str,
                subdivision: Option<usize>,
                content_parts: &[String])
        -> String
    {
        let mut result = format!("{} {}", prefix, left_delim);
        for (idx, s) in content_parts.iter().enumerate() {
            result.push_str(s);
            if let Some(subdiv) = subdivision {
                if ((idx+1) % subdiv == 0) && (idx < content_parts.len()-1) {
                    result.push_str(columnwise_separator);
                }
            }
        }
        result.push_str(&format!("{}\n", right_delim));
        result
    }

    fn fmt_header(&self,
                  line_idx: usize,
                  prefix_len: usize,
                  subdivision: Option<usize>,
                  emit_color: bool)
        -> String
    {
        let mut content_parts = Vec::<String>::new();
        for col in &self.cols {
            let clues = col.clue_strings();
            let part: String;
            if line_idx < clues.len() {
                let colored = &clues[clues.len()-1-line_idx];
                part = format!(" {}", lalign_colored(colored, 2, emit_color));
            } else {
                part = format!(" {:-2}", " ");
            }

            content_parts.push(part);
        }

        Self::fmt_line(
            &ralign("", prefix_len),
            " ",
            " ",
            " ",
            subdivision,
            &content_parts
        )
    }

    // renders the board with its clues: row clues right-aligned on the left,
    // column clues stacked on top, every 5th row/column visually subdivided;
    // clues of completed lines are painted grey when color is emitted
    pub fn render_board(&self, emit_color: bool) -> String
    {
        let subdivision = Some(5);
        let row_prefixes: Vec<Vec<ANSIString>> =
            self.rows.iter()
                     .map(|row| row.clue_strings())
                     .collect();

        let prefix_len = row_prefixes.iter()
                                     .map(|parts| parts.iter()
                                                       .fold(0, |sum, ansi_str| sum + ansi_str.len() + 1) // note: .len() returns length WITHOUT ansi color escape sequences
                                                       .saturating_sub(1)) // minus one at the end to match the length of a join(" ")
                                     .max().unwrap_or(0);
        let max_col_runs = self.cols.iter()
                                    .map(|col| col.run_lengths.len())
                                    .max().unwrap_or(0);

        let mut result = String::new();
        let grid = self.grid.borrow();

        for i in (0..max_col_runs).rev() {
            result.push_str(&self.fmt_header(i, prefix_len, subdivision, emit_color));
        }

        // top board line
        result.push_str(&Self::fmt_line(
            &ralign("", prefix_len),
            "\u{2554}",
            "\u{2557}",
            "\u{2564}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        for y in 0..self.height() {
            // board content line
            result.push_str(&Self::fmt_line(
                &ralign_joined_coloreds(&row_prefixes[y], prefix_len, emit_color),
                "\u{2551}",
                "\u{2551}",
                "\u{2502}",
                subdivision,
                &grid.squares()[y].iter()
                                  .map(|s| format!(" {:1} ", s.fmt_visual()))
                                  .collect::<Vec<_>>()
            ));

            // horizontal subdivisor line
            if let Some(subdiv) = subdivision {
                if ((y+1) % subdiv == 0) && (y != self.height()-1) {
                    result.push_str(&Self::fmt_line(
                        &ralign("", prefix_len),
                        "\u{255F}",
                        "\u{2562}",
                        "\u{253C}",
                        subdivision,
                        &(0..self.width()).map(|_| String::from("\u{2500}\u{2500}\u{2500}"))
                                          .collect::<Vec<_>>()
                    ));
                }
            }
        }
        // bottom board line
        result.push_str(&Self::fmt_line(
            &ralign("", prefix_len),
            "\u{255A}",
            "\u{255D}",
            "\u{2567}",
            subdivision,
            &(0..self.width()).map(|_| String::from("\u{2550}\u{2550}\u{2550}"))
                              .collect::<Vec<_>>()
        ));

        result
    }
}
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render_board(false))
    }
}
