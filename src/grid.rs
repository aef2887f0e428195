// vim: set ai et ts=4 sts=4:
use std::fmt;
use std::io;
use super::util::Direction;

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum SquareStatus {
    FilledIn,
    CrossedOut,
    Unknown,
}
impl SquareStatus {
    // single character used in the ?/./x text representation of a grid
    pub fn to_codec_char(self) -> char {
        match self {
            SquareStatus::Unknown    => '?',
            SquareStatus::CrossedOut => '.',
            SquareStatus::FilledIn   => 'x',
        }
    }
    // wider glyph used when pretty-printing a board
    pub fn fmt_visual(&self) -> &str {
        match self {
            SquareStatus::CrossedOut => " ",
            SquareStatus::FilledIn   => "\u{25A0}",
            SquareStatus::Unknown    => ".",
        }
    }
}
impl fmt::Display for SquareStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match *self {
            SquareStatus::FilledIn   => "FilledIn",
            SquareStatus::CrossedOut => "CrossedOut",
            SquareStatus::Unknown    => "Unknown",
        })
    }
}

// ------------------------------------------------

#[derive(Debug)]
pub enum Error {
    IndexOutOfRange { x: usize, y: usize, width: usize, height: usize },
    IncompatibleLine { direction: Direction, index: usize },
    MalformedConstraintInput(String),
    MalformedImageInput(String),
    Logic(String),
    Io(io::Error),
}
impl From<io::Error> for Error {
    fn from(other: io::Error) -> Self {
        Error::Io(other)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IndexOutOfRange { x, y, width, height } =>
                write!(f, "grid access out of range: (x={}, y={}) on a {}x{} grid", x, y, width, height),
            Error::IncompatibleLine { direction, index } =>
                write!(f, "no placement of the runs in {} {} is compatible with its known squares",
                    direction.line_name(), index),
            Error::MalformedConstraintInput(msg) =>
                write!(f, "malformed constraint input: {}", msg),
            Error::MalformedImageInput(msg) =>
                write!(f, "malformed image input: {}", msg),
            Error::Logic(msg) =>
                write!(f, "{}", msg),
            Error::Io(err) =>
                write!(f, "i/o error: {}", err),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _              => None,
        }
    }
}

// ------------------------------------------------

#[derive(Clone)]
pub struct Grid {
    squares: Vec<Vec<SquareStatus>>,
}
impl Grid {
    pub fn new<F>(width: usize, height: usize, initializer: F) -> Self
        where F: Fn(usize, usize) -> SquareStatus
    {
        assert!(width >= 1 && height >= 1, "grid dimensions must be at least 1x1");
        Grid {
            squares: (0..height).map(|y| (0..width).map(|x| initializer(x, y))
                                                   .collect::<Vec<_>>())
                                .collect(),
        }
    }

    pub fn width(&self) -> usize { self.squares[0].len() }
    pub fn height(&self) -> usize { self.squares.len() }
    pub fn squares(&self) -> &Vec<Vec<SquareStatus>> { &self.squares }

    fn check_bounds(&self, x: usize, y: usize) -> Result<(), Error> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfRange { x, y, width: self.width(), height: self.height() });
        }
        Ok(())
    }
    pub fn get(&self, x: usize, y: usize) -> Result<SquareStatus, Error> {
        self.check_bounds(x, y)?;
        Ok(self.squares[y][x])
    }
    pub fn set(&mut self, x: usize, y: usize, status: SquareStatus) -> Result<(), Error> {
        self.check_bounds(x, y)?;
        self.squares[y][x] = status;
        Ok(())
    }

    pub fn count<P>(&self, predicate: P) -> usize
        where P: Fn(SquareStatus) -> bool
    {
        self.squares.iter()
                    .flat_map(|row| row.iter())
                    .filter(|&&s| predicate(s))
                    .count()
    }
    pub fn contains(&self, status: SquareStatus) -> bool {
        self.count(|s| s == status) > 0
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid(w={}, h={})", self.width(), self.height())
    }
}

// ------------------------------------------------
// text codec: ?/./x renderings, image parsing and constraint derivation

impl Grid {
    pub fn render(&self) -> String {
        self.squares.iter()
                    .map(|row| row.iter()
                                  .map(|s| s.to_codec_char())
                                  .collect::<String>())
                    .collect::<Vec<_>>()
                    .join("\n")
    }

    // parses the image representation of a fully determined grid:
    // one row per line, '.' is an empty square, anything else is filled in
    pub fn from_image_text(text: &str) -> Result<Grid, Error> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.is_empty() {
            return Err(Error::MalformedImageInput("image contains no rows".to_string()));
        }
        let width = rows[0].chars().count();
        if width == 0 {
            return Err(Error::MalformedImageInput("image rows are empty".to_string()));
        }
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(Error::MalformedImageInput(
                    format!("row {} has length {}, expected {}", y, row.chars().count(), width)));
            }
        }
        let statuses: Vec<Vec<SquareStatus>> =
            rows.iter()
                .map(|row| row.chars()
                              .map(|c| match c {
                                  '.' => SquareStatus::CrossedOut,
                                  _   => SquareStatus::FilledIn,
                              })
                              .collect())
                .collect();
        Ok(Grid::new(width, rows.len(), |x, y| statuses[y][x]))
    }

    // derives the (column, row) run length constraints of a fully determined grid
    pub fn derive_constraints(&self) -> Result<(Vec<Vec<usize>>, Vec<Vec<usize>>), Error> {
        if self.contains(SquareStatus::Unknown) {
            return Err(Error::Logic(
                "cannot derive constraints from a grid with unknown squares".to_string()));
        }
        let col_constraints = (0..self.width())
            .map(|x| Self::derive_line((0..self.height()).map(|y| self.squares[y][x])))
            .collect();
        let row_constraints = (0..self.height())
            .map(|y| Self::derive_line(self.squares[y].iter().copied()))
            .collect();
        Ok((col_constraints, row_constraints))
    }

    fn derive_line<I>(statuses: I) -> Vec<usize>
        where I: Iterator<Item=SquareStatus>
    {
        // accumulate a run counter; flush it on every empty square and at the
        // end of the line, dropping zero-length runs
        let mut runs = Vec::<usize>::new();
        let mut current: usize = 0;
        for status in statuses {
            match status {
                SquareStatus::CrossedOut => {
                    if current > 0 {
                        runs.push(current);
                    }
                    current = 0;
                }
                _ => { current += 1; }
            }
        }
        if current > 0 {
            runs.push(current);
        }
        runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_go_through() {
        let mut grid = Grid::new(3, 2, |_, _| SquareStatus::Unknown);
        assert_eq!(grid.get(2, 1).unwrap(), SquareStatus::Unknown);
        grid.set(2, 1, SquareStatus::FilledIn).unwrap();
        assert_eq!(grid.get(2, 1).unwrap(), SquareStatus::FilledIn);
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut grid = Grid::new(3, 2, |_, _| SquareStatus::Unknown);
        assert!(matches!(grid.get(3, 0), Err(Error::IndexOutOfRange { x: 3, y: 0, .. })));
        assert!(matches!(grid.get(0, 2), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(grid.set(5, 5, SquareStatus::FilledIn), Err(Error::IndexOutOfRange { .. })));
    }

    #[test]
    fn count_and_contains() {
        let grid = Grid::new(2, 2, |x, y| if x == y { SquareStatus::FilledIn }
                                          else      { SquareStatus::Unknown });
        assert_eq!(grid.count(|s| s == SquareStatus::FilledIn), 2);
        assert_eq!(grid.count(|s| s == SquareStatus::Unknown), 2);
        assert!(grid.contains(SquareStatus::Unknown));
        assert!(!grid.contains(SquareStatus::CrossedOut));
    }

    #[test]
    fn render_uses_codec_characters() {
        let grid = Grid::new(3, 1, |x, _| match x {
            0 => SquareStatus::CrossedOut,
            1 => SquareStatus::FilledIn,
            _ => SquareStatus::Unknown,
        });
        assert_eq!(grid.render(), ".x?");
    }

    #[test]
    fn image_text_round_trips_through_render() {
        let text = ".x.\nxxx\n.x.";
        let grid = Grid::from_image_text(text).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.render(), text);
    }

    #[test]
    fn image_parse_never_produces_unknown() {
        let grid = Grid::from_image_text("?ab\n.x.").unwrap();
        assert!(!grid.contains(SquareStatus::Unknown));
        assert_eq!(grid.get(0, 0).unwrap(), SquareStatus::FilledIn);
    }

    #[test]
    fn unequal_image_rows_are_rejected() {
        assert!(matches!(Grid::from_image_text("xx\nxxx"),
                         Err(Error::MalformedImageInput(_))));
        assert!(matches!(Grid::from_image_text(""),
                         Err(Error::MalformedImageInput(_))));
    }

    #[test]
    fn derive_constraints_reads_off_runs() {
        let grid = Grid::from_image_text("xx.x\n....\nx..x").unwrap();
        let (cols, rows) = grid.derive_constraints().unwrap();
        assert_eq!(rows, vec![vec![2, 1], vec![], vec![1, 1]]);
        assert_eq!(cols, vec![vec![1, 1], vec![1], vec![], vec![1, 1]]);
    }

    #[test]
    fn derive_constraints_rejects_unknown_squares() {
        let grid = Grid::new(2, 2, |_, _| SquareStatus::Unknown);
        assert!(matches!(grid.derive_constraints(), Err(Error::Logic(_))));
    }
}
