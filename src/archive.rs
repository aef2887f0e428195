// vim: set ai et ts=4 sw=4 sts=4:
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use serde::{Serialize, Deserialize};

use super::grid::{Grid, SquareStatus, Error};

// a single-file store of players and library puzzles; the solver core never
// touches this module, it only consumes grids and constraint lists
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Archive {
    players: BTreeMap<String, u32>,
    library: Vec<LibraryEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibraryEntry {
    pub author: String,
    pub width:  usize,
    pub height: usize,
    pub rows:   Vec<String>,
}

impl LibraryEntry {
    pub fn solution_text(&self) -> String {
        self.rows.join("\n")
    }
}

pub fn entry_name(index: usize) -> String {
    format!("entry{:05}", index)
}

impl Archive {
    pub fn create(path: &Path, force: bool) -> Result<(), Error> {
        if path.exists() && !force {
            return Err(Error::Io(io::Error::new(io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()))));
        }
        Archive::default().save(path)
    }

    pub fn load(path: &Path) -> Result<Archive, Error> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let text = serde_json::to_string_pretty(self)
            .map_err(|err| Error::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
        fs::write(path, text)?;
        Ok(())
    }

    // new players start with a zero score; adding an existing player is a no-op
    pub fn add_player(&mut self, name: &str) -> bool {
        if self.players.contains_key(name) {
            return false;
        }
        self.players.insert(name.to_string(), 0);
        true
    }
    pub fn players(&self) -> impl Iterator<Item=(&str, u32)> {
        self.players.iter().map(|(name, &score)| (name.as_str(), score))
    }

    // appends a fully determined solution to the library and returns the
    // name of the new entry
    pub fn add_puzzle(&mut self, author: &str, solution: &Grid) -> Result<String, Error> {
        if solution.contains(SquareStatus::Unknown) {
            return Err(Error::Logic(
                "cannot archive a puzzle whose solution has unknown squares".to_string()));
        }
        let entry = LibraryEntry {
            author: author.to_string(),
            width:  solution.width(),
            height: solution.height(),
            rows:   solution.render().lines().map(String::from).collect(),
        };
        self.library.push(entry);
        Ok(entry_name(self.library.len() - 1))
    }
    pub fn entries(&self) -> &[LibraryEntry] {
        &self.library
    }
}
