// vim: set ai et ts=4 sts=4 sw=4:
mod util;
mod grid;
mod row;
mod puzzle;
mod archive;

use std::fs;
use std::io;
use std::path::Path;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use yaml_rust::YamlLoader;

use self::archive::Archive;
use self::grid::{Grid, Error};
use self::puzzle::{Puzzle, is_valid_puzzle};
use self::util::is_a_tty;

fn build_cli() -> App<'static, 'static> {
    App::new("picross")
        .version(env!("CARGO_PKG_VERSION"))
        .about("nonogram solver and puzzle archive")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .global(true)
            .help("increase logging verbosity (-v, -vv, -vvv)"))
        .subcommand(SubCommand::with_name("puzzle")
            .about("puzzle-related functionality")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .subcommand(SubCommand::with_name("solve")
                .about("solves a puzzle given its constraints")
                .arg(Arg::with_name("ROWS")
                    .required(true)
                    .help("row constraints (use ; to separate rows and , to separate values)"))
                .arg(Arg::with_name("COLS")
                    .required(true)
                    .help("column constraints (use ; to separate columns and , to separate values)"))
                .arg(Arg::with_name("plain")
                    .long("plain")
                    .help("print the ?/./x text form instead of the pretty board")))
            .subcommand(SubCommand::with_name("solve-from-file")
                .about("solves a puzzle given a YAML file with rows: and cols: entries")
                .arg(Arg::with_name("FILE")
                    .required(true)
                    .help("file containing the constraints"))
                .arg(Arg::with_name("plain")
                    .long("plain")
                    .help("print the ?/./x text form instead of the pretty board")))
            .subcommand(SubCommand::with_name("constraints")
                .about("derives constraints from a solution image")
                .arg(Arg::with_name("FILE")
                    .required(true)
                    .help("file containing the image ('.' is empty, anything else is filled)"))))
        .subcommand(SubCommand::with_name("archive")
            .about("archive-related functionality")
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .subcommand(SubCommand::with_name("create")
                .about("creates an empty archive")
                .arg(Arg::with_name("FILE")
                    .required(true)
                    .help("archive file"))
                .arg(Arg::with_name("force")
                    .short("f")
                    .long("force")
                    .help("overwrite an existing archive")))
            .subcommand(SubCommand::with_name("show")
                .about("shows the contents of an archive")
                .arg(Arg::with_name("FILE")
                    .required(true)
                    .help("archive file"))
                .arg(Arg::with_name("show-solution")
                    .long("show-solution")
                    .help("also print each puzzle's solution")))
            .subcommand(SubCommand::with_name("add-player")
                .about("adds a player to an archive")
                .arg(Arg::with_name("ARCHIVE").required(true).help("archive file"))
                .arg(Arg::with_name("NAME").required(true).help("player name")))
            .subcommand(SubCommand::with_name("add-from-solution")
                .about("adds a puzzle to an archive, specified by its solution image")
                .arg(Arg::with_name("ARCHIVE").required(true).help("archive file"))
                .arg(Arg::with_name("AUTHOR").required(true).help("puzzle author"))
                .arg(Arg::with_name("FILE").required(true).help("file containing the solution"))
                .arg(Arg::with_name("no-verify")
                    .long("no-verify")
                    .help("do not check puzzle validity")))
            .subcommand(SubCommand::with_name("add-from-constraints")
                .about("adds a puzzle to an archive, specified by its constraints")
                .arg(Arg::with_name("ARCHIVE").required(true).help("archive file"))
                .arg(Arg::with_name("AUTHOR").required(true).help("puzzle author"))
                .arg(Arg::with_name("ROWS")
                    .required(true)
                    .help("row constraints (use ; to separate rows and , to separate values)"))
                .arg(Arg::with_name("COLS")
                    .required(true)
                    .help("column constraints (use ; to separate columns and , to separate values)"))))
}

fn setup_logging(verbosity: u64) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5}] {}", record.level(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
    if let Err(err) = result {
        eprintln!("failed to initialize logging: {}", err);
    }
}

fn print_solved(puzzle: &Puzzle, plain: bool) {
    if plain || !is_a_tty(io::stdout()) {
        println!("{}", puzzle.grid.borrow().render());
    } else {
        print!("{}", puzzle.render_board(true));
    }
}

fn add_puzzle_to_archive(path: &Path, author: &str, solution: &Grid, verify: bool)
    -> Result<(), Error>
{
    if verify {
        log::info!("verifying puzzle (this can take a couple of seconds)");
        if !is_valid_puzzle(solution)? {
            return Err(Error::Logic(
                format!("{}\n\nis not a valid puzzle", solution.render())));
        }
        log::info!("puzzle deemed valid");
    }
    let mut archive = Archive::load(path)?;
    let name = archive.add_puzzle(author, solution)?;
    archive.save(path)?;
    println!("Added {} to {}", name, path.display());
    Ok(())
}

fn run_puzzle(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("solve", Some(m)) => {
            let rows = puzzle::parse_constraint_line_text(m.value_of("ROWS").unwrap())?;
            let cols = puzzle::parse_constraint_line_text(m.value_of("COLS").unwrap())?;
            let mut puzzle = Puzzle::from_constraints(&cols, &rows)?;
            puzzle.solve()?;
            print_solved(&puzzle, m.is_present("plain"));
            Ok(())
        }
        ("solve-from-file", Some(m)) => {
            let path = m.value_of("FILE").unwrap();
            let text = fs::read_to_string(path)?;
            let docs = YamlLoader::load_from_str(&text).map_err(|err|
                Error::MalformedConstraintInput(format!("{}: {}", path, err)))?;
            let doc = docs.get(0).ok_or_else(||
                Error::MalformedConstraintInput(format!("{}: empty puzzle file", path)))?;
            let mut puzzle = Puzzle::from_yaml(doc)?;
            puzzle.solve()?;
            print_solved(&puzzle, m.is_present("plain"));
            Ok(())
        }
        ("constraints", Some(m)) => {
            let path = m.value_of("FILE").unwrap();
            let grid = Grid::from_image_text(&fs::read_to_string(path)?)?;
            let (col_constraints, row_constraints) = grid.derive_constraints()?;
            println!("{}", puzzle::constraint_line_text(&col_constraints));
            println!("{}", puzzle::constraint_line_text(&row_constraints));
            Ok(())
        }
        _ => unreachable!(),
    }
}

fn run_archive(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("create", Some(m)) => {
            let path = m.value_of("FILE").unwrap();
            Archive::create(Path::new(path), m.is_present("force"))?;
            println!("Created {}", path);
            Ok(())
        }
        ("show", Some(m)) => {
            let archive = Archive::load(Path::new(m.value_of("FILE").unwrap()))?;
            for (name, _score) in archive.players() {
                println!("Player {}", name);
            }
            for entry in archive.entries() {
                println!("Puzzle ({}x{}) by {}", entry.width, entry.height, entry.author);
                if m.is_present("show-solution") {
                    println!("{}\n", entry.solution_text());
                }
            }
            Ok(())
        }
        ("add-player", Some(m)) => {
            let path = Path::new(m.value_of("ARCHIVE").unwrap());
            let name = m.value_of("NAME").unwrap();
            let mut archive = Archive::load(path)?;
            if archive.add_player(name) {
                archive.save(path)?;
                println!("Added player {}", name);
            } else {
                log::warn!("player {} already exists", name);
            }
            Ok(())
        }
        ("add-from-solution", Some(m)) => {
            let solution = Grid::from_image_text(
                &fs::read_to_string(m.value_of("FILE").unwrap())?)?;
            add_puzzle_to_archive(Path::new(m.value_of("ARCHIVE").unwrap()),
                                  m.value_of("AUTHOR").unwrap(),
                                  &solution,
                                  !m.is_present("no-verify"))
        }
        ("add-from-constraints", Some(m)) => {
            let rows = puzzle::parse_constraint_line_text(m.value_of("ROWS").unwrap())?;
            let cols = puzzle::parse_constraint_line_text(m.value_of("COLS").unwrap())?;
            let mut puzzle = Puzzle::from_constraints(&cols, &rows)?;
            puzzle.solve()?;
            if !puzzle.is_solved() {
                return Err(Error::Logic(
                    "the given constraints do not determine the puzzle; refusing to archive it".to_string()));
            }
            let solution = puzzle.grid.borrow().clone();
            add_puzzle_to_archive(Path::new(m.value_of("ARCHIVE").unwrap()),
                                  m.value_of("AUTHOR").unwrap(),
                                  &solution,
                                  true)
        }
        _ => unreachable!(),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    match matches.subcommand() {
        ("puzzle", Some(m))  => run_puzzle(m),
        ("archive", Some(m)) => run_archive(m),
        _ => unreachable!(),
    }
}

fn main() {
    let matches = build_cli().get_matches();
    setup_logging(matches.occurrences_of("verbose"));
    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
