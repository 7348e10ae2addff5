extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod compiler;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use compiler::{CompileError, Listing};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tInteractive: {}\n\tOutfile: {}\n\tInfile: {}",
        match args.occurrences_of("verbose") {
            0 => log::LevelFilter::Error.to_string(),
            1 => log::LevelFilter::Warn.to_string(),
            2 => log::LevelFilter::Info.to_string(),
            3 | _ => log::LevelFilter::Debug.to_string(),
        },
        args.is_present("interactive"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    if args.is_present("interactive") {
        interactive(args.is_present("print-debug"));
        return;
    }

    let ifile = match args.value_of("INPUT") {
        Some(name) => name,
        None => {
            error!("fatal: no input file given");
            std::process::exit(1);
        },
    };
    let ipath = Path::new(ifile);

    let mut source = String::new();
    let read = File::open(&ipath).and_then(|mut file| file.read_to_string(&mut source));
    if let Err(err) = read {
        error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
        std::process::exit(1);
    }

    let listing = match build(&source, args.is_present("print-debug")) {
        Ok(listing) => listing,
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        },
    };
    info!("compiled `{}` into {} lines", ipath.display(), listing.lines().count());

    match args.value_of("output") {
        Some(filename) => {
            let opath = Path::new(filename);
            let written = File::create(&opath).and_then(|mut file| writeln!(file, "{}", listing));
            if let Err(err) = written {
                error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
                std::process::exit(1);
            }
        },
        None => println!("{}", listing),
    }
}

/// Reads source one line at a time and recompiles everything typed so far.
/// A failed compile is logged and the previous listing stays current.
fn interactive(show_debug: bool) {
    let stdin = io::stdin();
    let mut source = String::new();
    let mut current = String::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                error!("fatal: unable to read from stdin: {}", err);
                std::process::exit(1);
            },
        };

        if line.trim() == ":clear" {
            source.clear();
            current.clear();
            info!("source cleared");
            continue;
        }

        source.push_str(&line);
        source.push('\n');

        match build(&source, show_debug) {
            Ok(listing) => {
                current = listing;
                println!("{}\n", current);
            },
            Err(err) => {
                error!("{}", err);
                debug!("keeping previous listing:\n{}", current);
            },
        }
    }
}

/// Compiles to listing text, printing the decoded grid first when asked.
fn build(source: &str, show_debug: bool) -> Result<String, CompileError> {
    if !show_debug {
        return compiler::compile(source);
    }

    let listing = compiler::compile_listing(source)?;
    print_debug(&listing);
    Ok(listing.to_string())
}

fn print_debug(listing: &Listing) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for line in listing.lines.iter() {
        grid.add(Cell::from(format!("0x{:02X}:", line.address)));
        grid.add(Cell::from(format!("0x{:04X}", line.word)));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(match line.instruction {
            Some(ins) => ins.to_string(),
            None => format!("DATA {}", compiler::instruction::decode_word(line.word)),
        }));
    }
    println!("{}", grid.fit_into_columns(4));

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (name, address) in listing.symbols.iter() {
        grid.add(Cell::from(name.clone()));
        grid.add(Cell::from(format!("0x{:02X}", address)));
    }
    println!("{}", grid.fit_into_columns(2));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required_unless("interactive")
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the listing to an outfile instead of STDOUT"))
        .arg(Arg::with_name("interactive")
            .short("i")
            .takes_value(false)
            .help("read source from STDIN, recompiling after every line"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the decoded listing and symbol table to STDOUT"))
        .get_matches()
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(match verbosity {
            0 => log::LevelFilter::Error,
            1 => log::LevelFilter::Warn,
            2 => log::LevelFilter::Info,
            3 | _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stdout())
        .apply().ok();
}
