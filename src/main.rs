#[macro_use] extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate ciasm;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use ciasm::frontend::{self, LabelMap};

use std::fs;
use std::path::Path;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    let ifile = match args.value_of("INPUT") {
        Some(ifile) => ifile,
        None => {
            error!("fatal: no input file given");
            std::process::exit(1);
        }
    };
    let ipath = Path::new(ifile);

    debug!("Arguments:\n\tVerbosity: {}\n\tShow: {}\n\tInfile: {}",
        args.occurrences_of("verbose"),
        args.is_present("print-debug"),
        ipath.display()
    );

    let source = match fs::read_to_string(&ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(source) => source,
    };

    let mut labels = LabelMap::new();
    let outcome = frontend::parse(&source, &mut labels);
    info!("parsed {} command(s) from `{}`", outcome.commands.len(), ipath.display());

    if args.is_present("print-debug") {
        let mut grid = Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        });

        for (idx, cmd) in outcome.commands.iter().enumerate() {
            grid.add(Cell::from(format!("0x{:04X}:", idx)));
            grid.add(Cell::from(format!("line {}:", cmd.line)));
            grid.add(Cell::from(format!("{}", cmd)));
        }

        println!("{}", grid.fit_into_columns(3));
    }

    if !outcome.diagnostics.is_empty() {
        error!("Stopped due to {} parsing error(s).", outcome.diagnostics.len());
        std::process::exit(1);
    }
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("show")
            .takes_value(false)
            .help("prints the parsed commands to STDOUT"))
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
            _ => log::LevelFilter::Debug,
        })
        .chain(std::io::stderr())
        .apply().ok();
}
