extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use hackc::assembler;
use hackc::translator::{self, code_writer::CodeWriter};

use std::fs;
use std::path::{Path, PathBuf};

/// Settings gathered from the command line.
struct Options {
    input: PathBuf,
    output: Option<PathBuf>,
    assemble: bool,
    print_debug: bool,
}

impl Options {
    fn from_args(args: &ArgMatches) -> Self {
        Options {
            // INPUT is required, clap refuses to get here without it.
            input: PathBuf::from(args.value_of("INPUT").unwrap_or_default()),
            output: args.value_of("output").map(PathBuf::from),
            assemble: args.is_present("assemble"),
            print_debug: args.is_present("print-debug"),
        }
    }
}

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));
    let opts = Options::from_args(&args);

    debug!("Arguments:\n\tVerbosity: {}\n\tAssemble: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        opts.assemble,
        opts.output.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "None".to_string()),
        opts.input.display()
    );

    if opts.input.is_dir() {
        if opts.output.is_some() {
            warn!("ignoring -o: output names are derived from each input file");
        }
        for vm_path in vm_files(&opts.input) {
            translate_file(&vm_path, &vm_path.with_extension("asm"), &opts);
        }
    } else if opts.input.extension().map_or(false, |ext| ext == "vm") {
        let opath = opts.output.clone().unwrap_or_else(|| opts.input.with_extension("asm"));
        translate_file(&opts.input, &opath, &opts);
    } else {
        let opath = opts.output.clone().unwrap_or_else(|| opts.input.with_extension("hack"));
        assemble_file(&opts.input, &opath, &opts);
    }
}

/// Lists the `.vm` files directly inside `dir`, sorted by name.
fn vm_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Err(err) => fatal(format!("unable to read directory `{}`: {}", dir.display(), err)),
        Ok(entries) => entries,
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().map_or(false, |ext| ext == "vm"))
        .collect();
    files.sort();

    if files.is_empty() {
        warn!("no .vm files found in `{}`", dir.display());
    }
    files
}

fn translate_file(ipath: &Path, opath: &Path, opts: &Options) {
    let source = read_source(ipath);

    let commands = match translator::parser::parse(&source) {
        Err(err) => fatal(format!("{}: {}", ipath.display(), err)),
        Ok(commands) => commands,
    };

    let mut grid = listing_grid();
    let mut writer = CodeWriter::new();
    for command in &commands {
        grid.add(Cell::from(format!("0x{:04X}:", writer.next_address())));
        grid.add(Cell::from(format!("{}", command)));
        if let Err(err) = writer.write(command) {
            fatal(format!("{}: {}", ipath.display(), err));
        }
    }

    if opts.print_debug {
        println!("{}", ipath.display());
        println!("{}", grid.fit_into_columns(2));
    }

    let asm = writer.finish();
    write_output(opath, &asm);

    if opts.assemble {
        assemble_source(opath, &asm, &opath.with_extension("hack"), opts);
    }
}

fn assemble_file(ipath: &Path, opath: &Path, opts: &Options) {
    let source = read_source(ipath);
    assemble_source(ipath, &source, opath, opts);
}

fn assemble_source(ipath: &Path, source: &str, opath: &Path, opts: &Options) {
    let commands = match assembler::parse(source) {
        Err(err) => fatal(format!("{}: {}", ipath.display(), err)),
        Ok(commands) => commands,
    };

    let words = match assembler::codegen::Assembler::new().run(&commands) {
        Err(err) => fatal(format!("{}: {}", ipath.display(), err)),
        Ok(words) => words,
    };

    if opts.print_debug {
        let mut grid = listing_grid();
        let mut words_iter = words.iter().enumerate();

        for command in commands.iter() {
            if !command.is_instruction() {
                grid.add(Cell::from(String::new()));
                grid.add(Cell::from(format!("{}", command)));
                grid.add(Cell::from(String::new()));
                grid.add(Cell::from(String::new()));
                continue;
            }
            if let Some((idx, word)) = words_iter.next() {
                grid.add(Cell::from(format!("0x{:04X}:", idx)));
                grid.add(Cell::from(format!("{}", command)));
                grid.add(Cell::from("=>".to_string()));
                grid.add(Cell::from(format!("{:016b}", word)));
            }
        }

        println!("{}", ipath.display());
        println!("{}", grid.fit_into_columns(4));
    }

    write_output(opath, &assembler::to_hack(&words));
}

fn listing_grid() -> Grid {
    Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    })
}

fn read_source(ipath: &Path) -> String {
    match fs::read_to_string(ipath) {
        Err(err) => fatal(format!("unable to open input file `{}`: {}", ipath.display(), err)),
        Ok(source) => source,
    }
}

/// Writes the complete output in one go; nothing is written for a file
/// that failed to translate or assemble.
fn write_output(opath: &Path, contents: &str) {
    if let Err(err) = fs::write(opath, contents) {
        fatal(format!("unable to write to output file `{}`: {}", opath.display(), err));
    }
    info!("wrote {}", opath.display());
}

fn fatal(message: String) -> ! {
    error!("fatal: {}", message);
    std::process::exit(1);
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("An .asm file to assemble, a .vm file to translate, or a directory of .vm files")
            .required(true)
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
            .help("write output to an outfile (single-file inputs only)"))
        .arg(Arg::with_name("assemble")
            .short("a")
            .takes_value(false)
            .help("also assemble translated VM code into .hack files"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints an address listing alongside the output to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
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
        .level(verbosity_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
