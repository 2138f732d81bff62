//! fig CLI
//!
//! Usage:
//!   fig [OPTIONS] [FILE]
//!
//! Options:
//!   -n, --names <FILE>  Name table mapping namespaced tags to components (TOML)
//!   -d, --debug         Log composed markup and resolution misses
//!   -h, --help          Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use fig_html::host::value_to_markup;
use fig_html::{Fig, FigConfig, NameTable, Template, TreeHost};

#[derive(Parser)]
#[command(name = "fig")]
#[command(about = "Render markup through the fig template pipeline")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Name table file mapping namespaced tags to components (TOML format)
    #[arg(short, long)]
    names: Option<PathBuf>,

    /// Debug mode: log composed markup and resolution misses
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.debug);

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let names = match &cli.names {
        Some(path) => match NameTable::from_file(path) {
            Ok(names) => names,
            Err(e) => {
                eprintln!("Error loading name table '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => NameTable::new(),
    };

    let (source, source_name) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let html = Fig::new(TreeHost)
        .with_config(FigConfig::new().with_source_name(source_name))
        .dict(Some(names));

    match html.render(Template::literal(source)) {
        Ok(values) => {
            for value in &values {
                let markup = value_to_markup(value);
                if !markup.trim().is_empty() {
                    println!("{}", markup);
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn print_intro() {
    println!(
        r#"fig - render markup through the fig template pipeline

USAGE:
    fig [OPTIONS] [FILE]
    echo '<code>' | fig

OPTIONS:
    -n, --names    Name table (TOML) mapping namespaced tags to components
    -d, --debug    Log composed markup and resolution misses
    -h, --help     Print help

NAME TABLES:
    [ui]
    button = "Button"

    With this table, <ui:button> renders as the Button component;
    namespaced tags missing from the table stay plain elements.

QUICK START:
    echo '<p>hello <ui:button>ok</ui:button></p>' | fig -n names.toml"#
    );
}
