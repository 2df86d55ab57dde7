use clap::{Parser, Subcommand};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use log::info;
use std::io::{self, stdin, stdout, Write};
use std::path::{Path, PathBuf};
use std::process;
use translit_core::config::{DriverConfig, FileConfig};
use translit_core::core::types::{OutputLayout, Scheme, UnconvertiblePolicy};
use translit_core::persistence::{open_input, write_atomically, write_buffered};
use translit_core::{BatchEngine, Result, Transliterator};

#[derive(Parser)]
#[command(name = "translit", about = "Convert phonetic Hindi (WX / SLP) to Devanagari")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a dataset file of `<id> <token>` lines
    Convert {
        /// Input file (defaults to datasets/<scheme>.txt)
        input: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        scheme: Option<Scheme>,
        /// Write here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        layout: Option<OutputLayout>,
        #[arg(long, value_enum)]
        on_unconvertible: Option<UnconvertiblePolicy>,
        /// Skip lines with unknown symbols instead of failing
        #[arg(long)]
        lenient: bool,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Convert tokens given on the command line
    Word {
        #[arg(short, long, value_enum, default_value_t = Scheme::Wx)]
        scheme: Scheme,
        #[arg(required = true)]
        tokens: Vec<String>,
    },

    /// Convert Devanagari back into scheme symbols
    Reverse {
        #[arg(short, long, value_enum, default_value_t = Scheme::Wx)]
        scheme: Scheme,
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Print the symbol table
    Table {
        #[arg(short, long, value_enum, default_value_t = Scheme::Wx)]
        scheme: Scheme,
        #[arg(long)]
        json: bool,
    },

    /// Type tokens and see them converted. 'exit' to quit.
    Repl {
        #[arg(short, long, value_enum, default_value_t = Scheme::Wx)]
        scheme: Scheme,
    },
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli.command) {
        eprintln!("[ERROR] {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Convert { input, scheme, output, layout, on_unconvertible, lenient, config } => {
            let file = match &config {
                Some(path) => FileConfig::load(path)?,
                None => FileConfig::default(),
            };
            let mut driver = DriverConfig::resolve(&file, scheme);
            if let Some(layout) = layout {
                driver.layout = layout;
            }
            if let Some(policy) = on_unconvertible {
                driver.on_unconvertible = policy;
            }
            driver.lenient |= lenient;

            let input = input.unwrap_or_else(|| PathBuf::from(driver.scheme.default_input()));
            convert_file(BatchEngine::new(driver), &input, output.as_deref())
        }
        Command::Word { scheme, tokens } => {
            let transliterator = Transliterator::new(scheme);
            for token in tokens {
                println!("{}\t{}", token, transliterator.transliterate(&token)?);
            }
            Ok(())
        }
        Command::Reverse { scheme, words } => {
            let transliterator = Transliterator::new(scheme);
            for word in words {
                println!("{}\t{}", word, transliterator.to_latin(&word)?);
            }
            Ok(())
        }
        Command::Table { scheme, json } => {
            let entries = scheme.table().entries();
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    println!("{}\t{}\t{:?}", entry.latin, entry.devanagari, entry.class);
                }
            }
            Ok(())
        }
        Command::Repl { scheme } => repl(scheme),
    }
}

fn convert_file(engine: BatchEngine, input: &Path, output: Option<&Path>) -> Result<()> {
    info!("reading {}", input.display());
    let reader = open_input(input)?;
    match output {
        Some(path) => {
            write_atomically(path, |w| engine.run(reader, w))?;
            info!("wrote {}", path.display());
        }
        None => {
            let stdout = stdout();
            let mut lock = stdout.lock();
            write_buffered(&mut lock, |w| engine.run(reader, w))?;
        }
    }
    Ok(())
}

fn repl(scheme: Scheme) -> Result<()> {
    let transliterator = Transliterator::new(scheme);
    let mut history: Vec<(String, String)> = Vec::new();

    loop {
        print_ui(scheme, &history)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            "" => continue,
            token => {
                let shown = match transliterator.transliterate(token) {
                    Ok(converted) => converted,
                    Err(e) => format!("{}", e.to_string().red()),
                };
                history.push((token.to_string(), shown));
            }
        }
    }
    Ok(())
}

fn print_ui(scheme: Scheme, history: &[(String, String)]) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    writeln!(out, "{}", format!("Devanagari transliteration ({scheme})").bold())?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(out, "Type a token and press [Enter]. 'exit' to quit.\n")?;

    for (token, converted) in history.iter().rev().take(10).rev() {
        writeln!(out, "  {} -> {}", token.as_str().cyan(), converted.as_str().green())?;
    }
    write!(out, "\n> ")?;
    out.flush()
}
