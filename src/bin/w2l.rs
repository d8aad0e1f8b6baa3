//! w2l CLI - Convert wiki markup tables to LaTeX

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tracing::{debug, error, info};
#[cfg(feature = "cli")]
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(feature = "cli")]
use wikitex::{contains_wiki_table, wiki_to_latex_with_options, ConversionWarning, W2LOptions};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "w2l")]
#[command(version)]
#[command(about = "w2l - Convert wiki markup tables into LaTeX tabularx environments", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Width (percent of \textwidth) for tables that do not set one
    #[arg(short, long)]
    width: Option<u32>,

    /// Narrowest allowed table width in percent
    #[arg(long, default_value_t = 70)]
    min_width: u32,

    /// Render header cells without large text
    #[arg(long)]
    plain_headers: bool,

    /// Strict mode: exit with error on malformed table markup
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Embed warnings as LaTeX comments in the output
    #[arg(long)]
    embed_warnings: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert every .txt / .wiki file of a directory into <stem>.tex
    Batch {
        /// Input directory or single file
        input: String,

        /// Output directory
        #[arg(short, long, default_value = "latex")]
        output_dir: String,
    },

    /// Replay a JSON array of table events and print the table
    #[cfg(feature = "json")]
    Events {
        /// Input file (reads from stdin if not provided)
        input: Option<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn options_from_cli(cli: &Cli) -> W2LOptions {
    W2LOptions {
        min_width_percent: cli.min_width,
        default_width: cli.width,
        strict: cli.strict,
        header_large_text: !cli.plain_headers,
        ..Default::default()
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    let options = options_from_cli(&cli);

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd, &options);
    }

    let input = read_input(cli.input_file.as_deref())?;
    debug!(bytes = input.len(), "input read");

    let output = match wiki_to_latex_with_options(&input, &options) {
        Ok(output) => output,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.quiet && output.has_warnings() {
        print_warnings_to_stderr(&output.warnings);
    }

    let result = if cli.embed_warnings && output.has_warnings() {
        embed_warnings_as_comments(&output.content, &output.warnings)
    } else {
        output.content
    };

    match cli.output {
        Some(path) => {
            let mut file = fs::File::create(&path)?;
            write!(file, "{}", result)?;
            info!("output written to {}", path);
            if output.warnings.is_empty() {
                eprintln!("✓ Output written to: {}", path);
            } else {
                eprintln!(
                    "⚠ Output written to: {} ({} warning(s))",
                    path,
                    output.warnings.len()
                );
            }
        }
        None => {
            print!("{}", result);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands, options: &W2LOptions) -> io::Result<()> {
    match cmd {
        Commands::Batch { input, output_dir } => {
            fs::create_dir_all(&output_dir)?;

            let input_path = Path::new(&input);
            let mut files: Vec<PathBuf> = if input_path.is_dir() {
                fs::read_dir(input_path)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|path| {
                        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
                        ext == "txt" || ext == "wiki"
                    })
                    .collect()
            } else {
                vec![input_path.to_path_buf()]
            };
            files.sort();

            let mut success_count = 0;
            let mut error_count = 0;

            for file_path in files {
                let stem = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let output_path = Path::new(&output_dir).join(format!("{}.tex", stem));
                info!("converting {} to {}", file_path.display(), output_path.display());

                let content = match fs::read_to_string(&file_path) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("✗ {} - read error: {}", file_path.display(), e);
                        error_count += 1;
                        continue;
                    }
                };

                let has_tables = contains_wiki_table(&content);
                if !has_tables {
                    debug!("{} has no wiki tables", file_path.display());
                }

                let converted = match wiki_to_latex_with_options(&content, options) {
                    Ok(converted) => converted,
                    Err(e) => {
                        eprintln!("✗ {} - {}", file_path.display(), e);
                        error_count += 1;
                        continue;
                    }
                };

                match fs::write(&output_path, &converted.content) {
                    Ok(_) if has_tables => {
                        eprintln!("✓ {}", output_path.display());
                        success_count += 1;
                    }
                    Ok(_) => {
                        eprintln!("✓ {} (no tables, copied through)", output_path.display());
                        success_count += 1;
                    }
                    Err(e) => {
                        eprintln!("✗ {} - write error: {}", output_path.display(), e);
                        error_count += 1;
                    }
                }
            }

            eprintln!(
                "\nBatch conversion complete: {} succeeded, {} failed",
                success_count, error_count
            );

            if error_count > 0 {
                std::process::exit(1);
            }
        }

        #[cfg(feature = "json")]
        Commands::Events { input } => {
            let json = read_input(input.as_deref())?;
            match wikitex::build_table_from_json(&json) {
                Ok(latex) => print!("{}", latex),
                Err(e) => {
                    error!("{}", e);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Info => {
            println!("w2l - Convert wiki markup tables into LaTeX tabularx environments");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ MediaWiki table markup ({{| ... |}})");
            println!("  ✓ colspan → \\multicolumn with computed widths");
            println!("  ✓ border / center table styles, percentage widths");
            println!("  ✓ Batch directory processing");
            if cfg!(feature = "json") {
                println!("  ✓ JSON table event replay");
            }
            println!();
            println!("Required LaTeX packages: tabularx, array");
            println!();
        }
    }

    Ok(())
}

/// Print warnings to stderr
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning]) {
    eprintln!();
    eprintln!("Conversion Warnings ({}):", warnings.len());
    eprintln!();
    for warning in warnings {
        eprintln!("  {}", warning);
    }
    eprintln!();
}

/// Embed warnings as LaTeX comments at the end of the output
#[cfg(feature = "cli")]
fn embed_warnings_as_comments(output: &str, warnings: &[ConversionWarning]) -> String {
    let mut result = output.to_string();
    result.push_str("\n% Conversion Warnings\n");
    for warning in warnings {
        result.push_str(&format!("% {}\n", warning));
    }
    result
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install wikitex --features cli");
    eprintln!("  w2l [OPTIONS] [INPUT_FILE]");
}
