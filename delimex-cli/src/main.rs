mod rules;

use std::io::BufRead;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use delimex::{
    pattern_error, quote_class, regex_error, regex_to_pattern, replace_pairs_all, un_extended,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "delimex")]
#[command(about = "Delimex - turn raw regex text into safe delimited patterns")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap a raw regex in delimiters
    Quote {
        /// The raw regex
        regex: String,
        /// Modifiers to append after the closing delimiter
        #[arg(short, long, default_value = "")]
        modifiers: String,
    },
    /// Escape text for use inside a character class
    Class {
        /// The text to escape
        text: String,
        /// An extra delimiter character to escape
        #[arg(short, long)]
        delimiter: Option<char>,
    },
    /// Strip extended-mode whitespace and comments from a pattern
    Unextend {
        /// The delimited pattern
        pattern: String,
    },
    /// Check that a pattern compiles
    Check {
        /// The delimited pattern, or a raw regex with --raw
        pattern: String,
        /// Treat the input as a raw regex
        #[arg(short, long)]
        raw: bool,
        /// Modifiers for a raw regex
        #[arg(short, long, default_value = "", requires = "raw")]
        modifiers: String,
    },
    /// Apply the replacement rules in a TOML file
    Apply {
        /// The rule file
        #[arg(long)]
        rules: PathBuf,
        /// Subjects to transform; stdin lines are used when none are given
        subjects: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Quote { regex, modifiers } => cmd_quote(&regex, &modifiers),
        Commands::Class { text, delimiter } => cmd_class(&text, delimiter),
        Commands::Unextend { pattern } => cmd_unextend(&pattern),
        Commands::Check {
            pattern,
            raw,
            modifiers,
        } => cmd_check(&pattern, raw, &modifiers),
        Commands::Apply { rules, subjects } => cmd_apply(&rules, subjects),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn cmd_quote(regex: &str, modifiers: &str) {
    println!("{}", regex_to_pattern(regex, modifiers));
}

fn cmd_class(text: &str, delimiter: Option<char>) {
    println!("{}", quote_class(text, delimiter));
}

fn cmd_unextend(pattern: &str) {
    println!("{}", un_extended(pattern));
}

fn cmd_check(pattern: &str, raw: bool, modifiers: &str) {
    let (shown, error) = if raw {
        let literal = regex_to_pattern(pattern, modifiers);
        let error = if modifiers.is_empty() {
            regex_error(pattern)
        } else {
            pattern_error(&literal)
        };
        (literal, error)
    } else {
        (pattern.to_string(), pattern_error(pattern))
    };

    println!("  Pattern: {}", shown.cyan());
    match error {
        None => println!("{}", "✓ Valid".green().bold()),
        Some(message) => {
            println!("{} {}", "✗ Invalid:".red().bold(), message);
            std::process::exit(1);
        }
    }
}

fn cmd_apply(rules: &Path, subjects: Vec<String>) {
    let pairs = match rules::load_rules(rules) {
        Ok(pairs) => pairs,
        Err(e) => fail(e),
    };

    let subjects = if subjects.is_empty() {
        match std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
            Ok(lines) => lines,
            Err(e) => fail(e),
        }
    } else {
        subjects
    };

    match replace_pairs_all(&pairs, &subjects) {
        Ok(results) => {
            for result in results {
                println!("{}", result);
            }
        }
        Err(e) => fail(e),
    }
}
