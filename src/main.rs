//! Axis Constraints CLI
//!
//! Usage:
//!   axis-constraints [OPTIONS] [FILE]
//!
//! Options:
//!   -a, --axes  Print per-axis detail in addition to the groups
//!   -h, --help  Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use axis_constraints::resolve_str;

#[derive(Parser)]
#[command(name = "axis-constraints")]
#[command(about = "Resolve scale-constraint groups for a chart layout")]
struct Cli {
    /// Layout file in TOML form (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Print per-axis detail in addition to the groups
    #[arg(short, long)]
    axes: bool,
}

fn main() {
    let cli = Cli::parse();

    // If no input file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match resolve_str(&source) {
        Ok(resolved) => {
            for warning in &resolved.warnings {
                eprintln!("warning: {}", warning);
            }
            if cli.axes {
                for axis in &resolved.axes {
                    match &axis.scale_constraint {
                        Some(constraint) => println!(
                            "{}: type={} scale_with={} scale_ratio={}",
                            axis.id, axis.axis_type, constraint.scale_with, constraint.scale_ratio
                        ),
                        None => println!("{}: type={}", axis.id, axis.axis_type),
                    }
                }
            }
            if resolved.groups.is_empty() {
                println!("no scale groups");
            }
            for (i, group) in resolved.groups.iter().enumerate() {
                println!("group {}: {}", i + 1, group);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Axis Constraints - scale-constraint groups for chart layouts

USAGE:
    axis-constraints [OPTIONS] [FILE]
    cat layout.toml | axis-constraints

OPTIONS:
    -a, --axes    Print per-axis detail in addition to the groups
    -h, --help    Print help

LAYOUT FORMAT (TOML):
    [[axes]]
    id = "x"                # 'x', 'y', or numbered: 'x2', 'y3', ...
    type = "linear"         # linear (default) | log | date | category

    [[axes]]
    id = "y"
    scale_with = "x"        # counter axis to scale with
    scale_ratio = 2.0       # data units of y per data unit of x

Axes are processed in declaration order. Requests that would create a
loop, cross axis types, or name an unknown axis are dropped with a
warning on stderr; the resulting groups are printed one per line."#
    );
}
