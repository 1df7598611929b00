//! nnplot CLI entry point.
//!
//! Reads a JSON network description and prints the computed layout as JSON,
//! ready for a drawing backend.

use std::fs;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nnplot::description::NetworkDescription;
use nnplot::layout::full_layout_with_config;

/// Neural network description to diagram layout (JSON).
#[derive(Parser, Debug)]
#[command(
    name = "nnplot",
    version = env!("NNPLOT_VERSION"),
    about = "Neural network description to diagram layout (JSON)"
)]
struct Cli {
    /// Input description file (reads from stdin if not provided)
    input: Option<String>,

    /// Collapse layers with more neurons than this
    #[arg(long = "max-per-layer")]
    max_per_layer: Option<usize>,

    /// Number neurons and read labels top-to-bottom
    #[arg(short = 'r', long = "reversed")]
    numbering_reversed: bool,

    /// Scale applied to the distance between columns
    #[arg(short = 's', long = "spacing")]
    spacing_multiplier: Option<f64>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(short = 'c', long = "compact")]
    compact: bool,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Read input from file or stdin
    let text = if let Some(ref path) = cli.input {
        match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let mut description = match NetworkDescription::from_json(&text) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };
    if let Some(max) = cli.max_per_layer {
        description.config.collapse.max_per_layer = max;
    }
    if cli.numbering_reversed {
        description.config.numbering_reversed = true;
    }
    if let Some(multiplier) = cli.spacing_multiplier {
        description.config.spacing_multiplier = multiplier;
    }

    let layout = description
        .build_graph()
        .and_then(|graph| Ok(full_layout_with_config(&graph, &description.config)?));
    let layout = match layout {
        Ok(l) => l,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let rendered = if cli.compact {
        serde_json::to_string(&layout)
    } else {
        serde_json::to_string_pretty(&layout)
    };
    let mut rendered = match rendered {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot serialise layout: {}", e);
            process::exit(1);
        }
    };
    rendered.push('\n');

    // Write output to file or stdout
    if let Some(ref path) = cli.output {
        if let Err(e) = fs::write(path, rendered) {
            eprintln!("error: cannot write '{}': {}", path, e);
            process::exit(1);
        }
    } else {
        print!("{}", rendered);
        if let Err(e) = io::stdout().flush() {
            eprintln!("error: cannot flush stdout: {}", e);
            process::exit(1);
        }
    }
}
