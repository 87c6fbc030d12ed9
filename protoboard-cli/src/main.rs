//! Protoboard CLI - inspect and maintain persisted component libraries.

use clap::{Parser, Subcommand, ValueEnum};
use protoboard::{ComponentDefinition, ComponentLibrary};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "protoboard")]
#[command(about = "Component library tool for the protoboard layout model", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the definitions in a library file
    List {
        /// Path to a library JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Show one definition, including its footprint grid
    Show {
        /// Path to a library JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Definition name
        #[arg(value_name = "NAME")]
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Write the starter library to a file
    Init {
        /// Path to the library JSON file to create
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for tooling
    Json,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::List { file, format } => handle_list(&file, format),
        Commands::Show { file, name, format } => handle_show(&file, &name, format),
        Commands::Init { file, force } => handle_init(&file, force),
    };

    process::exit(exit_code);
}

fn load_library(file: &PathBuf) -> Result<ComponentLibrary, i32> {
    ComponentLibrary::load(file).map_err(|e| {
        eprintln!("Error: {}", e);
        2
    })
}

fn handle_list(file: &PathBuf, format: OutputFormat) -> i32 {
    let library = match load_library(file) {
        Ok(library) => library,
        Err(code) => return code,
    };

    match format {
        OutputFormat::Human => {
            println!("Library: {} ({} definitions)", file.display(), library.len());
            println!("{}", "─".repeat(60));
            for def in library.iter() {
                println!(
                    "  {:<12} {:>2}x{:<3} {:<4} pins: {:<3} body cells: {:<3} {}",
                    def.name,
                    def.width,
                    def.height,
                    def.kind.as_str(),
                    def.pin_labels.len(),
                    def.body_cells.len(),
                    def.default_color,
                );
            }
        }
        OutputFormat::Json => output_definitions_json(library.iter().map(Arc::as_ref)),
    }
    0
}

fn handle_show(file: &PathBuf, name: &str, format: OutputFormat) -> i32 {
    let library = match load_library(file) {
        Ok(library) => library,
        Err(code) => return code,
    };

    let Some(def) = library.get(name) else {
        eprintln!("Error: no definition named {:?} in {}", name, file.display());
        return 1;
    };

    match format {
        OutputFormat::Human => output_definition_human(&def),
        OutputFormat::Json => output_definitions_json(std::iter::once(def.as_ref())),
    }
    0
}

fn handle_init(file: &PathBuf, force: bool) -> i32 {
    if file.exists() && !force {
        eprintln!(
            "Error: {} already exists (use --force to overwrite)",
            file.display()
        );
        return 1;
    }

    match ComponentLibrary::with_defaults().save(file) {
        Ok(()) => {
            println!("Wrote starter library to {}", file.display());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    }
}

fn output_definition_human(def: &ComponentDefinition) {
    println!("{} ({}, {})", def.name, def.kind.as_str(), def.default_color);
    println!("{}", "─".repeat(60));
    println!("  Footprint {}x{}:", def.width, def.height);
    println!();

    // Pin label where one fits, ## for plain body, . for empty.
    for y in 0..def.height {
        print!("    ");
        for x in 0..def.width {
            if let Some(label) = def.pin_label(x, y) {
                print!("{:>2} ", truncate(label, 2));
            } else if def.is_body_cell(x, y) {
                print!("## ");
            } else {
                print!(" . ");
            }
        }
        println!();
    }

    let mut pins: Vec<(&(i32, i32), &String)> = def.pin_labels.iter().collect();
    pins.sort();
    if !pins.is_empty() {
        println!();
        println!("  Pins:");
        for ((x, y), label) in pins {
            println!("    ({}, {}): {}", x, y, label);
        }
    }
}

fn output_definitions_json<'a>(definitions: impl Iterator<Item = &'a ComponentDefinition>) {
    let definitions: Vec<&ComponentDefinition> = definitions.collect();
    let output = serde_json::json!({
        "count": definitions.len(),
        "definitions": definitions,
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
