//! `gradebook` command-line front end.
//!
//! # Responsibility
//! - Parse user intents and dispatch them to the core `Gradebook`.
//! - Provide confirmation prompts and the rendered course table.
//!
//! # Invariants
//! - Every run opens the database, restores courses, runs one command, and
//!   exits; no state lives outside the database between runs.

mod config;
mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::CliConfig;
use gradebook_core::db::open_db;
use gradebook_core::{
    format_decimal, init_logging, CourseField, CourseId, CourseStorage, Gradebook, SqliteKeyValueStore,
    EXPORT_FILE_NAME,
};
use log::info;
use prompt::TerminalConfirmer;
use render::FrameRenderer;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Track courses, credits and grades")]
struct Cli {
    /// Directory holding the database and logs
    #[arg(long, env = "GRADEBOOK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, env = "GRADEBOOK_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a course
    Add {
        name: String,
        /// Credit weight, 0-60 (`,` or `.` decimals)
        #[arg(allow_hyphen_values = true)]
        credits: String,
        /// Grade, 0-10 (`,` or `.` decimals)
        #[arg(allow_hyphen_values = true)]
        grade: String,
    },

    /// Edit one field of a course
    Edit {
        id: CourseId,
        /// name, credits or grade
        field: CourseField,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Delete a course
    Delete { id: CourseId },

    /// Delete every course
    Clear,

    /// Show the course table
    List {
        /// Column to sort by; repeat a column to flip direction.
        /// Listing starts sorted by name, so a leading `--sort name` keeps it ascending.
        #[arg(long = "sort")]
        sort: Vec<CourseField>,
    },

    /// Show aggregate statistics only
    Stats,

    /// Write all courses as JSON
    Export {
        /// Output file or directory (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Replace all courses with a JSON file
    Import { path: PathBuf },

    /// Append example courses
    Demo,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::resolve(cli.data_dir, cli.log_level, cli.yes)?;
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!(
            "failed to create data directory `{}`",
            config.data_dir.display()
        )
    })?;

    let log_dir = config.log_dir();
    if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let conn = open_db(config.db_path())
        .with_context(|| format!("failed to open `{}`", config.db_path().display()))?;
    let mut gradebook = Gradebook::open(CourseStorage::new(SqliteKeyValueStore::new(&conn)));
    let renderer = FrameRenderer::default();
    gradebook.subscribe(renderer.clone());
    let mut confirmer = TerminalConfirmer::new(config.assume_yes);

    match cli.command {
        Commands::Add {
            name,
            credits,
            grade,
        } => {
            let id = gradebook.submit(&name, &credits, &grade)?;
            println!("Added course {id}");
            print!("{}", renderer.frame());
        }
        Commands::Edit { id, field, value } => {
            if gradebook.update(id, field, &value)? {
                print!("{}", renderer.frame());
            } else {
                eprintln!("No course with id {id}");
            }
        }
        Commands::Delete { id } => {
            if gradebook.delete(id)? {
                println!("Deleted course {id}");
            } else {
                eprintln!("No course with id {id}");
            }
            print!("{}", renderer.frame());
        }
        Commands::Clear => {
            if gradebook.clear(&mut confirmer)? {
                println!("All courses deleted");
            } else {
                println!("Cancelled");
            }
        }
        Commands::List { sort } => {
            let mut keys = sort.into_iter().peekable();
            // Each run starts from the default state; selecting it again is not a toggle.
            let initial = gradebook.sort_state().key;
            keys.next_if_eq(&initial);
            for key in keys {
                gradebook.select_sort(key)?;
            }
            gradebook.refresh()?;
            print!("{}", renderer.frame());
        }
        Commands::Stats => {
            let stats = gradebook.stats();
            println!(
                "Weighted average: {}",
                format_decimal(stats.weighted_average, 2)
            );
            println!(
                "Total credits: {}",
                format_decimal(Some(stats.total_credits), 1)
            );
            println!("Passed: {} / {}", stats.passed_count, stats.total_count);
        }
        Commands::Export { output } => {
            let document = gradebook.export()?;
            match output {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(EXPORT_FILE_NAME)
                    } else {
                        path
                    };
                    std::fs::write(&path, document)
                        .with_context(|| format!("failed to write `{}`", path.display()))?;
                    info!(
                        "event=courses_export module=cli status=ok count={}",
                        gradebook.records().len()
                    );
                    println!(
                        "Exported {} course(s) to {}",
                        gradebook.records().len(),
                        path.display()
                    );
                }
                None => println!("{document}"),
            }
        }
        Commands::Import { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read `{}`", path.display()))?;
            match gradebook.import(&text, &mut confirmer)? {
                Some(count) => {
                    println!("Imported {count} course(s)");
                    print!("{}", renderer.frame());
                }
                None => println!("Cancelled"),
            }
        }
        Commands::Demo => match gradebook.load_demo(&mut confirmer)? {
            Some(count) => {
                println!("Added {count} example course(s)");
                print!("{}", renderer.frame());
            }
            None => println!("Cancelled"),
        },
    }

    Ok(())
}
