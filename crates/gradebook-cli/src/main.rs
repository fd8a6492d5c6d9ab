//! gradebook CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "gradebook", version, about = "Console student records manager")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backing data file (overrides the config)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format: table, classic, json
    #[arg(long, global = true)]
    format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new student enrolled in one course
    Add {
        /// Student ID
        #[arg(long)]
        id: String,

        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Course code
        #[arg(long)]
        course: String,

        /// Mark (0-100)
        #[arg(long, allow_hyphen_values = true)]
        mark: String,
    },

    /// Set a student's mark in a course, enrolling them if needed
    Edit {
        /// Student ID
        #[arg(long)]
        id: String,

        /// Course code
        #[arg(long)]
        course: String,

        /// New mark (0-100)
        #[arg(long, allow_hyphen_values = true)]
        mark: String,
    },

    /// Delete a student and all of their courses
    Delete {
        /// Student ID
        #[arg(long)]
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Print a student's course rows
    Show {
        /// Student ID
        #[arg(long)]
        id: String,
    },

    /// Print a report
    Report {
        #[command(subcommand)]
        kind: commands::report::ReportKind,
    },

    /// Interactive menu
    Menu,

    /// Create starter config and sample data file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradebook=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let open = || {
        commands::Session::open(cli.config.as_deref(), cli.data.clone(), cli.format.as_deref())
    };

    match cli.command {
        Commands::Add {
            id,
            first_name,
            last_name,
            course,
            mark,
        } => commands::records::add(&mut open()?, &id, &first_name, &last_name, &course, &mark),
        Commands::Edit { id, course, mark } => {
            commands::records::edit(&mut open()?, &id, &course, &mark)
        }
        Commands::Delete { id, yes } => commands::records::delete(&mut open()?, &id, yes),
        Commands::Show { id } => commands::records::show(&open()?, &id),
        Commands::Report { kind } => commands::report::execute(&open()?, kind),
        Commands::Menu => commands::menu::execute(open()?),
        Commands::Init => commands::init::execute(),
    }
}
