// usertab CLI - headless editing of user-accessible tables
// Every mutating command is one edit session: open, mutate, save.

mod exit_codes;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};

use usertab_core::CellRef;
use usertab_frame::{Notice, Notifier, TableFrame};
use usertab_io::JsonStore;
use usertab_model::Table;

use exit_codes::{EXIT_ERROR, EXIT_INVALID, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "usertab")]
#[command(about = "Edit user-accessible table files (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a table file and list every field error
    Check { file: PathBuf },

    /// Print a table's columns and records
    Show { file: PathBuf },

    /// Set one field (1-based row and column) and save
    Set {
        file: PathBuf,
        row: usize,
        col: usize,
        value: String,
    },

    /// Append a row, optionally copying an existing one, and save
    Add {
        file: PathBuf,
        /// Copy field values from this row (1-based)
        #[arg(long, value_name = "ROW")]
        from: Option<usize>,
    },

    /// Remove a row (1-based) and save
    Rm { file: PathBuf, row: usize },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Check { file } => cmd_check(&file),
        Commands::Show { file } => cmd_show(&file),
        Commands::Set {
            file,
            row,
            col,
            value,
        } => cmd_set(&file, row, col, &value),
        Commands::Add { file, from } => cmd_add(&file, from),
        Commands::Rm { file, row } => cmd_rm(&file, row),
    };
    ExitCode::from(code)
}

/// Notices go to stderr; stdout stays parseable.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::TableSaved { name } => eprintln!("saved {}", name),
        }
    }
}

fn open_frame(file: &Path) -> Result<TableFrame, String> {
    let store = JsonStore::new(file);
    let table = store.open_table()?;
    Ok(TableFrame::new(
        Rc::new(RefCell::new(table)),
        Box::new(store),
        Box::new(StderrNotifier),
    ))
}

/// CLI rows/columns are 1-based; 0 is always out of range.
fn to_index(n: usize) -> Option<usize> {
    n.checked_sub(1)
}

/// One line per flagged field: position, column title, message.
fn field_errors(table: &Table) -> Vec<String> {
    let mut lines = Vec::new();
    for row in 0..table.row_count() {
        for (col, spec) in table.columns().iter().enumerate() {
            if let Some(message) = table.error(row, col) {
                lines.push(format!(
                    "{} {}: {}",
                    CellRef::new(row, col),
                    spec.title,
                    message
                ));
            }
        }
    }
    lines
}

fn cmd_check(file: &Path) -> u8 {
    let table = match JsonStore::new(file).open_table() {
        Ok(table) => table,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_IO;
        }
    };
    let errors = field_errors(&table);
    if errors.is_empty() {
        println!("{}: ok ({} rows)", table.name(), table.row_count());
        EXIT_SUCCESS
    } else {
        for line in &errors {
            println!("{}", line);
        }
        EXIT_INVALID
    }
}

fn cmd_show(file: &Path) -> u8 {
    let table = match JsonStore::new(file).open_table() {
        Ok(table) => table,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_IO;
        }
    };
    println!("# {}", table.name());
    let titles: Vec<&str> = table.columns().iter().map(|c| c.title.as_str()).collect();
    println!("{}", titles.join("\t"));
    for record in table.records() {
        println!("{}", record.join("\t"));
    }
    EXIT_SUCCESS
}

fn cmd_set(file: &Path, row: usize, col: usize, value: &str) -> u8 {
    let mut frame = match open_frame(file) {
        Ok(frame) => frame,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_IO;
        }
    };
    let field = match (to_index(row), to_index(col)) {
        (Some(row), Some(col)) => CellRef::new(row, col),
        _ => {
            eprintln!("Error: rows and columns are numbered from 1");
            return EXIT_USAGE;
        }
    };
    if !frame.edit(field, value) {
        eprintln!("Error: no field at {}", field);
        return EXIT_USAGE;
    }
    // Invalid values are saved too; the user can fix them in a later
    // session. Still worth a warning.
    if let Some(message) = frame.hint().message() {
        eprintln!("warning: {}: {}", field, message);
    }
    save(&mut frame)
}

fn cmd_add(file: &Path, from: Option<usize>) -> u8 {
    let mut frame = match open_frame(file) {
        Ok(frame) => frame,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_IO;
        }
    };
    let clone_from = match from {
        Some(n) => match to_index(n) {
            Some(i) => Some(i),
            None => {
                eprintln!("Error: rows are numbered from 1");
                return EXIT_USAGE;
            }
        },
        None => None,
    };
    let new_row = match frame.add_row(clone_from) {
        Some(row) => row,
        None => {
            eprintln!("Error: could not add a row");
            return EXIT_ERROR;
        }
    };
    println!("{}", new_row + 1);
    save(&mut frame)
}

fn cmd_rm(file: &Path, row: usize) -> u8 {
    let mut frame = match open_frame(file) {
        Ok(frame) => frame,
        Err(message) => {
            eprintln!("Error: {}", message);
            return EXIT_IO;
        }
    };
    let row = match to_index(row) {
        Some(row) => row,
        None => {
            eprintln!("Error: rows are numbered from 1");
            return EXIT_USAGE;
        }
    };
    if !frame.remove_row(row) {
        eprintln!("Error: no row {}", row + 1);
        return EXIT_USAGE;
    }
    save(&mut frame)
}

fn save(frame: &mut TableFrame) -> u8 {
    match frame.accept_changes() {
        Ok(()) => EXIT_SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            EXIT_IO
        }
    }
}
