//! Sheetstore CLI - inspect and patch spreadsheet files

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sheetstore::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetstore")]
#[command(author, version, about = "Spreadsheet inspection and cell-patch tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a spreadsheet's first sheet as a JSON table
    Table {
        /// Input spreadsheet file (xlsx)
        input: PathBuf,
    },

    /// Overwrite a single cell and re-encode the file
    Patch {
        /// Input spreadsheet file (xlsx)
        input: PathBuf,

        /// Row index (0-based)
        #[arg(short, long)]
        row: u32,

        /// Column index (0-based)
        #[arg(short, long)]
        column: u16,

        /// Replacement value (always stored as text)
        #[arg(short, long)]
        value: String,

        /// Output file (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show information about a spreadsheet
    Info {
        /// Input spreadsheet file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Table { input } => print_table(&input),
        Commands::Patch {
            input,
            row,
            column,
            value,
            output,
        } => patch(&input, row, column, &value, output.as_deref()),
        Commands::Info { input } => show_info(&input),
    }
}

fn open(input: &Path) -> Result<Workbook> {
    XlsxReader::read_file(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn print_table(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());

    let table = workbook
        .extract_table(&file_name)
        .context("Failed to extract table")?;

    println!("{}", serde_json::to_string_pretty(&table)?);
    Ok(())
}

fn patch(input: &Path, row: u32, column: u16, value: &str, output: Option<&Path>) -> Result<()> {
    let mut workbook = open(input)?;

    workbook
        .patch_cell(row, column, value)
        .with_context(|| format!("Failed to patch cell ({}, {})", row, column))?;

    let target = output.unwrap_or(input);
    XlsxWriter::write_file(&workbook, target)
        .with_context(|| format!("Failed to write '{}'", target.display()))?;

    eprintln!(
        "Patched ({}, {}) to \"{}\" in {}",
        row,
        column,
        value,
        target.display()
    );
    Ok(())
}

fn show_info(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    println!("File: {}", input.display());
    println!("Sheets: {}", workbook.sheet_count());

    for (i, sheet) in workbook.worksheets().enumerate() {
        let bounds = sheet
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                format!(
                    "{}:{}",
                    CellAddress::new(min_row, min_col),
                    CellAddress::new(max_row, max_col)
                )
            })
            .unwrap_or_else(|| "empty".to_string());

        println!(
            "  [{}] {} - {} cells, used range {}",
            i,
            sheet.name(),
            sheet.cell_count(),
            bounds
        );
    }

    Ok(())
}
