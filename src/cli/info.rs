use anyhow::{Context, Result};
use std::path::PathBuf;

use hydrotrace::formats::resolve_encoding;
use hydrotrace::loader::{FormatDetectingLoader, LoaderConfig, TableOrigin};

const PREVIEW_ROWS: usize = 5;

/// Display format, size and parameters of a data file
pub fn run(file: PathBuf, config: LoaderConfig) -> Result<()> {
    if resolve_encoding(&config.encoding).is_none() {
        anyhow::bail!("Unknown encoding: {}", config.encoding);
    }

    let loader = FormatDetectingLoader::new(config);
    let loaded = loader
        .load(&file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let table = &loaded.table;

    println!("hydrotrace File Information");
    println!("===========================");
    println!("File: {}", file.display());
    match &loaded.origin {
        TableOrigin::Decoded(format) => println!("Format: {format}"),
        TableOrigin::Default { reason } => {
            println!("Format: not recognized, showing the default data set");
            println!("Reason: {reason}");
        }
    }
    println!();

    println!("Statistics:");
    println!("  Rows: {}", table.row_count());
    println!("  Parameters: {}", table.column_count());
    let time = &table.time().values;
    if let (Some(first), Some(last)) = (time.first(), time.last()) {
        println!("  Time span: {first} .. {last}");
    }
    println!();

    println!("Parameters:");
    for (i, column) in table.columns().iter().enumerate() {
        println!("  {:3}. {}", i + 1, column.name);
    }

    if table.row_count() > 0 {
        println!();
        println!("First rows:");
        for index in 0..PREVIEW_ROWS {
            let Some(row) = table.row(index) else {
                break;
            };
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>12.6}")).collect();
            println!("  {}", cells.join(" "));
        }
    }

    Ok(())
}
