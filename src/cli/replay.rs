use anyhow::{Context, Result};
use std::path::PathBuf;

use hydrotrace::formula::{is_formula_tag, replay_formulas};
use hydrotrace::loader::{FormatDetectingLoader, LoaderConfig};

use super::config::Session;

/// Reload a session's data file and rebuild its derived columns
pub fn run(session_path: PathBuf, mut config: LoaderConfig) -> Result<()> {
    let session = Session::from_file(&session_path)?;
    if let Some(encoding) = &session.encoding {
        config.encoding = encoding.clone();
    }

    let loader = FormatDetectingLoader::new(config);
    let mut loaded = loader
        .load(&session.data_file)
        .with_context(|| format!("Failed to load {}", session.data_file.display()))?;
    if loaded.is_default() {
        println!(
            "Warning: {} could not be loaded, replaying against the default data set",
            session.data_file.display()
        );
    }

    let report = replay_formulas(&mut loaded.table, &session.formulas);

    println!("Session: {}", session_path.display());
    println!("Data file: {}", session.data_file.display());
    println!(
        "Restored {} of {} derived column(s)",
        report.restored.len(),
        session.formulas.len()
    );
    for skipped in &report.skipped {
        println!("  skipped {}: {}", skipped.tag, skipped.error);
    }
    println!();

    println!("Columns:");
    for (i, name) in loaded.table.column_names().iter().enumerate() {
        if is_formula_tag(name) {
            println!("  {:3}. {} (derived)", i + 1, name);
        } else {
            println!("  {:3}. {}", i + 1, name);
        }
    }

    Ok(())
}
