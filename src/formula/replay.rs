use log::{info, warn};

use super::{parse_tag, FormulaError};
use crate::table::Table;

/// A tag that could not be replayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTag {
    /// The tag as saved
    pub tag: String,
    /// Why it was skipped
    pub error: FormulaError,
}

/// Outcome of replaying a batch of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Tags whose columns were appended, in order
    pub restored: Vec<String>,
    /// Tags that were skipped, in order
    pub skipped: Vec<SkippedTag>,
}

impl ReplayReport {
    /// True when every tag was restored
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Rebuild derived columns from saved tags, appending them to `table`
///
/// Tags are replayed in order, so a tag may refer to a column restored by an
/// earlier tag. Each restored column is named by its tag exactly as saved.
/// Failures are per tag and never abort the batch.
pub fn replay_formulas<I, S>(table: &mut Table, tags: I) -> ReplayReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = ReplayReport::default();

    for tag in tags {
        let tag = tag.as_ref();
        match replay_one(table, tag) {
            Ok(()) => report.restored.push(tag.to_string()),
            Err(error) => {
                warn!("Skipping formula {tag}: {error}");
                report.skipped.push(SkippedTag {
                    tag: tag.to_string(),
                    error,
                });
            }
        }
    }

    info!(
        "Replayed {} formula(s), skipped {}",
        report.restored.len(),
        report.skipped.len()
    );
    report
}

fn replay_one(table: &mut Table, tag: &str) -> Result<(), FormulaError> {
    let formula = parse_tag(tag)?;
    let derived = |source| FormulaError::Derived {
        tag: tag.to_string(),
        source,
    };

    let mut column = formula.evaluate(table).map_err(derived)?;
    column.name = tag.to_string();
    table
        .push_column(column)
        .map_err(|e| derived(e.into()))
}
