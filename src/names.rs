//! # Column name normalization
//!
//! TRAP writes parameter names by hand-typed mnemonics where Latin and Cyrillic
//! look-alike letters get mixed ("PO" typed with a Latin P, a Cyrillic О).
//! The first [`TRAP_DEFAULT_PARAMETERS`] names of TRAP output are the code's
//! built-in parameters and are rewritten to pure Cyrillic so the same
//! parameter always gets the same display name.

use std::collections::HashMap;

/// Number of leading TRAP columns that receive homoglyph normalization
pub const TRAP_DEFAULT_PARAMETERS: usize = 24;

/// Latin letters and the Cyrillic letters they are visually identical to
const HOMOGLYPHS: [(char, char); 12] = [
    ('A', 'А'),
    ('B', 'В'),
    ('C', 'С'),
    ('E', 'Е'),
    ('H', 'Н'),
    ('K', 'К'),
    ('M', 'М'),
    ('O', 'О'),
    ('P', 'Р'),
    ('T', 'Т'),
    ('X', 'Х'),
    ('Y', 'У'),
];

fn cyrillic_homoglyph(c: char) -> Option<char> {
    // Lookup is by upper case: a lowercase Latin 'a' also becomes 'А'.
    let upper = c.to_ascii_uppercase();
    HOMOGLYPHS
        .iter()
        .find(|(latin, _)| *latin == upper)
        .map(|(_, cyrillic)| *cyrillic)
}

/// Rewrite Latin look-alike letters to their Cyrillic homoglyphs
///
/// Idempotent: the output contains none of the Latin letters in the table.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .map(|c| cyrillic_homoglyph(c).unwrap_or(c))
        .collect()
}

/// Normalize the first `limit` names, leaving the rest untouched
pub fn normalize_leading<S: AsRef<str>>(names: &[S], limit: usize) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx < limit {
                normalize_name(name.as_ref())
            } else {
                name.as_ref().to_string()
            }
        })
        .collect()
}

/// Names that occur more than once, in order of first appearance
pub fn find_duplicates<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for name in names {
        let count = counts.entry(name).or_insert(0);
        if *count == 0 {
            order.push(name);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter(|name| counts.get(name).is_some_and(|&n| n > 1))
        .map(str::to_string)
        .collect()
}

/// `Ok(())` when every name is unique, otherwise the repeated names
pub fn ensure_unique<S: AsRef<str>>(names: &[S]) -> Result<(), Vec<String>> {
    let duplicates = find_duplicates(names.iter().map(AsRef::as_ref));
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(duplicates)
    }
}
