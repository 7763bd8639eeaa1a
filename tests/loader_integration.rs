//! Integration tests for format detection
//!
//! These tests write real files in each supported format and load them
//! through the standard decoder chain.

use hydrotrace::formats::{DecodeError, SourceFormat, LENT_NAME_WIDTH};
use hydrotrace::loader::{load_table, FormatDetectingLoader, LoaderConfig, TableOrigin};
use hydrotrace::table::{Table, DEFAULT_PARAMETER_COLUMN, DEFAULT_ROW_COUNT, DEFAULT_TIME_COLUMN};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_cp1251(path: &Path, text: &str) {
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1251.encode(text);
    assert!(!unmappable);
    fs::write(path, bytes).unwrap();
}

fn lent_bytes(names: &[&str], records: &[&[f32]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&[0u8; 4]);
    bytes.extend_from_slice(&(names.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&[0u8; 4]);
    bytes.extend(std::iter::repeat(0u8).take(4 * (names.len() + 1)));
    for name in names {
        let (encoded, _, _) = encoding_rs::IBM866.encode(name);
        let mut field = vec![b' '; LENT_NAME_WIDTH];
        field[..encoded.len()].copy_from_slice(&encoded);
        bytes.extend_from_slice(&field);
    }
    for record in records {
        bytes.extend_from_slice(&[0u8; 8]);
        for value in *record {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    bytes
}

fn assert_default(table: &Table) {
    assert_eq!(
        table.column_names(),
        vec![DEFAULT_TIME_COLUMN, DEFAULT_PARAMETER_COLUMN]
    );
    assert_eq!(table.row_count(), DEFAULT_ROW_COUNT);
}

/// KORSAR output in the default code page
#[test]
fn test_load_korsar_windows_1251() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("res.txt");
    write_cp1251(
        &path,
        "3\nВремя, с\nДавление, МПа\nРасход, кг/с\n0.0 15.0 120.5\n1.0 14.8 118.0\n2.0 14.6 117.2\n",
    );

    let loaded = load_table(&path, "cp1251").unwrap();

    assert_eq!(loaded.origin, TableOrigin::Decoded(SourceFormat::Korsar));
    assert_eq!(
        loaded.table.column_names(),
        vec!["Время, с", "Давление, МПа", "Расход, кг/с"]
    );
    assert_eq!(loaded.table.time().values, vec![0.0, 1.0, 2.0]);
    assert_eq!(loaded.table.column("Расход, кг/с").unwrap().values[2], 117.2);
}

/// KORSAR output written in UTF-8 with the encoding supplied by the caller
#[test]
fn test_load_korsar_caller_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("res.txt");
    fs::write(&path, "2\nВремя, с\nУровень, м\n0 1.5\n1 1.4\n").unwrap();

    let loaded = load_table(&path, "utf-8").unwrap();

    assert_eq!(loaded.origin, TableOrigin::Decoded(SourceFormat::Korsar));
    assert_eq!(loaded.table.column_names(), vec!["Время, с", "Уровень, м"]);
}

/// TRAP csv with a Latin homoglyph in a built-in parameter name
#[test]
fn test_load_trap_csv_normalizes_leading_names() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trap.csv");
    // "TIME" uses Latin T and M; "P1" uses a Latin P.
    write_cp1251(
        &path,
        "TRAP run 42\ngenerated output\nTIME;P1;Расход\n0;10.0;5.0\n1;10.5;\n2;11.0;5.5\n",
    );

    let loaded = load_table(&path, "cp1251").unwrap();

    assert_eq!(loaded.origin, TableOrigin::Decoded(SourceFormat::TrapCsv));
    assert_eq!(loaded.table.column_names(), vec!["ТIМЕ", "Р1", "Расход"]);
    assert_eq!(loaded.table.row_count(), 3);
    assert!(loaded.table.column("Расход").unwrap().values[1].is_nan());
}

/// TRAP csv whose normalized names collide
#[test]
fn test_load_trap_csv_duplicates_propagate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("trap.csv");
    // Latin "P" and Cyrillic "Р" normalize to the same name.
    write_cp1251(&path, "a\nb\nt;P;Р\n0;1;2\n");

    let loaded = FormatDetectingLoader::default().load(&path);

    match loaded {
        Err(DecodeError::DuplicateColumns(names)) => assert_eq!(names, vec!["Р".to_string()]),
        other => panic!("expected duplicate columns, got {other:?}"),
    }
}

/// The LENT stream from the format description: three parameters, two records
#[test]
fn test_load_lent_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lent3");
    let bytes = lent_bytes(
        &["t", "P", "Q"],
        &[&[0.0, 1.0, 2.0], &[0.5, 1.1, 2.1], &[0.5, 9.0, 9.0]],
    );
    fs::write(&path, bytes).unwrap();

    let loaded = load_table(&path, "cp1251").unwrap();

    assert_eq!(loaded.origin, TableOrigin::Decoded(SourceFormat::Lent));
    assert_eq!(loaded.table.column_names(), vec!["Т", "Р", "Q"]);
    assert_eq!(loaded.table.time().values, vec![0.0, 0.5]);
    let p = &loaded.table.column("Р").unwrap().values;
    assert_eq!(p, &vec![1.0f32 as f64, 1.1f32 as f64]);
}

/// A LENT stream cut off before its sentinel record
#[test]
fn test_truncated_lent_stream() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lent3");
    let mut bytes = lent_bytes(&["t", "P"], &[&[0.0, 1.0], &[0.5, 1.1]]);
    bytes.truncate(bytes.len() - 2);
    fs::write(&path, bytes).unwrap();

    let strict = FormatDetectingLoader::new(LoaderConfig::strict());
    assert!(matches!(
        strict.load(&path),
        Err(DecodeError::MalformedBinaryStream(_))
    ));

    // A damaged stream is reported, not replaced by the default table.
    assert!(matches!(
        FormatDetectingLoader::default().load(&path),
        Err(DecodeError::MalformedBinaryStream(_))
    ));
}

/// Nonexistent path with the default policy yields the default table
#[test]
fn test_missing_file_uses_default() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.txt");

    let loaded = load_table(&path, "cp1251").unwrap();

    assert!(loaded.is_default());
    assert_default(&loaded.table);
    assert_eq!(loaded.table.column(DEFAULT_PARAMETER_COLUMN).unwrap().values[7], 7.0);
}

/// Nonexistent path under the strict policy is an I/O error
#[test]
fn test_missing_file_strict() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nope.txt");

    let result = FormatDetectingLoader::new(LoaderConfig::strict()).load(&path);

    match result {
        Err(DecodeError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

/// Text in no known format
#[test]
fn test_unrecognized_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    fs::write(&path, "just some notes\nnothing numeric here\n").unwrap();

    let strict = FormatDetectingLoader::new(LoaderConfig::strict());
    assert!(matches!(
        strict.load(&path),
        Err(DecodeError::UnrecognizedFormat(_))
    ));

    let loaded = FormatDetectingLoader::default().load(&path).unwrap();
    assert!(loaded.is_default());
}

/// Every supported format loads through one loader instance
#[test]
fn test_one_loader_many_formats() {
    let dir = tempdir().unwrap();
    let korsar = dir.path().join("a.txt");
    let trap = dir.path().join("b.csv");
    let lent = dir.path().join("c.bin");
    write_cp1251(&korsar, "2\nВремя, с\nX\n0 1\n");
    write_cp1251(&trap, "x\ny\nВремя;X\n0;1\n");
    fs::write(&lent, lent_bytes(&["Время", "X"], &[&[0.0, 1.0], &[0.0, 1.0]])).unwrap();

    let loader = FormatDetectingLoader::new(LoaderConfig::strict());
    let formats: Vec<_> = [&korsar, &trap, &lent]
        .iter()
        .map(|path| loader.load(path).unwrap().origin)
        .collect();

    assert_eq!(
        formats,
        vec![
            TableOrigin::Decoded(SourceFormat::Korsar),
            TableOrigin::Decoded(SourceFormat::TrapCsv),
            TableOrigin::Decoded(SourceFormat::Lent),
        ]
    );
}
