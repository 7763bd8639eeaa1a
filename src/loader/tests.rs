use super::*;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::table::{Column, DEFAULT_TIME_COLUMN};

enum Outcome {
    Mismatch,
    Duplicates,
    Malformed,
    Success,
}

struct ScriptedDecoder {
    format: SourceFormat,
    outcome: Outcome,
    calls: Arc<AtomicUsize>,
}

impl ScriptedDecoder {
    fn boxed(format: SourceFormat, outcome: Outcome, calls: &Arc<AtomicUsize>) -> Box<dyn Decoder> {
        Box::new(Self {
            format,
            outcome,
            calls: Arc::clone(calls),
        })
    }
}

impl Decoder for ScriptedDecoder {
    fn format(&self) -> SourceFormat {
        self.format
    }

    fn try_decode(&self, _path: &Path, _encoding: &str) -> Result<Table, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Mismatch => Err(DecodeError::FormatMismatch {
                format: self.format,
                reason: "scripted".to_string(),
            }),
            Outcome::Duplicates => Err(DecodeError::DuplicateColumns(vec!["P".to_string()])),
            Outcome::Malformed => Err(DecodeError::MalformedBinaryStream("scripted".to_string())),
            Outcome::Success => Ok(Table::new(vec![Column::new("t", vec![1.0])]).unwrap()),
        }
    }
}

fn existing_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"placeholder").unwrap();
    file
}

#[test]
fn test_standard_order() {
    let loader = FormatDetectingLoader::default();
    assert_eq!(
        loader.decoder_formats(),
        vec![SourceFormat::Korsar, SourceFormat::TrapCsv, SourceFormat::Lent]
    );
    assert_eq!(loader.config().encoding, DEFAULT_ENCODING);
    assert_eq!(loader.config().fallback, FallbackPolicy::UseDefault);
}

#[test]
fn test_first_success_wins() {
    let calls = Arc::new(AtomicUsize::new(0));
    let loader = FormatDetectingLoader::with_decoders(
        vec![
            ScriptedDecoder::boxed(SourceFormat::Korsar, Outcome::Mismatch, &calls),
            ScriptedDecoder::boxed(SourceFormat::TrapCsv, Outcome::Success, &calls),
            ScriptedDecoder::boxed(SourceFormat::Lent, Outcome::Success, &calls),
        ],
        LoaderConfig::strict(),
    );
    let file = existing_file();

    let loaded = loader.load(file.path()).unwrap();
    assert_eq!(loaded.origin, TableOrigin::Decoded(SourceFormat::TrapCsv));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_duplicates_are_terminal_even_with_fallback() {
    let calls = Arc::new(AtomicUsize::new(0));
    let loader = FormatDetectingLoader::with_decoders(
        vec![
            ScriptedDecoder::boxed(SourceFormat::Korsar, Outcome::Duplicates, &calls),
            ScriptedDecoder::boxed(SourceFormat::Lent, Outcome::Success, &calls),
        ],
        LoaderConfig::default(),
    );
    let file = existing_file();

    let err = loader.load(file.path()).unwrap_err();
    assert!(matches!(err, DecodeError::DuplicateColumns(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_all_mismatch_falls_back_to_default() {
    let calls = Arc::new(AtomicUsize::new(0));
    let decoders = || {
        vec![
            ScriptedDecoder::boxed(SourceFormat::Korsar, Outcome::Mismatch, &calls),
            ScriptedDecoder::boxed(SourceFormat::Lent, Outcome::Mismatch, &calls),
        ]
    };
    let file = existing_file();

    let loaded = FormatDetectingLoader::with_decoders(decoders(), LoaderConfig::default())
        .load(file.path())
        .unwrap();
    assert!(loaded.is_default());
    assert_eq!(loaded.table, Table::default_series());

    let err = FormatDetectingLoader::with_decoders(decoders(), LoaderConfig::strict())
        .load(file.path())
        .unwrap_err();
    assert!(matches!(err, DecodeError::UnrecognizedFormat(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn test_malformed_stream_policy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let file = existing_file();
    let malformed = || vec![ScriptedDecoder::boxed(SourceFormat::Lent, Outcome::Malformed, &calls)];

    let strict = FormatDetectingLoader::with_decoders(malformed(), LoaderConfig::strict());
    assert!(matches!(
        strict.load(file.path()),
        Err(DecodeError::MalformedBinaryStream(_))
    ));

    // Not masked by the default table either.
    let lenient = FormatDetectingLoader::with_decoders(malformed(), LoaderConfig::default());
    assert!(matches!(
        lenient.load(file.path()),
        Err(DecodeError::MalformedBinaryStream(_))
    ));
}

#[test]
fn test_read_errors_are_not_masked() {
    struct Unreadable;

    impl Decoder for Unreadable {
        fn format(&self) -> SourceFormat {
            SourceFormat::Korsar
        }

        fn try_decode(&self, _path: &Path, _encoding: &str) -> Result<Table, DecodeError> {
            Err(DecodeError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "scripted",
            )))
        }
    }

    let file = existing_file();
    let loader =
        FormatDetectingLoader::with_decoders(vec![Box::new(Unreadable)], LoaderConfig::default());

    let err = loader.load(file.path()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Io(ref e) if e.kind() == std::io::ErrorKind::PermissionDenied
    ));
}

#[test]
fn test_missing_path() {
    let missing = Path::new("/no/such/dir/res_cyclic.txt");

    let loaded = FormatDetectingLoader::default().load(missing).unwrap();
    assert!(loaded.is_default());
    assert_eq!(loaded.table.time().name, DEFAULT_TIME_COLUMN);

    let err = FormatDetectingLoader::new(LoaderConfig::strict())
        .load(missing)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn test_config_builders() {
    let config = LoaderConfig::default()
        .with_encoding("utf-8")
        .with_fallback(FallbackPolicy::Strict);
    assert_eq!(config.encoding, "utf-8");
    assert_eq!(config, LoaderConfig::strict().with_encoding("utf-8"));
}
