//! Trace format tests.
//!
//! Covers the accepted line forms, error reporting with line numbers, file
//! loading, and stride generation.

use std::io::Write;

use offsetpf_core::common::TraceError;
use offsetpf_core::sim::{AccessKind, TraceRecord, load_trace, parse_trace, stride_trace, write_trace};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Every supported line form parses; blanks and comments are skipped.
#[test]
fn parses_all_line_forms() {
    let text = "\
# header comment
R 0x1000 0x400120
W 4096

0x2000
  l 0x10   # trailing comment
S 1_024 0x4
";
    let records = parse_trace(text.as_bytes()).unwrap();
    assert_eq!(
        records,
        vec![
            TraceRecord { kind: AccessKind::Read, addr: 0x1000, pc: 0x40_0120 },
            TraceRecord { kind: AccessKind::Write, addr: 4096, pc: 0 },
            TraceRecord::read(0x2000),
            TraceRecord::read(0x10),
            TraceRecord { kind: AccessKind::Write, addr: 1024, pc: 4 },
        ]
    );
}

/// Unknown kind tokens are reported with their 1-based line.
#[test]
fn unknown_kind_reports_line() {
    let err = parse_trace("R 0x10\n\nX 0x20\n".as_bytes()).unwrap_err();
    match err {
        TraceError::UnknownKind { line, kind } => {
            assert_eq!(line, 3);
            assert_eq!(kind, "X");
        }
        other => panic!("expected UnknownKind, got {other:?}"),
    }
}

#[rstest]
#[case::bad_number("R zz")]
#[case::missing_address("W")]
#[case::too_many_fields("R 0x10 0x20 0x30")]
#[case::bare_too_many("0x10 0x20 0x30")]
#[case::bad_pc("0x10 pc")]
fn malformed_lines_are_rejected(#[case] line: &str) {
    let text = format!("0x0\n{line}\n");
    match parse_trace(text.as_bytes()).unwrap_err() {
        TraceError::Malformed { line: 2, .. } => {}
        other => panic!("expected Malformed on line 2, got {other:?}"),
    }
}

/// A written trace loads back from disk unchanged.
#[test]
fn load_written_trace_file() {
    let records = vec![
        TraceRecord::read(0x8000_0000),
        TraceRecord { kind: AccessKind::Write, addr: 0x8000_0040, pc: 0x1234 },
    ];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write_trace(&mut file, &records).unwrap();
    file.flush().unwrap();

    assert_eq!(load_trace(file.path()).unwrap(), records);
}

/// A missing file surfaces as an I/O error.
#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_trace(&dir.path().join("absent.trace")).unwrap_err();
    assert!(matches!(err, TraceError::Io(_)));
}

/// Stride traces step by whole blocks from the base.
#[test]
fn stride_trace_addresses() {
    let addrs: Vec<u64> = stride_trace(0x100, 2, 3, 64).iter().map(|r| r.addr).collect();
    assert_eq!(addrs, vec![0x100, 0x180, 0x200]);
    assert!(stride_trace(0, 1, 0, 64).is_empty());
}
