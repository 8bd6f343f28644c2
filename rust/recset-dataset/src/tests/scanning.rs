use recset_common::error::ErrorKind;
use recset_testkit::data_gen::{DelimitedFile, UTF8_BOM};
use serde::Deserialize;

use crate::dataset::RecordDataset;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Person {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Name")]
    name: String,
}

fn people_file() -> tempfile::NamedTempFile {
    DelimitedFile::new(',')
        .row(&["Code", "Name"])
        .row(&["100", "Alice"])
        .row(&["200", "Bob"])
        .row(&["100", "Carol"])
        .build()
        .unwrap()
}

#[test]
fn test_open_and_scan() {
    let file = people_file();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();

    assert_eq!(dataset.header().columns(), ["Code", "Name"]);
    assert_eq!(dataset.header_line(), "Code,Name");

    let records = dataset.next_records(0).unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].get("Code"), Some("100"));
    assert_eq!(records[0].get("Name"), Some("Alice"));
    assert_eq!(records[2].get("Name"), Some("Carol"));

    // Exhausted: further reads return nothing.
    assert!(dataset.next_records(0).unwrap().is_empty());
}

#[test]
fn test_next_records_limit_and_reset() {
    let file = people_file();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();

    let first = dataset.next_records(2).unwrap();
    assert_eq!(first.len(), 2);
    let rest = dataset.next_records(2).unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].get("Name"), Some("Carol"));

    dataset.reset().unwrap();
    dataset.reset().unwrap();
    let again = dataset.next_records(0).unwrap();
    assert_eq!(again.len(), 3);
    assert_eq!(again[0].get("Name"), Some("Alice"));
}

#[test]
fn test_multi_line_header_span() {
    let file = DelimitedFile::new(',')
        .row(&["Code", "Prior Auth"])
        .row(&["", "Date"])
        .row(&["100", "2019-04-01"])
        .build()
        .unwrap();
    let mut dataset = RecordDataset::open_with_header_span(file.path(), ',', 2).unwrap();

    assert_eq!(dataset.header().columns(), ["Code", "Prior AuthDate"]);

    let records = dataset.next_records(0).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Prior AuthDate"), Some("2019-04-01"));
}

#[test]
fn test_bom_is_transparent() {
    let rows: &[&[&str]] = &[&["Code", "Name"], &["100", "Alice"], &["200", "Bob"]];

    let mut plain = DelimitedFile::new(',');
    let mut marked = DelimitedFile::new(',').with_bom(UTF8_BOM);
    for row in rows.iter().copied() {
        plain = plain.row(row);
        marked = marked.row(row);
    }
    let plain = plain.build().unwrap();
    let marked = marked.build().unwrap();

    let mut plain = RecordDataset::open(plain.path(), ',').unwrap();
    let mut marked = RecordDataset::open(marked.path(), ',').unwrap();

    assert_eq!(plain.header().columns(), marked.header().columns());
    assert_eq!(plain.next_records(0).unwrap(), marked.next_records(0).unwrap());
}

#[test]
fn test_crlf_terminators() {
    let file = DelimitedFile::new(',')
        .with_crlf()
        .row(&["Code", "Name"])
        .row(&["100", "Alice"])
        .build()
        .unwrap();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();
    let records = dataset.next_records(0).unwrap();
    assert_eq!(records[0].get("Name"), Some("Alice"));
}

#[test]
fn test_quoted_field_with_delimiter() {
    let file = DelimitedFile::new(',')
        .row(&["Code", "Plans"])
        .raw_line(r#"100,"HMO, PPO""#)
        .build()
        .unwrap();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();
    let records = dataset.next_records(0).unwrap();
    assert_eq!(records[0].get("Plans"), Some("HMO, PPO"));
}

#[test]
fn test_shape_mismatch_aborts_scan() {
    let file = DelimitedFile::new(',')
        .row(&["Code", "Name"])
        .row(&["100", "Alice"])
        .raw_line("200")
        .build()
        .unwrap();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();

    let err = dataset.next_records(0).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::ShapeMismatch {
            expected: 2,
            actual: 1,
            ..
        }
    ));
}

#[test]
fn test_typed_stream() {
    let file = people_file();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();

    let people: Vec<Person> = dataset
        .typed_stream(0)
        .unwrap()
        .collect::<recset_common::Result<_>>()
        .unwrap();
    assert_eq!(people.len(), 3);
    assert_eq!(people[1].name, "Bob");

    let limited: Vec<Person> = dataset
        .typed_stream(2)
        .unwrap()
        .collect::<recset_common::Result<_>>()
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[test]
fn test_size_is_cached_full_scan() {
    let file = people_file();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();
    assert_eq!(dataset.size().unwrap(), 3);
    assert_eq!(dataset.size().unwrap(), 3);

    // The size call leaves the cursor usable.
    dataset.reset().unwrap();
    assert_eq!(dataset.next_records(0).unwrap().len(), 3);
}

#[test]
fn test_open_missing_path() {
    let err = RecordDataset::open("/nonexistent/records.csv", ',').unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::NotFound { .. }));
}

#[test]
fn test_header_span_longer_than_file() {
    let file = DelimitedFile::new(',').row(&["Code", "Name"]).build().unwrap();
    let err = RecordDataset::open_with_header_span(file.path(), ',', 3).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedHeader { .. }));
}

#[test]
fn test_close_is_idempotent_and_terminal() {
    let file = people_file();
    let mut dataset = RecordDataset::open(file.path(), ',').unwrap();
    assert!(!dataset.is_closed());

    dataset.close();
    dataset.close();
    assert!(dataset.is_closed());

    let err = dataset.next_records(0).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ClosedResource { .. }));
    let err = dataset.reset().unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ClosedResource { .. }));
}
