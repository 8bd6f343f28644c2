use serde::{Deserialize, Serialize};

use recset_testkit::data_gen::DelimitedFile;

use crate::dataset::RecordDataset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Name")]
    name: String,
}

fn people_dataset() -> (tempfile::NamedTempFile, RecordDataset) {
    let file = DelimitedFile::new(',')
        .row(&["Code", "Name"])
        .row(&["100", "Alice"])
        .row(&["200", "Bob"])
        .row(&["100", "Carol"])
        .build()
        .unwrap();
    let dataset = RecordDataset::open(file.path(), ',').unwrap();
    (file, dataset)
}

#[test]
fn test_export_row_honors_column_order() {
    let (_file, dataset) = people_dataset();
    let row = dataset
        .export_row(&Person {
            code: "400".to_string(),
            name: "Faye".to_string(),
        })
        .unwrap();
    assert_eq!(row, "400,Faye");
}

#[test]
fn test_export_row_missing_columns_render_empty() {
    let (_file, dataset) = people_dataset();

    #[derive(Serialize)]
    struct CodeOnly {
        #[serde(rename = "Code")]
        code: String,
    }

    let row = dataset
        .export_row(&CodeOnly {
            code: "500".to_string(),
        })
        .unwrap();
    assert_eq!(row, "500,");
}

#[test]
fn test_append_matching_creates_target_with_header() {
    let (_file, mut dataset) = people_dataset();
    dataset
        .build_index("by_code", |r| r.get("Code").unwrap_or_default().to_string())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("matched.csv");

    let appended = dataset
        .append_matching::<Person>(&target, "by_code", "100")
        .unwrap();
    assert_eq!(appended, 2);

    let content = std::fs::read_to_string(&target).unwrap();
    assert_eq!(content, "Code,Name\n100,Alice\n100,Carol\n");
}

#[test]
fn test_append_matching_existing_target_skips_header() {
    let (_file, mut dataset) = people_dataset();
    dataset
        .build_index("by_code", |r| r.get("Code").unwrap_or_default().to_string())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("matched.csv");

    dataset
        .append_matching::<Person>(&target, "by_code", "100")
        .unwrap();
    dataset
        .append_matching::<Person>(&target, "by_code", "200")
        .unwrap();

    let content = std::fs::read_to_string(&target).unwrap();
    assert_eq!(content, "Code,Name\n100,Alice\n100,Carol\n200,Bob\n");
}

#[test]
fn test_append_matching_with_transform() {
    let (_file, mut dataset) = people_dataset();
    dataset
        .build_index("by_code", |r| r.get("Code").unwrap_or_default().to_string())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("renamed.csv");

    let appended = dataset
        .append_matching_with(&target, "by_code", "100", |key, mut person: Person| {
            person.name = format!("{}-{key}", person.name);
            person
        })
        .unwrap();
    assert_eq!(appended, 2);

    let content = std::fs::read_to_string(&target).unwrap();
    assert_eq!(content, "Code,Name\n100,Alice-100\n100,Carol-100\n");
}

#[test]
fn test_append_matching_no_matches_still_writes_header() {
    let (_file, mut dataset) = people_dataset();
    dataset
        .build_index("by_code", |r| r.get("Code").unwrap_or_default().to_string())
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("empty.csv");

    let appended = dataset
        .append_matching::<Person>(&target, "by_code", "999")
        .unwrap();
    assert_eq!(appended, 0);
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "Code,Name\n");
}
