use std::fs;

use harvester_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn rejects_file_in_place_of_dir() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("downloads");
    fs::write(&file_path, "x").unwrap();
    let err = ensure_output_dir(&file_path).unwrap_err();
    assert!(err.to_string().contains("is not a directory"), "{err}");
}

#[test]
fn write_replaces_existing_file_silently() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("downloads"));

    let first = writer.write("docs.zip", b"first".as_slice()).unwrap();
    assert_eq!(first.file_name().unwrap(), "docs.zip");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("docs.zip", b"\x00\x01binary".as_slice()).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"\x00\x01binary");
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("docs.zip", "data");
    assert!(result.is_err());
    assert!(!file_path.with_file_name("docs.zip").exists());
}
