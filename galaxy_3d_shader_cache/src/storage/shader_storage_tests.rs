/// Tests for FileStorage against a real temporary directory

use super::*;
use std::fs;

#[test]
fn test_read_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("basic.vert.bin");
    fs::write(&path, b"\x03\x02\x23\x07spirv").unwrap();

    let data = FileStorage::new().read(&path, u32::MAX as u64).unwrap();
    assert_eq!(data, b"\x03\x02\x23\x07spirv");
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.frag.bin");

    let result = FileStorage::new().read(&path, u32::MAX as u64);
    assert_eq!(result, Err(Error::NotFound(path)));
}

#[test]
fn test_read_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.comp.bin");
    fs::create_dir(&path).unwrap();

    let result = FileStorage::new().read(&path, u32::MAX as u64);
    assert_eq!(result, Err(Error::NotAFile(path)));
}

#[test]
fn test_read_too_large() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.comp.bin");
    fs::write(&path, vec![0u8; 65]).unwrap();

    let result = FileStorage::new().read(&path, 64);
    assert_eq!(
        result,
        Err(Error::TooLarge { path, size: 65, max: 64 })
    );
}

#[test]
fn test_read_exactly_max_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edge.comp.bin");
    fs::write(&path, vec![1u8; 64]).unwrap();

    assert_eq!(FileStorage::new().read(&path, 64).unwrap().len(), 64);
}

#[test]
#[cfg(target_os = "linux")]
fn test_read_enforces_limit_when_metadata_understates_size() {
    // procfs reports a length of 0 for files that do have content
    let path = Path::new("/proc/self/status");
    let result = FileStorage::new().read(path, 8);

    match result {
        Err(Error::TooLarge { size, max, .. }) => {
            assert_eq!(size, 9);
            assert_eq!(max, 8);
        }
        other => panic!("expected TooLarge, got {:?}", other),
    }
}
