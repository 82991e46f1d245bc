//! Integration tests for the file entry points and their failure modes.

use std::path::{Path, PathBuf};

use dotbrowse::{browse, browse_with, CilModule, Error, TreeOptions};

fn scratch_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dotbrowse-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_missing_file() {
    let path = Path::new("does/not/exist/Library.dll");

    let Err(Error::ModuleLoad { path: failed, .. }) = browse(path) else {
        panic!("a missing file must fail to load");
    };
    assert_eq!(failed, path);
}

#[test]
fn test_not_a_pe_file() {
    let path = scratch_file("text.dll", b"This is a text file, not a portable executable.");

    let result = browse_with(&path, &TreeOptions::public_surface());
    std::fs::remove_file(&path).unwrap();

    match result {
        Err(Error::ModuleLoad { source, .. }) => {
            assert!(!matches!(*source, Error::ModuleLoad { .. }));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn test_load_failure_message_names_the_file() {
    let path = Path::new("missing/Broken.dll");

    let error = browse(path).unwrap_err();
    assert!(error.to_string().contains("Broken.dll"));
}

#[test]
fn test_in_memory_inputs() {
    assert!(matches!(CilModule::from_mem(Vec::new()), Err(Error::Empty)));
    assert!(CilModule::from_mem(vec![0x4D, 0x5A, 0x00, 0x00]).is_err());
    assert!(CilModule::from_metadata(b"not metadata").is_err());
}
