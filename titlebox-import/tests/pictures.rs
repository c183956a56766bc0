use std::fs;
use std::path::Path;

use titlebox_import::*;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"img").unwrap();
}

#[test]
fn groups_by_lowercased_title_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "413607D9/20452.png");
    touch(dir.path(), "413607D9/1.PNG");
    touch(dir.path(), "4d5307e6/7.png");

    let index = index_pictures(dir.path(), ".png").unwrap();
    assert_eq!(index.len(), 2);
    assert_eq!(index["413607d9"], vec!["1", "20452"]);
    assert_eq!(index["4d5307e6"], vec!["7"]);
}

#[test]
fn ignores_other_suffixes_and_root_files() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "stray.png");
    touch(dir.path(), "413607d9/notes.txt");
    touch(dir.path(), "413607d9/cover.jpg");
    touch(dir.path(), "413607d9/5.png");

    let index = index_pictures(dir.path(), ".png").unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index["413607d9"], vec!["5"]);
}

#[test]
fn nested_files_flatten_into_title_folder() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "413607d9/screens/hd/9.png");
    touch(dir.path(), "413607d9/2.png");

    let index = index_pictures(dir.path(), ".png").unwrap();
    assert_eq!(index.len(), 1);
    let mut names = index["413607d9"].clone();
    names.sort();
    assert_eq!(names, vec!["2", "9"]);
}

#[test]
fn empty_title_folder_has_no_entry() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("413607d9")).unwrap();
    let index = index_pictures(dir.path(), ".png").unwrap();
    assert!(index.is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = index_pictures(&dir.path().join("nope"), ".png");
    assert!(result.is_err());
}
