//! Tests for the filesystem tree source

use std::fs;
use std::path::{Path, MAIN_SEPARATOR};

use tempfile::TempDir;

use rstreemap::application::services::{FileSystemSource, TreeSource};
use rstreemap::application::ApplicationError;
use rstreemap::domain::{Point, RandomColors, Rect, TreeArena};
use rstreemap::util::testing;

fn write_file(root: &Path, rel: &str, bytes: usize) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, vec![b'x'; bytes]).expect("write file");
}

fn load(path: &Path) -> Result<TreeArena, ApplicationError> {
    testing::init_test_setup();
    FileSystemSource::new(path).load(Box::new(RandomColors::seeded(11)))
}

fn root_name(temp: &TempDir) -> String {
    fs::canonicalize(temp.path())
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned()
}

#[test]
fn given_directory_when_loading_then_sizes_are_file_lengths() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", 30);
    write_file(temp.path(), "sub/b.txt", 50);
    write_file(temp.path(), "sub/c.txt", 20);

    // Act
    let tree = load(temp.path()).unwrap();

    // Assert
    assert_eq!(tree.total(), 100);
    let sub = tree.find_node("sub").unwrap();
    assert_eq!(tree.size(sub), 70);
    assert_eq!(tree.size(tree.find_leaf("a.txt").unwrap()), 30);
    assert!(tree.is_consistent());
}

#[test]
fn given_directory_when_loading_then_root_is_labelled_by_its_name() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", 1);

    // Act
    let tree = load(temp.path()).unwrap();

    // Assert
    assert_eq!(tree.label(tree.root().unwrap()), Some(root_name(&temp).as_str()));
}

#[test]
fn given_nested_file_when_locating_then_path_uses_os_separator() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "sub/deep/only.txt", 10);

    // Act
    let tree = load(temp.path()).unwrap();
    let hit = tree
        .locate(Point::new(0, 0), Rect::new(0, 0, 40, 20))
        .unwrap()
        .unwrap();

    // Assert
    let sep = MAIN_SEPARATOR;
    assert_eq!(
        hit.path,
        format!("{}{sep}sub{sep}deep{sep}only.txt", root_name(&temp))
    );
    assert_eq!(hit.size, 10);
}

#[test]
fn given_entries_when_loading_then_children_are_sorted_by_name() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "c.txt", 1);
    write_file(temp.path(), "a.txt", 1);
    write_file(temp.path(), "b.txt", 1);

    // Act
    let tree = load(temp.path()).unwrap();

    // Assert
    let labels: Vec<&str> = tree
        .leaves()
        .into_iter()
        .filter_map(|idx| tree.label(idx))
        .collect();
    assert_eq!(labels, vec!["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn given_empty_directory_when_loading_then_zero_size_leaf() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a.txt", 5);
    fs::create_dir(temp.path().join("nothing")).unwrap();

    // Act
    let tree = load(temp.path()).unwrap();

    // Assert
    let nothing = tree.find_leaf("nothing").unwrap();
    assert_eq!(tree.size(nothing), 0);
    assert_eq!(tree.total(), 5);
}

#[test]
fn given_single_file_when_loading_then_tree_is_one_leaf() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "solo.bin", 7);

    // Act
    let tree = load(&temp.path().join("solo.bin")).unwrap();

    // Assert
    assert_eq!(tree.total(), 7);
    assert_eq!(tree.label(tree.root().unwrap()), Some("solo.bin"));
}

#[test]
fn given_missing_path_when_loading_then_source_unavailable() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    let result = load(&temp.path().join("does-not-exist"));

    // Assert
    match result {
        Err(ApplicationError::SourceUnavailable { context, .. }) => {
            assert!(context.contains("does-not-exist"));
        }
        other => panic!("expected SourceUnavailable, got {:?}", other.map(|t| t.total())),
    }
}

#[test]
fn given_loaded_tree_when_deleting_file_then_disk_is_untouched() {
    // Arrange
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "keep.txt", 3);
    let mut tree = load(temp.path()).unwrap();

    // Act
    tree.delete("keep.txt").unwrap();

    // Assert
    assert!(temp.path().join("keep.txt").exists());
    assert_eq!(tree.total(), 0);
}
