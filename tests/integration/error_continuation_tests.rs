use dupesweep::actions::{DeleteError, FsRemover, Remover};
use dupesweep::duplicates::{DuplicateFinder, FinderConfig, Tally};
use dupesweep::scanner::FileEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Remover that refuses every request.
struct Refusing {
    attempts: usize,
}

impl Remover for Refusing {
    fn remove(&mut self, path: &Path) -> Result<(), DeleteError> {
        self.attempts += 1;
        Err(DeleteError::PermissionDenied(path.to_path_buf()))
    }
}

#[test]
fn test_vanished_file_is_excluded_everywhere() {
    let dir = tempdir().unwrap();
    let kept = dir.path().join("kept.txt");
    let copy = dir.path().join("sub/kept.txt");
    fs::create_dir_all(copy.parent().unwrap()).unwrap();
    fs::write(&kept, b"shared").unwrap();
    fs::write(&copy, b"shared").unwrap();

    // Listed by the traversal, gone before a worker opens it
    let vanished = dir.path().join("vanished.txt");
    let entries = vec![
        FileEntry::new(kept.clone(), 6),
        FileEntry::new(vanished.clone(), 6),
        FileEntry::new(copy.clone(), 6),
    ];

    let finder = DuplicateFinder::new(FinderConfig::default().with_dry_run(true));
    let mut out = Vec::new();
    let summary = finder.run(entries, FsRemover, &mut out).unwrap();

    assert_eq!(summary.scanned, Tally { count: 2, total_size: 12 });
    assert_eq!(summary.deleted.count, 1);
    assert_eq!(summary.hash_failures, 1);
    assert!(!summary.is_clean());

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("vanished.txt"));
    assert!(text.contains(&copy.display().to_string()));
}

/// A directory opens like a file on Linux but fails on the first read.
#[cfg(target_os = "linux")]
#[test]
fn test_read_failure_after_open_is_dropped() {
    use dupesweep::scanner::HashAlgorithm;

    let dir = tempdir().unwrap();
    let nested = dir.path().join("not_a_file");
    fs::create_dir(&nested).unwrap();
    let real = dir.path().join("real.txt");
    fs::write(&real, b"x").unwrap();

    for algorithm in [HashAlgorithm::Blake3, HashAlgorithm::Sha256] {
        let entries = vec![FileEntry::new(nested.clone(), 1), FileEntry::new(real.clone(), 1)];
        let config = FinderConfig::default()
            .with_dry_run(true)
            .with_algorithm(algorithm);
        let mut out = Vec::new();
        let summary = DuplicateFinder::new(config)
            .run(entries, FsRemover, &mut out)
            .unwrap();

        assert_eq!(summary.scanned, Tally { count: 1, total_size: 1 });
        assert_eq!(summary.deleted, Tally::default());
        assert_eq!(summary.hash_failures, 1);
        assert!(out.is_empty());
    }
    assert!(nested.is_dir());
}

#[test]
fn test_only_unreadable_files() {
    let entries: Vec<_> = (0..5)
        .map(|i| FileEntry::new(PathBuf::from(format!("/nonexistent/dupesweep/{i}")), 1))
        .collect();

    let summary = DuplicateFinder::with_defaults()
        .run(entries, FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.scanned, Tally::default());
    assert_eq!(summary.deleted, Tally::default());
    assert_eq!(summary.hash_failures, 5);
}

#[test]
fn test_failed_removal_counts_as_deleted() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("one");
    let second = dir.path().join("nested/one");
    fs::create_dir_all(second.parent().unwrap()).unwrap();
    fs::write(&first, b"dup!").unwrap();
    fs::write(&second, b"dup!").unwrap();

    let summary = DuplicateFinder::with_defaults()
        .scan_directory(dir.path(), Refusing { attempts: 0 }, std::io::sink())
        .unwrap();

    assert_eq!(summary.deleted, Tally { count: 1, total_size: 4 });
    assert_eq!(summary.delete_failures, 1);
    assert!(first.exists());
    assert!(second.exists());
}

#[test]
fn test_file_removed_by_someone_else_before_deletion() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("bb/a");
    fs::create_dir_all(b.parent().unwrap()).unwrap();
    fs::write(&a, b"same").unwrap();
    fs::write(&b, b"same").unwrap();

    /// Deletes the file itself, then asks the filesystem to delete it again.
    struct Racing;
    impl Remover for Racing {
        fn remove(&mut self, path: &Path) -> Result<(), DeleteError> {
            fs::remove_file(path).unwrap();
            FsRemover.remove(path)
        }
    }

    let summary = DuplicateFinder::with_defaults()
        .scan_directory(dir.path(), Racing, std::io::sink())
        .unwrap();

    assert_eq!(summary.deleted.count, 1);
    assert_eq!(summary.delete_failures, 1);
    assert!(a.exists());
    assert!(!b.exists());
}
