use dupesweep::actions::FsRemover;
use dupesweep::duplicates::{DuplicateFinder, FinderConfig, Tally};
use std::fs::{self, File};
use std::io::Write;
use tempfile::tempdir;

fn write_file(path: &std::path::Path, content: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    File::create(path).unwrap().write_all(content).unwrap();
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let finder = DuplicateFinder::with_defaults();

    let summary = finder
        .scan_directory(dir.path(), FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.scanned, Tally::default());
    assert_eq!(summary.deleted, Tally::default());
}

#[test]
fn test_longer_directory_copy_is_deleted() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("a/x.txt"), b"same content");
    write_file(&dir.path().join("ab/x.txt"), b"same content");
    write_file(&dir.path().join("a/y.txt"), b"unique");

    let finder = DuplicateFinder::with_defaults();
    let mut out = Vec::new();
    let summary = finder
        .scan_directory(dir.path(), FsRemover, &mut out)
        .unwrap();

    assert_eq!(summary.scanned.count, 3);
    assert_eq!(summary.scanned.total_size, 12 + 12 + 6);
    assert_eq!(summary.deleted, Tally { count: 1, total_size: 12 });
    assert_eq!(summary.unique_files, 2);

    assert!(dir.path().join("a/x.txt").exists());
    assert!(dir.path().join("a/y.txt").exists());
    assert!(!dir.path().join("ab/x.txt").exists());

    let text = String::from_utf8(out).unwrap();
    assert_eq!(
        text,
        format!("Deleting file: {}\n", dir.path().join("ab/x.txt").display())
    );
}

#[test]
fn test_all_distinct_files_are_kept() {
    let dir = tempdir().unwrap();
    for i in 0..25 {
        write_file(
            &dir.path().join(format!("d{}/f{}.bin", i % 4, i)),
            format!("content number {i}").as_bytes(),
        );
    }

    let finder = DuplicateFinder::with_defaults();
    let summary = finder
        .scan_directory(dir.path(), FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.scanned.count, 25);
    assert_eq!(summary.deleted.count, 0);
    assert_eq!(summary.unique_files, 25);
    assert_eq!(fs::read_dir(dir.path().join("d0")).unwrap().count(), 7);
}

#[test]
fn test_k_copies_leave_exactly_one() {
    let dir = tempdir().unwrap();
    let nested = ["x", "x/yy", "x/yy/zzz", "x/yy/zzz/wwww", "q"];
    for sub in nested {
        write_file(&dir.path().join(sub).join("copy.dat"), b"payload");
    }

    let finder = DuplicateFinder::new(FinderConfig::default().with_workers(3));
    let summary = finder
        .scan_directory(dir.path(), FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.scanned.count, 5);
    assert_eq!(summary.deleted, Tally { count: 4, total_size: 28 });
    assert_eq!(summary.unique_files, 1);

    let survivors: Vec<_> = nested
        .iter()
        .filter(|sub| dir.path().join(sub).join("copy.dat").exists())
        .collect();
    // "x" and "q" tie on directory length; the shorter string always survives
    assert_eq!(survivors.len(), 1);
    assert!(*survivors[0] == "x" || *survivors[0] == "q");
}

#[test]
fn test_string_length_not_depth_decides() {
    let dir = tempdir().unwrap();
    write_file(&dir.path().join("abcdefgh/file"), b"twin");
    write_file(&dir.path().join("a/b/file"), b"twin");

    let finder = DuplicateFinder::with_defaults();
    let summary = finder
        .scan_directory(dir.path(), FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.deleted.count, 1);
    assert!(dir.path().join("a/b/file").exists());
    assert!(!dir.path().join("abcdefgh/file").exists());
}

#[test]
fn test_empty_files_are_duplicates_of_each_other() {
    let dir = tempdir().unwrap();
    File::create(dir.path().join("empty1")).unwrap();
    write_file(&dir.path().join("sub/empty2"), b"");

    let finder = DuplicateFinder::with_defaults();
    let summary = finder
        .scan_directory(dir.path(), FsRemover, std::io::sink())
        .unwrap();

    assert_eq!(summary.scanned, Tally { count: 2, total_size: 0 });
    assert_eq!(summary.deleted, Tally { count: 1, total_size: 0 });
    assert!(dir.path().join("empty1").exists());
    assert!(!dir.path().join("sub/empty2").exists());
}

#[test]
fn test_single_worker_matches_many_workers() {
    let build = || {
        let dir = tempdir().unwrap();
        for i in 0..30 {
            write_file(
                &dir.path().join(format!("level{}/item{}", i % 3, i)),
                format!("group {}", i % 6).as_bytes(),
            );
        }
        dir
    };

    let mut results = Vec::new();
    for workers in [1, 8] {
        let dir = build();
        let finder = DuplicateFinder::new(
            FinderConfig::default()
                .with_workers(workers)
                .with_dry_run(true),
        );
        results.push(
            finder
                .scan_directory(dir.path(), FsRemover, std::io::sink())
                .unwrap(),
        );
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[0].scanned.count, 30);
    assert_eq!(results[0].deleted.count, 24);
}
