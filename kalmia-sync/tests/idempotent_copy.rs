use std::cell::Cell;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::{set_file_mtime, FileTime};
use kalmia_assets::{AssetSource, MemoryAssets};
use kalmia_core::Manifest;
use kalmia_sync::{ContentDigest, Destination, LocalFs, SyncError, Syncer, WriteResult};
use tempfile::TempDir;

fn scenario() -> MemoryAssets {
    MemoryAssets::from_files([
        ("a.json", "{\"x\":1}"),
        ("sub/one.txt", "hi"),
        ("sub/nested/two.txt", "yo"),
    ])
    .expect("tree")
}

fn scenario_manifest() -> Manifest {
    Manifest::from_entries(["a.json", "sub/"]).expect("manifest")
}

/// Local filesystem that counts bytes written.
#[derive(Default)]
struct CountingFs {
    writes: Cell<usize>,
    bytes: Cell<usize>,
}

impl Destination for CountingFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        LocalFs.create_dir_all(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        LocalFs.read(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.writes.set(self.writes.get() + 1);
        self.bytes.set(self.bytes.get() + contents.len());
        LocalFs.write(path, contents)
    }
}

fn relative_files(root: &Path) -> BTreeSet<String> {
    fn visit(root: &Path, dir: &Path, out: &mut BTreeSet<String>) {
        for entry in fs::read_dir(dir).expect("read_dir") {
            let path = entry.expect("entry").path();
            if path.is_dir() {
                visit(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).expect("under root");
                let parts: Vec<String> = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                out.insert(parts.join("/"));
            }
        }
    }
    let mut out = BTreeSet::new();
    visit(root, root, &mut out);
    out
}

fn backdate(paths: &[PathBuf]) -> FileTime {
    let old = FileTime::from_system_time(SystemTime::now() - Duration::from_secs(24 * 60 * 60));
    for p in paths {
        set_file_mtime(p, old).expect("set mtime");
    }
    old
}

#[test]
fn example_scenario_first_run_then_noop() {
    let out = TempDir::new().expect("out");
    let dest = CountingFs::default();
    let syncer = Syncer::with_destination(scenario(), &dest);

    let first = syncer.copy_manifest(&scenario_manifest(), out.path()).expect("first");
    assert_eq!(first.changed(), 3);
    assert_eq!(fs::read_to_string(out.path().join("a.json")).unwrap(), "{\"x\":1}");
    assert_eq!(
        fs::read_to_string(out.path().join("sub").join("one.txt")).unwrap(),
        "hi"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("sub").join("nested").join("two.txt")).unwrap(),
        "yo"
    );

    dest.writes.set(0);
    dest.bytes.set(0);
    let second = syncer.copy_manifest(&scenario_manifest(), out.path()).expect("second");
    assert!(second.is_noop());
    assert_eq!(dest.writes.get(), 0, "second run must not write");
    assert_eq!(dest.bytes.get(), 0);
}

#[test]
fn noop_run_preserves_mtimes() {
    let out = TempDir::new().expect("out");
    let syncer = Syncer::new(scenario());
    let report = syncer.copy_manifest(&scenario_manifest(), out.path()).expect("first");

    let paths: Vec<PathBuf> = report.writes.iter().map(|w| w.path().to_path_buf()).collect();
    let old = backdate(&paths);

    syncer.copy_manifest(&scenario_manifest(), out.path()).expect("second");
    for p in &paths {
        let mtime = FileTime::from_last_modification_time(&fs::metadata(p).unwrap());
        assert_eq!(mtime, old, "{} was rewritten", p.display());
    }
}

#[test]
fn copied_content_hashes_match_source() {
    let out = TempDir::new().expect("out");
    let source = scenario();
    Syncer::new(&source)
        .copy_manifest(&scenario_manifest(), out.path())
        .expect("copy");

    for rel in source.walk("").expect("walk") {
        let dest = out.path().join(&rel);
        let expected = ContentDigest::of(&source.read_file(&rel).unwrap());
        assert_eq!(ContentDigest::of(&fs::read(&dest).unwrap()), expected, "{rel}");
    }
}

#[test]
fn subtree_copy_has_exactly_the_source_files() {
    let out = TempDir::new().expect("out");
    let source = scenario();
    Syncer::new(&source)
        .copy_directory("sub", &out.path().join("sub"))
        .expect("copy");

    let expected: BTreeSet<String> = source.walk("sub").unwrap().into_iter().collect();
    assert_eq!(relative_files(out.path()), expected);
}

#[test]
fn mismatched_file_is_replaced_and_others_untouched() {
    let out = TempDir::new().expect("out");
    let syncer = Syncer::new(scenario());
    let report = syncer.copy_manifest(&scenario_manifest(), out.path()).expect("first");
    let paths: Vec<PathBuf> = report.writes.iter().map(|w| w.path().to_path_buf()).collect();
    let old = backdate(&paths);

    let edited = out.path().join("sub").join("one.txt");
    fs::write(&edited, "local edit").unwrap();

    let second = syncer.copy_manifest(&scenario_manifest(), out.path()).expect("second");
    let written: Vec<&Path> = second
        .writes
        .iter()
        .filter(|w| matches!(w, WriteResult::Written { .. }))
        .map(|w| w.path())
        .collect();
    assert_eq!(written, [edited.as_path()]);
    assert_eq!(fs::read_to_string(&edited).unwrap(), "hi");

    let untouched = out.path().join("a.json");
    let mtime = FileTime::from_last_modification_time(&fs::metadata(&untouched).unwrap());
    assert_eq!(mtime, old);
}

#[test]
fn missing_source_performs_no_writes() {
    let out = TempDir::new().expect("out");
    let dest = CountingFs::default();
    let syncer = Syncer::with_destination(scenario(), &dest);

    let err = syncer
        .copy_file("ghost.json", &out.path().join("ghost.json"))
        .unwrap_err();
    assert!(matches!(err, SyncError::Source(_)));

    let err = syncer
        .copy_directory("ghost", &out.path().join("ghost"))
        .unwrap_err();
    assert!(matches!(err, SyncError::Source(_)));

    assert_eq!(dest.writes.get(), 0);
    assert!(fs::read_dir(out.path()).unwrap().next().is_none());
}

#[test]
fn manifest_fails_fast_on_second_entry() {
    let source = MemoryAssets::from_files([
        ("a.json", "1"),
        ("b.json", "2"),
        ("c.json", "3"),
    ])
    .unwrap();
    let manifest = Manifest::from_entries(["a.json", "b.json", "c.json"]).unwrap();

    let out = TempDir::new().expect("out");
    // A non-empty directory where `b.json` should go cannot be opened as a file.
    fs::create_dir_all(out.path().join("b.json").join("blocker")).unwrap();

    let dest = CountingFs::default();
    let err = Syncer::with_destination(&source, &dest)
        .copy_manifest(&manifest, out.path())
        .unwrap_err();

    assert_eq!(err.failed_entry().map(|e| e.to_string()).as_deref(), Some("b.json"));
    assert!(err.is_destination_write(), "got {err:?}");
    assert!(out.path().join("a.json").is_file());
    assert!(!out.path().join("c.json").exists(), "third entry must not be attempted");
    assert_eq!(dest.writes.get(), 2, "a.json written, b.json attempted");
}

#[test]
fn unreadable_destination_routes_to_overwrite() {
    // A destination that reports every read as failed still gets written,
    // rather than surfacing the read failure.
    struct BlindFs;

    impl Destination for BlindFs {
        fn create_dir_all(&self, path: &Path) -> io::Result<()> {
            LocalFs.create_dir_all(path)
        }

        fn read(&self, _path: &Path) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
            LocalFs.write(path, contents)
        }
    }

    let out = TempDir::new().expect("out");
    let path = out.path().join("a.json");
    fs::write(&path, "{\"x\":1}").unwrap();

    let result = Syncer::with_destination(scenario(), BlindFs)
        .copy_file("a.json", &path)
        .expect("overwrite");
    assert!(matches!(result, WriteResult::Written { .. }));
}

#[test]
fn parallel_syncs_into_disjoint_roots() {
    let source = scenario();
    let roots: Vec<TempDir> = (0..4).map(|_| TempDir::new().unwrap()).collect();
    std::thread::scope(|s| {
        for root in &roots {
            let source = &source;
            s.spawn(move || {
                Syncer::new(source)
                    .copy_manifest(&scenario_manifest(), root.path())
                    .expect("parallel copy");
            });
        }
    });
    for root in &roots {
        assert_eq!(relative_files(root.path()).len(), 3);
    }
}
