// SPDX-License-Identifier: MIT

use std::collections::BTreeSet;
use std::io::{Read, Seek, SeekFrom};

use petrifs::prelude::*;
use time::OffsetDateTime;

const BYTES_A: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const BYTES_B: &[u8] = &[0x89, b'P', b'N', b'G', 0xff];

fn epoch() -> FsConfig {
    FsConfig::with_mod_time(OffsetDateTime::UNIX_EPOCH)
}

fn scenario_fs() -> AssetFs<MemAccessor> {
    let acc = MemAccessor::new()
        .with("data/foo.txt", "hi")
        .with("data/img/a.png", BYTES_A)
        .with("data/img/b.png", BYTES_B);
    AssetFs::from_catalog(acc, &epoch()).expect("build failed")
}

fn child_set(entries: &[FileInfo]) -> BTreeSet<(String, bool)> {
    entries.iter().map(|e| (e.name.clone(), e.dir)).collect()
}

fn read_all(fs: &AssetFs<MemAccessor>, name: &str) -> Vec<u8> {
    let mut h = fs.open(name).expect("open failed");
    let mut out = Vec::new();
    h.read_to_end(&mut out).expect("read failed");
    out
}

#[test]
fn test_scenario_listing() {
    let fs = scenario_fs();
    let trie = fs.trie();

    assert_eq!(trie.child_names("data").unwrap(), ["foo.txt", "img"]);
    assert_eq!(trie.child_names("data/img").unwrap(), ["a.png", "b.png"]);
    assert_eq!(
        trie.list_children("data/foo.txt").unwrap_err(),
        TrieError::NotADirectory
    );
    assert_eq!(fs.open("missing/path").unwrap_err(), VfsError::NotExist);
}

#[test]
fn test_open_leaf_roundtrip() {
    let fs = scenario_fs();
    for (name, content) in [
        ("data/foo.txt", &b"hi"[..]),
        ("data/img/a.png", BYTES_A),
        ("data/img/b.png", BYTES_B),
    ] {
        let h = fs.open(name).unwrap();
        assert_eq!(h.stat().size, content.len() as u64, "{name}");
        assert_eq!(read_all(&fs, name), content, "{name}");
    }
}

#[test]
fn test_open_dir_readdir_all() {
    let fs = scenario_fs();
    let mut h = fs.open("data").unwrap();
    let got = child_set(h.readdir(0).unwrap());
    let want: BTreeSet<_> = [("foo.txt".to_string(), false), ("img".to_string(), true)]
        .into_iter()
        .collect();
    assert_eq!(got, want);
}

#[test]
fn test_readdir_pagination_visits_each_child_once() {
    let mut acc = MemAccessor::new();
    for i in 0..7 {
        acc.insert(format!("dir/f{i}.txt"), vec![i as u8]);
    }
    acc.insert("dir/sub/x", "x");
    let fs = AssetFs::from_catalog(acc, &epoch()).unwrap();

    let mut d = fs.open("dir").unwrap().into_dir().unwrap();
    let total = d.entries().len();
    assert_eq!(total, 8);

    let mut seen = BTreeSet::new();
    for _ in 0..total {
        let page = d.readdir(1);
        assert_eq!(page.len(), 1);
        assert!(seen.insert(page[0].name.clone()), "{} seen twice", page[0].name);
    }
    assert!(d.readdir(1).is_empty());
    assert!(d.is_exhausted());
    assert_eq!(d.next(), None);
}

#[test]
fn test_top_level_children_match_first_segments() {
    let names = ["a/x", "a/y/z", "b", "c/d/e/f", "c/g"];
    let mut acc = MemAccessor::new();
    for n in names {
        acc.insert(n, n.as_bytes());
    }
    let fs = AssetFs::from_catalog(acc, &epoch()).unwrap();

    let got: BTreeSet<String> = fs.read_dir("").unwrap().into_iter().map(|e| e.name).collect();
    let want: BTreeSet<String> = names
        .iter()
        .filter_map(|n| n.split('/').next())
        .map(str::to_string)
        .collect();
    assert_eq!(got, want);
}

#[test]
fn test_prefix_mount_matches_sub_trie() {
    let fs = scenario_fs();
    let mounted = AssetFs::from_catalog(
        fs.accessor().clone(),
        &epoch().set_prefix("/data/"),
    )
    .unwrap();

    for name in ["", "foo.txt", "img", "img/a.png", "img/b.png", "nope", "img/nope"] {
        let direct = fs.open(&format!("data/{name}"));
        let via_prefix = mounted.open(name);
        match (direct, via_prefix) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.stat(), b.stat(), "{name}");
            }
            (Err(a), Err(b)) => assert_eq!(a, b, "{name}"),
            (a, b) => panic!("{name}: {a:?} vs {b:?}"),
        }
    }
    assert_eq!(read_all(&mounted, "/img/a.png"), BYTES_A);
}

#[test]
fn test_conflicts_abort_construction() {
    for names in [["a", "a/b"], ["a/b", "a"]] {
        let mut acc = MemAccessor::new();
        for n in names {
            acc.insert(n, "x");
        }
        let err = AssetFs::builder(acc).names(names).build().unwrap_err();
        assert!(matches!(err, TrieError::PathConflict(_)), "{names:?}: {err:?}");
    }

    let err = AssetFs::builder(MemAccessor::new().with("a", "x"))
        .names(["a", "a"])
        .build()
        .unwrap_err();
    assert_eq!(err, TrieError::DuplicateAsset("a".into()));
}

#[test]
fn test_invalid_names_rejected() {
    for bad in ["", "/a", "a//b", "a/", "a/../b", "./a"] {
        let err = AssetFs::builder(MemAccessor::new())
            .name(bad)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrieError::InvalidName(_)), "{bad:?}: {err:?}");
    }
}

#[test]
fn test_file_handle_offsets() {
    let fs = scenario_fs();
    let mut f = fs.open("data/img/a.png").unwrap().into_file().unwrap();
    let size = f.size();
    let mut buf = [0u8; 4];
    assert_eq!(f.read_at(size, &mut buf), 0);
    assert_eq!(f.read_at(size - 2, &mut buf), 2);
    assert!(f.seek(SeekFrom::Current(-1)).is_err());
    assert_eq!(f.seek(SeekFrom::Start(4)).unwrap(), 4);
    f.read_exact(&mut buf).unwrap();
    assert_eq!(buf, BYTES_A[4..8]);
}

#[test]
fn test_metadata_and_default_timestamp() {
    let modified = OffsetDateTime::from_unix_timestamp(1_600_000_000).unwrap();
    let mut acc = MemAccessor::new();
    acc.insert_with_meta("with_meta.txt", "abc", AssetMeta::new(0, modified).set_mode(0o600));
    acc.insert("plain.txt", "abcd");

    let fs = AssetFs::from_catalog(acc, &epoch()).unwrap();

    let info = fs.stat("with_meta.txt").unwrap();
    assert_eq!(info.modified, Some(modified));
    assert_eq!(info.size, 3);
    assert_eq!(info.perm(), 0o600);

    let info = fs.open("plain.txt").unwrap().stat();
    assert_eq!(info.modified, Some(OffsetDateTime::UNIX_EPOCH));
    assert_eq!(info.mode, DEFAULT_MODE);

    let root = fs.stat("/").unwrap();
    assert!(root.dir);
    assert_eq!(root.mode & DIR_MODE_FLAG, DIR_MODE_FLAG);
}

#[test]
fn test_error_display_chain() {
    let err = AssetError::from(VfsError::Access(AccessError::Read("bad header".into())));
    let text = err.to_string();
    assert!(text.contains("bad header"), "{text}");
    assert!(text.contains("caused by"), "{text}");
}

#[cfg(feature = "gzip")]
mod gzip {
    use super::*;
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    fn gz(data: &[u8]) -> &'static [u8] {
        let mut enc = GzEncoder::new(Vec::new(), Compression::best());
        enc.write_all(data).unwrap();
        Box::leak(enc.finish().unwrap().into_boxed_slice())
    }

    fn table() -> &'static [EmbeddedAsset] {
        let index = b"<!doctype html><title>petrify</title>".repeat(20);
        let rows = vec![
            EmbeddedAsset {
                name: "web/index.html",
                data: gz(&index),
                compressed: true,
                size: index.len() as u64,
                mode: 0o644,
                mod_time: 1_700_000_000,
            },
            EmbeddedAsset {
                name: "web/app.js",
                data: b"console.log(1)",
                compressed: false,
                size: 14,
                mode: 0o644,
                mod_time: 1_700_000_000,
            },
            EmbeddedAsset {
                name: "web/broken.css",
                data: b"\x1f\x8b not really",
                compressed: true,
                size: 9,
                mode: 0o644,
                mod_time: 0,
            },
        ];
        Box::leak(rows.into_boxed_slice())
    }

    #[test]
    fn test_static_table_serves_compressed_and_plain() {
        let fs = AssetFs::from_catalog(StaticAccessor::new(table()), &epoch().set_prefix("web"))
            .unwrap();

        let mut body = String::new();
        fs.open("index.html").unwrap().read_to_string(&mut body).unwrap();
        assert_eq!(body, "<!doctype html><title>petrify</title>".repeat(20));

        let info = fs.stat("index.html").unwrap();
        assert_eq!(info.size, body.len() as u64);
        assert_eq!(info.modified.map(|t| t.unix_timestamp()), Some(1_700_000_000));

        assert_eq!(&*fs.read("app.js").unwrap(), b"console.log(1)");
        assert_eq!(fs.names(), ["app.js", "broken.css", "index.html"]);
    }

    #[test]
    fn test_corrupt_gzip_is_access_error() {
        let fs = AssetFs::from_catalog(StaticAccessor::new(table()), &epoch()).unwrap();
        let err = fs.open("web/broken.css").unwrap_err();
        assert!(matches!(err, VfsError::Access(AccessError::Read(_))), "{err:?}");
        assert!(!err.is_not_exist());
    }

    #[test]
    fn test_preload_surfaces_corrupt_gzip() {
        let err = AssetFs::builder(StaticAccessor::new(table()))
            .catalog_names()
            .preload(true)
            .build()
            .unwrap_err();
        assert!(matches!(err, TrieError::Access(AccessError::Read(_))), "{err:?}");
    }
}
