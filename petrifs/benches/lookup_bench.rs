use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::io::Read;

use petrifs::prelude::*;
use time::OffsetDateTime;

criterion_group!(benches, trie_bench, vfs_bench);
criterion_main!(benches);

fn bench_accessor() -> (MemAccessor, Vec<String>) {
    let mut acc = MemAccessor::new();
    let mut names = Vec::new();
    for i in 0..2000 {
        let name = format!("static/d{}/s{}/asset_{i:04}.bin", i % 16, i % 64);
        acc.insert(name.clone(), vec![(i % 251) as u8; 1024]);
        names.push(name);
    }
    (acc, names)
}

pub fn trie_bench(c: &mut Criterion) {
    let (acc, names) = bench_accessor();
    let config = FsConfig::with_mod_time(OffsetDateTime::UNIX_EPOCH);

    c.bench_function("trie_build_2000", |b| {
        b.iter(|| AssetTrie::build(black_box(&names), &acc, &config).expect("build failed"));
    });

    let trie = AssetTrie::build(&names, &acc, &config).expect("build failed");

    c.bench_function("trie_lookup_leaf", |b| {
        b.iter(|| {
            for name in names.iter().step_by(97) {
                black_box(trie.lookup(black_box(name)).expect("lookup failed"));
            }
        });
    });

    c.bench_function("trie_list_children", |b| {
        b.iter(|| black_box(trie.list_children("static/d3/s35").expect("list failed")));
    });
}

pub fn vfs_bench(c: &mut Criterion) {
    let (acc, _) = bench_accessor();
    let fs = AssetFs::builder(acc)
        .catalog_names()
        .prefix("static")
        .default_mod_time(OffsetDateTime::UNIX_EPOCH)
        .build()
        .expect("build failed");

    let mut buf = Vec::with_capacity(1024);
    c.bench_function("vfs_open_read", |b| {
        b.iter(|| {
            buf.clear();
            let mut h = fs.open(black_box("/d7/s7/asset_0007.bin")).expect("open failed");
            h.read_to_end(&mut buf).expect("read failed");
        });
    });

    c.bench_function("vfs_open_dir_paginate", |b| {
        b.iter(|| {
            let mut h = fs.open(black_box("d0")).expect("open failed");
            while !h.readdir(8).expect("readdir failed").is_empty() {}
        });
    });
}
