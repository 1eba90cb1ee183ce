use criterion::{Criterion, black_box, criterion_group, criterion_main};
use loadout_fs::{IgnoreSet, Fingerprinter};
use std::fs;
use tempfile::tempdir;

fn populate(root: &std::path::Path, dirs: usize, files_per_dir: usize) {
    for d in 0..dirs {
        let dir = root.join(format!("dir{d}"));
        fs::create_dir_all(&dir).unwrap();
        for f in 0..files_per_dir {
            fs::write(dir.join(format!("file{f}.cfg")), format!("bind {d} {f}\n").repeat(32)).unwrap();
        }
    }
}

fn folder_benchmark(c: &mut Criterion) {
    c.bench_function("fingerprint::folder (400 files)", |b| {
        let dir = tempdir().unwrap();
        populate(dir.path(), 20, 20);
        let fingerprinter = Fingerprinter::default();

        b.iter(|| {
            fingerprinter.folder(black_box(dir.path())).unwrap();
        })
    });
}

fn subset_benchmark(c: &mut Criterion) {
    c.bench_function("fingerprint::subset (400 files, superset target)", |b| {
        let reference = tempdir().unwrap();
        let target = tempdir().unwrap();
        populate(reference.path(), 20, 20);
        populate(target.path(), 40, 20);
        let fingerprinter = Fingerprinter::new(IgnoreSet::default());

        b.iter(|| {
            let _ = fingerprinter.subset(black_box(reference.path()), black_box(target.path()));
        })
    });
}

criterion_group!(benches, folder_benchmark, subset_benchmark);
criterion_main!(benches);
