use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;
use uuid_file_namer::{CopyJob, CopyOptions, UuidScheme};

#[test]
fn random_scheme_copies_each_file_under_a_new_uuid() {
    let a = TempDir::new().expect("tempdir");
    let out = TempDir::new().expect("tempdir");
    fs::write(a.path().join("cat.png"), b"meow").expect("cat");
    fs::write(a.path().join("dog.png"), b"woof").expect("dog");
    let sources = vec![
        a.path().join("cat.png").to_string_lossy().into_owned(),
        a.path().join("dog.png").to_string_lossy().into_owned(),
    ];

    let report = CopyJob::new(
        sources.clone(),
        out.path().to_string_lossy(),
        CopyOptions::with_scheme(UuidScheme::Random),
    )
    .start()
    .join()
    .expect("job");
    assert!(report.is_success());

    let mut stems = HashSet::new();
    for entry in fs::read_dir(out.path()).expect("read out") {
        let name = entry.expect("entry").file_name().to_string_lossy().into_owned();
        let (stem, ext) = name.rsplit_once('.').expect("extension");
        assert_eq!(stem.len(), 36);
        assert!(uuid::Uuid::parse_str(stem).is_ok());
        assert_eq!(ext, "png");
        stems.insert(stem.to_string());
    }
    assert_eq!(stems.len(), 2);

    // 入力順に処理される
    assert_eq!(report.copied[0].source, sources[0]);
    assert_eq!(report.copied[1].source, sources[1]);
    assert_eq!(fs::read(&report.copied[0].destination).expect("copy"), b"meow");
    assert_eq!(fs::read(&report.copied[1].destination).expect("copy"), b"woof");
    assert_eq!(fs::read(&sources[0]).expect("source"), b"meow");
}

#[test]
fn name_based_schemes_repeat_across_invocations() {
    let src = TempDir::new().expect("tempdir");
    fs::write(src.path().join("doc.txt"), b"doc").expect("doc");
    let sources = vec![src.path().join("doc.txt").to_string_lossy().into_owned()];

    for scheme in [UuidScheme::NameBasedMd5, UuidScheme::NameBasedSha1] {
        let first = TempDir::new().expect("tempdir");
        let second = TempDir::new().expect("tempdir");
        let run = |dir: &TempDir| {
            CopyJob::new(sources.clone(), dir.path().to_string_lossy(), CopyOptions::with_scheme(scheme))
                .start()
                .join()
                .expect("job")
        };
        let a = run(&first);
        let b = run(&second);
        let name = |d: &str| d.rsplit('/').next().unwrap_or(d).to_string();
        assert_eq!(name(&a.copied[0].destination), name(&b.copied[0].destination));
    }
}
