use std::fs;

use zego_compiler::SourceKind;

use super::module_loader::load_module_sources;

#[test]
fn inline_text_wins() {
    let map = load_module_sources(Some("ignored.zego".as_ref()), Some("package p")).unwrap();
    assert_eq!(map.len(), 1);

    let source = map.iter().next().unwrap();
    assert_eq!(source.kind, &SourceKind::OneLiner);
    assert_eq!(source.name(), "<query>");
    assert_eq!(source.as_str(), "package p");
}

#[test]
fn single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("policy.zego");
    fs::write(&path, "package p\nallow := true\n").unwrap();

    let map = load_module_sources(Some(&path), None).unwrap();
    let source = map.iter().next().unwrap();
    assert_eq!(source.name(), path.to_string_lossy());
    assert_eq!(source.as_str(), "package p\nallow := true\n");
}

#[test]
fn directory_is_sorted_and_filtered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b.zego"), "package b").unwrap();
    fs::write(dir.path().join("a.zego"), "package a").unwrap();
    fs::write(dir.path().join("notes.txt"), "not a module").unwrap();
    fs::create_dir(dir.path().join("nested.zego")).unwrap();

    let map = load_module_sources(Some(dir.path()), None).unwrap();
    let contents: Vec<_> = map.iter().map(|s| s.as_str()).collect();
    assert_eq!(contents, ["package a", "package b"]);
}

#[test]
fn empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("readme.md"), "").unwrap();

    let err = load_module_sources(Some(dir.path()), None).unwrap_err();
    assert!(err.starts_with("no .zego files found in"), "{err}");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.zego");

    let err = load_module_sources(Some(&path), None).unwrap_err();
    assert!(err.starts_with("failed to read '"), "{err}");
}

#[test]
fn no_input() {
    let err = load_module_sources(None, None).unwrap_err();
    insta::assert_snapshot!(err, @"module is required: use positional argument or -q/--query");
}
