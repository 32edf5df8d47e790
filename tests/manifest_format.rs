//! Golden test for the on-disk manifest layout.

use insta::assert_snapshot;
use notemirror::infrastructure::repositories::to_json_string;
use notemirror::{JsonManifestRepository, Manifest, ManifestEntry, ManifestRepository};

fn sample() -> Manifest {
    let mut manifest = Manifest::new();
    manifest.set(
        "notes/b.md",
        ManifestEntry::new(1_700_000_000_500, Vec::new()),
    );
    manifest.set(
        "a.md",
        ManifestEntry::new(
            1_700_000_000_000,
            vec!["image/pic-1.png".to_string(), "image/shared.png".to_string()],
        ),
    );
    manifest
}

#[test]
fn test_golden_manifest_json() {
    let json = to_json_string(&sample()).unwrap();

    assert_snapshot!(json.trim_end(), @r###"
    {
      "version": 1,
      "files": {
        "a.md": {
          "mtime_ms": 1700000000000,
          "assets": [
            "image/pic-1.png",
            "image/shared.png"
          ]
        },
        "notes/b.md": {
          "mtime_ms": 1700000000500,
          "assets": []
        }
      }
    }
    "###);
}

#[test]
fn test_saved_manifest_loads_back_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state/manifest.json");
    let repo = JsonManifestRepository::new();

    repo.save(&sample(), &path).unwrap();

    assert_eq!(repo.load(&path).unwrap(), sample());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        to_json_string(&sample()).unwrap()
    );
}

#[test]
fn test_entries_without_assets_field_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    std::fs::write(
        &path,
        r#"{"version":1,"files":{"a.md":{"mtime_ms":5}}}"#,
    )
    .unwrap();

    let manifest = JsonManifestRepository::new().load(&path).unwrap();

    assert_eq!(manifest.get("a.md").unwrap().mtime_ms(), 5);
    assert!(manifest.get("a.md").unwrap().assets().is_empty());
}
