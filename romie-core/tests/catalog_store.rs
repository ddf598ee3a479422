use romie_core::catalog::{self, Catalog, CatalogError};
use romie_core::{CatalogEntry, HardwareVariant, PatchStatus, Quality, Region};
use tempfile::TempDir;

fn sample_catalog() -> Catalog {
    let mut c = Catalog::new();
    c.push(CatalogEntry::from_resolved(
        "Tetris",
        "https://site.example/roms/gameboy/tetris/",
        "https://dl.example/Tetris%20(JUE)%20(V1.1)%20[!].zip",
        "https://img.example/tetris.jpg",
    ));
    c.push(CatalogEntry::from_resolved(
        "Pokemon Gold",
        "https://site.example/roms/gameboy/pokemon-gold/",
        "https://dl.example/Pokemon%20Gold%20(U)%20[C][!].zip",
        "https://img.example/pokemon-gold.png",
    ));
    c.push(CatalogEntry::from_resolved(
        "Broken Listing",
        "https://site.example/roms/gameboy/broken/",
        "",
        "",
    ));
    c
}

#[test]
fn persist_then_load_round_trips() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    let original = sample_catalog();

    catalog::persist(&path, &original).unwrap();
    let loaded = catalog::load(&path).unwrap();

    assert_eq!(loaded, original);
    assert_eq!(loaded.entries()[1].hardware, HardwareVariant::Color);
    assert_eq!(loaded.entries()[0].region, Region::JapanUsaEurope);
}

#[test]
fn persist_creates_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(".romie").join("catalog.json");
    assert!(!catalog::exists(&path));

    catalog::persist(&path, &sample_catalog()).unwrap();

    assert!(catalog::exists(&path));
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn persisted_file_is_a_json_array() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    catalog::persist(&path, &sample_catalog()).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let items = raw.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["quality"], "Verified");
    assert_eq!(items[2]["download_link"], "");
    assert_eq!(items[2]["filename"], "Broken Listing");
}

#[test]
fn load_accepts_handwritten_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"title":"Alleyway","link":"https://site.example/alleyway/",
            "download_link":"https://dl.example/Alleyway (W) [BF].zip",
            "filename":"Alleyway.zip","image":"https://img.example/a.jpg",
            "region":"World","quality":"Unknown","hack":"No","gameboy":"Bung Fix"}]"#,
    )
    .unwrap();

    let loaded = catalog::load(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    let e = &loaded.entries()[0];
    assert_eq!(e.hardware, HardwareVariant::BungFix);
    assert_eq!(e.quality, Quality::Unknown);
    assert_eq!(e.patch, PatchStatus::No);
}

#[test]
fn load_rejects_invalid_json() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("catalog.json");
    std::fs::write(&path, "{ not an array").unwrap();

    let err = catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Json { .. }));
}

#[test]
fn load_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = catalog::load(&tmp.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}

#[test]
fn verify_count_detects_mismatch() {
    let c = sample_catalog();
    assert!(c.verify_count(3).is_ok());
    match c.verify_count(4) {
        Err(CatalogError::CountMismatch { expected, actual }) => {
            assert_eq!(expected, 4);
            assert_eq!(actual, 3);
        }
        other => panic!("expected count mismatch, got {other:?}"),
    }
    assert_eq!(c.unresolved_count(), 1);
}
