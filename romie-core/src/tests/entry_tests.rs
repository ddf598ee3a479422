use super::*;

#[test]
fn test_link_extension_plain() {
    assert_eq!(
        link_extension("https://dl.example/roms/Tetris%20(W)%20[!].zip"),
        Some("zip")
    );
}

#[test]
fn test_link_extension_ignores_query() {
    assert_eq!(
        link_extension("https://img.example/covers/tetris.jpg?w=300#top"),
        Some("jpg")
    );
}

#[test]
fn test_link_extension_missing() {
    assert_eq!(link_extension(""), None);
    assert_eq!(link_extension("https://dl.example/download/"), None);
    assert_eq!(link_extension("https://dl.example/.hidden"), None);
}

#[test]
fn test_link_extension_skips_host() {
    assert_eq!(link_extension("https://dl.example"), None);
    assert_eq!(link_extension("https://dl.example?file=a.zip"), None);
    assert_eq!(link_extension("https://dl.example/a.zip"), Some("zip"));
    assert_eq!(derive_filename("Tetris", "https://dl.example"), "Tetris");
}

#[test]
fn test_derive_filename_degrades_to_title() {
    assert_eq!(derive_filename("Tetris", ""), "Tetris");
    assert_eq!(derive_filename("Tetris", "https://x/Tetris (W) [!].gb"), "Tetris.gb");
}

#[test]
fn test_from_resolved_classifies_link() {
    let entry = CatalogEntry::from_resolved(
        "Pokemon Yellow",
        "https://site.example/roms/gameboy/pokemon-yellow/",
        "https://dl.example/Pokemon%20Yellow%20(UE)%20[C][!].zip",
        "https://img.example/pokemon-yellow.png",
    );
    assert_eq!(entry.filename, "Pokemon Yellow.zip");
    assert_eq!(entry.image_filename(), "Pokemon Yellow.png");
    assert_eq!(entry.region, Region::UsaEurope);
    assert_eq!(entry.quality, Quality::Verified);
    assert_eq!(entry.hardware, HardwareVariant::Color);
    assert_eq!(entry.patch, PatchStatus::No);
    assert!(entry.is_resolved());
}

#[test]
fn test_unresolved_entry_is_degraded() {
    let entry = CatalogEntry::from_resolved("Mystery", "https://site.example/m/", "", "");
    assert!(!entry.is_resolved());
    assert_eq!(entry.filename, "Mystery");
    assert_eq!(entry.region, Region::Unknown);
    assert_eq!(entry.quality, Quality::Unknown);
}

#[test]
fn test_json_field_names() {
    let entry = CatalogEntry::from_resolved(
        "Tetris",
        "https://site.example/tetris/",
        "https://dl.example/Tetris (W) [!].zip",
        "https://img.example/tetris.jpg",
    );
    let value = serde_json::to_value(&entry).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "download_link",
            "filename",
            "gameboy",
            "hack",
            "image",
            "link",
            "quality",
            "region",
            "title"
        ]
    );
    assert_eq!(obj["region"], "World");
    assert_eq!(obj["gameboy"], "Classic");
    assert_eq!(obj["hack"], "No");
}

#[test]
fn test_unknown_labels_fall_back_to_defaults() {
    let json = r#"{
        "title": "Odd",
        "link": "l",
        "download_link": "d",
        "filename": "Odd",
        "image": "",
        "region": "Atlantis",
        "quality": "Mint",
        "hack": "Maybe",
        "gameboy": "Pocket"
    }"#;
    let entry: CatalogEntry = serde_json::from_str(json).unwrap();
    assert_eq!(entry.region, Region::Unknown);
    assert_eq!(entry.quality, Quality::Unknown);
    assert_eq!(entry.patch, PatchStatus::No);
    assert_eq!(entry.hardware, HardwareVariant::Classic);
}

#[test]
fn test_bung_fix_label_round_trips() {
    let json = serde_json::to_string(&HardwareVariant::BungFix).unwrap();
    assert_eq!(json, "\"Bung Fix\"");
    let back: HardwareVariant = serde_json::from_str(&json).unwrap();
    assert_eq!(back, HardwareVariant::BungFix);
}
