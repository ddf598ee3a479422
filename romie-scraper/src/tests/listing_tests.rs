use super::*;

const SELECTOR: &str = ".results a";

fn page() -> Url {
    Url::parse("https://site.example/roms/gameboy/page/2/").unwrap()
}

const LISTING: &str = r#"
<html><body>
  <nav><a href="/">Home</a><a href="/roms/">All ROMs</a></nav>
  <table class="results">
    <tr><td><a href="/roms/gameboy/tetris/">Tetris</a></td></tr>
    <tr><td><a href="https://site.example/roms/gameboy/pokemon-red/">
        Pokemon   Red
    </a></td></tr>
    <tr><td><a href="/roms/gameboy/kirby/" title="Kirby's Dream Land"><img src="k.png"></a></td></tr>
    <tr><td><a name="anchor-without-link">Not a game</a></td></tr>
  </table>
</body></html>
"#;

#[test]
fn test_extract_listings() {
    let items = extract_listings(LISTING, &page(), SELECTOR).unwrap();
    assert_eq!(
        items,
        vec![
            ListingItem {
                title: "Tetris".to_string(),
                link: "https://site.example/roms/gameboy/tetris/".to_string(),
            },
            ListingItem {
                title: "Pokemon Red".to_string(),
                link: "https://site.example/roms/gameboy/pokemon-red/".to_string(),
            },
            ListingItem {
                title: "Kirby's Dream Land".to_string(),
                link: "https://site.example/roms/gameboy/kirby/".to_string(),
            },
        ]
    );
}

#[test]
fn test_count_matches_extraction() {
    let extracted = extract_listings(LISTING, &page(), SELECTOR).unwrap().len();
    let counted = count_on_page(LISTING, SELECTOR).unwrap();
    assert_eq!(counted, 3);
    assert_eq!(extracted, counted);
}

#[test]
fn test_empty_listing() {
    let html = "<html><body><div class=\"results\"></div></body></html>";
    assert!(extract_listings(html, &page(), SELECTOR).unwrap().is_empty());
    assert_eq!(count_on_page(html, SELECTOR).unwrap(), 0);
}

#[test]
fn test_navigation_links_are_not_listings() {
    let items = extract_listings(LISTING, &page(), SELECTOR).unwrap();
    assert!(items.iter().all(|i| i.link.contains("/roms/gameboy/")));
}
