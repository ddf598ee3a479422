//! Classifier for GoodTools filename markers.
//!
//! Download links on the listing site end in the original GoodTools
//! filename, which encodes metadata in tags:
//! ```text
//! Tetris (JUE) (V1.1) [!].zip
//! Pokemon - Yellow Version (UE) [C][!].zip
//! ```
//!
//! Four rule tables are applied independently. Within a table the rules are
//! checked in order and the first substring match wins, so compound codes
//! must come before the single-letter codes they contain. The order of each
//! table is part of the classifier's contract and is pinned by tests.

use crate::tags::{HardwareVariant, PatchStatus, Quality, Region};

/// Tags derived from one download link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub region: Region,
    pub quality: Quality,
    pub patch: PatchStatus,
    pub hardware: HardwareVariant,
}

/// Region codes in priority order.
pub const REGION_RULES: &[(&str, Region)] = &[
    ("(JUE)", Region::JapanUsaEurope),
    ("(UE)", Region::UsaEurope),
    ("(U)(E)", Region::UsaEurope),
    ("(JU)", Region::JapanUsa),
    ("(J)(U)", Region::JapanUsa),
    ("(JE)", Region::JapanEurope),
    ("(UK)", Region::England),
    ("(HK)", Region::HongKong),
    ("(Sw)", Region::Sweden),
    ("(NL)", Region::Netherlands),
    ("(U)", Region::Usa),
    ("(E)", Region::Europe),
    ("(J)", Region::Japan),
    ("(W)", Region::World),
    ("(A)", Region::Australia),
    ("(B)", Region::Brazil),
    ("(F)", Region::France),
    ("(G)", Region::Germany),
    ("(S)", Region::Spain),
    ("(I)", Region::Italy),
    ("(C)", Region::China),
    ("(K)", Region::Korea),
];

/// Dump quality markers in priority order. `[f` and `[o` also cover the
/// numbered forms (`[f1]`, `[o2]`).
pub const QUALITY_RULES: &[(&str, Quality)] = &[
    ("[!]", Quality::Verified),
    ("[f", Quality::Fixed),
    ("[o", Quality::Overdump),
];

pub const PATCH_RULES: &[(&str, PatchStatus)] = &[
    ("[h", PatchStatus::Hack),
    ("[t", PatchStatus::Trainer),
    ("[p", PatchStatus::Pirate),
];

pub const HARDWARE_RULES: &[(&str, HardwareVariant)] = &[
    ("[C]", HardwareVariant::Color),
    ("[S]", HardwareVariant::Super),
    ("[BF]", HardwareVariant::BungFix),
];

/// Classify a resolved download link.
///
/// ```
/// use romie_core::classify::classify;
/// use romie_core::{HardwareVariant, Quality, Region};
///
/// let tags = classify("https://cdn.example/Tetris%20DX%20(JUE)%20[C][!].zip");
/// assert_eq!(tags.region, Region::JapanUsaEurope);
/// assert_eq!(tags.quality, Quality::Verified);
/// assert_eq!(tags.hardware, HardwareVariant::Color);
/// ```
pub fn classify(link: &str) -> Classification {
    Classification {
        region: first_match(link, REGION_RULES),
        quality: first_match(link, QUALITY_RULES),
        patch: first_match(link, PATCH_RULES),
        hardware: first_match(link, HARDWARE_RULES),
    }
}

fn first_match<T: Copy + Default>(link: &str, rules: &[(&str, T)]) -> T {
    rules
        .iter()
        .find(|(pattern, _)| link.contains(pattern))
        .map(|&(_, tag)| tag)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/classify_tests.rs"]
mod tests;
