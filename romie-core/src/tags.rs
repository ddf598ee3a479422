//! Tag vocabularies derived from GoodTools-style filename markers.
//!
//! Each tag serializes as its display label (e.g. `"USA/Europe"`,
//! `"Bung Fix"`) so the persisted catalog stays human-readable. Labels that
//! are not recognized on load fall back to the default variant.

use serde::{Deserialize, Serialize};

/// Release region(s) encoded in a `(..)` filename tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "Japan/USA/Europe")]
    JapanUsaEurope,
    #[serde(rename = "USA/Europe")]
    UsaEurope,
    #[serde(rename = "Japan/USA")]
    JapanUsa,
    #[serde(rename = "Japan/Europe")]
    JapanEurope,
    England,
    #[serde(rename = "Hong Kong")]
    HongKong,
    Sweden,
    Netherlands,
    #[serde(rename = "USA")]
    Usa,
    Europe,
    Japan,
    World,
    Australia,
    Brazil,
    France,
    Germany,
    Spain,
    Italy,
    China,
    Korea,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Region {
    pub const ALL: &'static [Region] = &[
        Self::JapanUsaEurope,
        Self::UsaEurope,
        Self::JapanUsa,
        Self::JapanEurope,
        Self::England,
        Self::HongKong,
        Self::Sweden,
        Self::Netherlands,
        Self::Usa,
        Self::Europe,
        Self::Japan,
        Self::World,
        Self::Australia,
        Self::Brazil,
        Self::France,
        Self::Germany,
        Self::Spain,
        Self::Italy,
        Self::China,
        Self::Korea,
        Self::Unknown,
    ];

    /// Returns the display label, which is also the persisted form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::JapanUsaEurope => "Japan/USA/Europe",
            Self::UsaEurope => "USA/Europe",
            Self::JapanUsa => "Japan/USA",
            Self::JapanEurope => "Japan/Europe",
            Self::England => "England",
            Self::HongKong => "Hong Kong",
            Self::Sweden => "Sweden",
            Self::Netherlands => "Netherlands",
            Self::Usa => "USA",
            Self::Europe => "Europe",
            Self::Japan => "Japan",
            Self::World => "World",
            Self::Australia => "Australia",
            Self::Brazil => "Brazil",
            Self::France => "France",
            Self::Germany => "Germany",
            Self::Spain => "Spain",
            Self::Italy => "Italy",
            Self::China => "China",
            Self::Korea => "Korea",
            Self::Unknown => "Unknown",
        }
    }

    /// True if the label mentions the given region name (e.g. `"USA"`
    /// matches both `Usa` and `JapanUsa`).
    pub fn mentions(&self, needle: &str) -> bool {
        self.name().contains(needle)
    }
}

/// Dump quality from `[..]` filename tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    /// `[!]` verified good dump.
    Verified,
    /// `[f]` fixed from a bad dump.
    Fixed,
    /// `[o]` overdump.
    Overdump,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Quality {
    pub const ALL: &'static [Quality] =
        &[Self::Verified, Self::Fixed, Self::Overdump, Self::Unknown];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Fixed => "Fixed",
            Self::Overdump => "Overdump",
            Self::Unknown => "Unknown",
        }
    }
}

/// Whether the dump has been altered (hack, trainer, pirate release).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PatchStatus {
    Hack,
    Trainer,
    Pirate,
    #[default]
    #[serde(other)]
    No,
}

impl PatchStatus {
    pub const ALL: &'static [PatchStatus] = &[Self::Hack, Self::Trainer, Self::Pirate, Self::No];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Hack => "Hack",
            Self::Trainer => "Trainer",
            Self::Pirate => "Pirate",
            Self::No => "No",
        }
    }

    pub fn is_patched(&self) -> bool {
        !matches!(self, Self::No)
    }
}

/// Target hardware of a Game Boy dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HardwareVariant {
    /// `[C]` Game Boy Color enhanced.
    Color,
    /// `[S]` Super Game Boy enhanced.
    Super,
    /// `[BF]` fixed for Bung copiers.
    #[serde(rename = "Bung Fix")]
    BungFix,
    #[default]
    #[serde(other)]
    Classic,
}

impl HardwareVariant {
    pub const ALL: &'static [HardwareVariant] =
        &[Self::Color, Self::Super, Self::BungFix, Self::Classic];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::Super => "Super",
            Self::BungFix => "Bung Fix",
            Self::Classic => "Classic",
        }
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.name())
                }
            }
        )*
    };
}

display_by_name!(Region, Quality, PatchStatus, HardwareVariant);
