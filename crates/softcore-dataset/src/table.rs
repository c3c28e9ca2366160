//! Table identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// A table of the host's reference database.
///
/// The string form mirrors where the host keeps the table
/// (`templates.items`, `config.ragfair`, ...). Declaration order is the
/// serialization order of a [`Dataset`](crate::Dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableId {
    /// Item templates, keyed by template id
    #[serde(rename = "templates.items")]
    Items,
    /// Handbook categories and item base prices
    #[serde(rename = "templates.handbook")]
    Handbook,
    /// Flea market base prices, keyed by template id
    #[serde(rename = "templates.prices")]
    Prices,
    /// Starting profile templates per edition
    #[serde(rename = "templates.profiles")]
    Profiles,
    /// Quest templates, keyed by quest id
    #[serde(rename = "templates.quests")]
    Quests,
    /// Hideout areas and their construction stages
    #[serde(rename = "hideout.areas")]
    HideoutAreas,
    /// Hideout production and scav case recipes
    #[serde(rename = "hideout.production")]
    HideoutProduction,
    /// Hideout global settings
    #[serde(rename = "hideout.settings")]
    HideoutSettings,
    /// Global game constants
    #[serde(rename = "globals")]
    Globals,
    /// Trader records (base, assort, barter schemes)
    #[serde(rename = "traders")]
    Traders,
    /// Localization strings
    #[serde(rename = "locales")]
    Locales,
    /// Bot type definitions
    #[serde(rename = "bots")]
    Bots,
    /// Server-side flea market configuration
    #[serde(rename = "config.ragfair")]
    RagfairConfig,
    /// Server-side trader configuration
    #[serde(rename = "config.trader")]
    TraderConfig,
    /// Server-side hideout configuration
    #[serde(rename = "config.hideout")]
    HideoutConfig,
    /// Server-side bot configuration
    #[serde(rename = "config.bot")]
    BotConfig,
    /// Server-side scav case configuration
    #[serde(rename = "config.scavcase")]
    ScavCaseConfig,
}

impl TableId {
    /// Every known table, in declaration order
    pub const ALL: [TableId; 17] = [
        TableId::Items,
        TableId::Handbook,
        TableId::Prices,
        TableId::Profiles,
        TableId::Quests,
        TableId::HideoutAreas,
        TableId::HideoutProduction,
        TableId::HideoutSettings,
        TableId::Globals,
        TableId::Traders,
        TableId::Locales,
        TableId::Bots,
        TableId::RagfairConfig,
        TableId::TraderConfig,
        TableId::HideoutConfig,
        TableId::BotConfig,
        TableId::ScavCaseConfig,
    ];

    /// Dotted name of the table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TableId::Items => "templates.items",
            TableId::Handbook => "templates.handbook",
            TableId::Prices => "templates.prices",
            TableId::Profiles => "templates.profiles",
            TableId::Quests => "templates.quests",
            TableId::HideoutAreas => "hideout.areas",
            TableId::HideoutProduction => "hideout.production",
            TableId::HideoutSettings => "hideout.settings",
            TableId::Globals => "globals",
            TableId::Traders => "traders",
            TableId::Locales => "locales",
            TableId::Bots => "bots",
            TableId::RagfairConfig => "config.ragfair",
            TableId::TraderConfig => "config.trader",
            TableId::HideoutConfig => "config.hideout",
            TableId::BotConfig => "config.bot",
            TableId::ScavCaseConfig => "config.scavcase",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableId {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TableId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DatasetError::UnknownTable(s.to_string()))
    }
}
