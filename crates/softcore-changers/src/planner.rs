//! The SoftcoreRedux section plan

use softcore_config::Configuration;
use softcore_engine::{Section, SectionPlanner};

use crate::changers::{
    crafting, hideout, insurance, market, scav_case, secure_containers, stash, traders, tweaks,
};

/// Plans every SoftcoreRedux section in host order.
///
/// Traders and crafting come first so later sections (hideout containers,
/// scav case rewards) see their edits; the flea market sections run after
/// the economy toggle that may disable them.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftcorePlanner;

impl SoftcorePlanner {
    /// Create planner
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SectionPlanner for SoftcorePlanner {
    fn plan(&self, config: &Configuration) -> Vec<Section> {
        let sections = vec![
            traders::section(config),
            crafting::section(config),
            crafting::faster_crafting_section(config),
            insurance::section(config),
            hideout::containers_section(config),
            hideout::section(config),
            scav_case::section(config),
            stash::section(config),
            secure_containers::section(config),
            market::section(config),
            market::price_rebalance_section(config),
            market::pacifist_flea_market_section(config),
            market::barter_economy_section(config),
            market::other_flea_market_section(config),
            tweaks::section(config),
        ];
        tracing::debug!(
            sections = sections.len(),
            enabled = sections.iter().filter(|section| section.is_enabled()).count(),
            "section plan built"
        );
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn plan_order() {
        let sections = SoftcorePlanner::new().plan(&Configuration::default());
        let names: Vec<&str> = sections.iter().map(Section::name).collect();
        assert_eq!(
            names,
            vec![
                "traderChanges",
                "craftingChanges",
                "fasterCraftingTime",
                "insuranceChanges",
                "hideoutContainers",
                "hideoutOptions",
                "scavCaseOptions",
                "stashOptions",
                "secureContainersOptions",
                "economyOptions",
                "priceRebalance",
                "pacifistFleaMarket",
                "barterEconomy",
                "otherFleaMarketChanges",
                "otherTweaks",
            ]
        );
    }

    #[test]
    fn only_flea_sections_are_marketplace() {
        let sections = SoftcorePlanner::new().plan(&Configuration::default());
        let marketplace: Vec<&str> = sections
            .iter()
            .filter(|section| section.is_marketplace())
            .map(Section::name)
            .collect();
        assert_eq!(
            marketplace,
            vec!["priceRebalance", "pacifistFleaMarket", "barterEconomy", "otherFleaMarketChanges"]
        );
    }

    #[test]
    fn defaults_disable_everything() {
        let sections = SoftcorePlanner::new().plan(&Configuration::default());
        assert!(sections.iter().all(|section| !section.is_enabled()));
    }
}
