//! `economyOptions` and the marketplace-dependent flea market sections
//!
//! `economyOptions` itself only carries the "disable the flea market" switch.
//! The four sub-sections are flagged [`Section::marketplace`], so the
//! orchestrator skips all of them when the flea market is switched off.

use serde_json::{json, Value};
use softcore_config::{
    model::{CountRange, EconomyToggle},
    Configuration,
};
use softcore_dataset::{ptr, TableId};
use softcore_engine::{number, FnUnit, MutationUnit, Section, UnitContext, UnitError};

use super::SetEntry;
use crate::assets;
use crate::ids::{base_classes, items};
use crate::tables;

/// Player level no one reaches
const FLEA_CLOSED_LEVEL: u32 = 99;
const MIN_ROUBLE_COST_TO_BECOME_BARTER: u32 = 100;

const MIN_USER_LEVEL: &str = "/config/RagFair/minUserLevel";
const CUSTOM_BLACKLIST: &str = "/dynamic/blacklist/custom";

/// Build the `economyOptions` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let economy = config.economy_options();
    Section::new("economyOptions", economy.enabled).unit(
        economy.disable_flea_market_completely,
        SetEntry::new("disableFleaMarketCompletely", TableId::Globals, MIN_USER_LEVEL, FLEA_CLOSED_LEVEL),
    )
}

/// Build the `priceRebalance` section
#[must_use]
pub fn price_rebalance_section(config: &Configuration) -> Section {
    let economy = config.economy_options();
    let rebalance = &economy.price_rebalance;
    Section::new("priceRebalance", economy.enabled && rebalance.enabled)
        .marketplace()
        .unit(
            rebalance.item_fixes,
            FnUnit::new("itemFixes", &[TableId::Handbook], item_fixes),
        )
        .unit(true, FnUnit::new("priceSync", &[TableId::Prices], price_sync))
}

/// Build the `pacifistFleaMarket` section
#[must_use]
pub fn pacifist_flea_market_section(config: &Configuration) -> Section {
    let economy = config.economy_options();
    let pacifist = &economy.pacifist_flea_market;
    Section::new("pacifistFleaMarket", economy.enabled && pacifist.enabled)
        .marketplace()
        .unit(
            true,
            FnUnit::new("pacifistFleaMarket", &[TableId::RagfairConfig], pacifist_flea_market),
        )
        .unit(
            pacifist.whitelist.enabled,
            AllowOnRagfair::new("whitelist", &assets::FLEA_ITEM_WHITELIST, &pacifist.whitelist),
        )
        .unit(
            pacifist.quest_keys.enabled,
            AllowOnRagfair::new("questKeys", &assets::QUEST_KEYS, &pacifist.quest_keys),
        )
        .unit(
            pacifist.marked_keys.enabled,
            AllowOnRagfair::new("markedKeys", &assets::MARKED_KEYS, &pacifist.marked_keys),
        )
}

/// Build the `barterEconomy` section
#[must_use]
pub fn barter_economy_section(config: &Configuration) -> Section {
    let economy = config.economy_options();
    let barter = &economy.barter_economy;
    let count_range = |range: CountRange| json!({"min": range.min, "max": range.max});
    Section::new("barterEconomy", economy.enabled && barter.enabled)
        .marketplace()
        .unit(
            true,
            FnUnit::new("barterEconomy", &[TableId::RagfairConfig, TableId::Prices], barter_economy),
        )
        .unit(
            true,
            SetEntry::new(
                "cashOffersPercentage",
                TableId::RagfairConfig,
                "/dynamic/barter/chancePercent",
                100_u32.saturating_sub(barter.cash_offers_percentage),
            ),
        )
        .unit(
            true,
            SetEntry::new(
                "barterPriceVariance",
                TableId::RagfairConfig,
                "/dynamic/barter/priceRangeVariancePercent",
                barter.barter_price_variance,
            ),
        )
        .unit(
            true,
            SetEntry::new(
                "itemCountMax",
                TableId::RagfairConfig,
                "/dynamic/barter/itemCountMax",
                barter.item_count_max,
            ),
        )
        .unit(
            true,
            SetEntry::new(
                "offerItemCount",
                TableId::RagfairConfig,
                "/dynamic/offerItemCount",
                count_range(barter.offer_item_count),
            ),
        )
        .unit(
            true,
            SetEntry::new(
                "nonStackableCount",
                TableId::RagfairConfig,
                "/dynamic/nonStackableCount",
                count_range(barter.non_stackable_count),
            ),
        )
        .unit(
            barter.unban_bitcoins_for_barters,
            FnUnit::new(
                "unbanBitcoinsForBarters",
                &[TableId::RagfairConfig, TableId::Items],
                unban_bitcoins,
            ),
        )
}

/// Build the `otherFleaMarketChanges` section
#[must_use]
pub fn other_flea_market_section(config: &Configuration) -> Section {
    let economy = config.economy_options();
    let other = &economy.other_flea_market_changes;
    Section::new("otherFleaMarketChanges", economy.enabled && other.enabled)
        .marketplace()
        .unit(
            other.selling_on_flea,
            FnUnit::new("sellingOnFlea", &[TableId::RagfairConfig], selling_on_flea),
        )
        .unit(
            other.only_found_in_raid_items_allowed_for_barters,
            SetEntry::new(
                "onlyFoundInRaidItemsAllowedForBarters",
                TableId::Globals,
                "/config/RagFair/isOnlyFoundInRaidAllowed",
                true,
            ),
        )
        .unit(
            other.flea_pristine_items,
            FnUnit::new("fleaPristineItems", &[TableId::RagfairConfig], pristine_items),
        )
        .unit(
            true,
            FleaPricesIncreased {
                multiplier: other.flea_prices_increased,
            },
        )
        .unit(
            true,
            SetEntry::new(
                "fleaMarketOpenAtLevel",
                TableId::Globals,
                MIN_USER_LEVEL,
                other.flea_market_open_at_level,
            ),
        )
}

fn item_fixes(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (template_id, price) in assets::PRICE_FIXES {
        match tables::handbook_index(ctx, template_id) {
            Some(index) => {
                ctx.set(TableId::Handbook, &ptr!("Items", index, "Price"), price)?;
            }
            None => ctx.skip(format!("item {template_id} not found in handbook")),
        }
    }
    Ok(())
}

/// Flea base prices follow the handbook
fn price_sync(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let Some(handbook) = ctx.lookup(TableId::Handbook, "/Items").and_then(Value::as_array) else {
        return Ok(());
    };
    let prices: Vec<(String, Value)> = handbook
        .iter()
        .filter_map(|entry| Some((tables::str_field(entry, "Id")?.to_string(), entry.get("Price")?.clone())))
        .collect();

    let Some(Value::Object(table)) = ctx.require_table(TableId::Prices)? else {
        return Ok(());
    };
    for (template_id, price) in prices {
        table.insert(template_id, price);
    }
    Ok(())
}

/// Blacklists everything outside the whitelisted handbook categories, and quest items
fn pacifist_flea_market(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let Some(handbook) = ctx.lookup(TableId::Handbook, "/Items").and_then(Value::as_array) else {
        return Ok(());
    };
    let banned: Vec<Value> = handbook
        .iter()
        .filter_map(|entry| {
            let template_id = tables::str_field(entry, "Id")?;
            let category = tables::str_field(entry, "ParentId").unwrap_or_default();
            let quest_item = tables::item(ctx, template_id)
                .and_then(|item| item.pointer("/_props/QuestItem"))
                .and_then(Value::as_bool)
                == Some(true);
            (!assets::FLEA_HANDBOOK_WHITELIST.contains(&category) || quest_item).then(|| Value::from(template_id))
        })
        .collect();

    if ctx.lookup(TableId::RagfairConfig, "/dynamic/blacklist").is_none() {
        return Ok(());
    }
    let added = ctx.union(TableId::RagfairConfig, CUSTOM_BLACKLIST, &banned)?;
    ctx.debug(format!("{added} items blacklisted from the flea market"));
    Ok(())
}

/// Drop `template_id` from the custom flea blacklist, if it is there
fn unblacklist(ctx: &mut UnitContext<'_>, template_id: &str) -> Result<(), UnitError> {
    if ctx.get(TableId::RagfairConfig, CUSTOM_BLACKLIST).is_none() {
        return Ok(());
    }
    if let Some(Value::Array(list)) = ctx.require(TableId::RagfairConfig, CUSTOM_BLACKLIST)? {
        list.retain(|id| id.as_str() != Some(template_id));
    }
    Ok(())
}

/// Makes a fixed list of items sellable again at a scaled price
struct AllowOnRagfair {
    name: &'static str,
    items: &'static [&'static str],
    multiplier: f64,
}

impl AllowOnRagfair {
    fn new(name: &'static str, items: &'static [&'static str], options: &EconomyToggle) -> Self {
        Self {
            name,
            items,
            multiplier: options.price_multiplier,
        }
    }
}

impl MutationUnit for AllowOnRagfair {
    fn name(&self) -> &str {
        self.name
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Items, TableId::Prices, TableId::RagfairConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        for &template_id in self.items {
            if tables::item(ctx, template_id).is_none() {
                ctx.skip(format!("item {template_id} not found, skipping"));
                continue;
            }
            ctx.scale_rounded(TableId::Prices, &ptr!(template_id), self.multiplier)?;
            tables::assign(
                ctx,
                TableId::Items,
                &ptr!(template_id, "_props", "CanSellOnRagfair"),
                true,
            )?;
            unblacklist(ctx, template_id)?;
        }
        Ok(())
    }
}

/// Flea offers request barter goods instead of cash
fn barter_economy(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.lookup(TableId::RagfairConfig, "/dynamic/barter").is_none() {
        return Ok(());
    }
    let blacklist: Vec<&str> = assets::ITEM_CLASSES
        .into_iter()
        .filter(|class| !assets::BARTER_REQUEST_CLASSES.contains(class))
        .collect();
    ctx.set(
        TableId::RagfairConfig,
        "/dynamic/barter/itemTypeBlacklist",
        tables::strings(blacklist.iter().copied()),
    )?;
    ctx.set(
        TableId::RagfairConfig,
        "/dynamic/barter/minRoubleCostToBecomeBarter",
        MIN_ROUBLE_COST_TO_BECOME_BARTER,
    )?;

    if ctx.require_table(TableId::Prices)?.is_none() {
        return Ok(());
    }
    let mut unrequestable = Vec::new();
    for template_id in tables::item_ids(ctx) {
        if tables::is_of_base_class(ctx, &template_id, &blacklist) {
            continue;
        }
        let Some(item) = tables::item(ctx, &template_id) else {
            continue;
        };
        if tables::str_field(item, "_parent") == Some(base_classes::MONEY) {
            continue;
        }
        let flag = |name: &str| item.pointer(&format!("/_props/{name}")).and_then(Value::as_bool);
        let sellable = flag("CanSellOnRagfair") == Some(true);
        if flag("QuestItem") == Some(true) || !sellable {
            unrequestable.push(template_id);
        } else if assets::HOST_FLEA_BLACKLIST.contains(&template_id.as_str()) {
            ctx.warn(format!(
                "item {template_id} can be bought on flea, host blacklist unlockers do not mix with barter economy"
            ));
        }
    }
    for template_id in unrequestable {
        ctx.set(TableId::Prices, &ptr!(template_id), 0)?;
    }
    for (template_id, price) in assets::BARTER_REQUEST_PRICES {
        ctx.set(TableId::Prices, &ptr!(template_id), price)?;
    }
    Ok(())
}

fn unban_bitcoins(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    unblacklist(ctx, items::BITCOIN)?;
    tables::assign(
        ctx,
        TableId::Items,
        &ptr!(items::BITCOIN, "_props", "CanSellOnRagfair"),
        true,
    )?;
    Ok(())
}

fn selling_on_flea(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    tables::assign(ctx, TableId::RagfairConfig, "/sell/chance/base", 0)?;
    tables::assign(ctx, TableId::RagfairConfig, "/sell/chance/maxSellChancePercent", 0)?;
    Ok(())
}

fn pristine_items(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let conditions = "/dynamic/condition";
    if ctx.lookup(TableId::RagfairConfig, conditions).is_none() {
        return Ok(());
    }
    for class in tables::keys(ctx, TableId::RagfairConfig, conditions) {
        ctx.set(
            TableId::RagfairConfig,
            &format!("{conditions}{}", ptr!(class, "conditionChance")),
            0,
        )?;
    }
    Ok(())
}

struct FleaPricesIncreased {
    multiplier: f64,
}

impl MutationUnit for FleaPricesIncreased {
    fn name(&self) -> &str {
        "fleaPricesIncreased"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::RagfairConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        for bound in ["min", "max"] {
            let pointer = format!("/dynamic/priceRanges/default/{bound}");
            let scaled = ctx.scale(TableId::RagfairConfig, &pointer, self.multiplier)?;
            if let Some(value) = scaled {
                ctx.debug(format!("{pointer} = {}", number(value)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use softcore_dataset::Dataset;
    use softcore_engine::{MemorySink, Reporter, Status};
    use std::collections::BTreeSet;
    use std::sync::Arc;

    fn economy() -> Configuration {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        config
    }

    fn run(section: &Section, data: &mut Dataset) -> Arc<MemorySink> {
        let sink = Arc::new(MemorySink::new());
        section.apply(data, &Reporter::new(Arc::clone(&sink)));
        sink
    }

    fn custom_blacklist(data: &Dataset) -> BTreeSet<String> {
        data.get(TableId::RagfairConfig, CUSTOM_BLACKLIST)
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[test]
    fn marketplace_sections_are_flagged() {
        let config = economy();
        assert!(!section(&config).is_marketplace());
        assert!(price_rebalance_section(&config).is_marketplace());
        assert!(pacifist_flea_market_section(&config).is_marketplace());
        assert!(barter_economy_section(&config).is_marketplace());
        assert!(other_flea_market_section(&config).is_marketplace());
    }

    #[test]
    fn disable_flea_market_closes_it() {
        let mut config = economy();
        config.economy_options.disable_flea_market_completely = true;
        let mut data = Dataset::new().with_table(TableId::Globals, json!({"config": {"RagFair": {"minUserLevel": 15}}}));

        run(&section(&config), &mut data);

        assert_eq!(data.get(TableId::Globals, MIN_USER_LEVEL), Some(&json!(99)));
    }

    #[test]
    fn price_sync_runs_without_item_fixes() {
        let mut config = economy();
        config.economy_options.price_rebalance.enabled = true;
        let mut data = Dataset::new()
            .with_table(
                TableId::Handbook,
                json!({"Items": [{"Id": items::LEDX, "Price": 900_000}, {"Id": "bolts", "Price": 8000}]}),
            )
            .with_table(TableId::Prices, json!({items::LEDX: 1_200_000, "nuts": 5}));

        let sink = run(&price_rebalance_section(&config), &mut data);

        assert_eq!(sink.outcome("priceRebalance", "itemFixes").unwrap().status, Status::Skipped);
        assert_eq!(sink.outcome("priceRebalance", "priceSync").unwrap().status, Status::Applied);
        assert_eq!(
            data.table(TableId::Prices),
            Some(&json!({items::LEDX: 900_000, "bolts": 8000, "nuts": 5}))
        );
        assert_eq!(data.get(TableId::Handbook, "/Items/0/Price"), Some(&json!(900_000)));
    }

    #[test]
    fn item_fixes_feed_the_price_sync() {
        let mut config = economy();
        config.economy_options.price_rebalance.enabled = true;
        config.economy_options.price_rebalance.item_fixes = true;
        let mut data = Dataset::new()
            .with_table(TableId::Handbook, json!({"Items": [{"Id": items::LEDX, "Price": 900_000}]}))
            .with_table(TableId::Prices, json!({}));

        let sink = run(&price_rebalance_section(&config), &mut data);

        assert_eq!(data.get(TableId::Prices, &ptr!(items::LEDX)), Some(&json!(1_300_000)));
        assert!(sink.contains(&format!("item {} not found in handbook", items::OPHTHALMOSCOPE)));
    }

    fn flea_dataset() -> Dataset {
        Dataset::new()
            .with_table(
                TableId::Handbook,
                json!({"Items": [
                    {"Id": items::MOONSHINE, "ParentId": "5b47574386f77428ca22b2f4", "Price": 30000},
                    {"Id": "rifle", "ParentId": "weapons", "Price": 50000},
                    {"Id": "folder", "ParentId": "5b47574386f77428ca22b2f4", "Price": 1}
                ]}),
            )
            .with_table(
                TableId::Items,
                json!({
                    (items::MOONSHINE): {"_props": {"CanSellOnRagfair": false}},
                    "rifle": {"_props": {}},
                    "folder": {"_props": {"QuestItem": true}}
                }),
            )
            .with_table(TableId::Prices, json!({items::MOONSHINE: 30000}))
            .with_table(
                TableId::RagfairConfig,
                json!({"dynamic": {"blacklist": {"custom": [items::MOONSHINE]}}}),
            )
    }

    #[test]
    fn pacifist_flea_market_blacklists_and_whitelists() {
        let mut config = economy();
        let pacifist = &mut config.economy_options.pacifist_flea_market;
        pacifist.enabled = true;
        pacifist.whitelist.enabled = true;
        pacifist.whitelist.price_multiplier = 1.5;
        let mut data = flea_dataset();

        let sink = run(&pacifist_flea_market_section(&config), &mut data);
        run(&pacifist_flea_market_section(&config), &mut data);

        assert_eq!(custom_blacklist(&data), BTreeSet::from(["rifle".to_string(), "folder".to_string()]));
        assert_eq!(data.get(TableId::Prices, &ptr!(items::MOONSHINE)), Some(&json!(45000)));
        assert_eq!(
            data.get(TableId::Items, &ptr!(items::MOONSHINE, "_props", "CanSellOnRagfair")),
            Some(&json!(true))
        );
        assert!(sink.contains(&format!("item {} not found, skipping", items::PURIFIED_WATER)));
    }

    #[test]
    fn barter_economy_zeroes_unrequestable_prices() {
        let mut config = economy();
        config.economy_options.barter_economy.enabled = true;
        config.economy_options.barter_economy.cash_offers_percentage = 30;
        let mut data = Dataset::new()
            .with_table(
                TableId::Items,
                json!({
                    "food": {"_id": "food", "_parent": "", "_type": "Node"},
                    "rifles": {"_id": "rifles", "_parent": "", "_type": "Node"},
                    "bread": {"_parent": "food", "_type": "Item", "_props": {"CanSellOnRagfair": true}},
                    "crackers": {"_parent": "food", "_type": "Item", "_props": {"CanSellOnRagfair": false}},
                    "roubles": {"_parent": base_classes::MONEY, "_type": "Item", "_props": {}}
                }),
            )
            .with_table(TableId::Prices, json!({"bread": 100, "crackers": 200, "roubles": 1}))
            .with_table(
                TableId::RagfairConfig,
                json!({"dynamic": {"barter": {"chancePercent": 50}, "offerItemCount": {"min": 7, "max": 30}}}),
            );

        run(&barter_economy_section(&config), &mut data);

        assert_eq!(data.get(TableId::Prices, "/bread"), Some(&json!(100)));
        assert_eq!(data.get(TableId::Prices, "/crackers"), Some(&json!(0)));
        assert_eq!(data.get(TableId::Prices, "/roubles"), Some(&json!(1)));
        assert_eq!(data.get(TableId::Prices, &ptr!(items::DOGTAG_USEC)), Some(&json!(12_000)));
        assert_eq!(data.get(TableId::RagfairConfig, "/dynamic/barter/chancePercent"), Some(&json!(70)));
        assert_eq!(data.get(TableId::RagfairConfig, "/dynamic/offerItemCount"), Some(&json!({"min": 1, "max": 3})));
        let blacklist = data.get(TableId::RagfairConfig, "/dynamic/barter/itemTypeBlacklist").unwrap();
        assert!(blacklist.as_array().unwrap().contains(&json!(base_classes::ASSAULT_RIFLE)));
        assert!(!blacklist.as_array().unwrap().contains(&json!(base_classes::FOOD)));
    }

    #[test]
    fn other_changes_scale_price_ranges_from_baseline() {
        let mut config = economy();
        let other = &mut config.economy_options.other_flea_market_changes;
        other.enabled = true;
        other.flea_prices_increased = 1.5;
        other.flea_pristine_items = true;
        other.flea_market_open_at_level = 5;
        let mut data = Dataset::new()
            .with_table(
                TableId::RagfairConfig,
                json!({"dynamic": {
                    "priceRanges": {"default": {"min": 0.8, "max": 1.2}},
                    "condition": {"armor": {"conditionChance": 0.4}, "weapon": {"conditionChance": 0.2}}
                }}),
            )
            .with_table(TableId::Globals, json!({"config": {"RagFair": {"minUserLevel": 15}}}));

        run(&other_flea_market_section(&config), &mut data);
        run(&other_flea_market_section(&config), &mut data);

        let max = data.get(TableId::RagfairConfig, "/dynamic/priceRanges/default/max").and_then(Value::as_f64).unwrap();
        assert!((max - 1.8).abs() < 1e-9);
        assert_eq!(data.get(TableId::RagfairConfig, "/dynamic/condition/armor/conditionChance"), Some(&json!(0)));
        assert_eq!(data.get(TableId::Globals, MIN_USER_LEVEL), Some(&json!(5)));
    }
}
