//! `hideoutOptions.scavCaseOptions`: reward filtering, recipe rework and speed

use std::collections::BTreeSet;

use serde_json::Value;
use softcore_config::Configuration;
use softcore_dataset::{ptr, TableId};
use softcore_engine::{number, FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::assets;
use crate::ids::{base_classes, traders};
use crate::tables;

/// Handbook price below which an item is never a reward
const MIN_REWARD_PRICE: f64 = 2.0;

/// Build the `scavCaseOptions` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let hideout = config.hideout_options();
    let scav_case = &hideout.scav_case_options;
    Section::new("scavCaseOptions", hideout.enabled && scav_case.enabled)
        .unit(
            scav_case.better_rewards,
            FnUnit::new(
                "betterRewards",
                &[TableId::ScavCaseConfig, TableId::Handbook],
                better_rewards,
            ),
        )
        .unit(
            scav_case.rebalance,
            FnUnit::new(
                "rebalance",
                &[TableId::ScavCaseConfig, TableId::HideoutProduction],
                rebalance,
            ),
        )
        .unit(
            scav_case.faster_scavcase.enabled,
            FasterScavcase {
                multiplier: scav_case.faster_scavcase.speed_multiplier,
            },
        )
}

/// Templates any trader but the lighthouse keeper sells, armor inserts aside
fn buyable_items(ctx: &UnitContext<'_>) -> BTreeSet<String> {
    let mut buyable = BTreeSet::new();
    for trader in tables::keys(ctx, TableId::Traders, "") {
        if trader == traders::LIGHTHOUSE_KEEPER {
            continue;
        }
        let Some(assort) = ctx.get(TableId::Traders, &ptr!(trader, "assort", "items")).and_then(Value::as_array)
        else {
            ctx.skip(format!("assort of trader {trader} not found"));
            continue;
        };
        for template in assort.iter().filter_map(|offer| tables::str_field(offer, "_tpl")) {
            let insert = tables::item(ctx, template)
                .and_then(|item| tables::str_field(item, "_parent"))
                == Some(base_classes::BUILT_IN_INSERTS);
            if !insert {
                buyable.insert(template.to_string());
            }
        }
    }
    buyable
}

/// Ammo box value from its contents, or `None` if the box does not say what it holds
fn ammo_box_value(ctx: &UnitContext<'_>, item: &Value) -> Option<f64> {
    let slot = item.pointer("/_props/StackSlots/0")?;
    let count = slot.get("_max_count")?.as_f64()?;
    let ammo = slot.pointer("/_props/filters/0/Filter/0")?.as_str()?;
    Some((ctx.handbook_price(ammo)? * count).round())
}

fn is_reward_candidate(item: &Value, template_id: &str, price: f64) -> bool {
    let parent = tables::str_field(item, "_parent").unwrap_or_default();
    let quest_item = item.pointer("/_props/QuestItem").and_then(Value::as_bool) == Some(true);
    !parent.is_empty()
        && !quest_item
        && !assets::SCAV_CASE_ITEM_BLACKLIST.contains(&template_id)
        && !assets::HOST_FLEA_BLACKLIST.contains(&template_id)
        && price >= MIN_REWARD_PRICE
}

/// Keeps rewards that are valuable, unbuyable or on the class whitelist
fn better_rewards(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.require_table(TableId::ScavCaseConfig)?.is_none() {
        return Ok(());
    }
    let buyable = buyable_items(ctx);

    let mut ammo_boxes = Vec::new();
    let mut blacklist = Vec::new();
    for template_id in tables::item_ids(ctx) {
        let Some(item) = tables::item(ctx, &template_id) else {
            continue;
        };
        let parent = tables::str_field(item, "_parent").unwrap_or_default();
        let mut price = ctx.handbook_price(&template_id).unwrap_or_default();
        if parent == base_classes::AMMO_BOX {
            if let Some(value) = ammo_box_value(ctx, item) {
                price = value;
                ammo_boxes.push((template_id.clone(), value));
            }
        }

        let keep = is_reward_candidate(item, &template_id, price)
            && (!buyable.contains(&template_id)
                || price >= assets::SCAV_CASE_VALUABLE_PRICE
                || assets::SCAV_CASE_CLASS_WHITELIST.contains(&parent));
        if !keep {
            blacklist.push(Value::from(template_id));
        }
    }

    for (template_id, value) in ammo_boxes {
        if let Some(index) = tables::handbook_index(ctx, &template_id) {
            ctx.set(TableId::Handbook, &ptr!("Items", index, "Price"), number(value))?;
        }
    }

    ctx.set(
        TableId::ScavCaseConfig,
        "/rewardItemParentBlacklist",
        tables::strings(assets::SCAV_CASE_PARENT_BLACKLIST),
    )?;
    let added = ctx.union(TableId::ScavCaseConfig, "/rewardItemBlacklist", &blacklist)?;
    ctx.debug(format!("{added} items blacklisted from scav case rewards"));
    Ok(())
}

fn rebalance(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.require_table(TableId::ScavCaseConfig)?.is_none() || ctx.require_table(TableId::HideoutProduction)?.is_none() {
        return Ok(());
    }
    ctx.set(TableId::ScavCaseConfig, "/rewardItemValueRangeRub", assets::scav_case_value_ranges())?;
    ctx.set(TableId::HideoutProduction, "/scavRecipes", assets::scav_case_recipes())?;
    Ok(())
}

struct FasterScavcase {
    multiplier: f64,
}

impl MutationUnit for FasterScavcase {
    fn name(&self) -> &str {
        "fasterScavcase"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutProduction]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let Some(recipes) = ctx.lookup(TableId::HideoutProduction, "/scavRecipes").and_then(Value::as_array) else {
            return Ok(());
        };
        for index in 0..recipes.len() {
            ctx.from_baseline(
                TableId::HideoutProduction,
                &ptr!("scavRecipes", index, "productionTime"),
                |time| (time / self.multiplier).round(),
            )?;
        }
        Ok(())
    }
}
