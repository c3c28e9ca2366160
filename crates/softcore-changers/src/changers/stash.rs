//! `stashOptions`: stash sizes, progressive stash and stash upgrade costs

use serde_json::{json, Value};
use softcore_config::Configuration;
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::ids::{items, AREA_STASH};
use crate::tables;

/// Rows per starting stash after `biggerStash`
const BIGGER_STASH: [(&str, u32); 5] = [
    (items::STASH_STANDARD, 50),
    (items::STASH_LEFT_BEHIND, 100),
    (items::STASH_PREPARE_FOR_ESCAPE, 150),
    (items::STASH_EDGE_OF_DARKNESS, 200),
    (items::STASH_UNHEARD, 250),
];

const STARTING_STASHES: [&str; 5] = [
    items::STASH_STANDARD,
    items::STASH_LEFT_BEHIND,
    items::STASH_PREPARE_FOR_ESCAPE,
    items::STASH_EDGE_OF_DARKNESS,
    items::STASH_UNHEARD,
];

const BASIC_STASH_BONUS_ID: &str = "64f5b9e5fa34f11b380756c0";

/// Build the `stashOptions` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let stash = config.stash_options();
    Section::new("stashOptions", stash.enabled)
        .unit(stash.bigger_stash, FnUnit::new("biggerStash", &[TableId::Items], bigger_stash))
        .unit(
            stash.progressive_stash,
            FnUnit::new("progressiveStash", &[TableId::Profiles], progressive_stash),
        )
        .unit(
            stash.less_currency_for_construction,
            LessCurrencyForConstruction {
                multiplier: stash.currency_requirement_multiplier,
            },
        )
        .unit(
            stash.easier_loyalty,
            FnUnit::new("easierLoyalty", &[TableId::HideoutAreas], easier_loyalty),
        )
}

fn bigger_stash(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (template, rows) in BIGGER_STASH {
        let pointer = ptr!(template, "_props", "Grids", 0, "_props", "cellsV");
        if let Some(cells) = ctx.require(TableId::Items, &pointer)? {
            *cells = json!(rows);
        }
    }
    Ok(())
}

/// Every profile side starts with a level 1 stash of standard size
fn progressive_stash(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let bonus = json!({
        "id": BASIC_STASH_BONUS_ID,
        "templateId": items::STASH_STANDARD,
        "type": "StashSize",
    });

    for profile in tables::keys(ctx, TableId::Profiles, "") {
        for side in tables::keys(ctx, TableId::Profiles, &ptr!(profile)) {
            let character = ptr!(profile, side, "character");
            if ctx.get(TableId::Profiles, &character).is_none() {
                continue;
            }

            let areas = format!("{character}/Hideout/Areas");
            let Some(area) = tables::positions(ctx, TableId::Profiles, &areas, |area| {
                area.get("type").and_then(Value::as_i64) == Some(AREA_STASH)
            })
            .first()
            .copied() else {
                ctx.skip(format!("stash area of profile {profile}/{side} not found"));
                continue;
            };
            ctx.set(TableId::Profiles, &format!("{areas}/{area}/level"), 1)?;

            let inventory = format!("{character}/Inventory/items");
            let stashes = tables::positions(ctx, TableId::Profiles, &inventory, |item| {
                tables::str_field(item, "_tpl").is_some_and(|tpl| STARTING_STASHES.contains(&tpl))
            });
            for index in stashes {
                ctx.set(TableId::Profiles, &format!("{inventory}/{index}/_tpl"), items::STASH_STANDARD)?;
            }

            if let Some(Value::Array(bonuses)) = ctx.require(TableId::Profiles, &format!("{character}/Bonuses"))? {
                bonuses.retain(|b| tables::str_field(b, "type") != Some("StashSize"));
                bonuses.push(bonus.clone());
            }
        }
    }
    Ok(())
}

/// Scales rouble and euro costs of the stash upgrades
struct LessCurrencyForConstruction {
    multiplier: f64,
}

impl MutationUnit for LessCurrencyForConstruction {
    fn name(&self) -> &str {
        "lessCurrencyForConstruction"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutAreas]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let Some(area) = tables::area_index(ctx, AREA_STASH) else {
            ctx.skip("stash hideout area not found, skipping");
            return Ok(());
        };
        for (pointer, requirement) in tables::stage_requirements(ctx, area) {
            let is_currency = matches!(
                tables::str_field(&requirement, "templateId"),
                Some(items::ROUBLES | items::EUROS)
            );
            if is_currency && requirement.get("count").is_some() {
                ctx.from_baseline(TableId::HideoutAreas, &format!("{pointer}/count"), |count| {
                    (count * self.multiplier).round()
                })?;
            }
        }
        Ok(())
    }
}

/// Trader loyalty requirements of stash upgrades drop by one level
fn easier_loyalty(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let Some(area) = tables::area_index(ctx, AREA_STASH) else {
        ctx.skip("stash hideout area not found, skipping");
        return Ok(());
    };
    for (pointer, requirement) in tables::stage_requirements(ctx, area) {
        if requirement.get("loyaltyLevel").is_some() {
            ctx.from_baseline(TableId::HideoutAreas, &format!("{pointer}/loyaltyLevel"), |level| {
                (level - 1.0).max(1.0)
            })?;
        }
    }
    Ok(())
}
