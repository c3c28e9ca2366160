//! `craftingChanges` and `hideoutOptions.fasterCraftingTime`

use serde_json::Value;
use softcore_config::{model::FasterProduction, Configuration};
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::assets::{self, CraftAdjustment};
use crate::ids::{items, AREA_CHRISTMAS_TREE};
use crate::tables;

/// Recipes `fasterCraftingTime` leaves to their own options
const OWN_SPEED_OPTIONS: [&str; 3] = [items::BITCOIN, items::MOONSHINE, items::PURIFIED_WATER];

/// Build the `craftingChanges` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let crafting = config.crafting_changes();
    Section::new("craftingChanges", crafting.enabled)
        .unit(
            crafting.crafting_rebalance,
            FnUnit::new("craftingRebalance", &[TableId::HideoutProduction], crafting_rebalance),
        )
        .unit(
            crafting.additional_crafting_recipes,
            FnUnit::new(
                "additionalCraftingRecipes",
                &[TableId::HideoutProduction],
                additional_crafting_recipes,
            ),
        )
}

/// Build the `fasterCraftingTime` section
#[must_use]
pub fn faster_crafting_section(config: &Configuration) -> Section {
    let hideout = config.hideout_options();
    let faster = &hideout.faster_crafting_time;
    Section::new("fasterCraftingTime", hideout.enabled && faster.enabled)
        .unit(
            true,
            FasterProductionForAll {
                multiplier: faster.base_crafting_time_multiplier,
            },
        )
        .unit(
            faster.hideout_skill_exp_fix.enabled,
            HideoutSkillExpFix {
                multiplier: faster.hideout_skill_exp_fix.hideout_skill_exp_multiplier,
            },
        )
        .unit(
            faster.faster_moonshine_production.enabled,
            FasterProductionFor::new("fasterMoonshineProduction", items::MOONSHINE, &faster.faster_moonshine_production),
        )
        .unit(
            faster.faster_purified_water_production.enabled,
            FasterProductionFor::new(
                "fasterPurifiedWaterProduction",
                items::PURIFIED_WATER,
                &faster.faster_purified_water_production,
            ),
        )
        .unit(
            faster.faster_cultist_circle.enabled,
            FasterCultistCircle {
                multiplier: faster.faster_cultist_circle.base_crafting_time_multiplier,
            },
        )
}

fn adjust(ctx: &mut UnitContext<'_>, adjustment: &CraftAdjustment) -> Result<(), UnitError> {
    let found = tables::recipes(ctx, |recipe| {
        tables::str_field(recipe, "endProduct") == Some(adjustment.end_product)
            && recipe.get("areaType").and_then(Value::as_i64) != Some(AREA_CHRISTMAS_TREE)
    });
    let Some(&index) = found.first() else {
        ctx.skip(format!("craft not found, skipping {}", adjustment.end_product));
        return Ok(());
    };
    if let Some(time) = adjustment.production_time {
        ctx.set(TableId::HideoutProduction, &ptr!("recipes", index, "productionTime"), time)?;
    }
    if let Some(count) = adjustment.count {
        ctx.set(TableId::HideoutProduction, &ptr!("recipes", index, "count"), count)?;
    }
    Ok(())
}

fn crafting_rebalance(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.lookup(TableId::HideoutProduction, "/recipes").is_none() {
        return Ok(());
    }
    for adjustment in &assets::CRAFT_ADJUSTMENTS {
        adjust(ctx, adjustment)?;
    }
    Ok(())
}

fn additional_crafting_recipes(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.lookup(TableId::HideoutProduction, "/recipes").is_none() {
        return Ok(());
    }
    let added = ctx.union_by(TableId::HideoutProduction, "/recipes", &assets::additional_recipes(), "_id")?;
    ctx.debug(format!("{added} recipes added"));
    Ok(())
}

fn ceil_divided(ctx: &mut UnitContext<'_>, table: TableId, pointer: &str, multiplier: f64) -> Result<(), UnitError> {
    ctx.from_baseline(table, pointer, |time| (time / multiplier).ceil())?;
    Ok(())
}

struct FasterProductionForAll {
    multiplier: f64,
}

impl MutationUnit for FasterProductionForAll {
    fn name(&self) -> &str {
        "fasterProductionForAll"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutProduction]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let recipes = tables::recipes(ctx, |recipe| {
            let product = tables::str_field(recipe, "endProduct").unwrap_or_default();
            !OWN_SPEED_OPTIONS.contains(&product) && recipe.get("productionTime").is_some()
        });
        for index in recipes {
            ceil_divided(
                ctx,
                TableId::HideoutProduction,
                &ptr!("recipes", index, "productionTime"),
                self.multiplier,
            )?;
        }
        Ok(())
    }
}

/// Skill experience follows the faster crafting speed
struct HideoutSkillExpFix {
    multiplier: f64,
}

impl MutationUnit for HideoutSkillExpFix {
    fn name(&self) -> &str {
        "hideoutSkillExpFix"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        ctx.from_baseline(TableId::HideoutConfig, "/hoursForSkillCrafting", |hours| {
            hours / self.multiplier
        })?;
        Ok(())
    }
}

struct FasterProductionFor {
    name: &'static str,
    end_product: &'static str,
    multiplier: f64,
}

impl FasterProductionFor {
    fn new(name: &'static str, end_product: &'static str, options: &FasterProduction) -> Self {
        Self {
            name,
            end_product,
            multiplier: options.base_crafting_time_multiplier,
        }
    }
}

impl MutationUnit for FasterProductionFor {
    fn name(&self) -> &str {
        self.name
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutProduction]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let recipes = tables::recipes(ctx, |recipe| {
            tables::str_field(recipe, "endProduct") == Some(self.end_product)
        });
        if recipes.is_empty() {
            ctx.skip(format!("productions for item {} not found, skipping", self.end_product));
        }
        for index in recipes {
            ceil_divided(
                ctx,
                TableId::HideoutProduction,
                &ptr!("recipes", index, "productionTime"),
                self.multiplier,
            )?;
        }
        Ok(())
    }
}

struct FasterCultistCircle {
    multiplier: f64,
}

impl MutationUnit for FasterCultistCircle {
    fn name(&self) -> &str {
        "fasterCultistCircle"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let circle = "/cultistCircle";
        if ctx.lookup(TableId::HideoutConfig, circle).is_none() {
            return Ok(());
        }
        ceil_divided(
            ctx,
            TableId::HideoutConfig,
            &format!("{circle}/hideoutTaskRewardTimeSeconds"),
            self.multiplier,
        )?;
        for list in ["craftTimeThreshholds", "directRewards"] {
            let base = format!("{circle}/{list}");
            for index in 0..tables::len(ctx, TableId::HideoutConfig, &base) {
                ceil_divided(
                    ctx,
                    TableId::HideoutConfig,
                    &format!("{base}/{index}/craftTimeSeconds"),
                    self.multiplier,
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use softcore_dataset::Dataset;
    use softcore_engine::{MemorySink, Reporter, Status};
    use std::sync::Arc;

    fn run(section: &Section, data: &mut Dataset) -> Arc<MemorySink> {
        let sink = Arc::new(MemorySink::new());
        section.apply(data, &Reporter::new(Arc::clone(&sink)));
        sink
    }

    fn production() -> Dataset {
        Dataset::new().with_table(
            TableId::HideoutProduction,
            json!({"recipes": [
                {"endProduct": items::MOONSHINE, "areaType": AREA_CHRISTMAS_TREE, "productionTime": 100},
                {"endProduct": items::MOONSHINE, "areaType": 8, "productionTime": 15000, "count": 1},
                {"endProduct": items::PURIFIED_WATER, "areaType": 17, "productionTime": 30000, "count": 1},
                {"endProduct": "bandage", "areaType": 7, "productionTime": 1001, "count": 1}
            ]}),
        )
    }

    #[test]
    fn rebalance_skips_christmas_tree_recipes() {
        let mut config = Configuration::default();
        config.crafting_changes.enabled = true;
        config.crafting_changes.crafting_rebalance = true;
        let mut data = production();

        let sink = run(&section(&config), &mut data);

        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/0/productionTime"), Some(&json!(100)));
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/1/productionTime"), Some(&json!(12600)));
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/2/count"), Some(&json!(2)));
        assert!(sink.contains(&format!("craft not found, skipping {}", items::MILITARY_FLASH_DRIVE)));
        assert_eq!(sink.outcome("craftingChanges", "craftingRebalance").unwrap().status, Status::Applied);
    }

    #[test]
    fn additional_recipes_added_once() {
        let mut config = Configuration::default();
        config.crafting_changes.enabled = true;
        config.crafting_changes.additional_crafting_recipes = true;
        let mut data = production();

        run(&section(&config), &mut data);
        run(&section(&config), &mut data);

        let recipes = data.get(TableId::HideoutProduction, "/recipes").and_then(Value::as_array).unwrap();
        assert_eq!(recipes.len(), 4 + assets::additional_recipes().len());
    }

    #[test]
    fn faster_crafting_rounds_up_and_leaves_dedicated_recipes() {
        let mut config = Configuration::default();
        config.hideout_options.enabled = true;
        let faster = &mut config.hideout_options.faster_crafting_time;
        faster.enabled = true;
        faster.base_crafting_time_multiplier = 2.0;
        faster.faster_purified_water_production.enabled = true;
        faster.faster_purified_water_production.base_crafting_time_multiplier = 3.0;
        let mut data = production();

        run(&faster_crafting_section(&config), &mut data);
        run(&faster_crafting_section(&config), &mut data);

        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/3/productionTime"), Some(&json!(501)));
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/1/productionTime"), Some(&json!(15000)));
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/2/productionTime"), Some(&json!(10000)));
    }

    #[test]
    fn cultist_circle_times_divided() {
        let mut config = Configuration::default();
        config.hideout_options.enabled = true;
        let faster = &mut config.hideout_options.faster_crafting_time;
        faster.enabled = true;
        faster.faster_cultist_circle.enabled = true;
        faster.faster_cultist_circle.base_crafting_time_multiplier = 4.0;
        faster.hideout_skill_exp_fix.enabled = true;
        faster.hideout_skill_exp_fix.hideout_skill_exp_multiplier = 2.0;
        let mut data = production().with_table(
            TableId::HideoutConfig,
            json!({
                "hoursForSkillCrafting": 28800,
                "cultistCircle": {
                    "hideoutTaskRewardTimeSeconds": 21600,
                    "craftTimeThreshholds": [{"craftTimeSeconds": 43201}],
                    "directRewards": [{"craftTimeSeconds": 3600}]
                }
            }),
        );

        run(&faster_crafting_section(&config), &mut data);

        assert_eq!(
            data.table(TableId::HideoutConfig),
            Some(&json!({
                "hoursForSkillCrafting": 14400,
                "cultistCircle": {
                    "hideoutTaskRewardTimeSeconds": 5400,
                    "craftTimeThreshholds": [{"craftTimeSeconds": 10801}],
                    "directRewards": [{"craftTimeSeconds": 900}]
                }
            }))
        );
    }
}
