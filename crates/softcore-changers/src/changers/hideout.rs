//! `hideoutOptions`: containers, fuel, construction and bitcoin farming

use serde_json::Value;
use softcore_config::{model::FasterBitcoinFarming, Configuration};
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::ids::items;
use crate::tables;

/// `(template, cellsH, cellsV)` after `biggerHideoutContainers`
const HIDEOUT_CONTAINERS: [(&str, u32, u32); 11] = [
    (items::MONEY_CASE, 10, 10),
    (items::GRENADE_CASE, 8, 8),
    (items::ITEM_CASE, 10, 10),
    (items::WEAPON_CASE, 6, 15),
    (items::MAGAZINE_CASE, 10, 7),
    (items::MEDICINE_CASE, 10, 10),
    (items::THICC_ITEM_CASE, 16, 16),
    (items::THICC_WEAPON_CASE, 14, 15),
    (items::KEY_TOOL, 5, 5),
    (items::INJECTOR_CASE, 3, 4),
    (items::HOLODILNICK, 10, 10),
];

const GYM_EFFECTIVITY: f64 = 0.75;

/// Build the general `hideoutOptions` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let hideout = config.hideout_options();
    Section::new("hideoutOptions", hideout.enabled)
        .unit(
            hideout.fuel_consumption.enabled,
            FuelConsumption {
                multiplier: hideout.fuel_consumption.fuel_consumption_multiplier,
            },
        )
        .unit(
            hideout.faster_hideout_construction.enabled,
            FasterConstruction {
                multiplier: hideout.faster_hideout_construction.hideout_construction_time_multiplier,
            },
        )
        .unit(
            hideout.disable_fir_hideout,
            FnUnit::new("disableFIRHideout", &[TableId::HideoutAreas], disable_fir_hideout),
        )
        .unit(
            hideout.allow_gym_training_with_muscle_pain,
            FnUnit::new("allowGymTrainingWithMusclePain", &[TableId::Globals], gym_with_muscle_pain),
        )
        .unit(
            hideout.faster_bitcoin_farming.enabled,
            BitcoinFarming::new(&hideout.faster_bitcoin_farming),
        )
}

/// Build the `hideoutOptions.hideoutContainers` section
#[must_use]
pub fn containers_section(config: &Configuration) -> Section {
    let hideout = config.hideout_options();
    let containers = &hideout.hideout_containers;
    Section::new("hideoutContainers", hideout.enabled && containers.enabled)
        .unit(
            containers.bigger_hideout_containers,
            FnUnit::new("biggerHideoutContainers", &[TableId::Items], bigger_hideout_containers),
        )
        .unit(
            containers.sicc_case_buff,
            FnUnit::new("siccCaseBuff", &[TableId::Items], sicc_case_buff),
        )
}

struct FuelConsumption {
    multiplier: f64,
}

impl MutationUnit for FuelConsumption {
    fn name(&self) -> &str {
        "fuelConsumption"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutSettings]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        ctx.scale(TableId::HideoutSettings, "/generatorFuelFlowRate", self.multiplier)?;
        Ok(())
    }
}

/// Divides every construction time
struct FasterConstruction {
    multiplier: f64,
}

impl MutationUnit for FasterConstruction {
    fn name(&self) -> &str {
        "fasterHideoutConstruction"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutAreas]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        for area in 0..tables::len(ctx, TableId::HideoutAreas, "") {
            for stage in tables::keys(ctx, TableId::HideoutAreas, &ptr!(area, "stages")) {
                let pointer = ptr!(area, "stages", stage, "constructionTime");
                if ctx.number(TableId::HideoutAreas, &pointer).is_some() {
                    ctx.from_baseline(TableId::HideoutAreas, &pointer, |time| (time / self.multiplier).round())?;
                }
            }
        }
        Ok(())
    }
}

fn disable_fir_hideout(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.require_table(TableId::HideoutAreas)?.is_none() {
        return Ok(());
    }
    for area in 0..tables::len(ctx, TableId::HideoutAreas, "") {
        for (pointer, requirement) in tables::stage_requirements(ctx, area) {
            if requirement.get("isSpawnedInSession").is_some() {
                ctx.set(TableId::HideoutAreas, &format!("{pointer}/isSpawnedInSession"), false)?;
            }
        }
    }
    ctx.info("no FIR hideout loaded");
    Ok(())
}

fn gym_with_muscle_pain(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let pointer = "/config/Health/Effects/SevereMusclePain/GymEffectivity";
    if let Some(effectivity) = ctx.require(TableId::Globals, pointer)? {
        *effectivity = Value::from(GYM_EFFECTIVITY);
    }
    Ok(())
}

fn bigger_hideout_containers(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (template, cells_h, cells_v) in HIDEOUT_CONTAINERS {
        tables::resize_grid(ctx, template, Some(cells_h), cells_v)?;
    }
    Ok(())
}

/// The SICC case also accepts everything a documents case does, plus the key tool
fn sicc_case_buff(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let filter = |template: &str| format!("{}/filters/0/Filter", tables::grid_props(template));
    let sicc = filter(items::SICC);
    let docs: Option<Vec<Value>> = ctx
        .get(TableId::Items, &filter(items::DOCUMENTS_CASE))
        .and_then(Value::as_array)
        .cloned();
    let (Some(mut allowed), true) = (docs, ctx.get(TableId::Items, &sicc).is_some()) else {
        ctx.skip("documents case or SICC filter not found, skipping");
        return Ok(());
    };
    allowed.push(Value::from(items::KEY_TOOL));
    ctx.union(TableId::Items, &sicc, &allowed)?;
    Ok(())
}

/// Bitcoin production time, GPU boost and the bitcoin handbook price
struct BitcoinFarming {
    time_multiplier: f64,
    gpu_efficiency: f64,
    price: Option<f64>,
}

impl BitcoinFarming {
    fn new(options: &FasterBitcoinFarming) -> Self {
        Self {
            time_multiplier: options.base_bitcoin_time_multiplier,
            gpu_efficiency: options.gpu_efficiency,
            price: options.bitcoin_price,
        }
    }
}

impl MutationUnit for BitcoinFarming {
    fn name(&self) -> &str {
        "fasterBitcoinFarming"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::HideoutProduction, TableId::HideoutSettings, TableId::Handbook]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let farms = tables::recipes(ctx, |recipe| {
            tables::str_field(recipe, "endProduct") == Some(items::BITCOIN)
        });
        if farms.is_empty() {
            ctx.skip("bitcoin production not found");
        }
        for index in farms {
            ctx.from_baseline(
                TableId::HideoutProduction,
                &ptr!("recipes", index, "productionTime"),
                |time| (time / self.time_multiplier).round(),
            )?;
        }

        if let Some(rate) = ctx.require(TableId::HideoutSettings, "/gpuBoostRate")? {
            *rate = Value::from(self.gpu_efficiency);
        }

        if let Some(price) = self.price {
            match tables::handbook_index(ctx, items::BITCOIN) {
                Some(index) => {
                    ctx.set(TableId::Handbook, &ptr!("Items", index, "Price"), softcore_engine::number(price))?;
                }
                None => ctx.skip("bitcoin handbook entry not found"),
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

    fn config() -> Configuration {
        let mut config = Configuration::default();
        config.hideout_options.enabled = true;
        config
    }

    fn run(section: &Section, data: &mut Dataset) -> Arc<MemorySink> {
        let sink = Arc::new(MemorySink::new());
        section.apply(data, &Reporter::new(Arc::clone(&sink)));
        sink
    }

    fn areas() -> Dataset {
        Dataset::new().with_table(
            TableId::HideoutAreas,
            json!([
                {"type": 0, "stages": {
                    "0": {"constructionTime": 0, "requirements": []},
                    "1": {"constructionTime": 3600, "requirements": [{"templateId": "a", "count": 1, "isSpawnedInSession": true}]}
                }},
                {"type": 3, "stages": {"1": {"constructionTime": 7201, "requirements": [{"templateId": "b", "count": 2}]}}}
            ]),
        )
    }

    #[test]
    fn construction_divides_from_baseline() {
        let mut config = config();
        config.hideout_options.faster_hideout_construction.enabled = true;
        config.hideout_options.faster_hideout_construction.hideout_construction_time_multiplier = 2.0;
        let mut data = areas();

        run(&section(&config), &mut data);
        run(&section(&config), &mut data);

        assert_eq!(data.get(TableId::HideoutAreas, "/0/stages/1/constructionTime"), Some(&json!(1800)));
        assert_eq!(data.get(TableId::HideoutAreas, "/0/stages/0/constructionTime"), Some(&json!(0)));
        assert_eq!(data.get(TableId::HideoutAreas, "/1/stages/1/constructionTime"), Some(&json!(3601)));
    }

    #[test]
    fn fir_flag_cleared_only_where_present() {
        let mut config = config();
        config.hideout_options.disable_fir_hideout = true;
        let mut data = areas();

        let sink = run(&section(&config), &mut data);

        assert_eq!(
            data.get(TableId::HideoutAreas, "/0/stages/1/requirements/0/isSpawnedInSession"),
            Some(&json!(false))
        );
        assert_eq!(data.get(TableId::HideoutAreas, "/1/stages/1/requirements/0/isSpawnedInSession"), None);
        assert!(sink.contains("no FIR hideout loaded"));
    }

    #[test]
    fn bitcoin_farming_touches_only_bitcoin_recipes() {
        let mut config = config();
        let farming = &mut config.hideout_options.faster_bitcoin_farming;
        farming.enabled = true;
        farming.base_bitcoin_time_multiplier = 2.0;
        farming.gpu_efficiency = 0.1;
        farming.bitcoin_price = Some(150_000.0);
        let mut data = Dataset::new()
            .with_table(
                TableId::HideoutProduction,
                json!({"recipes": [
                    {"endProduct": items::BITCOIN, "productionTime": 145000},
                    {"endProduct": items::MOONSHINE, "productionTime": 14000}
                ]}),
            )
            .with_table(TableId::HideoutSettings, json!({"gpuBoostRate": 0.041}))
            .with_table(TableId::Handbook, json!({"Items": [{"Id": items::BITCOIN, "Price": 100000}]}));

        let sink = run(&section(&config), &mut data);

        assert_eq!(sink.outcome("hideoutOptions", "fasterBitcoinFarming").unwrap().status, Status::Applied);
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/0/productionTime"), Some(&json!(72500)));
        assert_eq!(data.get(TableId::HideoutProduction, "/recipes/1/productionTime"), Some(&json!(14000)));
        assert_eq!(data.get(TableId::HideoutSettings, "/gpuBoostRate"), Some(&json!(0.1)));
        assert_eq!(data.get(TableId::Handbook, "/Items/0/Price"), Some(&json!(150000)));
    }

    #[test]
    fn sicc_accepts_documents_case_contents() {
        let mut config = config();
        config.hideout_options.hideout_containers.enabled = true;
        config.hideout_options.hideout_containers.sicc_case_buff = true;
        let grid = |filter: Value| json!({"_props": {"Grids": [{"_props": {"filters": [{"Filter": filter}]}}]}});
        let mut data = Dataset::new().with_table(
            TableId::Items,
            json!({
                items::SICC: grid(json!(["keycard"])),
                items::DOCUMENTS_CASE: grid(json!(["info", "keycard"]))
            }),
        );

        run(&containers_section(&config), &mut data);
        run(&containers_section(&config), &mut data);

        let filter = format!("{}/filters/0/Filter", tables::grid_props(items::SICC));
        assert_eq!(data.get(TableId::Items, &filter), Some(&json!(["keycard", "info", items::KEY_TOOL])));
    }

    #[test]
    fn containers_section_needs_both_toggles() {
        let mut config = Configuration::default();
        config.hideout_options.hideout_containers.enabled = true;
        config.hideout_options.hideout_containers.bigger_hideout_containers = true;
        assert!(!containers_section(&config).is_enabled());
    }
}
