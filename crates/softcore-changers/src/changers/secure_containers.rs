//! `secureContainersOptions`: container sizes and the progressive upgrade path

use serde_json::{json, Value};
use softcore_config::Configuration;
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::assets;
use crate::ids::{base_classes, items, quests, traders};
use crate::tables;

/// `(template, cellsV, cellsH)` after `biggerContainers`
const BIGGER_CONTAINERS: [(&str, u32, u32); 6] = [
    (items::SECURE_WAIST_POUCH, 2, 4),
    (items::SECURE_ALPHA, 3, 3),
    (items::SECURE_BETA, 3, 4),
    (items::SECURE_EPSILON, 3, 5),
    (items::SECURE_GAMMA, 4, 5),
    (items::SECURE_KAPPA, 5, 5),
];

/// Build the `secureContainersOptions` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let options = config.secure_containers_options();
    let progressive = &options.progressive_containers;
    Section::new("secureContainersOptions", options.enabled)
        .unit(
            options.bigger_containers,
            FnUnit::new("biggerContainers", &[TableId::Items], bigger_containers),
        )
        .unit(
            progressive.enabled,
            FnUnit::new(
                "progressiveContainers",
                &[
                    TableId::Profiles,
                    TableId::Traders,
                    TableId::HideoutConfig,
                    TableId::HideoutProduction,
                ],
                progressive_containers,
            ),
        )
        .unit(
            progressive.collector_quest_redone,
            CollectorQuestRedone {
                level_start: options.collector_quest_level_start,
            },
        )
}

fn bigger_containers(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (template, cells_v, cells_h) in BIGGER_CONTAINERS {
        tables::resize_grid(ctx, template, Some(cells_h), cells_v)?;
    }
    Ok(())
}

/// New characters start with a waist pouch and craft their way up
fn progressive_containers(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for profile in tables::keys(ctx, TableId::Profiles, "") {
        for side in ["bear", "usec"] {
            let inventory = ptr!(profile, side, "character", "Inventory", "items");
            let slots = tables::positions(ctx, TableId::Profiles, &inventory, |item| {
                tables::str_field(item, "slotId") == Some("SecuredContainer")
            });
            for index in slots {
                ctx.set(
                    TableId::Profiles,
                    &format!("{inventory}/{index}/_tpl"),
                    items::SECURE_WAIST_POUCH,
                )?;
            }
        }
    }

    // Assort entries are zeroed, never removed
    let assort = ptr!(traders::PEACEKEEPER, "assort", "items");
    let betas = tables::positions(ctx, TableId::Traders, &assort, |item| {
        tables::str_field(item, "_tpl") == Some(items::SECURE_BETA)
    });
    for index in betas {
        if let Some(Value::Object(upd)) = ctx.require(TableId::Traders, &format!("{assort}/{index}/upd"))? {
            upd.insert("UnlimitedCount".into(), json!(false));
            upd.insert("StackObjectsCount".into(), json!(0));
            upd.insert("BuyRestrictionMax".into(), json!(0));
        }
    }

    let rewards = "/cultistCircle/directRewards";
    for reward in 0..tables::len(ctx, TableId::HideoutConfig, rewards) {
        let required = format!("{rewards}/{reward}/requiredItems");
        let pouches = tables::positions(ctx, TableId::HideoutConfig, &required, |id| {
            id.as_str() == Some(items::SECURE_WAIST_POUCH)
        });
        for index in pouches {
            ctx.set(TableId::HideoutConfig, &format!("{required}/{index}"), items::SECURE_KAPPA)?;
        }
    }

    if ctx.lookup(TableId::HideoutProduction, "/recipes").is_some() {
        let added = ctx.union_by(TableId::HideoutProduction, "/recipes", &assets::container_recipes(), "_id")?;
        ctx.debug(format!("{added} container recipes added"));
    }
    Ok(())
}

/// Collector unlocks at a level and also asks for two gamma containers
struct CollectorQuestRedone {
    level_start: u32,
}

impl MutationUnit for CollectorQuestRedone {
    fn name(&self) -> &str {
        "collectorQuestRedone"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Quests, TableId::Locales]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let collector = ctx.get(TableId::Quests, "").and_then(Value::as_object).and_then(|all| {
            all.iter()
                .find(|(_, quest)| tables::str_field(quest, "QuestName") == Some(quests::COLLECTOR_NAME))
                .map(|(id, _)| id.clone())
        });
        let Some(collector) = collector else {
            ctx.skip("Collector quest not found, skipping");
            return Ok(());
        };

        let handover = json!({
            "conditionType": "HandoverItem",
            "dogtagLevel": 0,
            "id": quests::COLLECTOR_GAMMA_CONDITION,
            "index": 69,
            "maxDurability": 100,
            "minDurability": 0,
            "parentId": base_classes::PORTABLE_CONTAINER,
            "isEncoded": false,
            "onlyFoundInRaid": false,
            "dynamicLocale": false,
            "target": [items::SECURE_GAMMA],
            "value": 2,
            "visibilityConditions": [],
        });
        ctx.union_by(
            TableId::Quests,
            &ptr!(collector, "conditions", "AvailableForFinish"),
            &[handover],
            "id",
        )?;

        let start = json!([{
            "id": quests::COLLECTOR_LEVEL_CONDITION,
            "compareMethod": ">=",
            "conditionType": "Level",
            "dynamicLocale": false,
            "globalQuestCounterId": "",
            "index": 0,
            "parentId": "",
            "value": self.level_start,
            "visibilityConditions": [],
        }]);
        ctx.set(TableId::Quests, &ptr!(collector, "conditions", "AvailableForStart"), start)?;

        if ctx.get(TableId::Locales, "/global/ru").is_some() {
            ctx.set(
                TableId::Locales,
                &ptr!("global", "ru", quests::COLLECTOR_GAMMA_CONDITION),
                "Передать носитель",
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use softcore_dataset::Dataset;
    use softcore_engine::{MemorySink, Reporter};
    use std::sync::Arc;

    fn config() -> Configuration {
        let mut config = Configuration::default();
        config.secure_containers_options.enabled = true;
        config
    }

    fn apply(config: &Configuration, data: &mut Dataset) -> Arc<MemorySink> {
        let sink = Arc::new(MemorySink::new());
        section(config).apply(data, &Reporter::new(Arc::clone(&sink)));
        sink
    }

    #[test]
    fn collector_gets_level_gate_and_gamma_handover() {
        let mut config = config();
        config.secure_containers_options.progressive_containers.collector_quest_redone = true;
        config.secure_containers_options.collector_quest_level_start = 20;
        let mut data = Dataset::new()
            .with_table(
                TableId::Quests,
                json!({"q1": {"QuestName": "Collector", "conditions": {
                    "AvailableForStart": [{"conditionType": "Quest"}],
                    "AvailableForFinish": [{"conditionType": "HandoverItem", "id": "other"}]
                }}}),
            )
            .with_table(TableId::Locales, json!({"global": {"ru": {}}}));

        apply(&config, &mut data);
        apply(&config, &mut data);

        let finish = data.get(TableId::Quests, "/q1/conditions/AvailableForFinish").unwrap();
        assert_eq!(finish.as_array().unwrap().len(), 2);
        assert_eq!(data.get(TableId::Quests, "/q1/conditions/AvailableForStart/0/value"), Some(&json!(20)));
        assert!(data.get(TableId::Locales, &ptr!("global", "ru", quests::COLLECTOR_GAMMA_CONDITION)).is_some());
    }

    #[test]
    fn progressive_containers_swap_starting_container_and_zero_beta() {
        let mut config = config();
        config.secure_containers_options.progressive_containers.enabled = true;
        let mut data = Dataset::new()
            .with_table(
                TableId::Profiles,
                json!({"Standard": {
                    "bear": {"character": {"Inventory": {"items": [{"_tpl": items::SECURE_ALPHA, "slotId": "SecuredContainer"}]}}},
                    "usec": {"character": {"Inventory": {"items": [{"_tpl": items::SECURE_ALPHA, "slotId": "SecuredContainer"}]}}}
                }}),
            )
            .with_table(
                TableId::Traders,
                json!({traders::PEACEKEEPER: {"assort": {"items": [
                    {"_id": "a", "_tpl": items::SECURE_BETA, "upd": {"UnlimitedCount": true, "StackObjectsCount": 999}}
                ]}}}),
            )
            .with_table(
                TableId::HideoutConfig,
                json!({"cultistCircle": {"directRewards": [{"requiredItems": [items::SECURE_WAIST_POUCH, "x"]}]}}),
            )
            .with_table(TableId::HideoutProduction, json!({"recipes": []}));

        apply(&config, &mut data);
        apply(&config, &mut data);

        assert_eq!(
            data.get(TableId::Profiles, "/Standard/usec/character/Inventory/items/0/_tpl"),
            Some(&json!(items::SECURE_WAIST_POUCH))
        );
        assert_eq!(
            data.get(TableId::Traders, &ptr!(traders::PEACEKEEPER, "assort", "items", 0, "upd")),
            Some(&json!({"UnlimitedCount": false, "StackObjectsCount": 0, "BuyRestrictionMax": 0}))
        );
        assert_eq!(
            data.get(TableId::HideoutConfig, "/cultistCircle/directRewards/0/requiredItems"),
            Some(&json!([items::SECURE_KAPPA, "x"]))
        );
        assert_eq!(
            data.get(TableId::HideoutProduction, "/recipes").unwrap().as_array().unwrap().len(),
            assets::container_recipes().len()
        );
    }
}
