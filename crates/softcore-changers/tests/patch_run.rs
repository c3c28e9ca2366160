//! Full patch runs with the SoftcoreRedux plan

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use softcore_changers::SoftcorePlanner;
use softcore_config::Configuration;
use softcore_dataset::{ptr, Dataset, TableId};
use softcore_engine::{Level, MemorySink, PatchOrchestrator, RunError, Status};
use softcore_test_utils::{configuration, memory_reporter, sample_dataset, MOONSHINE, STASH_LEFT_BEHIND, STASH_STANDARD};
use std::sync::Arc;

fn run(config: Configuration, data: &mut Dataset) -> Arc<MemorySink> {
    let (reporter, sink) = memory_reporter();
    PatchOrchestrator::new(config, &SoftcorePlanner, reporter).run(data).unwrap();
    sink
}

fn unit_statuses(sink: &MemorySink, section: &str) -> Vec<Status> {
    sink.outcomes()
        .into_iter()
        .filter(|outcome| outcome.section == section)
        .map(|outcome| outcome.status)
        .collect()
}

#[test]
fn bigger_stash_touches_only_stash_rows() {
    let config = configuration(|config| {
        config.stash_options.enabled = true;
        config.stash_options.bigger_stash = true;
    });
    let original = sample_dataset();
    let mut data = original.clone();

    run(config, &mut data);

    let rows = |stash: &str| ptr!(stash, "_props", "Grids", 0, "_props", "cellsV");
    assert_eq!(data.get(TableId::Items, &rows(STASH_STANDARD)), Some(&json!(50)));
    assert_eq!(data.get(TableId::Items, &rows(STASH_LEFT_BEHIND)), Some(&json!(100)));

    let mut expected = original.clone();
    expected.set(TableId::Items, &rows(STASH_STANDARD), json!(50)).unwrap();
    expected.set(TableId::Items, &rows(STASH_LEFT_BEHIND), json!(100)).unwrap();
    assert_eq!(data.to_json_pretty().unwrap(), expected.to_json_pretty().unwrap());
}

#[test]
fn disabled_item_fixes_with_price_sync_running() {
    let config = configuration(|config| {
        config.economy_options.enabled = true;
        config.economy_options.price_rebalance.enabled = true;
        config.economy_options.price_rebalance.item_fixes = false;
    });
    let mut data = sample_dataset();
    let handbook = data.table(TableId::Handbook).cloned();

    let sink = run(config, &mut data);

    assert_eq!(sink.outcome("priceRebalance", "itemFixes").unwrap().status, Status::Skipped);
    assert_eq!(sink.outcome("priceRebalance", "priceSync").unwrap().status, Status::Applied);
    assert_eq!(data.table(TableId::Handbook).cloned(), handbook);
    assert_eq!(data.get(TableId::Prices, &ptr!(MOONSHINE)), Some(&json!(30_000)));
}

#[test]
fn disabling_the_flea_market_skips_marketplace_sections() {
    let config = configuration(|config| {
        let economy = &mut config.economy_options;
        economy.enabled = true;
        economy.disable_flea_market_completely = true;
        economy.price_rebalance.enabled = true;
        economy.price_rebalance.item_fixes = true;
        economy.pacifist_flea_market.enabled = true;
        economy.barter_economy.enabled = true;
        economy.other_flea_market_changes.enabled = true;
    });
    let original = sample_dataset();
    let mut data = original.clone();

    let sink = run(config, &mut data);

    for section in ["priceRebalance", "pacifistFleaMarket", "barterEconomy", "otherFleaMarketChanges"] {
        let statuses = unit_statuses(&sink, section);
        assert!(!statuses.is_empty(), "{section} reported nothing");
        assert!(statuses.iter().all(|status| *status == Status::Skipped), "{section}: {statuses:?}");
    }
    assert_eq!(sink.outcome("economyOptions", "disableFleaMarketCompletely").unwrap().status, Status::Applied);
    assert_eq!(data.get(TableId::Globals, "/config/RagFair/minUserLevel"), Some(&json!(99)));
    assert_eq!(data.table(TableId::Prices), original.table(TableId::Prices));
    assert_eq!(data.table(TableId::RagfairConfig), original.table(TableId::RagfairConfig));
}

#[test]
fn missing_table_is_a_warning() {
    let config = configuration(|config| {
        config.hideout_options.enabled = true;
        config.hideout_options.fuel_consumption.enabled = true;
        config.hideout_options.fuel_consumption.fuel_consumption_multiplier = 0.5;
    });
    let mut data = Dataset::new().with_table(TableId::Globals, json!({"config": {}}));
    let original = data.clone();

    let sink = run(config, &mut data);

    assert_eq!(data, original);
    assert_eq!(sink.outcome("hideoutOptions", "fuelConsumption").unwrap().status, Status::Skipped);
    assert!(sink
        .messages(Level::Warning)
        .iter()
        .any(|message| message.contains("hideout.settings/generatorFuelFlowRate not found")));
}

#[test]
fn multipliers_do_not_compound_across_runs() {
    let config = configuration(|config| {
        config.hideout_options.enabled = true;
        config.hideout_options.fuel_consumption.enabled = true;
        config.hideout_options.fuel_consumption.fuel_consumption_multiplier = 0.5;
        config.other_tweaks.enabled = true;
        config.other_tweaks.bigger_ammo_stacks.enabled = true;
        config.other_tweaks.bigger_ammo_stacks.stack_multiplier = 3.0;
    });
    let mut data = sample_dataset();

    run(config.clone(), &mut data);
    let once = data.to_json_pretty().unwrap();
    run(config, &mut data);

    assert_eq!(data.to_json_pretty().unwrap(), once);
    let rate = data.get(TableId::HideoutSettings, "/generatorFuelFlowRate").and_then(Value::as_f64).unwrap();
    assert!((rate - 0.00065).abs() < 1e-12);
}

#[test]
fn added_recipes_are_not_appended_again_after_speedup() {
    let config = configuration(|config| {
        config.crafting_changes.enabled = true;
        config.crafting_changes.additional_crafting_recipes = true;
        config.hideout_options.enabled = true;
        config.hideout_options.faster_crafting_time.enabled = true;
        config.hideout_options.faster_crafting_time.base_crafting_time_multiplier = 2.0;
    });
    let mut data = sample_dataset().with_table(TableId::HideoutProduction, json!({"recipes": []}));

    run(config.clone(), &mut data);
    let once = data.to_json_pretty().unwrap();
    let added = data.get(TableId::HideoutProduction, "/recipes").and_then(Value::as_array).map_or(0, Vec::len);
    run(config, &mut data);

    assert!(added > 0);
    assert_eq!(data.to_json_pretty().unwrap(), once);
}

#[test]
fn blacklist_appends_are_set_unions() {
    let config = configuration(|config| {
        config.economy_options.enabled = true;
        config.economy_options.pacifist_flea_market.enabled = true;
    });
    let mut data = sample_dataset();

    run(config.clone(), &mut data);
    run(config, &mut data);

    let custom = data.get(TableId::RagfairConfig, "/dynamic/blacklist/custom").unwrap();
    assert_eq!(custom, &json!([softcore_test_utils::M855]));
}

#[test]
fn fresh_copies_patch_identically() {
    let config = configuration(|config| {
        config.stash_options.enabled = true;
        config.stash_options.bigger_stash = true;
        config.economy_options.enabled = true;
        config.economy_options.barter_economy.enabled = true;
        config.other_tweaks.enabled = true;
        config.other_tweaks.faster_examine_time = true;
        config.other_tweaks.remove_raid_item_limits = true;
    });
    let mut first = sample_dataset();
    let mut second = sample_dataset();

    run(config.clone(), &mut first);
    run(config, &mut second);

    assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
}

#[test]
fn second_run_is_rejected() {
    let (reporter, _sink) = memory_reporter();
    let mut orchestrator = PatchOrchestrator::new(Configuration::default(), &SoftcorePlanner, reporter);
    let mut data = sample_dataset();

    orchestrator.run(&mut data).unwrap();
    let before = data.clone();

    assert!(matches!(orchestrator.run(&mut data), Err(RunError::IllegalTransition { .. })));
    assert_eq!(data, before);
}

fn toggles() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 24)
}

fn with_sub_options(flags: &[bool]) -> Configuration {
    configuration(|config| {
        let mut next = flags.iter().copied();
        let mut flag = move || next.next().unwrap_or(true);
        config.stash_options.bigger_stash = flag();
        config.stash_options.progressive_stash = flag();
        config.stash_options.easier_loyalty = flag();
        config.secure_containers_options.bigger_containers = flag();
        config.hideout_options.fuel_consumption.enabled = flag();
        config.hideout_options.faster_bitcoin_farming.enabled = flag();
        config.hideout_options.hideout_containers.enabled = flag();
        config.hideout_options.scav_case_options.enabled = flag();
        config.economy_options.disable_flea_market_completely = flag();
        config.economy_options.price_rebalance.enabled = flag();
        config.economy_options.pacifist_flea_market.enabled = flag();
        config.economy_options.barter_economy.enabled = flag();
        config.economy_options.other_flea_market_changes.enabled = flag();
        config.economy_options.other_flea_market_changes.selling_on_flea = flag();
        config.trader_changes.better_sales_to_traders = flag();
        config.trader_changes.bigger_limits.enabled = flag();
        config.crafting_changes.crafting_rebalance = flag();
        config.crafting_changes.additional_crafting_recipes = flag();
        config.other_tweaks.faster_examine_time = flag();
        config.other_tweaks.remove_discard_limit = flag();
        config.other_tweaks.bigger_ammo_stacks.enabled = flag();
        config.other_tweaks.remove_raid_item_limits = flag();
        config.other_tweaks.bigger_currency_stacks = flag();
        config.other_tweaks.quest_changes = flag();
    })
}

proptest! {
    #[test]
    fn disabled_sections_never_mutate(flags in toggles()) {
        let original = sample_dataset();
        let mut data = original.clone();

        let sink = run(with_sub_options(&flags), &mut data);

        prop_assert_eq!(&data, &original);
        prop_assert!(sink.outcomes().iter().all(|outcome| outcome.status == Status::Skipped));
    }

    #[test]
    fn master_switch_overrides_everything(flags in toggles()) {
        let mut config = with_sub_options(&flags);
        config.general.enabled = false;
        config.stash_options.enabled = true;
        config.hideout_options.enabled = true;
        config.economy_options.enabled = true;
        config.other_tweaks.enabled = true;
        let original = sample_dataset();
        let mut data = original.clone();

        run(config, &mut data);

        prop_assert_eq!(&data, &original);
    }
}
