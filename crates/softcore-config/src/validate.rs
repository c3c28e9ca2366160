//! Range checks run after parsing

use crate::error::LoadFailure;
use crate::model::{Configuration, CountRange};

/// Reject out-of-range values.
///
/// Multipliers must be finite and strictly positive, percentages at most
/// 100, and every range must have `min <= max`. Checked regardless of the
/// `enabled` flags so a bad file fails the same way whatever is switched on.
pub(crate) fn check(config: &Configuration) -> Result<(), LoadFailure> {
    let stash = &config.stash_options;
    let hideout = &config.hideout_options;
    let crafting = &hideout.faster_crafting_time;
    let economy = &config.economy_options;
    let flea = &economy.pacifist_flea_market;
    let barter = &economy.barter_economy;

    let multipliers = [
        ("stashOptions.currencyRequirementMultiplier", stash.currency_requirement_multiplier),
        (
            "hideoutOptions.fasterBitcoinFarming.baseBitcoinTimeMultiplier",
            hideout.faster_bitcoin_farming.base_bitcoin_time_multiplier,
        ),
        ("hideoutOptions.fasterBitcoinFarming.gpuEfficiency", hideout.faster_bitcoin_farming.gpu_efficiency),
        (
            "hideoutOptions.fasterCraftingTime.baseCraftingTimeMultiplier",
            crafting.base_crafting_time_multiplier,
        ),
        (
            "hideoutOptions.fasterCraftingTime.hideoutSkillExpFix.hideoutSkillExpMultiplier",
            crafting.hideout_skill_exp_fix.hideout_skill_exp_multiplier,
        ),
        (
            "hideoutOptions.fasterCraftingTime.fasterMoonshineProduction.baseCraftingTimeMultiplier",
            crafting.faster_moonshine_production.base_crafting_time_multiplier,
        ),
        (
            "hideoutOptions.fasterCraftingTime.fasterPurifiedWaterProduction.baseCraftingTimeMultiplier",
            crafting.faster_purified_water_production.base_crafting_time_multiplier,
        ),
        (
            "hideoutOptions.fasterCraftingTime.fasterCultistCircle.baseCraftingTimeMultiplier",
            crafting.faster_cultist_circle.base_crafting_time_multiplier,
        ),
        (
            "hideoutOptions.fasterHideoutConstruction.hideoutConstructionTimeMultiplier",
            hideout.faster_hideout_construction.hideout_construction_time_multiplier,
        ),
        (
            "hideoutOptions.fuelConsumption.fuelConsumptionMultiplier",
            hideout.fuel_consumption.fuel_consumption_multiplier,
        ),
        (
            "hideoutOptions.scavCaseOptions.fasterScavcase.speedMultiplier",
            hideout.scav_case_options.faster_scavcase.speed_multiplier,
        ),
        ("economyOptions.pacifistFleaMarket.whitelist.priceMultiplier", flea.whitelist.price_multiplier),
        ("economyOptions.pacifistFleaMarket.questKeys.priceMultiplier", flea.quest_keys.price_multiplier),
        ("economyOptions.pacifistFleaMarket.markedKeys.priceMultiplier", flea.marked_keys.price_multiplier),
        (
            "economyOptions.otherFleaMarketChanges.fleaPricesIncreased",
            economy.other_flea_market_changes.flea_prices_increased,
        ),
        ("traderChanges.biggerLimits.multiplier", config.trader_changes.bigger_limits.multiplier),
        (
            "otherTweaks.biggerAmmoStacks.stackMultiplier",
            config.other_tweaks.bigger_ammo_stacks.stack_multiplier,
        ),
    ];
    for (field, value) in multipliers {
        positive(field, value)?;
    }

    if let Some(price) = hideout.faster_bitcoin_farming.bitcoin_price {
        positive("hideoutOptions.fasterBitcoinFarming.bitcoinPrice", price)?;
    }

    percentage("economyOptions.barterEconomy.cashOffersPercentage", barter.cash_offers_percentage)?;
    percentage("economyOptions.barterEconomy.barterPriceVariance", barter.barter_price_variance)?;
    let insurance = &config.insurance_changes.trader_insurance_config;
    for (field, trader) in [
        ("insuranceChanges.traderInsuranceConfig.fence", insurance.fence),
        ("insuranceChanges.traderInsuranceConfig.prapor", insurance.prapor),
        ("insuranceChanges.traderInsuranceConfig.therapist", insurance.therapist),
    ] {
        percentage(&format!("{field}.returnChancePercent"), trader.return_chance_percent)?;
    }

    ordered("economyOptions.barterEconomy.offerItemCount", barter.offer_item_count)?;
    ordered("economyOptions.barterEconomy.nonStackableCount", barter.non_stackable_count)?;

    Ok(())
}

fn positive(field: &str, value: f64) -> Result<(), LoadFailure> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LoadFailure::invalid(field, format!("{value} is not a positive number")))
    }
}

fn percentage(field: &str, value: u32) -> Result<(), LoadFailure> {
    if value <= 100 {
        Ok(())
    } else {
        Err(LoadFailure::invalid(field, format!("{value} exceeds 100")))
    }
}

fn ordered(field: &str, range: CountRange) -> Result<(), LoadFailure> {
    if range.min <= range.max {
        Ok(())
    } else {
        Err(LoadFailure::invalid(
            field,
            format!("min {} is greater than max {}", range.min, range.max),
        ))
    }
}
