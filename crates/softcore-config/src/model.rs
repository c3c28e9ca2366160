//! Configuration schema
//!
//! Every section carries its own default table (its `Default` impl). Missing
//! sections and missing options are filled from it at parse time, so
//! consumers always see fully populated structs. Unrecognized keys are
//! ignored.

use serde::{Deserialize, Serialize};

use crate::error::LoadFailure;
use crate::validate;

/// Root of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Master switch and debug logging
    pub general: General,
    /// Player stash changes
    pub stash_options: StashOptions,
    /// Secure container changes
    pub secure_containers_options: SecureContainersOptions,
    /// Hideout changes
    pub hideout_options: HideoutOptions,
    /// Flea market and pricing changes
    pub economy_options: EconomyOptions,
    /// Trader changes
    pub trader_changes: TraderChanges,
    /// Crafting recipe changes
    pub crafting_changes: CraftingChanges,
    /// Insurance changes
    pub insurance_changes: InsuranceChanges,
    /// Miscellaneous tweaks
    pub other_tweaks: OtherTweaks,
}

impl Configuration {
    /// Parse and validate JSON5 text
    ///
    /// # Errors
    /// `Parse` on malformed text or wrong value types, `Invalid` when a value
    /// is out of range.
    pub fn parse(text: &str) -> Result<Self, LoadFailure> {
        let config: Self = json5::from_str(text)?;
        validate::check(&config)?;
        Ok(config)
    }

    /// General options
    #[inline]
    #[must_use]
    pub fn general(&self) -> &General {
        &self.general
    }

    /// Stash options
    #[inline]
    #[must_use]
    pub fn stash_options(&self) -> &StashOptions {
        &self.stash_options
    }

    /// Secure container options
    #[inline]
    #[must_use]
    pub fn secure_containers_options(&self) -> &SecureContainersOptions {
        &self.secure_containers_options
    }

    /// Hideout options
    #[inline]
    #[must_use]
    pub fn hideout_options(&self) -> &HideoutOptions {
        &self.hideout_options
    }

    /// Economy options
    #[inline]
    #[must_use]
    pub fn economy_options(&self) -> &EconomyOptions {
        &self.economy_options
    }

    /// Trader options
    #[inline]
    #[must_use]
    pub fn trader_changes(&self) -> &TraderChanges {
        &self.trader_changes
    }

    /// Crafting options
    #[inline]
    #[must_use]
    pub fn crafting_changes(&self) -> &CraftingChanges {
        &self.crafting_changes
    }

    /// Insurance options
    #[inline]
    #[must_use]
    pub fn insurance_changes(&self) -> &InsuranceChanges {
        &self.insurance_changes
    }

    /// Other tweaks
    #[inline]
    #[must_use]
    pub fn other_tweaks(&self) -> &OtherTweaks {
        &self.other_tweaks
    }

    /// Whether the flea market is switched off entirely.
    ///
    /// When set, every marketplace-dependent section is skipped.
    #[inline]
    #[must_use]
    pub fn marketplace_disabled(&self) -> bool {
        self.economy_options.enabled && self.economy_options.disable_flea_market_completely
    }
}

/// `general`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct General {
    /// When false, no section runs
    pub enabled: bool,
    /// Emit debug-level reporter messages
    pub debug: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
        }
    }
}

/// `stashOptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StashOptions {
    /// Section toggle
    pub enabled: bool,
    /// Enlarge every stash edition
    pub bigger_stash: bool,
    /// Start small and grow the stash through hideout upgrades
    pub progressive_stash: bool,
    /// Scale currency requirements of stash upgrades
    pub less_currency_for_construction: bool,
    /// Lower trader loyalty requirements for stash upgrades
    pub easier_loyalty: bool,
    /// Factor applied to currency requirements
    pub currency_requirement_multiplier: f64,
}

impl Default for StashOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            bigger_stash: false,
            progressive_stash: false,
            less_currency_for_construction: false,
            easier_loyalty: false,
            currency_requirement_multiplier: 0.1,
        }
    }
}

/// `secureContainersOptions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SecureContainersOptions {
    /// Section toggle
    pub enabled: bool,
    /// Enlarge secure container grids
    pub bigger_containers: bool,
    /// Unlock containers through crafting
    pub progressive_containers: ProgressiveContainers,
    /// Player level required for the Collector quest
    #[serde(rename = "CollectorQuestLevelStart")]
    pub collector_quest_level_start: u32,
}

impl Default for SecureContainersOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            bigger_containers: false,
            progressive_containers: ProgressiveContainers::default(),
            collector_quest_level_start: 10,
        }
    }
}

/// `secureContainersOptions.progressiveContainers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressiveContainers {
    /// Sub-toggle
    pub enabled: bool,
    /// Make the Collector quest available earlier
    pub collector_quest_redone: bool,
}

/// `hideoutOptions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HideoutOptions {
    /// Section toggle
    pub enabled: bool,
    /// Hideout storage containers
    pub hideout_containers: HideoutContainers,
    /// Bitcoin farm speed and price
    pub faster_bitcoin_farming: FasterBitcoinFarming,
    /// Production times
    pub faster_crafting_time: FasterCraftingTime,
    /// Area construction times
    pub faster_hideout_construction: FasterHideoutConstruction,
    /// Generator fuel flow
    pub fuel_consumption: FuelConsumption,
    /// Scav case recipes and rewards
    pub scav_case_options: ScavCaseOptions,
    /// Allow gym workouts while fatigued
    pub allow_gym_training_with_muscle_pain: bool,
    /// Drop the found-in-raid requirement for hideout items
    #[serde(rename = "disableFIRHideout")]
    pub disable_fir_hideout: bool,
}

/// `hideoutOptions.hideoutContainers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HideoutContainers {
    /// Sub-toggle
    pub enabled: bool,
    /// Enlarge storage containers
    pub bigger_hideout_containers: bool,
    /// Let the SICC case hold more item kinds
    pub sicc_case_buff: bool,
}

/// `hideoutOptions.fasterBitcoinFarming`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FasterBitcoinFarming {
    /// Sub-toggle
    pub enabled: bool,
    /// Fixed bitcoin price, when set
    pub bitcoin_price: Option<f64>,
    /// Divisor for the bitcoin production time
    pub base_bitcoin_time_multiplier: f64,
    /// GPU boost rate
    pub gpu_efficiency: f64,
}

impl Default for FasterBitcoinFarming {
    fn default() -> Self {
        Self {
            enabled: false,
            bitcoin_price: None,
            base_bitcoin_time_multiplier: 1.0,
            gpu_efficiency: 1.0,
        }
    }
}

/// `hideoutOptions.fasterCraftingTime`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FasterCraftingTime {
    /// Sub-toggle
    pub enabled: bool,
    /// Divisor for every production time
    pub base_crafting_time_multiplier: f64,
    /// Hideout management skill experience
    pub hideout_skill_exp_fix: HideoutSkillExpFix,
    /// Moonshine recipe override
    pub faster_moonshine_production: FasterProduction,
    /// Purified water recipe override
    pub faster_purified_water_production: FasterProduction,
    /// Cultist circle override
    pub faster_cultist_circle: FasterProduction,
}

impl Default for FasterCraftingTime {
    fn default() -> Self {
        Self {
            enabled: false,
            base_crafting_time_multiplier: 1.0,
            hideout_skill_exp_fix: HideoutSkillExpFix::default(),
            faster_moonshine_production: FasterProduction::default(),
            faster_purified_water_production: FasterProduction::default(),
            faster_cultist_circle: FasterProduction::default(),
        }
    }
}

/// A single recipe's production time override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FasterProduction {
    /// Sub-toggle
    pub enabled: bool,
    /// Divisor for this recipe's production time
    pub base_crafting_time_multiplier: f64,
}

impl Default for FasterProduction {
    fn default() -> Self {
        Self {
            enabled: false,
            base_crafting_time_multiplier: 1.0,
        }
    }
}

/// `hideoutOptions.fasterCraftingTime.hideoutSkillExpFix`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HideoutSkillExpFix {
    /// Sub-toggle
    pub enabled: bool,
    /// Factor on hideout management experience
    pub hideout_skill_exp_multiplier: f64,
}

impl Default for HideoutSkillExpFix {
    fn default() -> Self {
        Self {
            enabled: false,
            hideout_skill_exp_multiplier: 1.0,
        }
    }
}

/// `hideoutOptions.fasterHideoutConstruction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FasterHideoutConstruction {
    /// Sub-toggle
    pub enabled: bool,
    /// Divisor for construction times
    pub hideout_construction_time_multiplier: f64,
}

impl Default for FasterHideoutConstruction {
    fn default() -> Self {
        Self {
            enabled: false,
            hideout_construction_time_multiplier: 1.0,
        }
    }
}

/// `hideoutOptions.fuelConsumption`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FuelConsumption {
    /// Sub-toggle
    pub enabled: bool,
    /// Factor on generator fuel flow
    pub fuel_consumption_multiplier: f64,
}

impl Default for FuelConsumption {
    fn default() -> Self {
        Self {
            enabled: false,
            fuel_consumption_multiplier: 1.0,
        }
    }
}

/// `hideoutOptions.scavCaseOptions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScavCaseOptions {
    /// Sub-toggle
    pub enabled: bool,
    /// Raise reward value ranges
    pub better_rewards: bool,
    /// Production time override
    pub faster_scavcase: FasterScavcase,
    /// Rebalance recipe costs
    pub rebalance: bool,
}

/// `hideoutOptions.scavCaseOptions.fasterScavcase`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FasterScavcase {
    /// Sub-toggle
    pub enabled: bool,
    /// Divisor for scav case production time
    pub speed_multiplier: f64,
}

impl Default for FasterScavcase {
    fn default() -> Self {
        Self {
            enabled: false,
            speed_multiplier: 1.0,
        }
    }
}

/// `economyOptions`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EconomyOptions {
    /// Section toggle
    pub enabled: bool,
    /// Turn the flea market off; takes precedence over every marketplace section
    pub disable_flea_market_completely: bool,
    /// Handbook and flea price corrections
    pub price_rebalance: PriceRebalance,
    /// Flea market blacklist
    pub pacifist_flea_market: PacifistFleaMarket,
    /// Barter offer generation
    pub barter_economy: BarterEconomy,
    /// Remaining flea market knobs
    pub other_flea_market_changes: OtherFleaMarketChanges,
}

/// `economyOptions.priceRebalance`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PriceRebalance {
    /// Sub-toggle
    pub enabled: bool,
    /// Per-item price corrections
    pub item_fixes: bool,
}

/// `economyOptions.pacifistFleaMarket`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PacifistFleaMarket {
    /// Sub-toggle
    pub enabled: bool,
    /// Categories allowed on the flea market
    pub whitelist: EconomyToggle,
    /// Quest keys
    pub quest_keys: EconomyToggle,
    /// Marked room keys
    pub marked_keys: EconomyToggle,
}

/// Toggle with a price factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EconomyToggle {
    /// Sub-toggle
    pub enabled: bool,
    /// Factor on trader prices of the affected items
    pub price_multiplier: f64,
}

impl Default for EconomyToggle {
    fn default() -> Self {
        Self {
            enabled: false,
            price_multiplier: 1.0,
        }
    }
}

/// Inclusive count range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    /// Lower bound
    pub min: u32,
    /// Upper bound
    pub max: u32,
}

impl CountRange {
    /// Create range
    #[inline]
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// `economyOptions.barterEconomy`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BarterEconomy {
    /// Sub-toggle
    pub enabled: bool,
    /// Share of generated offers paid in cash
    pub cash_offers_percentage: u32,
    /// Barter price spread, in percent
    pub barter_price_variance: u32,
    /// Items requested per barter offer
    pub offer_item_count: CountRange,
    /// Copies of non-stackable items per offer
    pub non_stackable_count: CountRange,
    /// Stack count cap for requested items
    pub item_count_max: u32,
    /// Allow bitcoins as barter currency
    pub unban_bitcoins_for_barters: bool,
}

impl Default for BarterEconomy {
    fn default() -> Self {
        Self {
            enabled: false,
            cash_offers_percentage: 20,
            barter_price_variance: 20,
            offer_item_count: CountRange::new(1, 3),
            non_stackable_count: CountRange::new(1, 2),
            item_count_max: 3,
            unban_bitcoins_for_barters: false,
        }
    }
}

/// `economyOptions.otherFleaMarketChanges`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherFleaMarketChanges {
    /// Sub-toggle
    pub enabled: bool,
    /// Let players sell on the flea market
    pub selling_on_flea: bool,
    /// Player level at which the flea market opens
    pub flea_market_open_at_level: u32,
    /// Factor on flea offer prices
    pub flea_prices_increased: f64,
    /// Offers come at full durability
    pub flea_pristine_items: bool,
    /// Barter requirements must be found in raid
    pub only_found_in_raid_items_allowed_for_barters: bool,
}

impl Default for OtherFleaMarketChanges {
    fn default() -> Self {
        Self {
            enabled: false,
            selling_on_flea: false,
            flea_market_open_at_level: 15,
            flea_prices_increased: 1.0,
            flea_pristine_items: false,
            only_found_in_raid_items_allowed_for_barters: false,
        }
    }
}

/// `traderChanges`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraderChanges {
    /// Section toggle
    pub enabled: bool,
    /// Raise trader buy-back prices
    pub better_sales_to_traders: bool,
    /// Traders buy from more item categories
    pub alternative_categories: bool,
    /// Fence sells no weapons or gear
    pub pacifist_fence: PacifistFence,
    /// Price containers by their handbook value
    pub reasonably_priced_cases: bool,
    /// Skier trades in euros
    pub skier_uses_euros: bool,
    /// Raise per-offer buy limits
    pub bigger_limits: BiggerLimits,
}

/// `traderChanges.pacifistFence`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PacifistFence {
    /// Sub-toggle
    pub enabled: bool,
    /// Offers per item category
    pub number_of_fence_offers: u32,
}

impl Default for PacifistFence {
    fn default() -> Self {
        Self {
            enabled: false,
            number_of_fence_offers: 20,
        }
    }
}

/// `traderChanges.biggerLimits`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BiggerLimits {
    /// Sub-toggle
    pub enabled: bool,
    /// Factor on buy restrictions
    pub multiplier: f64,
}

impl Default for BiggerLimits {
    fn default() -> Self {
        Self {
            enabled: false,
            multiplier: 1.0,
        }
    }
}

/// `craftingChanges`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CraftingChanges {
    /// Section toggle
    pub enabled: bool,
    /// Rebalance recipe inputs and outputs
    pub crafting_rebalance: bool,
    /// Add new recipes
    pub additional_crafting_recipes: bool,
}

/// `insuranceChanges`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsuranceChanges {
    /// Section toggle
    pub enabled: bool,
    /// Per-trader return chance and price
    pub trader_insurance_config: TraderInsuranceConfig,
}

/// Insurance settings of the three insuring traders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraderInsuranceConfig {
    /// Fence
    pub fence: TraderInsurance,
    /// Prapor
    pub prapor: TraderInsurance,
    /// Therapist
    pub therapist: TraderInsurance,
}

impl Default for TraderInsuranceConfig {
    fn default() -> Self {
        Self {
            fence: TraderInsurance::new(95, 45),
            prapor: TraderInsurance::new(80, 27),
            therapist: TraderInsurance::new(50, 15),
        }
    }
}

/// One trader's insurance settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraderInsurance {
    /// Chance (percent) that an insured item comes back
    pub return_chance_percent: u32,
    /// Insurance price coefficient
    pub insurance_price_coef: u32,
}

impl TraderInsurance {
    /// Create settings
    #[inline]
    #[must_use]
    pub const fn new(return_chance_percent: u32, insurance_price_coef: u32) -> Self {
        Self {
            return_chance_percent,
            insurance_price_coef,
        }
    }
}

/// `otherTweaks`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OtherTweaks {
    /// Section toggle
    pub enabled: bool,
    /// Faster skill progression
    pub skill_exp_buffs: bool,
    /// Signal pistols fit special slots
    pub signal_pistol_in_special_slots: bool,
    /// Items must be examined again
    pub unexamined_items_are_back: bool,
    /// Shorter examine time
    pub faster_examine_time: bool,
    /// Drop backpack-in-backpack restrictions
    pub remove_backpack_restrictions: bool,
    /// Drop the discard limit
    pub remove_discard_limit: bool,
    /// Reshala always carries his golden TT
    pub reshala_always_has_golden_tt: bool,
    /// Ammo stack sizes
    pub bigger_ammo_stacks: BiggerAmmoStacks,
    /// Quest requirement changes
    pub quest_changes: bool,
    /// Drop per-raid item limits
    pub remove_raid_item_limits: bool,
    /// Currency stack sizes
    pub bigger_currency_stacks: bool,
    /// Stack sizes used when `bigger_currency_stacks` is on
    pub currency_stack_sizes: CurrencyStackSizes,
    /// Small containers fit special slots
    pub small_containers_in_special_slots: bool,
}

/// `otherTweaks.biggerAmmoStacks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BiggerAmmoStacks {
    /// Sub-toggle
    pub enabled: bool,
    /// Factor on ammo stack size
    pub stack_multiplier: f64,
    /// Keep bot secure container ammo counts unchanged
    pub bot_ammo_stack_fix: bool,
}

impl Default for BiggerAmmoStacks {
    fn default() -> Self {
        Self {
            enabled: false,
            stack_multiplier: 1.0,
            bot_ammo_stack_fix: false,
        }
    }
}

/// `otherTweaks.currencyStackSizes`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyStackSizes {
    /// Euro stack size
    pub euros: u32,
    /// Dollar stack size
    pub dollars: u32,
    /// GP coin stack size
    pub gpcoin: u32,
    /// Rouble stack size
    pub roubles: u32,
}

impl Default for CurrencyStackSizes {
    fn default() -> Self {
        Self {
            euros: 100_000,
            dollars: 100_000,
            gpcoin: 100,
            roubles: 1_000_000,
        }
    }
}
