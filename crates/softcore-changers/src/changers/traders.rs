//! `traderChanges`: buy-back prices, categories, Fence, case barters, Skier and limits

use serde_json::{json, Map, Value};
use softcore_config::Configuration;
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use crate::assets;
use crate::ids::{base_classes, items, traders};
use crate::tables;

/// Extra buy-back coefficient per trader, on top of `35 - 5 * level`
const BUY_PRICE_ADJUSTMENT: [(&str, i64); 7] = [
    (traders::PEACEKEEPER, 7),
    (traders::SKIER, 6),
    (traders::PRAPOR, 5),
    (traders::MECHANIC, 4),
    (traders::JAEGER, 3),
    (traders::RAGMAN, 2),
    (traders::THERAPIST, 1),
];

const SKIER_EURO_BALANCE: u32 = 700_000;
const FENCE_DISCOUNT_PRICE_MULT: f64 = 0.82;

/// How a barter requirement count changes
#[derive(Debug, Clone, Copy, PartialEq)]
enum CountChange {
    Set(u32),
    /// Divide and round, never below one
    Divide(f64),
    /// `round(count / n) + 1`
    DivideRoundPlusOne(f64),
}

impl CountChange {
    fn apply(self, count: f64) -> f64 {
        match self {
            CountChange::Set(to) => f64::from(to),
            CountChange::Divide(by) => (count / by).round().max(1.0),
            CountChange::DivideRoundPlusOne(by) => (count / by).round() + 1.0,
        }
    }
}

/// `(trader, offered item, requested item, change)`
const CASE_BARTERS: [(&str, &str, &str, CountChange); 12] = [
    (traders::THERAPIST, items::ITEM_CASE, items::EUROS, CountChange::Set(7256)),
    (traders::THERAPIST, items::ITEM_CASE, items::OPHTHALMOSCOPE, CountChange::Set(8)),
    (traders::THERAPIST, items::ITEM_CASE, items::DOGTAG_USEC, CountChange::Set(20)),
    (traders::THERAPIST, items::LUCKY_SCAV_JUNK_BOX, items::ROUBLES, CountChange::Set(961_138)),
    (traders::THERAPIST, items::LUCKY_SCAV_JUNK_BOX, items::DOGTAG_USEC, CountChange::Set(15)),
    (traders::THERAPIST, items::MEDICINE_CASE, items::ROUBLES, CountChange::Set(290_610)),
    (traders::THERAPIST, items::LEDX, items::DOGTAG_USEC, CountChange::Divide(10.0)),
    (traders::THERAPIST, items::THICC_ITEM_CASE, items::LEDX, CountChange::Set(5)),
    (traders::THERAPIST, items::THICC_ITEM_CASE, items::MOONSHINE, CountChange::Set(10)),
    (traders::PEACEKEEPER, items::THICC_ITEM_CASE, items::BLUE_FOLDERS, CountChange::DivideRoundPlusOne(5.0)),
    (traders::SKIER, items::WEAPON_CASE, items::MOONSHINE, CountChange::Set(4)),
    (traders::SKIER, items::THICC_WEAPON_CASE, items::MOONSHINE, CountChange::Set(4)),
];

/// Build the `traderChanges` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let changes = config.trader_changes();
    Section::new("traderChanges", changes.enabled)
        .unit(
            changes.better_sales_to_traders,
            FnUnit::new("betterSalesToTraders", &[TableId::Traders], better_sales_to_traders),
        )
        .unit(
            changes.alternative_categories,
            FnUnit::new("alternativeCategories", &[TableId::Traders], alternative_categories),
        )
        .unit(
            changes.pacifist_fence.enabled,
            PacifistFence {
                offers: changes.pacifist_fence.number_of_fence_offers,
            },
        )
        .unit(
            changes.reasonably_priced_cases,
            FnUnit::new("reasonablyPricedCases", &[TableId::Traders], reasonably_priced_cases),
        )
        .unit(
            changes.skier_uses_euros,
            FnUnit::new("skierUsesEuros", &[TableId::Traders, TableId::Quests], skier_uses_euros),
        )
        .unit(
            changes.bigger_limits.enabled,
            BiggerLimits {
                multiplier: changes.bigger_limits.multiplier,
            },
        )
}

fn better_sales_to_traders(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (trader, adjustment) in BUY_PRICE_ADJUSTMENT {
        let levels = ptr!(trader, "base", "loyaltyLevels");
        if ctx.get(TableId::Traders, &levels).is_none() {
            ctx.debug(format!("trader {trader} not found"));
            continue;
        }
        let mut coef = 35;
        for index in 0..tables::len(ctx, TableId::Traders, &levels) {
            ctx.set(TableId::Traders, &format!("{levels}/{index}/buy_price_coef"), coef + adjustment)?;
            coef -= 5;
        }
    }
    Ok(())
}

fn alternative_categories(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let categories = |trader: &str| ptr!(trader, "base", "items_buy", "category");

    let therapist = categories(traders::THERAPIST);
    if ctx.lookup(TableId::Traders, &therapist).is_some() {
        ctx.union(
            TableId::Traders,
            &therapist,
            &tables::strings([base_classes::MEDICAL_SUPPLIES, base_classes::HOUSEHOLD_GOODS]),
        )?;
        if let Some(Value::Array(list)) = ctx.require(TableId::Traders, &therapist)? {
            list.retain(|class| class.as_str() != Some(base_classes::BARTER_ITEM));
        }
    }

    for (trader, class) in [(traders::RAGMAN, base_classes::JEWELRY), (traders::SKIER, base_classes::INFO)] {
        let pointer = categories(trader);
        if ctx.lookup(TableId::Traders, &pointer).is_some() {
            ctx.union(TableId::Traders, &pointer, &[Value::from(class)])?;
        }
    }
    Ok(())
}

/// Fence sells consumables and barter goods only
struct PacifistFence {
    offers: u32,
}

impl PacifistFence {
    fn blacklist(ctx: &UnitContext<'_>) -> Vec<Value> {
        let quest_items = ctx
            .get(TableId::Items, "")
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|all| all.iter())
            .filter(|(_, item)| item.pointer("/_props/QuestItem").and_then(Value::as_bool) == Some(true))
            .map(|(id, _)| id.as_str());
        let classes = assets::ITEM_CLASSES
            .into_iter()
            .filter(|class| !assets::FENCE_CLASS_WHITELIST.contains(class));
        tables::strings(
            quest_items
                .chain(assets::HOST_FLEA_BLACKLIST)
                .chain(classes)
                .chain([items::ENCRYPTED_FLASH_DRIVE]),
        )
    }
}

impl MutationUnit for PacifistFence {
    fn name(&self) -> &str {
        "pacifistFence"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::TraderConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        if ctx.lookup(TableId::TraderConfig, "/fence").is_none() {
            return Ok(());
        }

        // Medical supplies in either category list break fence assort generation
        let limits: Map<String, Value> = assets::ITEM_CLASSES
            .into_iter()
            .filter(|class| *class != base_classes::MEDICAL_SUPPLIES)
            .map(|class| (class.to_string(), json!(self.offers)))
            .collect();
        let no_duplicates = tables::strings(
            assets::FENCE_CLASS_WHITELIST
                .into_iter()
                .filter(|class| *class != base_classes::MEDICAL_SUPPLIES),
        );

        let blacklist = Self::blacklist(ctx);
        ctx.union(TableId::TraderConfig, "/fence/blacklist", &blacklist)?;

        let none = json!({"min": 0, "max": 0});
        let settings = [
            ("/fence/itemTypeLimits", Value::Object(limits)),
            ("/fence/preventDuplicateOffersOfCategory", Value::Array(no_duplicates)),
            ("/fence/assortSize", json!(self.offers)),
            ("/fence/equipmentPresetMinMax", none.clone()),
            ("/fence/weaponPresetMinMax", none.clone()),
            ("/fence/itemPriceMult", json!(1)),
            ("/fence/discountOptions/assortSize", json!(self.offers * 2)),
            ("/fence/discountOptions/itemPriceMult", json!(FENCE_DISCOUNT_PRICE_MULT)),
            ("/fence/discountOptions/equipmentPresetMinMax", none.clone()),
            ("/fence/discountOptions/weaponPresetMinMax", none),
        ];
        for (pointer, value) in settings {
            tables::assign(ctx, TableId::TraderConfig, pointer, value)?;
        }
        Ok(())
    }
}

/// Barter ids under which `trader` offers `template_id`
fn barter_ids(ctx: &UnitContext<'_>, trader: &str, template_id: &str) -> Vec<String> {
    ctx.get(TableId::Traders, &ptr!(trader, "assort", "items"))
        .and_then(Value::as_array)
        .map(|offers| {
            offers
                .iter()
                .filter(|offer| tables::str_field(offer, "_tpl") == Some(template_id))
                .filter_map(|offer| tables::str_field(offer, "_id").map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Only the matching requirement of each barter changes
fn reasonably_priced_cases(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (trader, offered, requested, change) in CASE_BARTERS {
        if ctx.get(TableId::Traders, &ptr!(trader, "assort")).is_none() {
            ctx.skip(format!("assort of trader {trader} not found"));
            continue;
        }
        for barter in barter_ids(ctx, trader, offered) {
            let scheme = ptr!(trader, "assort", "barter_scheme", barter, 0);
            let matching = tables::positions(ctx, TableId::Traders, &scheme, |requirement| {
                tables::str_field(requirement, "_tpl") == Some(requested)
            });
            for index in matching {
                ctx.from_baseline(TableId::Traders, &format!("{scheme}/{index}/count"), |count| {
                    change.apply(count)
                })?;
            }
        }
    }
    Ok(())
}

fn skier_uses_euros(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let Some(euro) = ctx.handbook_price(items::EUROS).filter(|price| *price > 0.0) else {
        ctx.skip("euro handbook price not found, skipping");
        return Ok(());
    };
    let base = ptr!(traders::SKIER, "base");
    if ctx.lookup(TableId::Traders, &base).is_none() {
        return Ok(());
    }

    ctx.set(TableId::Traders, &format!("{base}/currency"), "EUR")?;
    ctx.set(TableId::Traders, &format!("{base}/balance_eur"), SKIER_EURO_BALANCE)?;
    let levels = format!("{base}/loyaltyLevels");
    for index in 0..tables::len(ctx, TableId::Traders, &levels) {
        ctx.from_baseline(TableId::Traders, &format!("{levels}/{index}/minSalesSum"), |sum| {
            (sum / euro).round()
        })?;
    }

    convert_barters(ctx, euro)?;
    convert_quest_rewards(ctx, euro)?;
    Ok(())
}

/// Rouble-priced offers become euro-priced; the euro exchange offer itself stays
fn convert_barters(ctx: &mut UnitContext<'_>, euro: f64) -> Result<(), UnitError> {
    let exchange = barter_ids(ctx, traders::SKIER, items::EUROS);
    let schemes = ptr!(traders::SKIER, "assort", "barter_scheme");
    for barter in tables::keys(ctx, TableId::Traders, &schemes) {
        if exchange.contains(&barter) {
            continue;
        }
        let payment = ptr!(traders::SKIER, "assort", "barter_scheme", barter, 0, 0);
        let paid_in_roubles = ctx
            .get(TableId::Traders, &payment)
            .and_then(|requirement| tables::str_field(requirement, "_tpl"))
            == Some(items::ROUBLES);
        if paid_in_roubles {
            ctx.from_baseline(TableId::Traders, &format!("{payment}/count"), |count| {
                (count / euro * 100.0).round() / 100.0
            })?;
            ctx.set(TableId::Traders, &format!("{payment}/_tpl"), items::EUROS)?;
        }
    }
    Ok(())
}

fn convert_quest_rewards(ctx: &mut UnitContext<'_>, euro: f64) -> Result<(), UnitError> {
    let skier_quests: Vec<String> = ctx
        .get(TableId::Quests, "")
        .and_then(Value::as_object)
        .map(|all| {
            all.iter()
                .filter(|(_, quest)| tables::str_field(quest, "traderId") == Some(traders::SKIER))
                .map(|(id, _)| id.clone())
                .collect()
        })
        .unwrap_or_default();

    for quest in skier_quests {
        let rewards = ptr!(quest, "rewards", "Success");
        if ctx.get(TableId::Quests, &rewards).is_none() {
            ctx.skip(format!("rewards of quest {quest} not found, skipping"));
            continue;
        }
        for reward in 0..tables::len(ctx, TableId::Quests, &rewards) {
            let reward = format!("{rewards}/{reward}");
            let items_pointer = format!("{reward}/items");
            let roubles = tables::positions(ctx, TableId::Quests, &items_pointer, |item| {
                tables::str_field(item, "_tpl") == Some(items::ROUBLES)
            });
            for index in roubles {
                let item = format!("{items_pointer}/{index}");
                ctx.set(TableId::Quests, &format!("{item}/_tpl"), items::EUROS)?;
                let stack = format!("{item}/upd/StackObjectsCount");
                if ctx.get(TableId::Quests, &stack).is_some() {
                    ctx.from_baseline(TableId::Quests, &stack, |count| (count / euro).ceil())?;
                }
                let value = format!("{reward}/value");
                if ctx.number(TableId::Quests, &value).is_some() {
                    ctx.from_baseline(TableId::Quests, &value, |value| (value / euro).ceil())?;
                }
            }
        }
    }
    Ok(())
}

/// Scales per-offer buy restrictions of the stock traders
struct BiggerLimits {
    multiplier: f64,
}

impl MutationUnit for BiggerLimits {
    fn name(&self) -> &str {
        "biggerLimits"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Traders]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        for trader in traders::STOCK {
            let offers = ptr!(trader, "assort", "items");
            if ctx.get(TableId::Traders, &offers).is_none() {
                ctx.skip(format!("assort of trader {trader} not found, skipping"));
                continue;
            }
            let limited = tables::positions(ctx, TableId::Traders, &offers, |offer| {
                offer.pointer("/upd/BuyRestrictionMax").and_then(Value::as_f64).is_some_and(|max| max > 0.0)
            });
            for index in limited {
                ctx.scale_rounded(
                    TableId::Traders,
                    &format!("{offers}/{index}/upd/BuyRestrictionMax"),
                    self.multiplier,
                )?;
            }
        }
        Ok(())
    }
}
