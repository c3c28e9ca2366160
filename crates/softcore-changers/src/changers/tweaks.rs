//! `otherTweaks`

use serde_json::{json, Value};
use softcore_config::{
    model::{BiggerAmmoStacks, CurrencyStackSizes},
    Configuration,
};
use softcore_dataset::{ptr, TableId};
use softcore_engine::{FnUnit, MutationUnit, Section, UnitContext, UnitError};

use super::SetEntry;
use crate::ids::{base_classes, items, quests};
use crate::tables;

const EXAMINE_TIME: f64 = 0.2;

/// Pockets whose special slots accept extra items
const SPECIAL_POCKETS: [&str; 2] = [items::POCKETS_SPECIAL, items::POCKETS_TUE];

const SMALL_CONTAINERS: [&str; 6] = [
    items::DOGTAG_CASE,
    items::INJECTOR_CASE,
    items::KEY_TOOL,
    items::KEYCARD_HOLDER,
    items::SIMPLE_WALLET,
    items::WZ_WALLET,
];

/// Item classes that stay examined by default
const ALWAYS_EXAMINED: [&str; 4] = [
    base_classes::BUILT_IN_INSERTS,
    base_classes::MAGAZINE,
    base_classes::CYLINDER_MAGAZINE,
    base_classes::ARMOR_PLATE,
];

/// Skill gains as `(pointer under SkillsSettings, factor)`
const SKILL_GAINS: [(&str, f64); 4] = [
    ("/Vitality/DamageTakenAction", 10.0),
    ("/Sniper/WeaponShotAction", 10.0),
    ("/Surgery/SurgeryAction", 10.0),
    ("/WeaponTreatment/SkillPointsPerRepair", 100.0),
];

const RESHALA: &str = "/types/bossbully";

/// Build the `otherTweaks` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let tweaks = config.other_tweaks();
    Section::new("otherTweaks", tweaks.enabled)
        .unit(
            tweaks.skill_exp_buffs,
            FnUnit::new("skillExpBuffs", &[TableId::Globals], skill_exp_buffs),
        )
        .unit(
            tweaks.signal_pistol_in_special_slots,
            SpecialSlots {
                name: "signalPistolInSpecialSlots",
                items: &[items::SIGNAL_PISTOL],
            },
        )
        .unit(
            tweaks.unexamined_items_are_back,
            FnUnit::new("unexaminedItemsAreBack", &[TableId::Items], unexamined_items),
        )
        .unit(
            tweaks.faster_examine_time,
            FnUnit::new("fasterExamineTime", &[TableId::Items], faster_examine_time),
        )
        .unit(
            tweaks.remove_backpack_restrictions,
            FnUnit::new("removeBackpackRestrictions", &[TableId::Items], remove_backpack_restrictions),
        )
        .unit(
            tweaks.remove_discard_limit,
            FnUnit::new("removeDiscardLimit", &[TableId::Items], remove_discard_limit),
        )
        .unit(
            tweaks.reshala_always_has_golden_tt,
            FnUnit::new("reshalaAlwaysHasGoldenTT", &[TableId::Bots], golden_tt),
        )
        .unit(
            tweaks.bigger_ammo_stacks.enabled,
            AmmoStacks {
                options: tweaks.bigger_ammo_stacks.clone(),
            },
        )
        .unit(
            tweaks.quest_changes,
            FnUnit::new("questChanges", &[TableId::Quests], quest_changes),
        )
        .unit(
            tweaks.remove_raid_item_limits,
            SetEntry::new(
                "removeRaidItemLimits",
                TableId::Globals,
                "/config/RestrictionsInRaid",
                json!([]),
            ),
        )
        .unit(
            tweaks.bigger_currency_stacks,
            CurrencyStacks {
                sizes: tweaks.currency_stack_sizes.clone(),
            },
        )
        .unit(
            tweaks.small_containers_in_special_slots,
            SpecialSlots {
                name: "smallContainersInSpecialSlots",
                items: &SMALL_CONTAINERS,
            },
        )
}

fn skill_exp_buffs(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    for (pointer, factor) in SKILL_GAINS {
        ctx.scale(TableId::Globals, &format!("/config/SkillsSettings{pointer}"), factor)?;
    }
    Ok(())
}

/// Adds items to every special slot filter of the pockets
struct SpecialSlots {
    name: &'static str,
    items: &'static [&'static str],
}

impl MutationUnit for SpecialSlots {
    fn name(&self) -> &str {
        self.name
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Items]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let allowed = tables::strings(self.items.iter().copied());
        for pocket in SPECIAL_POCKETS {
            let slots = ptr!(pocket, "_props", "Slots");
            for index in 0..tables::len(ctx, TableId::Items, &slots) {
                let filter = format!("{slots}/{index}/_props/filters/0/Filter");
                if ctx.get(TableId::Items, &filter).is_some() {
                    ctx.union(TableId::Items, &filter, &allowed)?;
                }
            }
        }
        Ok(())
    }
}

/// Concrete items whose `_props` pass `predicate`
fn items_where(ctx: &UnitContext<'_>, predicate: impl Fn(&Value) -> bool) -> Vec<String> {
    tables::item_ids(ctx)
        .into_iter()
        .filter(|id| tables::item(ctx, id).is_some_and(&predicate))
        .collect()
}

fn unexamined_items(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.require_table(TableId::Items)?.is_none() {
        return Ok(());
    }
    let examined = items_where(ctx, |item| {
        let parent = tables::str_field(item, "_parent").unwrap_or_default();
        !ALWAYS_EXAMINED.contains(&parent)
            && item.pointer("/_props/ExaminedByDefault").and_then(Value::as_bool) == Some(true)
    });
    for id in &examined {
        ctx.set(TableId::Items, &ptr!(id, "_props", "ExaminedByDefault"), false)?;
    }
    ctx.debug(format!("{} items unexamined", examined.len()));
    Ok(())
}

fn faster_examine_time(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let slow = items_where(ctx, |item| {
        item.pointer("/_props/ExamineTime")
            .and_then(Value::as_f64)
            .is_some_and(|time| time != 0.0)
    });
    for id in slow {
        ctx.set(TableId::Items, &ptr!(id, "_props", "ExamineTime"), EXAMINE_TIME)?;
    }
    Ok(())
}

fn remove_backpack_restrictions(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let excluded = "/_props/Grids/0/_props/filters/0/ExcludedFilter";
    let restricted = items_where(ctx, |item| {
        item.pointer(excluded)
            .and_then(Value::as_array)
            .is_some_and(|list| list.iter().any(|id| id.as_str() == Some(items::AMMUNITION_CASE)))
    });
    for id in restricted {
        ctx.set(TableId::Items, &format!("{}{excluded}", ptr!(id)), json!([]))?;
    }
    Ok(())
}

fn remove_discard_limit(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    let limited = items_where(ctx, |item| item.get("_props").is_some_and(Value::is_object));
    for id in limited {
        ctx.set(TableId::Items, &ptr!(id, "_props", "DiscardLimit"), -1)?;
    }
    Ok(())
}

fn golden_tt(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.lookup(TableId::Bots, RESHALA).is_none() {
        return Ok(());
    }
    tables::assign(ctx, TableId::Bots, &format!("{RESHALA}/chances/equipment/Holster"), 100)?;
    tables::assign(
        ctx,
        TableId::Bots,
        &format!("{RESHALA}/inventory/equipment/Holster"),
        json!({items::GOLDEN_TT: 1}),
    )?;
    Ok(())
}

/// Scales ammo stacks, optionally shrinking the bot secure container ammo count to match
struct AmmoStacks {
    options: BiggerAmmoStacks,
}

impl MutationUnit for AmmoStacks {
    fn name(&self) -> &str {
        "biggerAmmoStacks"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Items, TableId::BotConfig]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let multiplier = self.options.stack_multiplier;
        let ammo = items_where(ctx, |item| {
            tables::str_field(item, "_parent") == Some(base_classes::AMMO)
                && item.pointer("/_props/StackMaxSize").and_then(Value::as_f64).is_some_and(|size| size > 0.0)
        });
        for id in &ammo {
            ctx.scale_rounded(TableId::Items, &ptr!(id, "_props", "StackMaxSize"), multiplier)?;
        }

        if self.options.bot_ammo_stack_fix && !ammo.is_empty() && multiplier > 0.0 {
            ctx.from_baseline(TableId::BotConfig, "/secureContainerAmmoStackCount", |count| {
                (count / multiplier).round()
            })?;
        }
        Ok(())
    }
}

fn quest_changes(ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
    if ctx.require_table(TableId::Quests)?.is_none() {
        return Ok(());
    }

    let crisis = ptr!(quests::CRISIS, "conditions", "AvailableForStart", 1);
    if ctx.get(TableId::Quests, &crisis).is_some() {
        ctx.set(TableId::Quests, &format!("{crisis}/value"), 30)?;
    }

    for quest in tables::keys(ctx, TableId::Quests, "") {
        let is_drip_out = ctx
            .get(TableId::Quests, &ptr!(quest, "QuestName"))
            .and_then(Value::as_str)
            .is_some_and(|name| name.contains("Drip-Out"));
        if !is_drip_out {
            continue;
        }
        let finish = ptr!(quest, "conditions", "AvailableForFinish");
        for (condition_type, value) in [("HandoverItem", 10), ("CounterCreator", 20)] {
            let found = tables::positions(ctx, TableId::Quests, &finish, |condition| {
                tables::str_field(condition, "conditionType") == Some(condition_type)
            });
            if let Some(index) = found.first() {
                ctx.set(TableId::Quests, &format!("{finish}/{index}/value"), value)?;
            }
        }
    }

    let circulate = ptr!(quests::CIRCULATE, "conditions", "AvailableForFinish", 0);
    if ctx.get(TableId::Quests, &circulate).is_some() {
        ctx.set(TableId::Quests, &format!("{circulate}/value"), 50)?;
    }

    let colleagues = ptr!(quests::COLLEAGUES_PART_3, "conditions", "AvailableForFinish");
    for condition_id in quests::COLLEAGUES_CONDITIONS {
        let found = tables::positions(ctx, TableId::Quests, &colleagues, |condition| {
            tables::str_field(condition, "id") == Some(condition_id)
        });
        if let Some(index) = found.first() {
            ctx.set(TableId::Quests, &format!("{colleagues}/{index}/onlyFoundInRaid"), false)?;
        }
    }
    Ok(())
}

struct CurrencyStacks {
    sizes: CurrencyStackSizes,
}

impl MutationUnit for CurrencyStacks {
    fn name(&self) -> &str {
        "biggerCurrencyStacks"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Items]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let sizes = [
            (items::EUROS, self.sizes.euros),
            (items::DOLLARS, self.sizes.dollars),
            (items::GP_COIN, self.sizes.gpcoin),
            (items::ROUBLES, self.sizes.roubles),
        ];
        for (currency, size) in sizes {
            tables::assign(ctx, TableId::Items, &ptr!(currency, "_props", "StackMaxSize"), size)?;
        }
        Ok(())
    }
}
