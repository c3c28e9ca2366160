//! Records the changers add to the host's tables

use serde_json::{json, Value};

use crate::ids::{base_classes, items};

/// Hideout workbench
const AREA_WORKBENCH: u32 = 10;
/// Hideout intelligence center
const AREA_INTELLIGENCE: u32 = 11;
/// Hideout medstation
const AREA_MEDSTATION: u32 = 7;

fn item_requirement(template_id: &str, count: u32) -> Value {
    json!({
        "templateId": template_id,
        "count": count,
        "isFunctional": false,
        "isEncoded": false,
        "type": "Item",
    })
}

fn area_requirement(area_type: u32, level: u32) -> Value {
    json!({"areaType": area_type, "requiredLevel": level, "type": "Area"})
}

fn recipe(id: &str, area_type: u32, production_time: u32, end_product: &str, requirements: Vec<Value>) -> Value {
    json!({
        "_id": id,
        "areaType": area_type,
        "requirements": requirements,
        "productionTime": production_time,
        "endProduct": end_product,
        "continuous": false,
        "count": 1,
        "productionLimitCount": 1,
        "isEncoded": false,
        "locked": false,
        "needFuelForAllProductionTime": false,
        "isCodeProduction": false,
    })
}

/// Secure container upgrade path for `progressiveContainers`
pub(crate) fn container_recipes() -> Vec<Value> {
    vec![
        recipe(
            "63a571802a3ab4ef5c0e6b9a",
            AREA_WORKBENCH,
            7200,
            items::SECURE_ALPHA,
            vec![
                area_requirement(AREA_WORKBENCH, 1),
                item_requirement(items::SECURE_WAIST_POUCH, 1),
                item_requirement(items::DOGTAG_USEC, 5),
            ],
        ),
        recipe(
            "63a571802a3ab4ef5c0e6b9b",
            AREA_WORKBENCH,
            14400,
            items::SECURE_BETA,
            vec![
                area_requirement(AREA_WORKBENCH, 2),
                item_requirement(items::SECURE_ALPHA, 1),
                item_requirement(items::DOGTAG_USEC, 10),
            ],
        ),
        recipe(
            "63a571802a3ab4ef5c0e6b9c",
            AREA_WORKBENCH,
            28800,
            items::SECURE_EPSILON,
            vec![
                area_requirement(AREA_WORKBENCH, 2),
                item_requirement(items::SECURE_BETA, 1),
                item_requirement(items::INTELLIGENCE_FOLDER, 1),
            ],
        ),
        recipe(
            "63a571802a3ab4ef5c0e6b9d",
            AREA_INTELLIGENCE,
            43200,
            items::SECURE_GAMMA,
            vec![
                area_requirement(AREA_INTELLIGENCE, 1),
                item_requirement(items::SECURE_EPSILON, 1),
                item_requirement(items::MILITARY_FLASH_DRIVE, 2),
            ],
        ),
    ]
}

/// Extra recipes for `additionalCraftingRecipes`
pub(crate) fn additional_recipes() -> Vec<Value> {
    vec![
        recipe(
            "6741b0e0f1d2a3b4c5d6e701",
            AREA_MEDSTATION,
            3600,
            items::INJECTOR_CASE,
            vec![
                area_requirement(AREA_MEDSTATION, 2),
                item_requirement(items::MEDICINE_CASE, 1),
                item_requirement(items::DOGTAG_USEC, 3),
            ],
        ),
        recipe(
            "6741b0e0f1d2a3b4c5d6e702",
            AREA_WORKBENCH,
            5400,
            items::KEY_TOOL,
            vec![
                area_requirement(AREA_WORKBENCH, 2),
                item_requirement(items::DOCUMENTS_CASE, 1),
                item_requirement(items::SIMPLE_WALLET, 2),
            ],
        ),
    ]
}

/// Production tweak applied by `craftingRebalance`
#[derive(Debug, Clone, Copy)]
pub(crate) struct CraftAdjustment {
    pub(crate) end_product: &'static str,
    pub(crate) production_time: Option<u32>,
    pub(crate) count: Option<u32>,
}

pub(crate) const CRAFT_ADJUSTMENTS: [CraftAdjustment; 3] = [
    CraftAdjustment {
        end_product: items::MOONSHINE,
        production_time: Some(12600),
        count: None,
    },
    CraftAdjustment {
        end_product: items::PURIFIED_WATER,
        production_time: Some(9000),
        count: Some(2),
    },
    CraftAdjustment {
        end_product: items::MILITARY_FLASH_DRIVE,
        production_time: None,
        count: Some(2),
    },
];

/// Handbook prices for `priceRebalance.itemFixes`
pub(crate) const PRICE_FIXES: [(&str, u32); 4] = [
    (items::INTELLIGENCE_FOLDER, 588_000),
    (items::MILITARY_FLASH_DRIVE, 224_400),
    (items::LEDX, 1_300_000),
    (items::OPHTHALMOSCOPE, 120_000),
];

/// Handbook categories whose items stay listable under `pacifistFleaMarket`
pub(crate) const FLEA_HANDBOOK_WHITELIST: [&str; 10] = [
    "5b47574386f77428ca22b2ed", // energy elements
    "5b47574386f77428ca22b2ee", // building materials
    "5b47574386f77428ca22b2ef", // electronics
    "5b47574386f77428ca22b2f0", // household materials
    "5b47574386f77428ca22b2f1", // valuables
    "5b47574386f77428ca22b2f2", // flammable materials
    "5b47574386f77428ca22b2f3", // medical supplies
    "5b47574386f77428ca22b2f4", // others
    "5b47574386f77428ca22b2f6", // tools
    "5b47574386f77428ca22b33e", // barter items
];

/// Items made listable again by `pacifistFleaMarket.whitelist`
pub(crate) const FLEA_ITEM_WHITELIST: [&str; 3] = [items::MOONSHINE, items::PURIFIED_WATER, items::BITCOIN];

/// Mechanical quest keys for `pacifistFleaMarket.questKeys`
pub(crate) const QUEST_KEYS: [&str; 3] = [
    "5448ba0b4bdc2d02308b456c", // factory emergency exit
    "5d80c62a86f7744036212b3f", // health resort west wing 306
    "5913915886f774123603c392", // machinery key
];

/// Marked room keys for `pacifistFleaMarket.markedKeys`
pub(crate) const MARKED_KEYS: [&str; 3] = [
    "5780cf7f2459777de4559322", // dorm room 314 marked
    "5ede7a8229445733cb4c18e2", // RB-PKPM marked
    "5ede7b0c6d23e5473e6e8c66", // RB-VO marked
];

/// Item classes that may still be requested in flea market barters
pub(crate) const BARTER_REQUEST_CLASSES: [&str; 13] = [
    base_classes::BARTER_ITEM,
    base_classes::INFO,
    base_classes::JEWELRY,
    base_classes::ELECTRONICS,
    base_classes::BUILDING_MATERIAL,
    base_classes::TOOL,
    base_classes::HOUSEHOLD_GOODS,
    base_classes::MEDICAL_SUPPLIES,
    base_classes::LUBRICANT,
    base_classes::BATTERY,
    base_classes::FUEL,
    base_classes::FOOD,
    base_classes::DRINK,
];

/// Every item class the barter and fence filters reason about
pub(crate) const ITEM_CLASSES: [&str; 30] = [
    base_classes::AMMO,
    base_classes::AMMO_BOX,
    base_classes::MONEY,
    base_classes::BARTER_ITEM,
    base_classes::INFO,
    base_classes::JEWELRY,
    base_classes::ELECTRONICS,
    base_classes::BUILDING_MATERIAL,
    base_classes::TOOL,
    base_classes::HOUSEHOLD_GOODS,
    base_classes::MEDICAL_SUPPLIES,
    base_classes::LUBRICANT,
    base_classes::BATTERY,
    base_classes::FUEL,
    base_classes::KEY_MECHANICAL,
    base_classes::KEYCARD,
    base_classes::FOOD,
    base_classes::DRINK,
    base_classes::MEDKIT,
    base_classes::DRUGS,
    base_classes::STIMULATOR,
    base_classes::ARMOR,
    base_classes::VEST,
    base_classes::BACKPACK,
    base_classes::ASSAULT_RIFLE,
    base_classes::PISTOL,
    base_classes::KNIFE,
    base_classes::MAGAZINE,
    base_classes::ARMOR_PLATE,
    base_classes::REPAIR_KITS,
];

/// Flea prices forced by `barterEconomy` so barter requests stay sensible
pub(crate) const BARTER_REQUEST_PRICES: [(&str, u32); 3] = [
    (items::DOGTAG_USEC, 12_000),
    (items::MOONSHINE, 40_000),
    (items::PURIFIED_WATER, 45_000),
];

/// Items the host blacklists from the flea market by default
pub(crate) const HOST_FLEA_BLACKLIST: [&str; 3] = [items::LEDX, items::BITCOIN, items::INTELLIGENCE_FOLDER];

/// Item classes fence keeps selling under `pacifistFence`
pub(crate) const FENCE_CLASS_WHITELIST: [&str; 8] = [
    base_classes::BARTER_ITEM,
    base_classes::FOOD,
    base_classes::DRINK,
    base_classes::MEDKIT,
    base_classes::DRUGS,
    base_classes::MEDICAL_SUPPLIES,
    base_classes::TOOL,
    base_classes::REPAIR_KITS,
];

/// Item classes allowed in scav case rewards regardless of price
pub(crate) const SCAV_CASE_CLASS_WHITELIST: [&str; 12] = [
    base_classes::ASSAULT_RIFLE,
    base_classes::AMMO_BOX,
    base_classes::KEY_MECHANICAL,
    base_classes::PISTOL,
    base_classes::DRINK,
    base_classes::FOOD,
    base_classes::KNIFE,
    base_classes::VEST,
    base_classes::BACKPACK,
    base_classes::MEDKIT,
    base_classes::KEYCARD,
    base_classes::ARMOR_PLATE,
];

/// Scav case reward parents excluded outright
pub(crate) const SCAV_CASE_PARENT_BLACKLIST: [&str; 5] = [
    base_classes::AMMO,
    base_classes::MONEY,
    base_classes::PORTABLE_CONTAINER,
    base_classes::RANDOM_LOOT_CONTAINER,
    base_classes::BUILT_IN_INSERTS,
];

/// Scav case rewards excluded outright
pub(crate) const SCAV_CASE_ITEM_BLACKLIST: [&str; 6] = [
    "660bbc47c38b837877075e47", // encrypted flash drive
    "6389c7750ef44505c87f5996", // microcontroller board
    "64d0b40fbe2eed70e254e2d4", // sacred amulet
    "65ddcc9cfa85b9f17d0dfb07", // mark of the unheard
    "6662e9aca7e0b43baa3d5f74", // dogtag BEAR
    "6662e9f37fa79a6d83730fa0", // dogtag USEC
];

/// Handbook value above which a buyable item is still a scav case reward
pub(crate) const SCAV_CASE_VALUABLE_PRICE: f64 = 10_000.0;

/// Reward value tiers for the scav case `rebalance`
pub(crate) fn scav_case_value_ranges() -> Value {
    json!({
        "common": {"min": 1, "max": 20000},
        "rare": {"min": 20001, "max": 60000},
        "superrare": {"min": 60001, "max": 1_200_000},
    })
}

fn scav_recipe(id: &str, template_id: &str, production_time: u32, common: (u32, u32), rare: (u32, u32), superrare: (u32, u32)) -> Value {
    json!({
        "_id": id,
        "requirements": [item_requirement(template_id, 1)],
        "productionTime": production_time,
        "endProducts": {
            "Common": {"min": common.0, "max": common.1},
            "Rare": {"min": rare.0, "max": rare.1},
            "Superrare": {"min": superrare.0, "max": superrare.1},
        },
    })
}

/// Scav case recipes for the `rebalance`
pub(crate) fn scav_case_recipes() -> Value {
    Value::Array(vec![
        scav_recipe("62710974e71632321e5afd5f", items::PEVKO_BEER, 2500, (3, 3), (0, 0), (0, 0)),
        scav_recipe("62710a8c403346379e3de9be", items::TARKOVSKAYA_VODKA, 7700, (3, 4), (0, 1), (0, 0)),
        scav_recipe("62710a69adfbd4354d79c58e", items::DAN_JACKIEL_WHISKEY, 8100, (4, 5), (1, 2), (0, 0)),
        scav_recipe("6271093e621b0a76055cd61e", items::MOONSHINE, 16800, (1, 3), (0, 3), (0, 2)),
        scav_recipe("62710a0e436dcc0b9c55f4ec", items::INTELLIGENCE_FOLDER, 19200, (3, 3), (3, 5), (1, 1)),
    ])
}
