//! Well-known record identifiers of the host's tables

#![allow(missing_docs)]

/// Item templates
pub mod items {
    pub const STASH_STANDARD: &str = "566abbc34bdc2d92178b4576";
    pub const STASH_LEFT_BEHIND: &str = "5811ce572459770cba1a34ea";
    pub const STASH_PREPARE_FOR_ESCAPE: &str = "5811ce662459770f6f490f32";
    pub const STASH_EDGE_OF_DARKNESS: &str = "5811ce772459770e9e5f9532";
    pub const STASH_UNHEARD: &str = "6602bcf19cc643f44a04274b";

    pub const SECURE_WAIST_POUCH: &str = "5732ee6a24597719ae0c0281";
    pub const SECURE_ALPHA: &str = "544a11ac4bdc2d470e8b456a";
    pub const SECURE_BETA: &str = "5857a8b324597729ab0a0e7d";
    pub const SECURE_EPSILON: &str = "59db794186f77448bc595262";
    pub const SECURE_GAMMA: &str = "5857a8bc2459772bad15db29";
    pub const SECURE_KAPPA: &str = "5c093ca986f7740a1867ab12";

    pub const MONEY_CASE: &str = "59fb016586f7746d0d4b423a";
    pub const GRENADE_CASE: &str = "5e2af55f86f7746d4159f07c";
    pub const ITEM_CASE: &str = "59fb042886f7746c5005a7b2";
    pub const WEAPON_CASE: &str = "59fb023c86f7746d0d4b423c";
    pub const MAGAZINE_CASE: &str = "5c127c4486f7745625356c13";
    pub const MEDICINE_CASE: &str = "5aafbcd986f7745e590fff23";
    pub const THICC_ITEM_CASE: &str = "5c0a840b86f7742ffa4f2482";
    pub const THICC_WEAPON_CASE: &str = "5b6d9ce188a4501afc1b2b25";
    pub const KEY_TOOL: &str = "59fafd4b86f7745ca07e1232";
    pub const INJECTOR_CASE: &str = "619cbf7d23893217ec30b689";
    pub const HOLODILNICK: &str = "5c093db286f7740a1b2617e3";
    pub const SICC: &str = "5d235bb686f77443f4331278";
    pub const DOCUMENTS_CASE: &str = "590c60fc86f77412b13fddcd";
    pub const AMMUNITION_CASE: &str = "5aafbde786f774389d0cbc0f";
    pub const DOGTAG_CASE: &str = "5c093e3486f77430cb02e593";
    pub const KEYCARD_HOLDER: &str = "619cbf9e0a7c3a1a2731940a";
    pub const SIMPLE_WALLET: &str = "5783c43d2459774bbe137486";
    pub const WZ_WALLET: &str = "60b0f6c058e0b0481a09ad11";
    pub const LUCKY_SCAV_JUNK_BOX: &str = "5b7c710788a4506dec015957";

    pub const POCKETS_SPECIAL: &str = "627a4e6b255f7527fb05a0f6";
    pub const POCKETS_TUE: &str = "65e080be269cbd5c5005e529";

    pub const ROUBLES: &str = "5449016a4bdc2d6f028b456f";
    pub const EUROS: &str = "569668774bdc2da2298b4568";
    pub const DOLLARS: &str = "5696686a4bdc2da3298b456a";
    pub const GP_COIN: &str = "5d235b4d86f7742e017bc88a";

    pub const BITCOIN: &str = "59faff1d86f7746c51718c9c";
    pub const MOONSHINE: &str = "5d1b376e86f774252519444e";
    pub const PURIFIED_WATER: &str = "5d1b385e86f774252167b98a";
    pub const PEVKO_BEER: &str = "62a09f32621468534a797acb";
    pub const TARKOVSKAYA_VODKA: &str = "5d40407c86f774318526545a";
    pub const DAN_JACKIEL_WHISKEY: &str = "5d403f9186f7743cac3f229b";
    pub const INTELLIGENCE_FOLDER: &str = "5c12613b86f7743bbe2c3f76";
    pub const MILITARY_FLASH_DRIVE: &str = "62a0a16d0b9d3c46de5b6e97";
    pub const ENCRYPTED_FLASH_DRIVE: &str = "660bbc47c38b837877075e47";
    pub const BLUE_FOLDERS: &str = "6389c8c5dbfd5e4b95197e6b";
    pub const OPHTHALMOSCOPE: &str = "5af0534a86f7743b6f354284";
    pub const LEDX: &str = "5c0530ee86f774697952d952";
    pub const DOGTAG_USEC: &str = "59f32c3b86f77472a31742f0";

    pub const SIGNAL_PISTOL: &str = "620109578d82e67e7911abf2";
    pub const GOLDEN_TT: &str = "5b3b713c5acfc4330140bd8d";
}

/// Abstract item classes (`_parent` chain nodes)
pub mod base_classes {
    pub const AMMO: &str = "5485a8684bdc2da71d8b4567";
    pub const AMMO_BOX: &str = "543be5cb4bdc2deb348b4568";
    pub const MONEY: &str = "543be5dd4bdc2deb348b4569";
    pub const BARTER_ITEM: &str = "5448eb774bdc2d0a728b4567";
    pub const INFO: &str = "5448ecbe4bdc2d60728b4568";
    pub const JEWELRY: &str = "57864a3d24597754843f8721";
    pub const ELECTRONICS: &str = "57864a66245977548f04a81f";
    pub const BUILDING_MATERIAL: &str = "57864ada245977548638de91";
    pub const TOOL: &str = "57864bb7245977548b3b66c2";
    pub const HOUSEHOLD_GOODS: &str = "57864c322459775490116fbf";
    pub const MEDICAL_SUPPLIES: &str = "57864c8c245977548867e7f1";
    pub const LUBRICANT: &str = "57864e4c24597754843f8723";
    pub const BATTERY: &str = "57864ee62459775490116fc1";
    pub const FUEL: &str = "5d650c3e815116009f6201d2";
    pub const KEY_MECHANICAL: &str = "5c99f98d86f7745c314214b3";
    pub const KEYCARD: &str = "5c164d2286f774194c5e69fa";
    pub const FOOD: &str = "5448e8d04bdc2ddf718b4569";
    pub const DRINK: &str = "5448e8d64bdc2dce718b4568";
    pub const MEDKIT: &str = "5448f39d4bdc2d0a728b4568";
    pub const DRUGS: &str = "5448f3a14bdc2d27728b4569";
    pub const STIMULATOR: &str = "5448f3a64bdc2d60728b456a";
    pub const ARMOR: &str = "5448e54d4bdc2dcc718b4568";
    pub const VEST: &str = "5448e5284bdc2dcb718b4567";
    pub const BACKPACK: &str = "5448e53e4bdc2d60728b4567";
    pub const ASSAULT_RIFLE: &str = "5447b5f14bdc2d61278b4567";
    pub const PISTOL: &str = "5447b5cf4bdc2d65278b4567";
    pub const KNIFE: &str = "5447e1d04bdc2dff2f8b4567";
    pub const MAGAZINE: &str = "5448bc234bdc2d3c308b4569";
    pub const CYLINDER_MAGAZINE: &str = "610720f290b75a49ff2e5e25";
    pub const ARMOR_PLATE: &str = "644120aa86ffbe10ee032b6f";
    pub const BUILT_IN_INSERTS: &str = "65649eb40bf0ed77b8044453";
    pub const PORTABLE_CONTAINER: &str = "5448bf274bdc2dfc2f8b456a";
    pub const RANDOM_LOOT_CONTAINER: &str = "62f109593b54472778797866";
    pub const REPAIR_KITS: &str = "616eb7aea207f41933308f46";
}

/// Traders shipped with the host
pub mod traders {
    pub const PRAPOR: &str = "54cb50c76803fa8b248b4571";
    pub const THERAPIST: &str = "54cb57776803fa99248b456e";
    pub const FENCE: &str = "579dc571d53a0658a154fbec";
    pub const SKIER: &str = "58330581ace78e27b8b10cee";
    pub const PEACEKEEPER: &str = "5935c25fb3acc3127c3d8cd9";
    pub const MECHANIC: &str = "5a7c2eca46aef81a7ca2145d";
    pub const RAGMAN: &str = "5ac3b934156ae10c4430e83c";
    pub const JAEGER: &str = "5c0647fdd443bc2504c2d371";
    pub const REF: &str = "6617beeaa9cfa777ca915b7c";
    pub const LIGHTHOUSE_KEEPER: &str = "638f541a29ffd1183d187f57";

    /// Stock traders, custom ones are left alone
    pub const STOCK: [&str; 9] = [PRAPOR, THERAPIST, FENCE, SKIER, PEACEKEEPER, MECHANIC, RAGMAN, JAEGER, REF];
}

/// Quests touched by the tweaks
pub mod quests {
    pub const CRISIS: &str = "60e71c48c1bfa3050473b8e5";
    pub const CIRCULATE: &str = "6663149f1d3ec95634095e75";
    pub const COLLEAGUES_PART_3: &str = "5edac34d0bb72a50635c2bfa";
    pub const COLLEAGUES_CONDITIONS: [&str; 2] = ["5f07025e27cec53d5d24fe25", "5f04935cde3b9e0ecf03d864"];
    pub const COLLECTOR_NAME: &str = "Collector";
    pub const COLLECTOR_GAMMA_CONDITION: &str = "639135534b15ca31f76bc319";
    pub const COLLECTOR_LEVEL_CONDITION: &str = "51d33b2d4fad9e61441772c0";
}

/// Hideout area `type` of the stash
pub const AREA_STASH: i64 = 3;

/// Hideout area `type` of the seasonal tree, whose recipes are never rebalanced
pub const AREA_CHRISTMAS_TREE: i64 = 21;
