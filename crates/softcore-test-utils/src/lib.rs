//! Testing utilities for the Softcore workspace
//!
//! Shared fixtures: a small host dataset, configuration builders, an
//! in-memory reporter and temp-file writers.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use softcore_config::{Configuration, CONFIG_DIR, CONFIG_FILE};
use softcore_dataset::{Dataset, TableId};
use softcore_engine::{MemorySink, Reporter};
use tempfile::TempDir;

pub const STASH_STANDARD: &str = "566abbc34bdc2d92178b4576";
pub const STASH_LEFT_BEHIND: &str = "5811ce572459770cba1a34ea";
pub const MOONSHINE: &str = "5d1b376e86f774252519444e";
pub const ROUBLES: &str = "5449016a4bdc2d6f028b456f";
pub const AMMO_CLASS: &str = "5485a8684bdc2da71d8b4567";
pub const M855: &str = "54527a984bdc2d4e668b4567";

/// Handbook category "others", whitelisted by the pacifist flea market
pub const HANDBOOK_OTHERS: &str = "5b47574386f77428ca22b2f4";

fn grid(cells_h: u32, cells_v: u32) -> serde_json::Value {
    json!({"Grids": [{"_props": {"cellsH": cells_h, "cellsV": cells_v}}]})
}

/// A few records from most tables the changers touch
pub fn sample_dataset() -> Dataset {
    Dataset::new()
        .with_table(
            TableId::Items,
            json!({
                (AMMO_CLASS): {"_id": AMMO_CLASS, "_parent": "", "_type": "Node", "_props": {}},
                (STASH_STANDARD): {"_id": STASH_STANDARD, "_parent": "stash", "_type": "Item", "_props": grid(10, 30)},
                (STASH_LEFT_BEHIND): {"_id": STASH_LEFT_BEHIND, "_parent": "stash", "_type": "Item", "_props": grid(10, 40)},
                (M855): {"_id": M855, "_parent": AMMO_CLASS, "_type": "Item", "_props": {
                    "StackMaxSize": 60, "ExamineTime": 1, "ExaminedByDefault": true, "CanSellOnRagfair": true
                }},
                (MOONSHINE): {"_id": MOONSHINE, "_parent": "drink", "_type": "Item", "_props": {
                    "StackMaxSize": 1, "ExamineTime": 1, "ExaminedByDefault": true, "CanSellOnRagfair": false
                }},
                (ROUBLES): {"_id": ROUBLES, "_parent": "money", "_type": "Item", "_props": {"StackMaxSize": 500_000}}
            }),
        )
        .with_table(
            TableId::Handbook,
            json!({"Items": [
                {"Id": MOONSHINE, "ParentId": HANDBOOK_OTHERS, "Price": 30_000},
                {"Id": M855, "ParentId": "ammo", "Price": 200}
            ]}),
        )
        .with_table(TableId::Prices, json!({(MOONSHINE): 35_000, (M855): 250}))
        .with_table(
            TableId::HideoutSettings,
            json!({"generatorFuelFlowRate": 0.0013, "gpuBoostRate": 0.041}),
        )
        .with_table(
            TableId::RagfairConfig,
            json!({"dynamic": {
                "blacklist": {"custom": []},
                "priceRanges": {"default": {"min": 0.8, "max": 1.2}},
                "barter": {"chancePercent": 30}
            }}),
        )
        .with_table(
            TableId::Globals,
            json!({"config": {
                "RagFair": {"minUserLevel": 15},
                "RestrictionsInRaid": [{"TemplateId": MOONSHINE, "Value": 2}]
            }}),
        )
        .with_table(TableId::BotConfig, json!({"secureContainerAmmoStackCount": 20}))
}

/// Defaults with one closure's worth of edits
pub fn configuration(edit: impl FnOnce(&mut Configuration)) -> Configuration {
    let mut config = Configuration::default();
    edit(&mut config);
    config
}

/// Reporter writing into a sink the test can inspect
pub fn memory_reporter() -> (Reporter, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (Reporter::new(Arc::clone(&sink)), sink)
}

/// A mod root holding `config/config.json5` with `text`
pub struct ModRoot {
    dir: TempDir,
}

impl ModRoot {
    pub fn with_config(text: &str) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(CONFIG_DIR)).unwrap();
        std::fs::write(dir.path().join(CONFIG_DIR).join(CONFIG_FILE), text).unwrap();
        Self { dir }
    }

    /// A mod root without a configuration file
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Write a dataset dump next to the configuration
    pub fn write_dataset(&self, name: &str, dataset: &Dataset) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, dataset.to_json_pretty().unwrap()).unwrap();
        path
    }

    pub fn read_dataset(&self, name: &str) -> Dataset {
        let text = std::fs::read_to_string(self.dir.path().join(name)).unwrap();
        Dataset::from_json(&text).unwrap()
    }
}
