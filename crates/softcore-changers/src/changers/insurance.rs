//! `insuranceChanges`

use serde_json::json;
use softcore_config::{
    model::{TraderInsurance, TraderInsuranceConfig},
    Configuration,
};
use softcore_dataset::{ptr, TableId};
use softcore_engine::{MutationUnit, Section, UnitContext, UnitError};

use crate::ids::traders;
use crate::tables;

/// Hours an unclaimed insurance return is kept
const MAX_STORAGE_TIME: u32 = 720;

const RETURN_CHANCE: &str = "/config/Insurance/returnChancePercent";

/// Build the `insuranceChanges` section
#[must_use]
pub fn section(config: &Configuration) -> Section {
    let insurance = config.insurance_changes();
    Section::new("insuranceChanges", insurance.enabled).unit(
        true,
        InsuranceChanges {
            config: insurance.trader_insurance_config.clone(),
        },
    )
}

/// Instant returns, a fixed storage time and per-trader chance and price
struct InsuranceChanges {
    config: TraderInsuranceConfig,
}

impl InsuranceChanges {
    fn traders(&self) -> [(&'static str, TraderInsurance); 3] {
        [
            (traders::FENCE, self.config.fence),
            (traders::PRAPOR, self.config.prapor),
            (traders::THERAPIST, self.config.therapist),
        ]
    }
}

impl MutationUnit for InsuranceChanges {
    fn name(&self) -> &str {
        "traderInsuranceConfig"
    }

    fn scope(&self) -> &[TableId] {
        &[TableId::Traders, TableId::Globals]
    }

    fn apply(&self, ctx: &mut UnitContext<'_>) -> Result<(), UnitError> {
        let missing = self
            .traders()
            .iter()
            .any(|(trader, _)| ctx.get(TableId::Traders, &ptr!(trader, "base", "insurance")).is_none());
        if missing {
            ctx.skip("one or more insuring traders not found, skipping");
            return Ok(());
        }

        if ctx.get(TableId::Globals, RETURN_CHANCE).is_none() {
            tables::assign(ctx, TableId::Globals, RETURN_CHANCE, json!({}))?;
        }

        for (trader, settings) in self.traders() {
            let insurance = ptr!(trader, "base", "insurance");
            ctx.set(TableId::Traders, &format!("{insurance}/min_return_hour"), 0)?;
            ctx.set(TableId::Traders, &format!("{insurance}/max_return_hour"), 0)?;
            ctx.set(TableId::Traders, &format!("{insurance}/max_storage_time"), MAX_STORAGE_TIME)?;

            let levels = ptr!(trader, "base", "loyaltyLevels");
            for index in 0..tables::len(ctx, TableId::Traders, &levels) {
                ctx.set(
                    TableId::Traders,
                    &format!("{levels}/{index}/insurance_price_coef"),
                    settings.insurance_price_coef,
                )?;
            }

            if ctx.get(TableId::Globals, RETURN_CHANCE).is_some() {
                ctx.set(
                    TableId::Globals,
                    &format!("{RETURN_CHANCE}/{trader}"),
                    settings.return_chance_percent,
                )?;
            }
        }
        Ok(())
    }
}
