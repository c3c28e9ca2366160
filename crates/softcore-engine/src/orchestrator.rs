//! Patch orchestrator
//!
//! Owns the ordered section plan for one configuration and drives a single
//! run over the host's dataset.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use softcore_config::{ConfigError, ConfigServer, Configuration};
use softcore_dataset::Dataset;

use crate::error::RunError;
use crate::outcome::{RunSummary, Tally};
use crate::reporter::Reporter;
use crate::section::{panic_message, Section};
use crate::state::{validate_transition, RunState};

/// Builds the ordered section list for a configuration
pub trait SectionPlanner {
    /// Sections to run, in order
    fn plan(&self, config: &Configuration) -> Vec<Section>;
}

impl<F> SectionPlanner for F
where
    F: Fn(&Configuration) -> Vec<Section>,
{
    fn plan(&self, config: &Configuration) -> Vec<Section> {
        self(config)
    }
}

/// Drives one patch run
#[derive(Debug)]
pub struct PatchOrchestrator {
    config: Configuration,
    sections: Vec<Section>,
    reporter: Reporter,
    state: RunState,
}

impl PatchOrchestrator {
    /// Plan sections for `config`.
    ///
    /// The reporter's debug output follows `general.debug`.
    pub fn new(config: Configuration, planner: &impl SectionPlanner, reporter: Reporter) -> Self {
        let sections = planner.plan(&config);
        Self::from_sections(config, sections, reporter)
    }

    /// Use an already built section list
    pub fn from_sections(config: Configuration, sections: Vec<Section>, mut reporter: Reporter) -> Self {
        reporter.set_debug(config.general.debug);
        Self {
            config,
            sections,
            reporter,
            state: RunState::NotStarted,
        }
    }

    /// Load the configuration file and plan sections
    ///
    /// # Errors
    /// `ConfigError::Load` if the file is missing, unparseable or invalid.
    /// Nothing is planned and no unit runs.
    pub fn load(path: impl AsRef<Path>, planner: &impl SectionPlanner, reporter: Reporter) -> Result<Self, ConfigError> {
        let mut server = ConfigServer::new(path.as_ref());
        if let Err(err) = server.load() {
            reporter.error(err.to_string());
            return Err(err);
        }
        let config = server.into_config()?;
        Ok(Self::new(config, planner, reporter))
    }

    /// Configuration the plan was built from
    #[inline]
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Planned sections, in run order
    #[inline]
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Reporter used by the run
    #[inline]
    #[must_use]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Current run state
    #[inline]
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    fn advance(&mut self, to: RunState) -> Result<(), RunError> {
        validate_transition(self.state, to)?;
        self.state = to;
        Ok(())
    }

    /// Apply every section to the dataset, once.
    ///
    /// Unit and section failures are reported and counted, never returned.
    ///
    /// # Errors
    /// `RunError::IllegalTransition` if this orchestrator already ran; the
    /// dataset is untouched in that case.
    pub fn run(&mut self, dataset: &mut Dataset) -> Result<RunSummary, RunError> {
        self.advance(RunState::Running(0))?;

        let master_off = !self.config.general.enabled;
        let marketplace_off = self.config.marketplace_disabled();
        let reporter = &self.reporter;
        if master_off {
            contained(|| reporter.info("disabled in general settings, nothing will be changed"));
        } else if marketplace_off {
            contained(|| reporter.info("flea market disabled completely, marketplace sections will be skipped"));
        }

        let mut tally = Tally::default();
        for index in 0..self.sections.len() {
            if index > 0 {
                self.advance(RunState::Running(index))?;
            }
            let section = &self.sections[index];
            let reporter = &self.reporter;

            let body = || {
                if master_off {
                    section.skip_all(reporter, "disabled in general settings")
                } else if marketplace_off && section.is_marketplace() {
                    section.skip_all(reporter, "flea market disabled completely")
                } else {
                    section.apply(dataset, reporter)
                }
            };
            let section_tally = match catch_unwind(AssertUnwindSafe(body)) {
                Ok(section_tally) => section_tally,
                Err(payload) => {
                    let message = format!("{} failed: {}", section.name(), panic_message(payload.as_ref()));
                    contained(|| reporter.error(message));
                    Tally {
                        failed: 1,
                        ..Tally::default()
                    }
                }
            };
            tally.merge(section_tally);
        }

        self.advance(RunState::Completed)?;
        let summary = RunSummary {
            tally,
            state: self.state,
        };
        let reporter = &self.reporter;
        if tally.failed == 0 {
            contained(|| reporter.success(format!("patch run complete: {summary}")));
        } else {
            contained(|| reporter.warning(format!("patch run complete with failures: {summary}")));
        }
        Ok(summary)
    }
}

/// Runs a reporting call; a panicking sink loses the message, not the run
fn contained(report: impl FnOnce()) {
    let _ = catch_unwind(AssertUnwindSafe(report));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SinkError, UnitError};
    use crate::outcome::{Outcome, Status};
    use crate::reporter::{Level, LogSink, MemorySink};
    use crate::unit::{FnUnit, UnitContext};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use softcore_dataset::TableId;
    use std::sync::Arc;

    fn dataset() -> Dataset {
        Dataset::new().with_table(TableId::RagfairConfig, json!({"minUserLevel": 15, "sell": true}))
    }

    fn write(name: &str, pointer: &'static str, value: i64) -> impl crate::MutationUnit {
        FnUnit::new(name, &[TableId::RagfairConfig], move |ctx: &mut UnitContext<'_>| {
            ctx.set(TableId::RagfairConfig, pointer, value)?;
            Ok(())
        })
    }

    fn planner(config: &Configuration) -> Vec<Section> {
        let economy = &config.economy_options;
        vec![
            Section::new("economy", economy.enabled).unit(economy.disable_flea_market_completely, write(
                "disableFleaMarket",
                "/minUserLevel",
                99,
            )),
            Section::new("otherFleaMarketChanges", economy.enabled)
                .marketplace()
                .unit(true, write("fleaLevel", "/minUserLevel", 5)),
        ]
    }

    fn orchestrator(config: Configuration) -> (PatchOrchestrator, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let reporter = Reporter::new(Arc::clone(&sink));
        (PatchOrchestrator::new(config, &planner, reporter), sink)
    }

    #[test]
    fn runs_sections_in_order() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        let (mut orch, sink) = orchestrator(config);
        let mut data = dataset();

        let summary = orch.run(&mut data).unwrap();

        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.tally.applied, 1);
        assert_eq!(summary.tally.skipped, 1);
        assert_eq!(data.get(TableId::RagfairConfig, "/minUserLevel"), Some(&json!(5)));
        assert_eq!(sink.messages(Level::Success).len(), 1);
    }

    #[test]
    fn marketplace_sections_skipped_when_flea_disabled() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        config.economy_options.disable_flea_market_completely = true;
        let (mut orch, sink) = orchestrator(config);
        let mut data = dataset();

        orch.run(&mut data).unwrap();

        assert_eq!(data.get(TableId::RagfairConfig, "/minUserLevel"), Some(&json!(99)));
        let outcome = sink.outcome("otherFleaMarketChanges", "fleaLevel").unwrap();
        assert_eq!(outcome.status, Status::Skipped);
        assert_eq!(outcome.message.as_deref(), Some("flea market disabled completely"));
    }

    #[test]
    fn precedence_does_not_depend_on_unit_success() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        config.economy_options.disable_flea_market_completely = true;
        let failing = |_: &Configuration| {
            vec![
                Section::new("economy", true).unit(
                    true,
                    FnUnit::new("disableFleaMarket", &[TableId::RagfairConfig], |_: &mut UnitContext<'_>| {
                        Err(UnitError::other("nope"))
                    }),
                ),
                Section::new("pacifist", true)
                    .marketplace()
                    .unit(true, write("blacklist", "/sell", 0)),
            ]
        };
        let sink = Arc::new(MemorySink::new());
        let mut orch = PatchOrchestrator::new(config, &failing, Reporter::new(Arc::clone(&sink)));
        let mut data = dataset();

        let summary = orch.run(&mut data).unwrap();

        assert_eq!(summary.tally.failed, 1);
        assert_eq!(summary.tally.skipped, 1);
        assert_eq!(data.get(TableId::RagfairConfig, "/sell"), Some(&json!(true)));
    }

    #[test]
    fn master_switch_skips_everything() {
        let mut config = Configuration::default();
        config.general.enabled = false;
        config.economy_options.enabled = true;
        let (mut orch, sink) = orchestrator(config);
        let mut data = dataset();
        let original = data.clone();

        let summary = orch.run(&mut data).unwrap();

        assert_eq!(data, original);
        assert_eq!(summary.tally.skipped, 2);
        assert!(sink.outcomes().iter().all(|o| o.status == Status::Skipped));
    }

    /// Sink that panics on anything concerning one section
    struct PanickingSink {
        broken: &'static str,
        inner: MemorySink,
    }

    impl LogSink for PanickingSink {
        fn log(&self, level: Level, message: &str) -> Result<(), SinkError> {
            assert!(!message.contains(self.broken), "sink broke on {message}");
            self.inner.log(level, message)
        }

        fn record(&self, outcome: &Outcome) -> Result<(), SinkError> {
            assert!(outcome.section != self.broken, "sink broke on {}", outcome.unit);
            self.inner.record(outcome)
        }
    }

    fn run_with_broken_sink(config: Configuration, broken: &'static str) -> (RunSummary, PatchOrchestrator, Dataset) {
        let sink = PanickingSink {
            broken,
            inner: MemorySink::new(),
        };
        let mut orch = PatchOrchestrator::new(config, &planner, Reporter::new(sink));
        let mut data = dataset();
        let summary = orch.run(&mut data).unwrap();
        (summary, orch, data)
    }

    #[test]
    fn panic_while_skipping_for_master_switch_is_contained() {
        let mut config = Configuration::default();
        config.general.enabled = false;
        config.economy_options.enabled = true;

        let (summary, orch, data) = run_with_broken_sink(config, "economy");

        assert_eq!(orch.state(), RunState::Completed);
        assert_eq!(summary.state, RunState::Completed);
        assert_eq!(summary.tally.failed, 1);
        assert_eq!(summary.tally.skipped, 1);
        assert_eq!(data, dataset());
    }

    #[test]
    fn panic_while_skipping_marketplace_is_contained() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        config.economy_options.disable_flea_market_completely = true;

        let (summary, orch, data) = run_with_broken_sink(config, "otherFleaMarketChanges");

        assert_eq!(orch.state(), RunState::Completed);
        assert_eq!(summary.tally.applied, 1);
        assert_eq!(summary.tally.failed, 1);
        assert_eq!(data.get(TableId::RagfairConfig, "/minUserLevel"), Some(&json!(99)));
    }

    #[test]
    fn panicking_section_is_reported_and_the_next_one_runs() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;

        let (summary, orch, data) = run_with_broken_sink(config, "economy");

        assert_eq!(orch.state(), RunState::Completed);
        assert_eq!(summary.tally.failed, 1);
        assert_eq!(summary.tally.applied, 1);
        assert_eq!(data.get(TableId::RagfairConfig, "/minUserLevel"), Some(&json!(5)));
    }

    #[test]
    fn second_run_is_rejected() {
        let mut config = Configuration::default();
        config.economy_options.enabled = true;
        let (mut orch, _) = orchestrator(config);
        let mut data = dataset();
        orch.run(&mut data).unwrap();

        let mut fresh = dataset();
        let err = orch.run(&mut fresh).unwrap_err();
        assert!(matches!(err, RunError::IllegalTransition { .. }));
        assert_eq!(fresh, dataset());
    }

    #[test]
    fn empty_plan_completes() {
        let none = |_: &Configuration| Vec::new();
        let mut orch = PatchOrchestrator::new(Configuration::default(), &none, Reporter::new(MemorySink::new()));
        let summary = orch.run(&mut Dataset::new()).unwrap();
        assert_eq!(summary.tally.total(), 0);
        assert_eq!(orch.state(), RunState::Completed);
    }

    #[test]
    fn reporter_debug_follows_config() {
        let mut config = Configuration::default();
        config.general.debug = true;
        let (orch, _) = orchestrator(config);
        assert!(orch.reporter().debug_enabled());
    }
}
