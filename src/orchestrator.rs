//! Lifecycle orchestration: alias validation, cache-target validation, and
//! the per-trigger sync pipeline.

use tracing::{debug, info, instrument};

use crate::core::scan::find_error_line;
use crate::core::template::{substitute, ToolCommand};
use crate::error::SyncError;
use crate::io::config::{CacheTarget, SyncConfig};
use crate::io::runner::ToolRunner;
use crate::sink::LineSink;

const SYNC_MESSAGE: &str =
    "%event: will %mode target database (@%destination) with data from source (@%source)";

/// Lifecycle event that fires a sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    SuiteStart,
    TestEnd,
}

impl Trigger {
    fn label(self) -> &'static str {
        match self {
            Trigger::SuiteStart => "Suite start",
            Trigger::TestEnd => "Test end",
        }
    }

    fn mode(self) -> &'static str {
        match self {
            Trigger::SuiteStart => "populate",
            Trigger::TestEnd => "cleanup",
        }
    }
}

/// Drives the external tool across test-lifecycle events.
///
/// Construction validates the configured aliases and cache target against
/// the live tool; on failure the instance never exists, so triggers can only
/// fire on a validated configuration. Triggers resolve their sub-commands
/// fresh on every call and share nothing but the immutable base invocation.
#[derive(Debug)]
pub struct SyncOrchestrator {
    config: SyncConfig,
    cache_target: CacheTarget,
}

impl SyncOrchestrator {
    /// Validate `config` against the live tool and build the orchestrator.
    ///
    /// Probes both aliases with a status sub-command (empty stdout means the
    /// alias is unreachable) and, for a named cache target, runs a simulated
    /// cache-clear whose stderr is scanned for the tool's error marker.
    #[instrument(skip_all, fields(source = %config.source, destination = %config.destination))]
    pub fn new(config: SyncConfig, sink: &mut dyn LineSink) -> Result<Self, SyncError> {
        config.validate()?;

        let orchestrator = Self {
            cache_target: config.cache_target(),
            config,
        };
        orchestrator.probe_alias(&orchestrator.config.source, sink)?;
        orchestrator.probe_alias(&orchestrator.config.destination, sink)?;
        if let CacheTarget::Named(target) = &orchestrator.cache_target {
            orchestrator.probe_cache_target(target, sink)?;
        }
        info!("configuration validated");
        Ok(orchestrator)
    }

    /// Suite-level trigger; syncs when the `populate` flag is set.
    pub fn on_suite_start(&self, sink: &mut dyn LineSink) -> Result<(), SyncError> {
        self.trigger(Trigger::SuiteStart, self.config.populate, sink)
    }

    /// Per-test trigger; syncs when the `cleanup` flag is set.
    pub fn on_test_end(&self, sink: &mut dyn LineSink) -> Result<(), SyncError> {
        self.trigger(Trigger::TestEnd, self.config.cleanup, sink)
    }

    /// Run the sync pipeline once: sql-sync, then the optional cache clear.
    ///
    /// The two sub-commands share one runner configuration but are issued as
    /// two sequential invocations, never one compound command. The cache
    /// clear is unconditional once the target validated at construction.
    /// Failures propagate to the caller, which is expected to halt the
    /// surrounding test run.
    #[instrument(skip_all)]
    pub fn sync_now(&self, sink: &mut dyn LineSink) -> Result<(), SyncError> {
        info!(
            source = %self.config.source,
            destination = %self.config.destination,
            "syncing destination from source"
        );
        let mut runner = self.runner();
        runner
            .subcommand(
                ToolCommand::SqlSync.template(),
                &[
                    ("%source", self.config.source.as_str()),
                    ("%destination", self.config.destination.as_str()),
                ],
            )
            .run(sink)?;

        if let CacheTarget::Named(target) = &self.cache_target {
            debug!(cache = %target, "clearing destination cache");
            runner
                .subcommand(
                    ToolCommand::CacheClear.template(),
                    &[
                        ("%alias", self.config.destination.as_str()),
                        ("%target", target.as_str()),
                    ],
                )
                .run(sink)?;
        }
        Ok(())
    }

    fn runner(&self) -> ToolRunner {
        ToolRunner::new(
            &self.config.tool_bin,
            self.config.use_config_file,
            self.config.verbose,
        )
    }

    fn trigger(
        &self,
        trigger: Trigger,
        enabled: bool,
        sink: &mut dyn LineSink,
    ) -> Result<(), SyncError> {
        if !enabled {
            debug!(trigger = trigger.label(), "trigger disabled, skipping sync");
            return Ok(());
        }
        sink.write_line(&substitute(
            SYNC_MESSAGE,
            &[
                ("%event", trigger.label()),
                ("%mode", trigger.mode()),
                ("%destination", self.config.destination.as_str()),
                ("%source", self.config.source.as_str()),
            ],
        ));
        self.sync_now(sink)
    }

    fn probe_alias(&self, alias: &str, sink: &mut dyn LineSink) -> Result<(), SyncError> {
        debug!(alias, "probing alias reachability");
        let output = self
            .runner()
            .subcommand(ToolCommand::Status.template(), &[("%alias", alias)])
            .run(sink)?;
        if output.stdout.is_empty() {
            return Err(SyncError::Configuration(format!(
                "tool error: alias @{alias} is not reachable"
            )));
        }
        Ok(())
    }

    fn probe_cache_target(&self, target: &str, sink: &mut dyn LineSink) -> Result<(), SyncError> {
        debug!(cache = target, "probing cache target acceptance");
        let output = self
            .runner()
            .subcommand(
                ToolCommand::CacheClearDryRun.template(),
                &[
                    ("%alias", self.config.destination.as_str()),
                    ("%target", target),
                ],
            )
            .run(sink)?;
        if let Some(message) = find_error_line(&output.stderr) {
            return Err(SyncError::Configuration(message));
        }
        Ok(())
    }
}
