use crate::actions;
use crate::clock::Clock;
use crate::config::Config;
use crate::constants::feedbacks::GRAPHIC_STATUS;
use crate::cue::{self, Cue};
use crate::feedback;
use crate::h2r::socket::{ConnectionEvent, TransportEvent};
use crate::host::{ConnectionStatus, HostUpdate};
use crate::presets;
use crate::project::{FrontendUpdate, Project};
use crate::timefmt::DisplayPattern;
use crate::variables::{self, variable_id, VariableSet, VariableValues};

use super::scheduler::TimerScheduler;

use chrono::{DateTime, FixedOffset};
use std::collections::BTreeMap;

/// Mirrors one project's state into host updates.
///
/// Every input (a push, a timer deadline, a connectivity change) is handled
/// by one `&mut self` call that returns the updates to apply, so state is
/// only ever touched from the caller's single context.
pub struct SyncEngine<C: Clock> {
    config: Config,
    clock: C,
    pattern: DisplayPattern,
    project: Option<Project>,
    scheduler: TimerScheduler,
}

impl<C: Clock> SyncEngine<C> {
    /// Create an engine for the configured project.
    pub fn new(config: Config, clock: C) -> Self {
        let pattern = DisplayPattern::new(&config.time_format);
        Self {
            config,
            clock,
            pattern,
            project: None,
            scheduler: TimerScheduler::default(),
        }
    }

    /// Configuration in use.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The last accepted snapshot.
    pub const fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    /// Live timer recurrences.
    pub const fn scheduler(&self) -> &TimerScheduler {
        &self.scheduler
    }

    /// Current time from the engine's clock, Unix milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Earliest timer deadline, Unix milliseconds.
    pub fn next_deadline(&self) -> Option<i64> {
        self.scheduler.next_deadline()
    }

    /// Full variable projection of the current snapshot.
    pub fn variables(&self) -> VariableSet {
        self.project.as_ref().map_or_else(VariableSet::default, |project| {
            let now = self.clock.now();
            variables::project(&project.cues, &project.dynamic_text, &now, &self.pattern)
        })
    }

    /// Evaluate a `graphic_status` feedback against the current snapshot.
    pub fn feedback_active(&self, options: &BTreeMap<String, String>) -> bool {
        self.project
            .as_ref()
            .is_some_and(|project| feedback::evaluate(&project.cues, options))
    }

    /// Dispatch anything the transport delivers.
    pub fn handle_event(&mut self, event: TransportEvent) -> Vec<HostUpdate> {
        match event {
            TransportEvent::Connection(change) => self.handle_connection(&change),
            TransportEvent::Update(payload) => match FrontendUpdate::from_value(payload) {
                Ok(update) => self.handle_update(&update),
                Err(e) => {
                    tracing::warn!("Ignoring unreadable push: {}", e);
                    Vec::new()
                }
            },
        }
    }

    /// Map a connectivity change to a status.
    pub fn handle_connection(&self, event: &ConnectionEvent) -> Vec<HostUpdate> {
        let status = match event {
            ConnectionEvent::Connected => {
                tracing::info!("Connected to H2R Graphics at {}", self.config.base_url());
                ConnectionStatus::Ok
            }
            ConnectionEvent::Disconnected => {
                tracing::info!("Disconnected from H2R Graphics");
                ConnectionStatus::Disconnected
            }
            ConnectionEvent::Error(reason) => {
                tracing::warn!("H2R Graphics connection error: {}", reason);
                ConnectionStatus::ConnectionFailure(reason.clone())
            }
        };
        vec![HostUpdate::Status(status)]
    }

    /// Accept a pushed snapshot.
    ///
    /// When the configured project is missing only the status changes;
    /// the previous snapshot and its timers stay as they were.
    pub fn handle_update(&mut self, update: &FrontendUpdate) -> Vec<HostUpdate> {
        let project_id = &self.config.project_id;
        let project = match update.project(project_id) {
            None => {
                tracing::info!("H2R Graphics project ({}) not found", project_id);
                let status = ConnectionStatus::ProjectNotFound(project_id.clone());
                return vec![HostUpdate::Status(status)];
            }
            Some(Err(e)) => {
                tracing::warn!("Unreadable project {}: {}", project_id, e);
                let status = ConnectionStatus::ConnectionFailure(e.to_string());
                return vec![HostUpdate::Status(status)];
            }
            Some(Ok(project)) => project,
        };

        let now = self.clock.now();
        let now_ms = now.timestamp_millis();

        let set = variables::project(&project.cues, &project.dynamic_text, &now, &self.pattern);
        let mut updates = vec![
            HostUpdate::Status(ConnectionStatus::Ok),
            HostUpdate::VariableDefinitions(set.definitions),
            HostUpdate::VariableValues(set.values),
        ];

        let outcome = self.scheduler.reconcile(&project.cues, now_ms);
        tracing::debug!(
            "Timers: {} ticking, {} stopped, {} removed",
            outcome.started.len(),
            outcome.stopped.len(),
            outcome.orphaned.len()
        );

        // Starting timers publish immediately; stopped ones publish their frozen value once.
        let mut timer_values = VariableValues::new();
        for cue in project.cues.iter().filter(|cue| cue.kind().is_timer()) {
            timer_values.extend(self.timer_values(cue, &now));
        }
        if !timer_values.is_empty() {
            updates.push(HostUpdate::VariableValues(timer_values));
        }

        updates.push(HostUpdate::ActionDefinitions(actions::definitions(&project)));
        let presets = presets::definitions(&project, &self.config);
        updates.push(HostUpdate::PresetDefinitions(presets));
        updates.push(HostUpdate::FeedbackDefinitions(feedback::definitions(&project.cues)));
        updates.push(HostUpdate::CheckFeedbacks(GRAPHIC_STATUS));

        self.project = Some(project);
        updates
    }

    /// Publish every timer whose deadline has passed.
    pub fn handle_tick(&mut self) -> Vec<HostUpdate> {
        let now = self.clock.now();
        let due = self.scheduler.take_due(now.timestamp_millis());
        if due.is_empty() {
            return Vec::new();
        }

        let mut values = VariableValues::new();
        for cue in &due {
            tracing::debug!("Timer tick for {}", cue.id);
            values.extend(self.timer_values(cue, &now));
        }
        vec![HostUpdate::VariableValues(values)]
    }

    /// Contents plus time-part variables of one timer cue.
    fn timer_values(&self, cue: &Cue, now: &DateTime<FixedOffset>) -> VariableValues {
        let mut values: VariableValues = cue::extra_variables(cue, now, &self.pattern)
            .into_iter()
            .map(|v| (v.variable_id, v.value))
            .collect();
        values.insert(variable_id(&cue.id, "contents"), cue::contents(cue, now, &self.pattern));
        values
    }
}
