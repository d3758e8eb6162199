//! Case runner
//!
//! Runs every entity of a test case: send the request, check the status
//! code, then verify the body with the named handler or with
//! [`assert_structure`]. Entities are independent; each one's own check
//! stops at its first failure.

use crate::http::Dispatcher;
use crate::model::{Entity, TestCase};
use apiassert_core::primitives::assert_true;
use apiassert_core::{assert_structure, log_op_end, log_op_start};
use apiassert_core::{AssertError, ExError, HandlerRegistry, Result};
use std::fmt;

/// Description used for the HTTP status check.
pub const CHECK_RESPONSE_CODE: &str = "response code";

/// Result of one entity
#[derive(Debug, Clone, PartialEq)]
pub struct EntityOutcome {
    pub label: String,
    pub description: String,
    pub error: Option<AssertError>,
}

impl EntityOutcome {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

/// Results of every entity of a case, in fixture order
#[derive(Debug, Clone, PartialEq)]
pub struct CaseReport {
    pub case: String,
    pub class_name: String,
    pub outcomes: Vec<EntityOutcome>,
}

impl CaseReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(EntityOutcome::passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntityOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}): {}/{} passed",
            self.case,
            self.class_name,
            self.outcomes.len() - self.failure_count(),
            self.outcomes.len()
        )?;
        for outcome in &self.outcomes {
            match &outcome.error {
                None => writeln!(f, "  ok   {}", outcome.label)?,
                Some(err) => writeln!(f, "  FAIL {}: {}", outcome.label, ExError::from(err.clone()))?,
            }
        }
        Ok(())
    }
}

/// Drives test cases through a dispatcher
pub struct CaseRunner<D> {
    dispatcher: D,
    handlers: HandlerRegistry,
}

impl<D: Dispatcher> CaseRunner<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            handlers: HandlerRegistry::new(),
        }
    }

    pub fn with_handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// Run one entity
    ///
    /// # Errors
    ///
    /// Returns the dispatch error, the status check failure, or the first
    /// failure of the body check.
    pub fn run_entity(&self, entity: &Entity) -> Result<()> {
        let exchange = self.dispatcher.send(&entity.request)?;
        let fixture = &entity.assertion;

        assert_true(
            CHECK_RESPONSE_CODE,
            exchange.status == fixture.response_code,
            &format!(
                "expected {}, actual {}",
                fixture.response_code, exchange.status
            ),
        )?;

        if let Some(envelope) = exchange.envelope() {
            tracing::debug!(code = envelope.code, msg = %envelope.message, "response envelope");
        }

        let spec = fixture.to_spec();
        match fixture.action() {
            Some(action) => self.handlers.dispatch(action, &exchange.body, &spec),
            None => assert_structure(&exchange.body, &spec),
        }
    }

    /// Run every entity of `case` and collect the outcomes
    pub fn run_case(&self, case: &TestCase) -> CaseReport {
        log_op_start!(
            "run_case",
            case = %case.name,
            class_name = %case.class_name
        );
        let start = std::time::Instant::now();

        let outcomes: Vec<EntityOutcome> = case
            .entities()
            .map(|(label, entity)| {
                let error = self.run_entity(entity).err();
                match &error {
                    None => tracing::info!(entity = label, status = "pass"),
                    Some(err) => tracing::warn!(entity = label, status = "fail", error = %err),
                }
                EntityOutcome {
                    label: label.to_string(),
                    description: entity.description.clone(),
                    error,
                }
            })
            .collect();

        let report = CaseReport {
            case: case.name.clone(),
            class_name: case.class_name.clone(),
            outcomes,
        };
        log_op_end!(
            "run_case",
            duration_ms = start.elapsed().as_millis() as u64,
            failures = report.failure_count()
        );
        report
    }
}

impl<D> fmt::Debug for CaseRunner<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseRunner")
            .field("handlers", &self.handlers)
            .finish_non_exhaustive()
    }
}
