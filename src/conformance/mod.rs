//! Table-driven conformance suites.
//!
//! Every capability has a fixed table of [`ConformanceCase`]s describing
//! the behaviour any backend must show. A backend proves it is
//! interchangeable by running the table against a [`SuiteTarget`]:
//!
//! ```
//! use std::sync::Arc;
//! use switchyard::conformance::{SuiteTarget, run_queue_suite};
//! use switchyard::queue::{adapters::memory::InMemoryQueue, ports::MessageQueue};
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let target: SuiteTarget<dyn MessageQueue> =
//!     SuiteTarget::new("memory", || Ok(Arc::new(InMemoryQueue::new()) as Arc<dyn MessageQueue>));
//! let report = run_queue_suite(&target).await;
//! assert!(report.is_success(), "{report}");
//! # });
//! ```
//!
//! Each case gets a fresh provider from the target's factory, and the
//! optional cleanup hook runs after every case.

pub mod auth;
pub mod email;
pub mod events;
pub mod queue;
pub mod storage;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::ports::AuthProvider;
use crate::email::ports::EmailSender;
use crate::error::BoxError;
use crate::events::ports::EventBus;
use crate::queue::ports::MessageQueue;
use crate::storage::ports::ObjectStorage;

/// Boxed future returned by case functions.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a single case body.
pub type CaseResult = Result<(), CaseError>;

type Factory<P> = Box<dyn Fn() -> Result<Arc<P>, BoxError> + Send + Sync>;
type Cleanup = Box<dyn Fn() + Send + Sync>;

/// Why a case body stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseError {
    /// An assertion did not hold.
    #[error("failed: {0}")]
    Failed(String),
    /// The case does not apply to this provider.
    #[error("skipped: {0}")]
    Skipped(String),
}

/// Builds a [`CaseError::Failed`].
#[must_use]
pub fn fail(reason: impl Into<String>) -> CaseError {
    CaseError::Failed(reason.into())
}

/// Builds a [`CaseError::Skipped`].
#[must_use]
pub fn skip(reason: impl Into<String>) -> CaseError {
    CaseError::Skipped(reason.into())
}

/// Fails the case with `reason` unless `condition` holds.
///
/// # Errors
///
/// Returns [`CaseError::Failed`] when `condition` is false.
pub fn ensure(condition: bool, reason: impl FnOnce() -> String) -> CaseResult {
    if condition { Ok(()) } else { Err(fail(reason())) }
}

/// Fails the case unless `actual == expected`.
///
/// # Errors
///
/// Returns [`CaseError::Failed`] describing both values.
pub fn ensure_eq<T>(what: &str, actual: &T, expected: &T) -> CaseResult
where
    T: PartialEq + fmt::Debug + ?Sized,
{
    ensure(actual == expected, || {
        format!("{what}: expected {expected:?}, got {actual:?}")
    })
}

/// Converts port errors into case failures.
pub trait CaseContext<T> {
    /// Labels a failure with the operation that produced it.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Failed`] wrapping the original error.
    fn context(self, operation: &str) -> Result<T, CaseError>;
}

impl<T, E: fmt::Display> CaseContext<T> for Result<T, E> {
    fn context(self, operation: &str) -> Result<T, CaseError> {
        self.map_err(|err| fail(format!("{operation} failed: {err}")))
    }
}

/// A named provider factory under test.
pub struct SuiteTarget<P: ?Sized> {
    name: String,
    factory: Factory<P>,
    cleanup: Option<Cleanup>,
}

impl<P: ?Sized> SuiteTarget<P> {
    /// Creates a target that builds providers with `factory`.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Arc<P>, BoxError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            cleanup: None,
        }
    }

    /// Runs `cleanup` after every case.
    #[must_use]
    pub fn with_cleanup<F>(mut self, cleanup: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.cleanup = Some(Box::new(cleanup));
        self
    }

    /// Returns the target name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<P: ?Sized> fmt::Debug for SuiteTarget<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuiteTarget")
            .field("name", &self.name)
            .field("cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

/// One property in a capability's table.
pub struct ConformanceCase<P: ?Sized> {
    /// Stable case name used in reports.
    pub name: &'static str,
    /// The case body.
    pub run: for<'a> fn(&'a P) -> BoxFuture<'a, CaseResult>,
}

impl<P: ?Sized> fmt::Debug for ConformanceCase<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConformanceCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Final state of one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Every assertion held.
    Passed,
    /// An assertion failed or the provider could not be built.
    Failed(String),
    /// The case does not apply to the provider.
    Skipped(String),
}

/// Outcome of one case in a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Case name.
    pub name: &'static str,
    /// What happened.
    pub outcome: CaseOutcome,
}

/// Results of running one suite against one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceReport {
    /// Capability suite name.
    pub suite: String,
    /// Target name.
    pub target: String,
    /// Per-case results in table order.
    pub cases: Vec<CaseReport>,
}

/// Error returned by [`ConformanceReport::into_result`].
#[derive(Debug, Clone, Error)]
#[error("{report}")]
pub struct ConformanceFailure {
    /// The report containing at least one failure.
    pub report: ConformanceReport,
}

impl ConformanceReport {
    /// Cases that failed.
    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases
            .iter()
            .filter(|case| matches!(case.outcome, CaseOutcome::Failed(_)))
    }

    /// Number of passed cases.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Passed))
    }

    /// Number of skipped cases.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Skipped(_)))
    }

    /// Looks up the outcome of a case by name.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.cases
            .iter()
            .find(|case| case.name == name)
            .map(|case| &case.outcome)
    }

    /// True when no case failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Converts the report into an error when any case failed.
    ///
    /// # Errors
    ///
    /// Returns [`ConformanceFailure`] carrying the report.
    pub fn into_result(self) -> Result<Self, ConformanceFailure> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ConformanceFailure { report: self })
        }
    }

    fn count(&self, predicate: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases
            .iter()
            .filter(|case| predicate(&case.outcome))
            .count()
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} suite against {}: {} passed, {} skipped, {} failed",
            self.suite,
            self.target,
            self.passed(),
            self.skipped(),
            self.failures().count()
        )?;
        for case in &self.cases {
            match &case.outcome {
                CaseOutcome::Passed => writeln!(f, "  ok      {}", case.name)?,
                CaseOutcome::Skipped(reason) => writeln!(f, "  skipped {}: {reason}", case.name)?,
                CaseOutcome::Failed(reason) => writeln!(f, "  FAILED  {}: {reason}", case.name)?,
            }
        }
        Ok(())
    }
}

/// Runs `cases` against `target`, building a fresh provider per case.
pub async fn run_suite<P: ?Sized>(
    suite: &str,
    target: &SuiteTarget<P>,
    cases: &[ConformanceCase<P>],
) -> ConformanceReport {
    let mut reports = Vec::with_capacity(cases.len());
    for case in cases {
        let outcome = match (target.factory)() {
            Ok(provider) => match (case.run)(&*provider).await {
                Ok(()) => CaseOutcome::Passed,
                Err(CaseError::Failed(reason)) => CaseOutcome::Failed(reason),
                Err(CaseError::Skipped(reason)) => CaseOutcome::Skipped(reason),
            },
            Err(err) => CaseOutcome::Failed(format!("provider factory failed: {err}")),
        };
        if let Some(cleanup) = &target.cleanup {
            cleanup();
        }
        if let CaseOutcome::Failed(reason) = &outcome {
            warn!(suite, target = %target.name, case = case.name, %reason, "conformance case failed");
        } else {
            debug!(suite, target = %target.name, case = case.name, ?outcome, "conformance case finished");
        }
        reports.push(CaseReport {
            name: case.name,
            outcome,
        });
    }
    ConformanceReport {
        suite: suite.to_owned(),
        target: target.name.clone(),
        cases: reports,
    }
}

/// Runs the queue table against `target`.
pub async fn run_queue_suite(target: &SuiteTarget<dyn MessageQueue>) -> ConformanceReport {
    run_suite("queue", target, &queue::cases()).await
}

/// Runs the email table against `target`.
pub async fn run_email_suite(target: &SuiteTarget<dyn EmailSender>) -> ConformanceReport {
    run_suite("email", target, &email::cases()).await
}

/// Runs the storage table against `target`.
pub async fn run_storage_suite(target: &SuiteTarget<dyn ObjectStorage>) -> ConformanceReport {
    run_suite("storage", target, &storage::cases()).await
}

/// Runs the auth table against `target`.
pub async fn run_auth_suite(target: &SuiteTarget<dyn AuthProvider>) -> ConformanceReport {
    run_suite("auth", target, &auth::cases()).await
}

/// Runs the events table against `target`.
pub async fn run_events_suite(target: &SuiteTarget<dyn EventBus>) -> ConformanceReport {
    run_suite("events", target, &events::cases()).await
}
