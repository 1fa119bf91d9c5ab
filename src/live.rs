//! Debounced recalculation for interactive editing.
//!
//! A form that recalculates on every keystroke only cares about the latest
//! input. [`LiveCalculationController`] waits for a quiet period after each
//! change and calculates once; any change arriving earlier supersedes the
//! scheduled calculation instead of queueing behind it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::calculation::{LiquidationRequest, liquidate};
use crate::config::EffectiveConfiguration;
use crate::error::ValidationErrors;
use crate::models::LiquidationResult;

/// Quiet period after the last input before a calculation runs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A published calculation outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveUpdate {
    /// The submission this outcome belongs to. Strictly increasing.
    pub generation: u64,
    /// The liquidation, or every validation failure of the input.
    pub outcome: Result<LiquidationResult, ValidationErrors>,
}

/// Schedules liquidations for the latest input only.
///
/// The controller holds at most one pending task. Each [`submit`](Self::submit)
/// aborts the pending task, if any, and schedules a new one. A superseded task
/// that is already past its timer is still stopped by a generation check, so
/// only the newest submission ever publishes.
///
/// Outcomes are published on a [`watch`] channel; subscribers always see the
/// most recent one.
///
/// Must be used from within a Tokio runtime.
///
/// # Example
///
/// ```
/// use liquidation_engine::calculation::LiquidationRequest;
/// use liquidation_engine::config::LegalParameterStore;
/// use liquidation_engine::live::LiveCalculationController;
/// use liquidation_engine::models::{
///     ContractType, EmployeeProfile, GratificationMode, PayPeriod,
/// };
/// use rust_decimal::Decimal;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut controller = LiveCalculationController::new(LegalParameterStore::effective_defaults())
///     .with_debounce(Duration::from_millis(10));
/// let mut updates = controller.subscribe();
///
/// let request = LiquidationRequest {
///     employee: Some(EmployeeProfile {
///         id: "emp_001".to_string(),
///         national_id: "12.345.678-5".to_string(),
///         first_name: "Ana".to_string(),
///         last_name: "Rojas".to_string(),
///         base_salary: 1_000_000,
///         weekly_hours: Decimal::from(44),
///         contract_type: ContractType::Indefinite,
///         pension_administrator: "habitat".to_string(),
///         health_institution: "fonasa".to_string(),
///         family_dependents: 0,
///         gratification_mode: GratificationMode::None,
///     }),
///     period: PayPeriod {
///         year: 2025,
///         month: 3,
///         days_worked: 30,
///         worked_hours: None,
///         overtime_hours: None,
///     },
///     income: Default::default(),
///     deductions: Default::default(),
/// };
///
/// controller.submit(request);
/// updates.changed().await.unwrap();
/// let update = updates.borrow().clone().unwrap();
/// assert_eq!(update.outcome.unwrap().gross_total, 1_000_000);
/// # }
/// ```
pub struct LiveCalculationController {
    config: Arc<EffectiveConfiguration>,
    debounce: Duration,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    updates: Arc<watch::Sender<Option<LiveUpdate>>>,
}

impl LiveCalculationController {
    /// Creates a controller calculating against `config` with the default debounce.
    pub fn new(config: EffectiveConfiguration) -> Self {
        let (updates, _) = watch::channel(None);
        Self {
            config: Arc::new(config),
            debounce: DEFAULT_DEBOUNCE,
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
            updates: Arc::new(updates),
        }
    }

    /// Sets the quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Replaces the configuration used by calculations submitted from now on.
    pub fn set_configuration(&mut self, config: EffectiveConfiguration) {
        self.config = Arc::new(config);
    }

    /// Subscribes to published outcomes.
    pub fn subscribe(&self) -> watch::Receiver<Option<LiveUpdate>> {
        self.updates.subscribe()
    }

    /// Returns the generation of the most recent submission.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns true while a submission is waiting for its quiet period.
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Schedules a calculation for `request`, superseding any pending one.
    ///
    /// Returns the generation assigned to this submission.
    pub fn submit(&mut self, request: LiquidationRequest) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_pending();

        let latest = Arc::clone(&self.generation);
        let updates = Arc::clone(&self.updates);
        let config = Arc::clone(&self.config);
        let debounce = self.debounce;

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if latest.load(Ordering::SeqCst) != generation {
                debug!(generation, "Superseded before calculation");
                return;
            }

            let outcome = liquidate(&request, &config);
            updates.send_if_modified(|current| {
                let superseded = latest.load(Ordering::SeqCst) != generation
                    || current
                        .as_ref()
                        .is_some_and(|update| update.generation > generation);
                if superseded {
                    debug!(generation, "Superseded during calculation");
                    return false;
                }
                *current = Some(LiveUpdate {
                    generation,
                    outcome,
                });
                true
            });
        }));

        debug!(generation, debounce_ms = debounce.as_millis() as u64, "Calculation scheduled");
        generation
    }

    /// Discards the pending submission, if any, without publishing.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_pending();
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for LiveCalculationController {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
