//! Message-driven control loop.
//!
//! The control surface sends a [`Message`]; the controller checks it
//! against the latest snapshot, runs the action, and always answers with a
//! freshly reconciled snapshot. Only one message is processed at a time.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::actions::{ActionExecutor, ActionReport};
use crate::config::InstallerConfig;
use crate::error::{InstallerError, Result};
use crate::host::HostActivator;
use crate::reconcile::{Action, InstallationState, Reconciler};
use crate::shell::CommandRunner;

/// A request from the control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Refresh,
    CheckForUpdates,
    InstallFromRemote,
    InstallFromCache,
    Uninstall,
    Update,
}

impl Message {
    /// The action this message triggers, `None` for a plain refresh.
    pub fn action(self) -> Option<Action> {
        match self {
            Message::Refresh => None,
            Message::CheckForUpdates => Some(Action::CheckForUpdates),
            Message::InstallFromRemote => Some(Action::InstallFromRemote),
            Message::InstallFromCache => Some(Action::InstallFromCache),
            Message::Uninstall => Some(Action::Uninstall),
            Message::Update => Some(Action::Update),
        }
    }
}

impl From<Action> for Message {
    fn from(action: Action) -> Self {
        match action {
            Action::CheckForUpdates => Message::CheckForUpdates,
            Action::InstallFromRemote => Message::InstallFromRemote,
            Action::InstallFromCache => Message::InstallFromCache,
            Action::Uninstall => Message::Uninstall,
            Action::Update => Message::Update,
        }
    }
}

/// Answer to one message.
#[derive(Debug)]
pub struct Cycle {
    /// Outcome of the action, `None` for a plain refresh.
    pub action: Option<Result<ActionReport>>,
    /// State reconciled after the action.
    pub snapshot: Result<InstallationState>,
}

/// Clears the in-flight flag when dropped.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Routes messages to the reconciler and the executor.
pub struct Controller {
    reconciler: Reconciler,
    executor: ActionExecutor,
    cache_dir: PathBuf,
    in_flight: AtomicBool,
    last: Mutex<Option<InstallationState>>,
}

impl Controller {
    /// Wire a controller for a configuration.
    pub fn new(
        config: &InstallerConfig,
        runner: Arc<dyn CommandRunner>,
        activator: Arc<dyn HostActivator>,
    ) -> Result<Self> {
        let reconciler = Reconciler::new(config, runner.clone())?;
        let executor = ActionExecutor::new(config, runner, activator);
        Ok(Self::from_parts(reconciler, executor, config.cache_dir()))
    }

    /// Assemble a controller from prepared collaborators.
    pub fn from_parts(reconciler: Reconciler, executor: ActionExecutor, cache_dir: PathBuf) -> Self {
        Self {
            reconciler,
            executor,
            cache_dir,
            in_flight: AtomicBool::new(false),
            last: Mutex::new(None),
        }
    }

    /// Whether a message is being processed.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// The snapshot produced by the last cycle, if it succeeded.
    pub fn last_snapshot(&self) -> Option<InstallationState> {
        self.last.lock().ok().and_then(|last| last.clone())
    }

    /// Process one message.
    ///
    /// Fails only with `Busy`; everything else is reported in the cycle.
    pub fn dispatch(&self, message: Message) -> Result<Cycle> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(InstallerError::Busy)?;
        info!("Handling {:?}", message);

        let Some(action) = message.action() else {
            return Ok(Cycle {
                action: None,
                snapshot: self.reconcile(false),
            });
        };

        let outcome = match self.current() {
            Ok(current) if current.allows(action) => self.execute(action, &current),
            Ok(current) => Err(InstallerError::ActionNotAvailable {
                action: action.to_string(),
                phase: current.phase.to_string(),
            }),
            Err(e) => {
                warn!("Cannot validate {}: {}", action, e);
                Err(InstallerError::ActionNotAvailable {
                    action: action.to_string(),
                    phase: "the installation status is unknown".to_string(),
                })
            }
        };

        if let Err(e) = &outcome {
            warn!("{} did not complete: {}", action, e);
        }

        Ok(Cycle {
            action: Some(outcome),
            snapshot: self.reconcile(action == Action::CheckForUpdates),
        })
    }

    fn current(&self) -> Result<InstallationState> {
        match self.last_snapshot() {
            Some(state) => Ok(state),
            None => self.reconcile(false),
        }
    }

    fn execute(&self, action: Action, current: &InstallationState) -> Result<ActionReport> {
        match action {
            Action::CheckForUpdates => Ok(ActionReport::new(Action::CheckForUpdates)),
            Action::InstallFromRemote => self.executor.install_from_remote(),
            Action::InstallFromCache => match &current.cache_archive {
                Some(archive) => self.executor.install_from_cache(archive, &self.cache_dir),
                None => Err(InstallerError::NoCachedArchive {
                    dir: self.cache_dir.clone(),
                }),
            },
            Action::Uninstall => self.executor.uninstall(),
            Action::Update => self.executor.update(),
        }
    }

    fn reconcile(&self, check_updates: bool) -> Result<InstallationState> {
        let state = self.reconciler.refresh(check_updates);
        if let Ok(mut last) = self.last.lock() {
            *last = state.as_ref().ok().cloned();
        }
        state
    }
}
