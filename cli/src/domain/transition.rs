//! Start/stop transition guard and the per-context request flow.

use std::fmt;

use crate::domain::machine::{Machine, MachineState};

/// State a caller asks a machine to move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedState {
    Running,
    Stopped,
}

impl RequestedState {
    /// Toggle target for a machine: stop it when running, otherwise start it.
    #[must_use]
    pub fn toggle_for(current: &MachineState) -> Self {
        if *current == MachineState::Running {
            Self::Stopped
        } else {
            Self::Running
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for RequestedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transition request: which machine, what it was, what it should become.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub id: String,
    pub current: MachineState,
    pub requested: RequestedState,
}

impl StateTransition {
    #[must_use]
    pub fn for_machine(machine: &Machine, requested: RequestedState) -> Self {
        Self {
            id: machine.id.clone(),
            current: machine.state.clone(),
            requested,
        }
    }
}

/// Guard verdict for a transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Issue `orbctl <command…>`.
    Execute { command: Vec<String> },
    /// Do nothing; the pair is a no-op or unrecognized.
    Skip,
}

impl Decision {
    #[must_use]
    pub fn should_execute(&self) -> bool {
        matches!(self, Self::Execute { .. })
    }

    /// Command vector, empty for [`Decision::Skip`].
    #[must_use]
    pub fn command(&self) -> &[String] {
        match self {
            Self::Execute { command } => command,
            Self::Skip => &[],
        }
    }
}

/// Decide whether `transition` warrants a command.
///
/// Only `stopped → running` (`start <id>`) and `running → stopped`
/// (`stop <id>`) execute. Every other pair, including `stopping` and
/// unknown states, is skipped.
#[must_use]
pub fn decide(transition: &StateTransition) -> Decision {
    let verb = match (&transition.current, transition.requested) {
        (MachineState::Stopped, RequestedState::Running) => "start",
        (MachineState::Running, RequestedState::Stopped) => "stop",
        _ => return Decision::Skip,
    };
    Decision::Execute {
        command: vec![verb.to_string(), transition.id.clone()],
    }
}

// ── Request flow ─────────────────────────────────────────────────────────────

/// Phase of the single transition slot of a machine-list context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionPhase {
    Idle,
    Requested(StateTransition),
    Executing(StateTransition),
}

/// Holds at most one outstanding transition request.
///
/// `Idle → Requested → Executing → Idle`; finishing clears the request
/// whether the command succeeded or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionFlow {
    phase: TransitionPhase,
}

impl Default for TransitionFlow {
    fn default() -> Self {
        Self {
            phase: TransitionPhase::Idle,
        }
    }
}

impl TransitionFlow {
    #[must_use]
    pub fn phase(&self) -> &TransitionPhase {
        &self.phase
    }

    /// Queue a request. Returns `false` (and keeps the existing one) when a
    /// request is already outstanding.
    pub fn request(&mut self, transition: StateTransition) -> bool {
        if self.phase != TransitionPhase::Idle {
            return false;
        }
        self.phase = TransitionPhase::Requested(transition);
        true
    }

    /// Move a queued request to `Executing` and return the guard's verdict.
    ///
    /// A `Skip` verdict returns the flow straight to `Idle`. Returns `None`
    /// when nothing is queued.
    pub fn begin(&mut self) -> Option<Decision> {
        let TransitionPhase::Requested(transition) = &self.phase else {
            return None;
        };
        let decision = decide(transition);
        self.phase = if decision.should_execute() {
            TransitionPhase::Executing(transition.clone())
        } else {
            TransitionPhase::Idle
        };
        Some(decision)
    }

    /// Clear the executing request.
    pub fn finish(&mut self) {
        self.phase = TransitionPhase::Idle;
    }
}
