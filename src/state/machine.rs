use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::{Activity, EngineState, NavEvent, StateTransition};

const HISTORY_LIMIT: usize = 64;

/// Open/closed lifecycle of the lightbox with single-flight transitions.
#[derive(Debug)]
pub struct StateMachine {
    state: EngineState,
    transition_history: VecDeque<StateTransition>,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: EngineState::default(),
            transition_history: VecDeque::new(),
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn can_transition(&self, event: NavEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: NavEvent) -> Option<EngineState> {
        use NavEvent::*;
        const IDLE: EngineState = EngineState::Open(Activity::Idle);
        const BUSY: EngineState = EngineState::Open(Activity::Transitioning);
        match (self.state, event) {
            (EngineState::Closed, Open) => Some(BUSY),
            (EngineState::Closed, SelectGroup) => Some(EngineState::Closed),
            (IDLE, Open | Next | Prev) => Some(BUSY),
            (IDLE, Close) => Some(EngineState::Closed),
            (BUSY, Settle) => Some(IDLE),
            _ => None,
        }
    }

    fn rejection(&self, event: NavEvent) -> StateError {
        match (self.state, event) {
            (EngineState::Open(Activity::Transitioning), _) => {
                StateError::TransitionInFlight { event }
            }
            (EngineState::Closed, NavEvent::Close) => StateError::AlreadyClosed,
            (EngineState::Open(_), NavEvent::SelectGroup) => StateError::EngineOpen,
            (from, event) => StateError::InvalidStateTransition { from, event },
        }
    }

    /// Checks `event` against the table without changing state.
    pub fn ensure(&self, event: NavEvent) -> StateResult<EngineState> {
        self.next_state(event).ok_or_else(|| {
            let error = self.rejection(event);
            tracing::warn!(from = ?self.state, event = ?event, %error, "rejected state transition");
            error
        })
    }

    pub fn transition(&mut self, event: NavEvent) -> StateResult<EngineState> {
        tracing::debug!(from = ?self.state, event = ?event, "request state transition");
        let next = self.ensure(event)?;

        if self.transition_history.len() == HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history
            .push_back(StateTransition::new(self.state, event, next));
        self.state = next;

        Ok(self.state)
    }

    pub fn history(&self) -> impl Iterator<Item = &StateTransition> {
        self.transition_history.iter()
    }

    /// Drops straight to `Closed`, bypassing the table. Used on teardown.
    pub(crate) fn reset(&mut self) {
        self.state = EngineState::Closed;
        self.transition_history.clear();
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EngineState::{:?}", self.state)
    }
}
