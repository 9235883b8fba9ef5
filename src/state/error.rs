use super::event::NavEvent;
use super::model::EngineState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("lightbox is already open at index {index} of group {group}")]
    AlreadyOpen { group: String, index: usize },
    #[error("lightbox is already closed")]
    AlreadyClosed,
    #[error("cannot switch the active group while the lightbox is open")]
    EngineOpen,
    #[error("transition already in flight; rejected {event:?}")]
    TransitionInFlight { event: NavEvent },
    #[error("invalid state transition: from {from:?} using event {event:?}")]
    InvalidStateTransition { from: EngineState, event: NavEvent },
}
