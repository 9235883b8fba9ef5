use super::EngineState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    Open,
    Close,
    Next,
    Prev,
    SelectGroup,
    /// Marks the end of the transition started by the previous event.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub from: EngineState,
    pub event: NavEvent,
    pub to: EngineState,
}

impl StateTransition {
    pub const fn new(from: EngineState, event: NavEvent, to: EngineState) -> Self {
        Self { from, event, to }
    }
}
