#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    /// A load/activate sequence for the newly selected slide is running.
    Transitioning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    #[default]
    Closed,
    Open(Activity),
}

impl EngineState {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}
