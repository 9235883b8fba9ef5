use crate::config::ConfigError;
use crate::group::GroupError;
use crate::media::MediaError;
use crate::scenario::ScenarioError;
use crate::state::StateError;
use thiserror::Error;

pub type LightboxResult<T> = std::result::Result<T, LightboxError>;

#[derive(Debug, Error)]
pub enum LightboxError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
}

impl From<MediaError> for LightboxError {
    fn from(err: MediaError) -> Self {
        Self::Group(GroupError::Media(err))
    }
}

impl LightboxError {
    /// Media failure behind this error, if registration is what failed.
    pub fn media(&self) -> Option<&MediaError> {
        match self {
            Self::Group(GroupError::Media(err)) => Some(err),
            _ => None,
        }
    }
}
