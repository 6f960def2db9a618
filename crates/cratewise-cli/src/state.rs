//! The view state observed by renderers.

use cratewise_core::types::CrateInfo;

/// Where the recommendation workflow currently stands.
///
/// Starts at [`ResultState::Idle`] and has no terminal state; every
/// validated submission passes through [`ResultState::Loading`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResultState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight; previous results and errors are cleared.
    Loading,
    /// The backend returned these crates, in ranking order.
    Success(Vec<CrateInfo>),
    /// The last submission failed with this user-facing message.
    Error(String),
}

impl ResultState {
    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The current result list; empty unless [`ResultState::Success`].
    #[must_use]
    pub fn crates(&self) -> &[CrateInfo] {
        match self {
            Self::Success(crates) => crates,
            _ => &[],
        }
    }

    /// The current error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}
