//! Reducer trait.

use super::intent::Intent;
use super::state::State;

/// The only place state transitions happen.
///
/// `reduce` must be pure: the same `(state, intent)` pair always yields the
/// same new state.
pub trait Reducer {
    type State: State;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
