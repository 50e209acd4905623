//! Model-View-Intent primitives shared by the fetch controller and the game.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ observers (terminal driver, tests)
//!    ↑                                  │
//!    └──────────────────────────────────┘
//! ```
//!
//! Reducers never perform I/O. Anything asynchronous (HTTP requests,
//! retry timers) lives in the owner of the state and is derived from the
//! transition the reducer produced.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::State;
