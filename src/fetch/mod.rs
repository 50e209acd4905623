//! Fetch-and-retry controller for "get one question".
//!
//! `FetchReducer` owns every phase transition (`Idle → Fetching →
//! RetryScheduled → Fetching …`); `FetchController` owns the side effects
//! that follow from them: the single in-flight request task and the single
//! retry timer.

mod controller;
mod intent;
mod policy;
mod reducer;
mod state;

pub use controller::{FetchController, FetchEvent};
pub use intent::FetchIntent;
pub use policy::BackoffPolicy;
pub use reducer::FetchReducer;
pub use state::{FetchPhase, FetchState, RequestToken};
