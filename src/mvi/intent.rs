//! Marker trait for intents.

/// Something that happened: a player action (answer, next, try again) or
/// a system signal (a response arrived, a retry timer fired).
pub trait Intent: Send + 'static {}
