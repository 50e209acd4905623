//! Marker trait for reducer-owned state.

/// State snapshots are plain values: cloned to publish, compared to detect
/// transitions, defaulted to start over.
pub trait State: Clone + PartialEq + Default + Send + 'static {}
