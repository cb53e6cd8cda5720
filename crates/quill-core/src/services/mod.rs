//! Domain services - the rules that sit between callers and the store.

pub mod authorization;
pub mod derive;
mod lifecycle;

pub use authorization::{PostAction, can_create, can_mutate, can_view};
pub use derive::{compute_excerpt, compute_reading_time, normalize_tags};
pub use lifecycle::PostLifecycleManager;
