//! Core data model: observations, the observation store, and event windows.

mod observation;
mod window;


pub use observation::{Observation, ObservationStore};
pub use window::EventWindow;
