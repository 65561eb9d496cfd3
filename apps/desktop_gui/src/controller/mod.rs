//! Controller layer: UI events, session intents, and command orchestration.

pub mod console;
pub mod events;
pub mod orchestration;
