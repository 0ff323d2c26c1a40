//! Turns platform events into points, coins and badge issues.

mod engine;
mod events;
pub mod rules;

pub use engine::{AwardSummary, EventReport, handle_event};
pub use events::PlatformEvent;

use crate::CallbackMeta;

pub const META: CallbackMeta = CallbackMeta {
    name: "event_observer",
    desc: "Award points and coins for platform events.",
    category: "points",
};
