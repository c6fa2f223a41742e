//! Topic-based event bus for runtime events.
//!
//! Game events leave the session in emission order; the runtime stamps them
//! with the frame, logs them, and publishes each to the topic of its category.

mod bus;
mod log;

pub use bus::{Event, EventBus, Topic};
pub use log::log_event;
