//! Notifications module
//!
//! In-process event bus the scheduling services publish to after every
//! committed state change (holds, bookings, released slots).
//!
//! ```ignore
//! let event_bus = create_event_bus();
//! let mut subscriber = event_bus.subscribe();
//! while let Some(message) = subscriber.recv().await {
//!     println!("{} {}", message.timestamp, message.event.event_type());
//! }
//! ```

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::*;
