//! Events and the listeners that react to them.
//!
//! Listeners live on their owner: cards carry persistent listeners from
//! their definition, and spells register one-shot listeners on their
//! controller's player entity. The engine collects matching listeners in
//! board order when an event is broadcast and runs each as a Trigger block.

mod event;
mod listener;

pub use event::{EventKind, GameEvent};
pub use listener::{EventListener, ListenerCondition};
