//! Card content: definitions, the registry, and the built-in basic set.
//!
//! The engine reads cards only through [`CardDefinition`] fields and the
//! [`Effect`](crate::effects::Effect) values they carry, so any content
//! provider that fills a [`CardRegistry`] can drive it.

mod definition;
mod registry;
pub mod basic;

pub use definition::{
    AuraKind, AuraScaling, AuraScope, AuraScript, CardClass, CardDefinition, CardId, CardType,
};
pub use registry::CardRegistry;
