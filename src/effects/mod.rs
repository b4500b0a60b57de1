//! Card scripts and how they resolve.
//!
//! - [`Effect`]: what a card says it does, with [`Selector`]s naming who
//! - [`TargetRequirement`]: what a card may be aimed at when played
//! - [`EffectResolver`]: effect + context → actions, evaluated lazily

mod effect;
mod resolver;
mod targeting;

pub use effect::{Effect, Selector, Side};
pub use resolver::{EffectResolver, ResolveContext};
pub use targeting::{TargetFilter, TargetRequirement};
