//! Effective-role resolution and member counting for a single guild.
//!
//! Everything here is pure: callers hand in a [`GuildSnapshot`] fetched elsewhere and get
//! an [`AggregationResult`] back.

mod aggregate;
mod model;
mod resolve;

pub use aggregate::*;
pub use model::*;
pub use resolve::{resolve_effective_role, ResolutionPolicy};
