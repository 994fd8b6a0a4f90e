pub mod collection;
pub mod roster;

pub use collection::{Entity, EntityCollection};
pub use roster::Roster;
