//! Two-colony ant foraging simulation engine.
//!
//! A [`World`] owns two colonies of ants, a set of finite food sources and a
//! bounded pheromone store. Every call to [`World::step`] updates each ant in a
//! fixed order (decide, act, pick up, deliver, move) and then evaporates
//! pheromones. [`Episode`] drives a world headlessly for a number of frames.

pub mod entities;
pub mod episode;
pub mod perception;
pub mod pheromone;
pub mod policy;
pub mod snapshot;
pub mod world;

mod executor;

pub use entities::{Ant, Colony, FoodSource};
pub use episode::{Episode, EpisodeConfig, EpisodeResult};
pub use perception::{Perception, Senses};
pub use pheromone::{PheromoneMark, PheromoneStore};
pub use policy::{Action, PolicyKind, PolicyParams};
pub use snapshot::WorldSnapshot;
pub use world::World;
