// src/model/mod.rs

//! Backlog item representation.
//!
//! - [`item`] is the flat record handed over by the generation layer; every
//!   field is present regardless of level, so it can carry structural defects.
//! - [`node`] is the level-tagged form an item takes once its set has passed
//!   validation.
//! - [`backlog`] is the validated arena (items keyed by id plus adjacency)
//!   consumed by ordering and hashing.

pub mod backlog;
pub mod item;
pub mod node;

pub use backlog::ValidatedBacklog;
pub use item::{BacklogItem, ItemId, Level};
pub use node::{BacklogNode, ItemBody};
