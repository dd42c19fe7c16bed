//! Real-time 2D rigid-circle simulation: gravity, wall containment and
//! pairwise elastic collisions, advanced once per frame.
//!
//! The library has no windowing; the `ball-simulator` binary drives it with
//! SFML.

pub mod benchmark;
pub mod collision;
pub mod components;
pub mod config;
pub mod systems;
pub mod world;

pub use components::{Body, Bounds};
pub use config::{Config, SimConfig, SpawnConfig, WindowConfig, WorldConfig};
pub use world::World;
