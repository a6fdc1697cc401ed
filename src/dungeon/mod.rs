/// Dungeon generation module.
///
/// This module carves rectangular rooms into a level, with placement and
/// sizes drawn from an injected random source.
#[allow(clippy::module_inception)]
pub mod dungeon;
#[cfg(test)]
mod dungeon_tests;

// Re-export the types needed by other modules
pub use self::dungeon::*;
