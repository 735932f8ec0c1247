//! # Utilities Module
//!
//! Collaborators the game depends on but does not own: file access, random
//! numbers, file name rules, and a serde helper for insertion-ordered maps.

pub mod files;
pub mod ordered_map;
pub mod random;

pub use files::*;
pub use random::*;
