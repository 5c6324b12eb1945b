//! icecraft: turns an ice sculpture wizard selection into a generation
//! payload (ordered images, per-image instructions, one prompt) and
//! submits it to the rendering backend.

pub mod catalog;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod log;
pub mod payload;
pub mod prompt;
pub mod resolver;
pub mod selection;
pub mod ux;

pub use catalog::TopperAssets;
pub use compiler::{compile, plan, Branch, CompilePlan};
pub use payload::CompiledPayload;
pub use resolver::{FileResolver, HttpResolver, StaticResolver};
pub use selection::{CategoryChoice, FileHandle, LugeKind, SelectionState, SlotPair, Template};
