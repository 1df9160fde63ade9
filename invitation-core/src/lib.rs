pub mod board;
pub mod intro;
pub mod messages;
pub mod site;
pub mod story;
pub mod supervisor;
pub mod viewport;

pub use asset_registry::{Category, GalleryCounts, GalleryScan, ImageEntry};
