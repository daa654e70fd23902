pub mod id;
pub mod item;
pub mod options;
pub mod source;

pub use item::{Item, ItemOptions};
pub use options::{SourceOptions, SourceType};
pub use source::Source;
