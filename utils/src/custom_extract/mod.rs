pub mod json_extractor;
pub mod path_extractor;

pub use json_extractor::*;
pub use path_extractor::*;
