mod friend;

pub use friend::*;
