pub mod custom_extract;
pub mod mongodb_tester;
