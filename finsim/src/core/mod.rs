pub mod parameters;
pub mod trial;
