pub mod addon;
pub mod class;
