pub mod addon;
pub mod archive;
pub mod panel;
