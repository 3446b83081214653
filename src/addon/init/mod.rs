pub mod prompt;
pub mod scaffold;
