pub mod config;
pub mod fs;
pub mod kebab_case;
pub mod logger;
pub mod path;
pub mod signature;
pub mod spinner;
pub mod version;
