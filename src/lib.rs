//! BADKit: builds Blender addon bundles from a declarative `addon.yaml`.
//!
//! The pipeline runs manifest ([`manifest`]) -> conformance ([`source`]) ->
//! panel synthesis and archive assembly ([`builder`]). [`shim`] models the
//! registration the bundle performs once the host loads it.

pub mod addon;
pub mod builder;
pub mod errors;
pub mod manifest;
pub mod shim;
pub mod source;
pub mod types;
pub mod utils;
