use crate::builder::addon::{BLEND_BLOB, CLASSES_BLOB};
use crate::builder::archive::read_member;
use crate::errors::Result;
use crate::types::addon::BlendUnit;
use crate::types::class::ClassRecord;
use std::path::Path;

/// The two data blobs a built bundle carries for the host side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Blobs {
    pub classes: Vec<ClassRecord>,
    pub blend: Vec<BlendUnit>,
}

impl Blobs {
    pub fn from_bytes(classes: &[u8], blend: &[u8]) -> Result<Self> {
        Ok(Blobs {
            classes: serde_json::from_slice(classes)?,
            blend: serde_json::from_slice(blend)?,
        })
    }

    /// Reads `classes.json` and `blend.json` out of a built archive.
    pub fn from_archive(path: &Path) -> Result<Self> {
        let classes = read_member(path, CLASSES_BLOB)?;
        let blend = read_member(path, BLEND_BLOB)?;
        Self::from_bytes(&classes, &blend)
    }
}
