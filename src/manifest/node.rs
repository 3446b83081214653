use crate::errors::{BadkitError, Result};
use crate::manifest::ResolveContext;
use crate::utils::logger::{LogLevel, Logger};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Tags the manifest understands. Anything else is rejected by name.
pub const KNOWN_TAGS: &[&str] = &["Addon", "BLInfo", "Operator", "Panel", "Blend"];

/// A manifest node type constructed from a tagged (or untagged) mapping.
pub trait Descriptor: Sized {
    /// Tag without the leading `!`.
    const TAG: &'static str;
    /// Recognized keys. Others are dropped before `construct` runs.
    const ATTRS: &'static [&'static str];

    fn construct(fields: &mut Fields, ctx: &ResolveContext) -> Result<Self>;
}

/// Resolves `node` as descriptor `D`.
pub fn resolve<D: Descriptor>(node: &Value, ctx: &ResolveContext) -> Result<D> {
    let mut fields = Fields::from_node::<D>(node)?;
    D::construct(&mut fields, ctx)
}

/// The recognized key/value pairs of one node.
#[derive(Debug)]
pub struct Fields {
    tag: &'static str,
    values: BTreeMap<String, Value>,
}

impl Fields {
    pub fn from_node<D: Descriptor>(node: &Value) -> Result<Self> {
        let body = match node {
            Value::Tagged(tagged) => {
                if tagged.tag != D::TAG {
                    return Err(unexpected_tag(&tagged.tag.to_string(), D::TAG));
                }
                &tagged.value
            }
            other => other,
        };

        let mapping = match body {
            Value::Mapping(mapping) => mapping.clone(),
            Value::Null => Default::default(),
            _ => {
                return Err(BadkitError::manifest(format!(
                    "!{} must be a mapping",
                    D::TAG
                )));
            }
        };

        let logger = Logger::new();
        let mut values = BTreeMap::new();
        for (key, value) in mapping {
            let key = match key {
                Value::String(s) => s,
                other => {
                    return Err(BadkitError::manifest(format!(
                        "!{} has a non-string key: {:?}",
                        D::TAG,
                        other
                    )));
                }
            };
            if D::ATTRS.contains(&key.as_str()) {
                values.insert(key, value);
            } else {
                logger.log_message(
                    LogLevel::Debug,
                    &format!("Ignoring unknown key '{}' on !{}", key, D::TAG),
                );
            }
        }

        Ok(Fields {
            tag: D::TAG,
            values,
        })
    }

    /// Removes `key`. A YAML null reads as absent.
    pub fn take(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key).filter(|v| !v.is_null())
    }

    pub fn require(&mut self, key: &str) -> Result<Value> {
        let tag = self.tag;
        self.take(key)
            .ok_or_else(|| BadkitError::construction(tag, key))
    }

    pub fn require_str(&mut self, key: &str) -> Result<String> {
        let value = self.require(key)?;
        self.string(key, value)
    }

    pub fn optional_str(&mut self, key: &str) -> Result<Option<String>> {
        match self.take(key) {
            Some(value) => self.string(key, value).map(Some),
            None => Ok(None),
        }
    }

    /// A list of non-negative integers such as `[0, 1, 0]`.
    pub fn optional_version(&mut self, key: &str) -> Result<Option<Vec<u32>>> {
        let Some(value) = self.take(key) else {
            return Ok(None);
        };
        let Value::Sequence(items) = value else {
            return Err(self.shape_error(key, "a list of integers"));
        };
        items
            .iter()
            .map(|item| {
                item.as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| self.shape_error(key, "a list of integers"))
            })
            .collect::<Result<Vec<u32>>>()
            .map(Some)
    }

    /// A sequence of nodes. Absent reads as empty.
    pub fn sequence(&mut self, key: &str) -> Result<Vec<Value>> {
        match self.take(key) {
            None => Ok(Vec::new()),
            Some(Value::Sequence(items)) => Ok(items),
            Some(_) => Err(self.shape_error(key, "a list")),
        }
    }

    /// A list of strings. Absent reads as empty.
    pub fn string_list(&mut self, key: &str) -> Result<Vec<String>> {
        self.sequence(key)?
            .into_iter()
            .map(|item| self.string(key, item))
            .collect()
    }

    fn string(&self, key: &str, value: Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(self.shape_error(key, "a string")),
        }
    }

    fn shape_error(&self, key: &str, expected: &str) -> BadkitError {
        BadkitError::manifest(format!(
            "field '{}' of !{} must be {}",
            key, self.tag, expected
        ))
    }
}

fn unexpected_tag(found: &str, expected: &str) -> BadkitError {
    let bare = found.trim_start_matches('!');
    if KNOWN_TAGS.contains(&bare) {
        BadkitError::manifest(format!("expected !{}, found !{}", expected, bare))
    } else {
        BadkitError::manifest(format!("unsupported tag !{} (expected !{})", bare, expected))
    }
}
