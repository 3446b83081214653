use crate::types::class::{ClassKind, ClassRecord, ClassSource, PanelSpec};
use crate::utils::kebab_case::to_archive_name;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SupportTier {
    Official,
    Community,
    Testing,
}

impl SupportTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFFICIAL" => Some(SupportTier::Official),
            "COMMUNITY" => Some(SupportTier::Community),
            "TESTING" => Some(SupportTier::Testing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportTier::Official => "OFFICIAL",
            SupportTier::Community => "COMMUNITY",
            SupportTier::Testing => "TESTING",
        }
    }
}

/// Addon metadata, rendered into the host's `bl_info` dictionary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlInfo {
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub addon_version: Option<Vec<u32>>,
    pub blender_version: Option<Vec<u32>>,
    pub warning: Option<String>,
    pub doc_url: Option<String>,
    pub tracker_url: Option<String>,
    pub support: Option<SupportTier>,
}

impl BlInfo {
    /// File name of the bundle, e.g. `test-addon.zip` for "Test Addon".
    pub fn archive_file_name(&self) -> String {
        format!("{}.zip", to_archive_name(&self.name))
    }

    /// Renders the `bl_info = {...}` literal. Absent fields are left out.
    pub fn to_python_dict(&self) -> String {
        let mut entries: Vec<(&str, String)> = vec![("name", py_str(&self.name))];
        if let Some(d) = &self.description {
            entries.push(("description", py_str(d)));
        }
        if let Some(a) = &self.author {
            entries.push(("author", py_str(a)));
        }
        if let Some(v) = &self.addon_version {
            entries.push(("version", py_tuple(v)));
        }
        if let Some(v) = &self.blender_version {
            entries.push(("blender", py_tuple(v)));
        }
        if let Some(w) = &self.warning {
            entries.push(("warning", py_str(w)));
        }
        if let Some(u) = &self.doc_url {
            entries.push(("doc_url", py_str(u)));
        }
        if let Some(u) = &self.tracker_url {
            entries.push(("tracker_url", py_str(u)));
        }
        if let Some(s) = &self.support {
            entries.push(("support", py_str(s.as_str())));
        }

        let mut out = String::from("bl_info = {\n");
        for (key, value) in entries {
            out.push_str(&format!("    \"{}\": {},\n", key, value));
        }
        out.push_str("}\n");
        out
    }
}

// A JSON string literal is also a valid Python string literal.
fn py_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn py_tuple(values: &[u32]) -> String {
    match values {
        [] => "()".to_string(),
        [one] => format!("({},)", one),
        many => format!(
            "({})",
            many.iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Placement metadata of a `!Panel` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelPlacement {
    pub space: String,
    pub category: String,
    pub space_type: Option<String>,
    pub region_type: Option<String>,
}

/// A class found in a source unit that satisfied its contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClass {
    pub kind: ClassKind,
    pub class_name: String,
    /// Dotted module path inside the bundle, e.g. `material_marshall.operator`.
    pub module: String,
    /// Member name inside the archive, e.g. `material_marshall/operator.py`.
    pub archive_path: String,
    pub source_path: PathBuf,
    pub bl_idname: String,
    pub bl_label: Option<String>,
    pub menu_target: Option<String>,
    pub fields: Vec<String>,
}

impl ResolvedClass {
    pub fn to_record(&self) -> ClassRecord {
        ClassRecord {
            kind: self.kind,
            bl_idname: self.bl_idname.clone(),
            bl_label: self.bl_label.clone(),
            menu_target: self.menu_target.clone(),
            source: ClassSource::Module {
                module: self.module.clone(),
                class_name: self.class_name.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelUnit {
    Generated(PanelSpec),
    Module(ResolvedClass),
}

impl PanelUnit {
    pub fn to_record(&self) -> ClassRecord {
        match self {
            PanelUnit::Generated(spec) => ClassRecord {
                kind: ClassKind::Panel,
                bl_idname: spec.bl_idname.clone(),
                bl_label: Some(spec.bl_label.clone()),
                menu_target: None,
                source: ClassSource::Generated {
                    panel: spec.clone(),
                },
            },
            PanelUnit::Module(class) => class.to_record(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorUnit {
    pub name: String,
    pub operator: ResolvedClass,
    pub properties: Option<ResolvedClass>,
    pub panel: Option<PanelUnit>,
}

impl OperatorUnit {
    /// Classes in registration order: operator, properties, panel.
    pub fn classes(&self) -> Vec<ClassRecord> {
        let mut out = vec![self.operator.to_record()];
        if let Some(props) = &self.properties {
            out.push(props.to_record());
        }
        if let Some(panel) = &self.panel {
            out.push(panel.to_record());
        }
        out
    }

    /// Source modules that ship inside the bundle.
    pub fn source_modules(&self) -> Vec<&ResolvedClass> {
        let mut out = vec![&self.operator];
        if let Some(props) = &self.properties {
            out.push(props);
        }
        if let Some(PanelUnit::Module(panel)) = &self.panel {
            out.push(panel);
        }
        out
    }
}

/// Reference to bundled non-code assets under `<src>/blend/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendUnit {
    pub name: String,
    #[serde(default)]
    pub node_groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Addon {
    pub bl_info: BlInfo,
    pub operators: Vec<OperatorUnit>,
    pub blend: Vec<BlendUnit>,
}

impl Addon {
    pub fn classes(&self) -> Vec<ClassRecord> {
        self.operators.iter().flat_map(|op| op.classes()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_file_name_is_lowercase_and_hyphenated() {
        let info = BlInfo {
            name: "Test Addon".into(),
            ..Default::default()
        };
        assert_eq!(info.archive_file_name(), "test-addon.zip");
    }

    #[test]
    fn python_dict_skips_absent_fields() {
        let info = BlInfo {
            name: "Material \"Marshall\"".into(),
            addon_version: Some(vec![0, 1, 0]),
            blender_version: Some(vec![3]),
            support: Some(SupportTier::Community),
            ..Default::default()
        };
        let dict = info.to_python_dict();
        assert!(dict.starts_with("bl_info = {\n"));
        assert!(dict.contains("\"name\": \"Material \\\"Marshall\\\"\","));
        assert!(dict.contains("\"version\": (0, 1, 0),"));
        assert!(dict.contains("\"blender\": (3,),"));
        assert!(dict.contains("\"support\": \"COMMUNITY\","));
        assert!(!dict.contains("author"));
        assert!(!dict.contains("doc_url"));
    }

    #[test]
    fn support_tier_parses_case_insensitively() {
        assert_eq!(SupportTier::parse("official"), Some(SupportTier::Official));
        assert_eq!(SupportTier::parse("TESTING"), Some(SupportTier::Testing));
        assert_eq!(SupportTier::parse("beta"), None);
    }
}
