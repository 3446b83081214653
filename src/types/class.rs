use serde::{Deserialize, Serialize};

/// Host capability contract a resolved class satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Operator,
    PropertyGroup,
    Panel,
}

impl ClassKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Operator => "operator",
            ClassKind::PropertyGroup => "property group",
            ClassKind::Panel => "panel",
        }
    }
}

/// A panel described as data rather than as a generated type.
///
/// The host side builds its panel from this value and draws it with one
/// generic renderer (`shim::render::draw_panel`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelSpec {
    pub class_name: String,
    pub bl_idname: String,
    pub bl_label: String,
    pub bl_category: String,
    pub bl_description: String,
    pub space_type: String,
    pub region_type: String,
    /// Operator invoked by the panel's action button.
    pub operator_idname: String,
    /// Scope attribute holding the property group instance.
    pub props_idname: String,
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassSource {
    /// A class defined in a bundled source module.
    Module { module: String, class_name: String },
    /// A panel synthesized from placement metadata.
    Generated { panel: PanelSpec },
}

/// One entry of the resolved class list serialized into `classes.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    pub kind: ClassKind,
    pub bl_idname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bl_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_target: Option<String>,
    pub source: ClassSource,
}

impl ClassRecord {
    pub fn is_property_container(&self) -> bool {
        self.kind == ClassKind::PropertyGroup
    }

    pub fn draw_target(&self) -> Option<&str> {
        self.menu_target.as_deref()
    }

    pub fn panel(&self) -> Option<&PanelSpec> {
        match &self.source {
            ClassSource::Generated { panel } => Some(panel),
            ClassSource::Module { .. } => None,
        }
    }
}
