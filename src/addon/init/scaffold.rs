use crate::errors::{BadkitError, Result};
use crate::source::{Contract, OperatorContract, PropertyGroupContract};
use crate::utils::kebab_case::to_pascal_case;
use crate::utils::path::{CONFIG_FILE, MANIFEST_FILE, SRC_DIR};
use std::fs;
use std::path::{Path, PathBuf};

/// Values a new project is generated from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    pub name: String,
    pub author: String,
    /// Operator unit directory name, snake_case.
    pub operator: String,
}

/// Writes `addon.yaml`, `badkit.toml` and one operator unit under `root`.
/// Refuses to touch a directory that already has a manifest.
pub fn scaffold_project(root: &Path, plan: &ScaffoldPlan) -> Result<Vec<PathBuf>> {
    let manifest = root.join(MANIFEST_FILE);
    if manifest.exists() {
        return Err(BadkitError::Configuration(format!(
            "{} already exists, refusing to overwrite it",
            manifest.display()
        )));
    }

    let unit_dir = root.join(SRC_DIR).join(&plan.operator);
    fs::create_dir_all(&unit_dir)?;

    let files = vec![
        (manifest, render_manifest(plan)),
        (root.join(CONFIG_FILE), render_config()),
        (
            unit_dir.join(format!("{}.py", OperatorContract::MODULE)),
            render_operator(plan),
        ),
        (
            unit_dir.join(format!("{}.py", PropertyGroupContract::MODULE)),
            render_properties(plan),
        ),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        if path.exists() {
            continue;
        }
        fs::write(&path, content)?;
        written.push(path);
    }
    Ok(written)
}

fn render_manifest(plan: &ScaffoldPlan) -> String {
    format!(
        r#"!Addon
bl_info: !BLInfo
  name: {name}
  description: {description}
  author: {author}
  addon_version: [0, 1, 0]
  blender_version: [3, 6, 0]
  support: COMMUNITY
operators:
  - !Operator
    name: {operator}
    panel: !Panel
      space: VIEW3D
      category: {name}
blend: []
"#,
        name = yaml_str(&plan.name),
        description = yaml_str(&format!("{} addon", plan.name)),
        author = yaml_str(&plan.author),
        operator = plan.operator,
    )
}

fn render_config() -> String {
    format!(
        "[project]\nmanifest = \"{}\"\nsrc = \"{}\"\nbuild = \"build\"\n\n[launch]\n# blender = \"/path/to/blender\"\n",
        MANIFEST_FILE, SRC_DIR
    )
}

fn render_operator(plan: &ScaffoldPlan) -> String {
    let class = to_pascal_case(&plan.operator);
    format!(
        r#"import bpy

from .. import BADKitOperator
from . import properties


class {class}(BADKitOperator):
    """Runs {label}."""

    bl_idname = "object.{operator}"
    bl_label = "{label}"
    bl_options = {{"REGISTER", "UNDO"}}
    menu_target = bpy.types.VIEW3D_MT_object

    def execute(self, context):
        props = getattr(context.scene, properties.{class}Properties.bl_idname)
        self.report({{"INFO"}}, f"{label} ran with enabled={{props.enabled}}")
        return {{"FINISHED"}}
"#,
        class = class,
        operator = plan.operator,
        label = py_label(&plan.operator),
    )
}

fn render_properties(plan: &ScaffoldPlan) -> String {
    let class = to_pascal_case(&plan.operator);
    format!(
        r#"from bpy.props import BoolProperty

from .. import BADKitPropertyGroup


class {class}Properties(BADKitPropertyGroup):
    bl_idname = "{operator}_properties"

    enabled: BoolProperty(name="Enabled", default=True)
"#,
        class = class,
        operator = plan.operator,
    )
}

fn py_label(operator: &str) -> String {
    operator
        .split('_')
        .filter(|p| !p.is_empty())
        .map(|p| {
            let mut chars = p.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Double-quoted YAML scalar, same escaping as JSON.
fn yaml_str(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::load_manifest;
    use crate::types::addon::PanelUnit;

    fn plan() -> ScaffoldPlan {
        ScaffoldPlan {
            name: "Test Addon".into(),
            author: "NOIR".into(),
            operator: "material_marshall".into(),
        }
    }

    #[test]
    fn scaffolded_project_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let written = scaffold_project(dir.path(), &plan()).unwrap();
        assert_eq!(written.len(), 4);

        let addon = load_manifest(&dir.path().join(MANIFEST_FILE), &dir.path().join(SRC_DIR)).unwrap();
        assert_eq!(addon.bl_info.name, "Test Addon");
        let unit = &addon.operators[0];
        assert_eq!(unit.operator.class_name, "MaterialMarshall");
        assert_eq!(unit.operator.bl_label.as_deref(), Some("Material Marshall"));
        assert_eq!(unit.properties.as_ref().unwrap().fields, vec!["enabled"]);
        assert!(matches!(unit.panel, Some(PanelUnit::Generated(_))));
    }

    #[test]
    fn refuses_existing_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let err = scaffold_project(dir.path(), &plan()).unwrap_err();
        assert!(matches!(err, BadkitError::Configuration(_)));
    }
}
