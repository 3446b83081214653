use crate::errors::{BadkitError, Result};
use crate::types::addon::{PanelPlacement, ResolvedClass};
use crate::types::class::PanelSpec;

pub const DEFAULT_SPACE_TYPE: &str = "VIEW_3D";
pub const DEFAULT_REGION_TYPE: &str = "UI";

/// Derives the panel for an operator unit from its placement metadata.
///
/// The identity is `{space}_PT_{unit}` and the label follows the operator's,
/// so the same inputs always produce the same [`PanelSpec`].
///
/// ### Parameters
/// - `unit_name`: name of the operator unit (its source directory).
/// - `operator`: the unit's resolved operator class.
/// - `properties`: the unit's property group. A panel without one is a
///   configuration error.
/// - `placement`: the `!Panel` metadata.
pub fn synthesize_panel(
    unit_name: &str,
    operator: &ResolvedClass,
    properties: Option<&ResolvedClass>,
    placement: &PanelPlacement,
) -> Result<PanelSpec> {
    let props = properties.ok_or_else(|| {
        BadkitError::Configuration(format!(
            "operator unit '{}' requests a panel but has no properties module",
            unit_name
        ))
    })?;

    let label = operator
        .bl_label
        .clone()
        .unwrap_or_else(|| operator.class_name.clone());

    Ok(PanelSpec {
        class_name: format!("{}Panel", operator.class_name),
        bl_idname: format!("{}_PT_{}", placement.space, unit_name),
        bl_description: format!("Panel for running the {} operator.", label),
        bl_label: label,
        bl_category: placement.category.clone(),
        space_type: placement
            .space_type
            .clone()
            .unwrap_or_else(|| DEFAULT_SPACE_TYPE.to_string()),
        region_type: placement
            .region_type
            .clone()
            .unwrap_or_else(|| DEFAULT_REGION_TYPE.to_string()),
        operator_idname: operator.bl_idname.clone(),
        props_idname: props.bl_idname.clone(),
        fields: props.fields.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::class::ClassKind;
    use std::path::PathBuf;

    fn class(kind: ClassKind, name: &str, idname: &str, label: Option<&str>) -> ResolvedClass {
        ResolvedClass {
            kind,
            class_name: name.into(),
            module: format!("material_marshall.{}", name.to_lowercase()),
            archive_path: format!("material_marshall/{}.py", name.to_lowercase()),
            source_path: PathBuf::from("src/material_marshall/operator.py"),
            bl_idname: idname.into(),
            bl_label: label.map(str::to_string),
            menu_target: None,
            fields: vec!["target_structure".into(), "tex_size".into()],
        }
    }

    fn placement() -> PanelPlacement {
        PanelPlacement {
            space: "VIEW3D".into(),
            category: "BADKit".into(),
            space_type: None,
            region_type: None,
        }
    }

    #[test]
    fn panel_identity_is_deterministic() {
        let op = class(ClassKind::Operator, "MaterialMarshall", "object.material_marshall", Some("Material Marshall"));
        let props = class(ClassKind::PropertyGroup, "MMProperties", "material_marshall_properties", None);

        let first = synthesize_panel("material_marshall", &op, Some(&props), &placement()).unwrap();
        let second = synthesize_panel("material_marshall", &op, Some(&props), &placement()).unwrap();
        assert_eq!(first, second);

        assert_eq!(first.bl_idname, "VIEW3D_PT_material_marshall");
        assert_eq!(first.class_name, "MaterialMarshallPanel");
        assert_eq!(first.bl_label, "Material Marshall");
        assert_eq!(first.bl_description, "Panel for running the Material Marshall operator.");
        assert_eq!(first.space_type, "VIEW_3D");
        assert_eq!(first.region_type, "UI");
        assert_eq!(first.operator_idname, "object.material_marshall");
        assert_eq!(first.props_idname, "material_marshall_properties");
        assert_eq!(first.fields, vec!["target_structure", "tex_size"]);
    }

    #[test]
    fn explicit_space_and_region_types_win() {
        let op = class(ClassKind::Operator, "Bake", "object.bake", Some("Bake"));
        let props = class(ClassKind::PropertyGroup, "BakeProps", "bake_props", None);
        let mut placement = placement();
        placement.space_type = Some("NODE_EDITOR".into());
        placement.region_type = Some("TOOLS".into());

        let spec = synthesize_panel("bake", &op, Some(&props), &placement).unwrap();
        assert_eq!(spec.space_type, "NODE_EDITOR");
        assert_eq!(spec.region_type, "TOOLS");
    }

    #[test]
    fn panel_without_properties_is_a_configuration_error() {
        let op = class(ClassKind::Operator, "Bake", "object.bake", Some("Bake"));
        let err = synthesize_panel("bake", &op, None, &placement()).unwrap_err();
        assert!(matches!(err, BadkitError::Configuration(_)));
    }
}
