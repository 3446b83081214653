#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const OPERATOR: &str = r#"import bpy
from bpy.types import Context, Event

from .. import BADKitOperator
from .properties import MMProperties


class MMOperator(BADKitOperator):
    """Prepare materials for glTF export."""

    bl_label = "Marshall Materials"
    bl_idname = "object.material_marshall"
    menu_target = bpy.types.VIEW3D_MT_object
    FRAME_NAME = "MM-FRAME"
    target_structure: str
    tex_size: int

    @classmethod
    def poll(cls, context: Context):
        obj = context.view_layer.objects.active
        return obj and obj.mode == "OBJECT"

    def execute(self, context: Context) -> set[str]:
        props: MMProperties = getattr(context.scene, MMProperties.bl_idname)
        return {"FINISHED"}
"#;

pub const PROPERTIES: &str = r#"from bpy.props import BoolProperty, EnumProperty

from .. import BADKitPropertyGroup


class MMProperties(BADKitPropertyGroup):
    """
    Properties used by the Material Marshall operator.
    """

    bl_idname = "material_marshall_properties"

    target_structure: EnumProperty(
        name="Target Material Structure",
        items=[("GLTF", "glTF", "")],
    )
    tex_size: EnumProperty(name="Texture Size", items=BADKitPropertyGroup.get_map_sizes())
    overwrite: BoolProperty(name="Overwrite", default=True)
"#;

pub const BAKER_OPERATOR: &str = r#"from .. import BADKitOperator


class PDBOperator(BADKitOperator):
    bl_label = "Bake Displacement"
    bl_idname = "object.procedural_displacement_baker"
"#;

pub const MANIFEST: &str = r#"!Addon
bl_info: !BLInfo
  name: Test Addon
  description: Addon used by the integration tests
  author: NOIR
  addon_version: [0, 1, 0]
  blender_version: [3, 6, 0]
  support: TESTING
operators:
  - !Operator
    name: material_marshall
    panel: !Panel
      space: VIEW3D
      category: BADKit
  - !Operator
    name: procedural_displacement_baker
blend:
  - !Blend
    name: materials
    node_groups: [Marshall, Baker]
"#;

/// A complete project on disk: two operator units (one with properties and
/// a panel) and one blend tree with two files.
pub struct Fixture {
    pub dir: tempfile::TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "addon.yaml", MANIFEST);
        write(root, "src/material_marshall/operator.py", OPERATOR);
        write(root, "src/material_marshall/properties.py", PROPERTIES);
        write(root, "src/procedural_displacement_baker/operator.py", BAKER_OPERATOR);
        write(root, "src/blend/materials/library.blend", "BLENDER-v306");
        write(root, "src/blend/materials/textures/noise.png", "png");
        Fixture { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn manifest(&self) -> PathBuf {
        self.root().join("addon.yaml")
    }

    pub fn src(&self) -> PathBuf {
        self.root().join("src")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root().join("build")
    }

    pub fn write(&self, rel: &str, content: &str) {
        write(self.root(), rel, content);
    }
}

pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
