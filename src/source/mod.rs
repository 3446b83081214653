//! Reads Python source units into class declarations so they can be checked
//! against the host's capability contracts without executing them.

pub mod contract;

use crate::errors::{BadkitError, Result};
use crate::types::addon::ResolvedClass;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use contract::{Contract, OperatorContract, PanelContract, PropertyGroupContract, conform};

/// A top-level class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub bases: Vec<String>,
    /// Class-level assignments, including annotated ones.
    pub attributes: BTreeMap<String, AttrValue>,
    /// Annotated property fields (`name: SomethingProperty(...)`) in order.
    pub fields: Vec<String>,
    pub line: usize,
}

impl ClassDecl {
    fn new(name: &str, bases: Option<&str>, line: usize) -> Self {
        let bases = bases
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty() && !b.contains('='))
            .map(str::to_string)
            .collect();
        ClassDecl {
            name: name.to_string(),
            bases,
            attributes: BTreeMap::new(),
            fields: Vec::new(),
            line,
        }
    }

    /// True if one of the bases names `base`. Dotted bases match on their
    /// last segment, so `wrappers.BADKitOperator` extends `BADKitOperator`.
    pub fn extends(&self, base: &str) -> bool {
        self.bases
            .iter()
            .any(|b| b.rsplit('.').next().map(str::trim) == Some(base))
    }

    pub fn attribute_value(&self, name: &str) -> Option<&AttrValue> {
        self.attributes
            .get(name)
            .filter(|v| !matches!(v, AttrValue::Expr(expr) if expr == "None"))
    }

    /// The attribute as written, with string literals unquoted.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attribute_value(name).map(AttrValue::as_str)
    }

    /// The attribute only when it is a plain string literal.
    pub fn string_attribute(&self, name: &str) -> Option<&str> {
        match self.attribute_value(name) {
            Some(AttrValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Right-hand side of a class-level assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// A single quoted string literal, unquoted.
    Str(String),
    /// Any other expression, as written, without a trailing comment.
    Expr(String),
}

impl AttrValue {
    pub fn parse(raw: &str) -> Self {
        let raw = strip_comment(raw).trim();
        match string_literal(raw) {
            Some(value) => AttrValue::Str(value),
            None => AttrValue::Expr(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AttrValue::Str(value) | AttrValue::Expr(value) => value.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceModule {
    pub path: PathBuf,
    pub classes: Vec<ClassDecl>,
}

fn class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^class\s+(\w+)\s*(?:\(([^)]*)\))?\s*:").expect("class regex"))
}

fn annotation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s+(\w+)\s*:\s*([\w.]+)").expect("annotation regex"))
}

fn annotated_assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s+(\w+)\s*:\s*([\w.\[\], ]+?)\s*=\s*(.+?)\s*$").expect("annotated assignment regex")
    })
}

fn assignment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s+(\w+)\s*=\s*(.+?)\s*$").expect("assignment regex"))
}

/// Reads and scans a source file. A missing file is a not-found error.
pub fn scan_source(path: &Path) -> Result<SourceModule> {
    if !path.is_file() {
        return Err(BadkitError::not_found("source module", path));
    }
    let text = fs::read_to_string(path)?;
    Ok(parse_source(path, &text))
}

pub fn parse_source(path: &Path, text: &str) -> SourceModule {
    let mut classes: Vec<ClassDecl> = Vec::new();
    let mut current: Option<(ClassDecl, Option<usize>)> = None;
    let mut in_docstring = false;

    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        let quotes = raw.matches("\"\"\"").count() + raw.matches("'''").count();
        if in_docstring {
            if quotes % 2 == 1 {
                in_docstring = false;
            }
            continue;
        }
        if quotes % 2 == 1 {
            in_docstring = true;
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with('#') || (quotes > 0 && is_string_line(trimmed)) {
            continue;
        }

        let indent = raw.len() - raw.trim_start().len();
        if indent == 0 {
            if let Some((decl, _)) = current.take() {
                classes.push(decl);
            }
            if let Some(caps) = class_re().captures(raw) {
                let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
                let bases = caps.get(2).map(|m| m.as_str());
                current = Some((ClassDecl::new(name, bases, idx + 1), None));
            }
            continue;
        }

        if let Some((decl, body_indent)) = current.as_mut() {
            if indent != *body_indent.get_or_insert(indent) {
                continue;
            }
            if let Some(caps) = annotated_assignment_re().captures(raw) {
                decl.attributes
                    .insert(caps[1].to_string(), AttrValue::parse(&caps[3]));
            } else if let Some(caps) = annotation_re().captures(raw) {
                if caps[2].ends_with("Property") {
                    decl.fields.push(caps[1].to_string());
                }
            } else if let Some(caps) = assignment_re().captures(raw) {
                decl.attributes
                    .insert(caps[1].to_string(), AttrValue::parse(&caps[2]));
            }
        }
    }

    if let Some((decl, _)) = current.take() {
        classes.push(decl);
    }

    SourceModule {
        path: path.to_path_buf(),
        classes,
    }
}

fn is_string_line(trimmed: &str) -> bool {
    trimmed.starts_with("\"\"\"") || trimmed.starts_with("'''")
}

/// Cuts a `# comment` that sits outside any string literal.
fn strip_comment(raw: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in raw.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '#' => return &raw[..i],
            None => {}
        }
    }
    raw
}

/// `"text"` or `'text'` with no other tokens around or inside it.
fn string_literal(raw: &str) -> Option<String> {
    let q = raw.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    if raw.len() < 2 || !raw.ends_with(q) {
        return None;
    }
    let body = &raw[1..raw.len() - 1];
    let mut escaped = false;
    for c in body.chars() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == q {
            return None;
        }
    }
    (!escaped).then(|| body.to_string())
}

/// `<src>/<unit>/<module>.py`
pub fn module_path(src_root: &Path, unit: &str, module: &str) -> PathBuf {
    src_root.join(unit).join(format!("{}.py", module))
}

/// Locates `<src>/<unit>/<module>.py`, scans it and returns the class that
/// satisfies contract `C`.
pub fn resolve_class<C: Contract>(
    src_root: &Path,
    unit: &str,
    module: &str,
) -> Result<ResolvedClass> {
    let path = module_path(src_root, unit, module);
    let scanned = scan_source(&path)?;
    let decl = conform::<C>(&scanned, &format!("{}.{}", unit, module))?;

    Ok(ResolvedClass {
        kind: C::KIND,
        class_name: decl.name.clone(),
        module: format!("{}.{}", unit, module),
        archive_path: format!("{}/{}.py", unit, module),
        source_path: path,
        bl_idname: decl.string_attribute("bl_idname").unwrap_or_default().to_string(),
        bl_label: decl.string_attribute("bl_label").map(str::to_string),
        menu_target: decl
            .attribute("menu_target")
            .and_then(|t| t.rsplit('.').next())
            .map(str::to_string),
        fields: decl.fields.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROPERTIES: &str = r#"
from bpy.props import BoolProperty, EnumProperty

from .. import BADKitPropertyGroup


class MMProperties(BADKitPropertyGroup):
    """
    A class holding the properties: used by the Material Marshall operator.
    """

    bl_label = "Material Marshall Properties"
    bl_idname = 'material_marshall_properties'

    target_structure: EnumProperty(
        name="Target Material Structure",
        items=TARGET_STRUCTURE_ITEMS,
    )
    tex_size: EnumProperty(name="Texture Size")
    overwrite: BoolProperty(name="Overwrite", default=True)

    @classmethod
    def get_props(cls) -> tuple[str]:
        answer: int = 42
        return super().get_props(__file__)
"#;

    #[test]
    fn scans_class_attributes_and_fields() {
        let module = parse_source(Path::new("properties.py"), PROPERTIES);
        assert_eq!(module.classes.len(), 1);
        let decl = &module.classes[0];
        assert_eq!(decl.name, "MMProperties");
        assert_eq!(decl.bases, vec!["BADKitPropertyGroup"]);
        assert_eq!(decl.attribute("bl_idname"), Some("material_marshall_properties"));
        assert_eq!(decl.attribute("bl_label"), Some("Material Marshall Properties"));
        assert_eq!(decl.fields, vec!["target_structure", "tex_size", "overwrite"]);
    }

    #[test]
    fn dotted_bases_match_on_last_segment() {
        let src = "class Op(wrappers.BADKitOperator, Mixin):\n    bl_idname = \"object.op\"\n";
        let module = parse_source(Path::new("operator.py"), src);
        let decl = &module.classes[0];
        assert!(decl.extends("BADKitOperator"));
        assert!(decl.extends("Mixin"));
        assert!(!decl.extends("BADKitPanel"));
    }

    #[test]
    fn nested_and_later_classes_are_separate() {
        let src = "class A(Base):\n    x = 1\n\n    def f(self):\n        y = 2\n\nclass B:\n    z = 'q'\n";
        let module = parse_source(Path::new("m.py"), src);
        assert_eq!(module.classes.len(), 2);
        assert_eq!(module.classes[0].attribute("x"), Some("1"));
        assert_eq!(module.classes[0].attribute("y"), None);
        assert!(module.classes[1].bases.is_empty());
        assert_eq!(module.classes[1].attribute("z"), Some("q"));
    }

    #[test]
    fn none_literal_reads_as_absent() {
        let src = "class A(Base):\n    menu_target = None\n";
        let module = parse_source(Path::new("m.py"), src);
        assert_eq!(module.classes[0].attribute("menu_target"), None);
    }

    #[test]
    fn trailing_comments_are_not_part_of_the_value() {
        let src = "class Op(BADKitOperator):\n    bl_idname = \"object.op\"  # host id\n    bl_label = 'Run # now'\n    limit = 4 # max\n";
        let decl = &parse_source(Path::new("operator.py"), src).classes[0];
        assert_eq!(decl.string_attribute("bl_idname"), Some("object.op"));
        assert_eq!(decl.string_attribute("bl_label"), Some("Run # now"));
        assert_eq!(decl.attribute_value("limit"), Some(&AttrValue::Expr("4".to_string())));
    }

    #[test]
    fn expressions_are_not_string_literals() {
        let src = "class P(BADKitPropertyGroup):\n    bl_idname = PREFIX + \"_props\"\n    bl_label = \"a\" + \"b\"\n";
        let decl = &parse_source(Path::new("properties.py"), src).classes[0];
        assert_eq!(decl.string_attribute("bl_idname"), None);
        assert_eq!(decl.string_attribute("bl_label"), None);
        assert_eq!(decl.attribute("bl_idname"), Some("PREFIX + \"_props\""));
    }

    #[test]
    fn annotated_assignments_are_attributes() {
        let src = "class Op(BADKitOperator):\n    bl_idname: str = \"object.op\"\n    bl_label: str = \"Op\"\n    size: IntProperty(name=\"Size\", default=2)\n";
        let decl = &parse_source(Path::new("operator.py"), src).classes[0];
        assert_eq!(decl.string_attribute("bl_idname"), Some("object.op"));
        assert_eq!(decl.string_attribute("bl_label"), Some("Op"));
        assert_eq!(decl.fields, vec!["size"]);
        assert_eq!(decl.attribute("size"), None);
    }

    #[test]
    fn leading_byte_order_mark_is_ignored() {
        let src = "\u{feff}class Op(BADKitOperator):\n    bl_idname = \"object.op\"\n";
        let module = parse_source(Path::new("operator.py"), src);
        assert_eq!(module.classes.len(), 1);
        assert_eq!(module.classes[0].name, "Op");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = scan_source(Path::new("/definitely/not/here.py")).unwrap_err();
        assert!(matches!(err, BadkitError::NotFound { .. }));
    }
}
