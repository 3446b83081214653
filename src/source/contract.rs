use crate::errors::{BadkitError, Result};
use crate::source::{ClassDecl, SourceModule};
use crate::types::class::ClassKind;

/// A host capability a source unit must provide.
///
/// Implementors name the wrapper base class the host side defines, the
/// conventional module file, and the class attributes the host reads at
/// registration time.
pub trait Contract {
    const KIND: ClassKind;
    const BASE: &'static str;
    const MODULE: &'static str;
    const REQUIRED_ATTRIBUTES: &'static [&'static str];
}

pub struct OperatorContract;

impl Contract for OperatorContract {
    const KIND: ClassKind = ClassKind::Operator;
    const BASE: &'static str = "BADKitOperator";
    const MODULE: &'static str = "operator";
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &["bl_idname", "bl_label"];
}

pub struct PropertyGroupContract;

impl Contract for PropertyGroupContract {
    const KIND: ClassKind = ClassKind::PropertyGroup;
    const BASE: &'static str = "BADKitPropertyGroup";
    const MODULE: &'static str = "properties";
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &["bl_idname"];
}

pub struct PanelContract;

impl Contract for PanelContract {
    const KIND: ClassKind = ClassKind::Panel;
    const BASE: &'static str = "BADKitPanel";
    const MODULE: &'static str = "panel";
    const REQUIRED_ATTRIBUTES: &'static [&'static str] = &["bl_idname", "bl_label"];
}

/// Returns the single class in `module` that satisfies contract `C`.
///
/// ### Parameters
/// - `module`: the scanned source unit.
/// - `module_name`: dotted name used in error messages (`unit.operator`).
pub fn conform<'m, C: Contract>(module: &'m SourceModule, module_name: &str) -> Result<&'m ClassDecl> {
    let fail = |reason: String| {
        BadkitError::conformance(C::KIND.as_str(), module_name, &module.path, reason)
    };

    let candidates: Vec<&ClassDecl> = module
        .classes
        .iter()
        .filter(|decl| decl.extends(C::BASE))
        .collect();

    let decl = match candidates.as_slice() {
        [] => return Err(fail(format!("no class extends {}", C::BASE))),
        [one] => *one,
        many => {
            let names: Vec<&str> = many.iter().map(|d| d.name.as_str()).collect();
            return Err(fail(format!(
                "expected one class extending {}, found {}: {}",
                C::BASE,
                many.len(),
                names.join(", ")
            )));
        }
    };

    let missing: Vec<&str> = C::REQUIRED_ATTRIBUTES
        .iter()
        .copied()
        .filter(|attr| decl.attribute(attr).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(fail(format!(
            "class {} (line {}) does not define {}",
            decl.name,
            decl.line,
            missing.join(", ")
        )));
    }

    let non_literal: Vec<&str> = C::REQUIRED_ATTRIBUTES
        .iter()
        .copied()
        .filter(|attr| decl.string_attribute(attr).is_none())
        .collect();
    if !non_literal.is_empty() {
        return Err(fail(format!(
            "class {} (line {}) must set {} to a string literal",
            decl.name,
            decl.line,
            non_literal.join(", ")
        )));
    }

    Ok(decl)
}
