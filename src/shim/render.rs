use crate::shim::MenuEntry;
use crate::types::class::PanelSpec;

/// The subset of the host's UI layout the renderers draw into.
pub trait Layout {
    /// A property row for `field` of the group stored at `props_idname`.
    fn prop(&mut self, props_idname: &str, field: &str);
    /// A button invoking `operator_idname`.
    fn operator(&mut self, operator_idname: &str, text: Option<&str>);
}

/// Draws any data-driven panel: one row per field, then the action button.
pub fn draw_panel(layout: &mut dyn Layout, panel: &PanelSpec) {
    for field in &panel.fields {
        layout.prop(&panel.props_idname, field);
    }
    layout.operator(&panel.operator_idname, None);
}

pub fn draw_menu_entry(layout: &mut dyn Layout, entry: &MenuEntry) {
    layout.operator(&entry.operator_idname, entry.text.as_deref());
}
