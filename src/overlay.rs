use web_sys as web;
use zonefx_core::ZoneDebugEntry;

const OVERLAY_ID: &str = "zone-debug";

pub fn document() -> Option<web::Document> {
    web::window()?.document()
}

/// Toggle the `hidden` class; the inline style covers pages without that rule.
pub fn set_visible(document: &web::Document, visible: bool) {
    let Some(el) = document.get_element_by_id(OVERLAY_ID) else {
        return;
    };
    _ = el.class_list().toggle_with_force("hidden", !visible);
    let style = if visible { "" } else { "display:none" };
    _ = el.set_attribute("style", style);
}

/// One line per zone: `[x] id (shape)` with `x` marking active zones.
pub fn format_entries(entries: &[ZoneDebugEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            format!(
                "[{}] {} ({})",
                if e.active { "x" } else { " " },
                e.id,
                e.shape
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn update(document: &web::Document, entries: &[ZoneDebugEntry]) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        el.set_text_content(Some(&format_entries(entries)));
    }
}
