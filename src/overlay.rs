use crate::core::TreeMode;
use web_sys as web;

const OVERLAY_ID: &str = "ui-overlay";
const MODE_LABEL_ID: &str = "mode-label";
pub const TOGGLE_BUTTON_ID: &str = "mode-toggle";

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().add_1("hidden");
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    document
        .get_element_by_id(OVERLAY_ID)
        .map(|el| {
            el.class_list().contains("hidden")
                || el
                    .get_attribute("style")
                    .map(|s| s.contains("display:none"))
                    .unwrap_or(false)
        })
        .unwrap_or(false)
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Reflect the requested mode in the status label and the toggle button.
pub fn set_mode(document: &web::Document, mode: TreeMode) {
    if let Some(el) = document.get_element_by_id(MODE_LABEL_ID) {
        el.set_text_content(Some(mode.label()));
    }
    if let Some(el) = document.get_element_by_id(TOGGLE_BUTTON_ID) {
        _ = el.set_attribute("data-mode", &mode.label().to_lowercase());
    }
}
