//! Label text associated with a form control.

use crate::document::{ElementId, FormDocument};

/// Collects label text for a control, space-joined, in this order:
///
/// 1. the `<label for=…>` pointing at the element's id,
/// 2. a wrapping parent `<label>`,
/// 3. a `<label>` immediately before the element,
/// 4. for each ancestor up to the top of the document, a `<label>`
///    immediately before that ancestor (table-row and form-group layouts).
///
/// Duplicates are kept. Used when name, id, and placeholder carry no hint.
pub fn label_text_for<D: FormDocument + ?Sized>(document: &D, element: ElementId) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut push_label = |candidate: Option<ElementId>| {
        if let Some(label) = candidate.filter(|&el| is_label(document, el)) {
            let text = document.text_content(label);
            if !text.is_empty() {
                parts.push(text.trim().to_string());
            }
        }
    };

    if let Some(id) = document.attribute(element, "id").filter(|id| !id.is_empty()) {
        push_label(document.label_for(id));
    }
    let parent = document.parent(element);
    push_label(parent);
    push_label(document.previous_element_sibling(element));

    let mut ancestor = parent;
    while let Some(current) = ancestor {
        push_label(document.previous_element_sibling(current));
        ancestor = document.parent(current);
    }

    parts.join(" ")
}

fn is_label<D: FormDocument + ?Sized>(document: &D, element: ElementId) -> bool {
    document.tag_name(element) == Some("label")
}
