//! Candidate discovery: the fillable controls of a document and their match signatures.

use applica_model::FieldKey;
use serde::Serialize;

use crate::document::{ControlKind, ElementId, FormDocument};
use crate::label::label_text_for;
use crate::utils::normalize_optional;

/// Input types that never receive profile data.
const EXCLUDED_INPUT_TYPES: [&str; 3] = ["hidden", "submit", "button"];

/// Read-only view of one fillable control, captured at the start of a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub element: ElementId,
    pub kind: ControlKind,
    pub name: Option<String>,
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    /// Lowercased `type` attribute, empty when absent.
    pub input_type: String,
    pub label_text: String,
    /// Normalized name, id, placeholder, aria-label, and label text, concatenated.
    pub signature: String,
}

impl Candidate {
    /// Captures a control's identifying attributes and label text.
    pub fn capture<D: FormDocument + ?Sized>(
        document: &D,
        element: ElementId,
        kind: ControlKind,
    ) -> Self {
        let attribute = |name: &str| document.attribute(element, name).map(str::to_string);
        let name = attribute("name");
        let id = attribute("id");
        let placeholder = attribute("placeholder");
        let aria_label = attribute("aria-label");
        let input_type = document
            .attribute(element, "type")
            .unwrap_or_default()
            .to_ascii_lowercase();
        let label_text = label_text_for(document, element);

        let mut signature = String::new();
        for part in [&name, &id, &placeholder, &aria_label] {
            signature.push_str(&normalize_optional(part.as_deref()));
        }
        signature.push_str(&normalize_optional(Some(&label_text)));

        Self {
            element,
            kind,
            name,
            id,
            placeholder,
            aria_label,
            input_type,
            label_text,
            signature,
        }
    }

    /// `<input type=email>` always answers the email field.
    pub fn is_email_input_for(&self, field: FieldKey) -> bool {
        field == FieldKey::Email && self.input_type == "email"
    }

    /// True when any normalized alias occurs in the signature, or the email shortcut applies.
    pub fn matches(&self, field: FieldKey, aliases: &[String]) -> bool {
        if self.is_email_input_for(field) {
            return true;
        }
        aliases
            .iter()
            .any(|alias| self.signature.contains(alias.as_str()))
    }
}

/// Every `input` except hidden/submit/button types, plus every `select` and
/// `textarea`, in document order.
///
/// Order matters: among unused candidates the first in document order wins.
pub fn discover_candidates<D: FormDocument + ?Sized>(document: &D) -> Vec<Candidate> {
    document
        .elements()
        .into_iter()
        .filter(|&element| is_fillable(document, element))
        .filter_map(|element| {
            let kind = ControlKind::of(document, element)?;
            Some(Candidate::capture(document, element, kind))
        })
        .collect()
}

fn is_fillable<D: FormDocument + ?Sized>(document: &D, element: ElementId) -> bool {
    match document.tag_name(element) {
        Some("select" | "textarea") => true,
        Some("input") => {
            let input_type = document.attribute(element, "type").unwrap_or_default();
            !EXCLUDED_INPUT_TYPES
                .iter()
                .any(|excluded| input_type.eq_ignore_ascii_case(excluded))
        }
        _ => false,
    }
}
