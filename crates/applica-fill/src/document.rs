//! Document adapter seam between the fill engine and a host page.
//!
//! The engine never touches a concrete DOM. It reads the element tree and
//! writes control state through [`FormDocument`], which keeps it independent
//! of any UI runtime and lets tests drive it with parsed HTML.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// Stable handle for one element of a document, valid for the document's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Notifications emitted after a control's state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEvent {
    Input,
    Change,
}

/// How a candidate control receives a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKind {
    /// `input` of any text-like type (text, email, tel, url, number, ...).
    Text,
    TextArea,
    Select,
    Checkbox,
    Radio,
}

impl ControlKind {
    /// Classifies an element; `None` for anything that is not a form control.
    pub fn of<D: FormDocument + ?Sized>(document: &D, element: ElementId) -> Option<Self> {
        match document.tag_name(element)? {
            "select" => Some(ControlKind::Select),
            "textarea" => Some(ControlKind::TextArea),
            "input" => {
                let input_type = document
                    .attribute(element, "type")
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                Some(match input_type.as_str() {
                    "checkbox" => ControlKind::Checkbox,
                    "radio" => ControlKind::Radio,
                    _ => ControlKind::Text,
                })
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::TextArea => "textarea",
            ControlKind::Select => "select",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Radio => "radio",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<option>` of a select control, in definition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Position among all options of the select, disabled ones included.
    pub index: usize,
    pub value: String,
    pub text: String,
    pub disabled: bool,
}

impl SelectOption {
    /// The option's value, or its visible text when the value is empty.
    pub fn match_text(&self) -> &str {
        if self.value.is_empty() {
            &self.text
        } else {
            &self.value
        }
    }
}

/// Read and write access to a page's element tree.
///
/// Tag names are lowercase. Reads are infallible: a missing element simply
/// has no attributes, parent, or text. Writes report failures so the engine
/// can skip the offending element and carry on.
pub trait FormDocument {
    /// All elements in document order.
    fn elements(&self) -> Vec<ElementId>;

    fn tag_name(&self, element: ElementId) -> Option<&str>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str>;

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn previous_element_sibling(&self, element: ElementId) -> Option<ElementId>;

    /// Concatenated text of all descendant text nodes, untrimmed.
    fn text_content(&self, element: ElementId) -> String;

    /// Options of a select control; empty for anything else.
    fn options(&self, select: ElementId) -> Vec<SelectOption>;

    /// First `<label>` in document order whose `for` attribute equals `id`.
    fn label_for(&self, id: &str) -> Option<ElementId> {
        self.elements().into_iter().find(|&element| {
            self.tag_name(element) == Some("label") && self.attribute(element, "for") == Some(id)
        })
    }

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DocumentError>;

    fn set_checked(&mut self, element: ElementId, checked: bool) -> Result<(), DocumentError>;

    fn select_option(&mut self, select: ElementId, index: usize) -> Result<(), DocumentError>;

    fn dispatch(&mut self, element: ElementId, event: FormEvent) -> Result<(), DocumentError>;
}

/// Short CSS-like description of an element for log output, e.g. `input#email[name=email]`.
pub fn describe_element<D: FormDocument + ?Sized>(document: &D, element: ElementId) -> String {
    let mut out = document.tag_name(element).unwrap_or("?").to_string();
    if let Some(id) = document.attribute(element, "id").filter(|id| !id.is_empty()) {
        out.push('#');
        out.push_str(id);
    }
    if let Some(name) = document.attribute(element, "name").filter(|name| !name.is_empty()) {
        out.push_str("[name=");
        out.push_str(name);
        out.push(']');
    }
    out
}
