//! [`FormDocument`] over a parsed HTML page.
//!
//! The page is parsed once with `scraper` and flattened into an element table
//! in document order. Control state written by a fill pass is kept in an
//! overlay on top of the parsed attributes, together with the log of emitted
//! events, so callers can inspect exactly what a pass changed.

use std::collections::{BTreeMap, HashMap};

use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::document::{ControlKind, ElementId, FormDocument, FormEvent, SelectOption};
use crate::error::DocumentError;

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    attributes: Vec<(String, String)>,
    parent: Option<usize>,
    previous_sibling: Option<usize>,
    text: String,
    /// Element indices of descendant `<option>`s, select controls only.
    options: Vec<usize>,
}

impl ElementData {
    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

/// An event emitted on an element during a fill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchedEvent {
    pub element: ElementId,
    pub event: FormEvent,
}

/// Current state of one form control after any writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub element: ElementId,
    pub kind: ControlKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    /// Whether a fill pass wrote to this control.
    pub touched: bool,
}

/// HTML page adapter with a write overlay.
#[derive(Debug, Clone)]
pub struct HtmlDocument {
    elements: Vec<ElementData>,
    values: BTreeMap<ElementId, String>,
    checked: BTreeMap<ElementId, bool>,
    selected: BTreeMap<ElementId, usize>,
    events: Vec<DispatchedEvent>,
}

impl HtmlDocument {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self::from_html(&parsed)
    }

    /// Flattens an already parsed page.
    pub fn from_html(html: &Html) -> Self {
        let nodes: Vec<ElementRef<'_>> = html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        let mut index = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            index.insert(node.id(), idx);
        }

        let elements = nodes
            .iter()
            .map(|node| {
                let element = node.value();
                let tag = element.name().to_ascii_lowercase();
                let parent = node
                    .parent()
                    .and_then(ElementRef::wrap)
                    .and_then(|p| index.get(&p.id()).copied());
                let previous_sibling = node
                    .prev_siblings()
                    .find_map(ElementRef::wrap)
                    .and_then(|s| index.get(&s.id()).copied());
                let options = if tag == "select" {
                    node.descendants()
                        .filter_map(ElementRef::wrap)
                        .filter(|d| d.value().name().eq_ignore_ascii_case("option"))
                        .filter_map(|d| index.get(&d.id()).copied())
                        .collect()
                } else {
                    Vec::new()
                };
                ElementData {
                    tag,
                    attributes: element
                        .attrs()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect(),
                    parent,
                    previous_sibling,
                    text: node.text().collect(),
                    options,
                }
            })
            .collect();

        Self {
            elements,
            values: BTreeMap::new(),
            checked: BTreeMap::new(),
            selected: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    fn data(&self, element: ElementId) -> Option<&ElementData> {
        self.elements.get(element.0)
    }

    fn require(&self, element: ElementId) -> Result<&ElementData, DocumentError> {
        self.data(element)
            .ok_or(DocumentError::UnknownElement(element))
    }

    fn option_at(&self, index: usize, option: usize) -> SelectOption {
        let data = &self.elements[option];
        let text = collapse_whitespace(&data.text);
        let value = data
            .attribute("value")
            .map_or_else(|| text.clone(), str::to_string);
        SelectOption {
            index,
            value,
            text,
            disabled: data.has_attribute("disabled"),
        }
    }

    /// Events emitted so far, in order.
    pub fn events(&self) -> &[DispatchedEvent] {
        &self.events
    }

    /// Current value of a text-like control or textarea.
    pub fn value_of(&self, element: ElementId) -> Option<String> {
        if let Some(value) = self.values.get(&element) {
            return Some(value.clone());
        }
        let data = self.data(element)?;
        match data.tag.as_str() {
            "textarea" => Some(data.text.clone()),
            "input" => data.attribute("value").map(str::to_string),
            _ => None,
        }
    }

    /// Current checked state of a checkbox or radio.
    pub fn is_checked(&self, element: ElementId) -> bool {
        match self.checked.get(&element) {
            Some(checked) => *checked,
            None => self
                .data(element)
                .is_some_and(|data| data.has_attribute("checked")),
        }
    }

    /// Currently selected option of a select control.
    ///
    /// Without a write this is the first option carrying `selected`, or the
    /// first non-disabled option, as a browser would show it.
    pub fn selected_option(&self, select: ElementId) -> Option<SelectOption> {
        let options = self.options(select);
        if let Some(index) = self.selected.get(&select) {
            return options.into_iter().find(|option| option.index == *index);
        }
        let data = self.data(select)?;
        let marked = data
            .options
            .iter()
            .position(|&option| self.elements[option].has_attribute("selected"));
        match marked {
            Some(index) => options.into_iter().nth(index),
            None => options.into_iter().find(|option| !option.disabled),
        }
    }

    /// State of every form control in document order.
    pub fn control_states(&self) -> Vec<ControlState> {
        (0..self.elements.len())
            .map(ElementId)
            .filter_map(|element| {
                let kind = ControlKind::of(self, element)?;
                let touched = self.values.contains_key(&element)
                    || self.checked.contains_key(&element)
                    || self.selected.contains_key(&element);
                let (value, checked) = match kind {
                    ControlKind::Select => (
                        self.selected_option(element)
                            .map(|option| option.text),
                        None,
                    ),
                    ControlKind::Checkbox | ControlKind::Radio => {
                        (None, Some(self.is_checked(element)))
                    }
                    ControlKind::Text | ControlKind::TextArea => (self.value_of(element), None),
                };
                Some(ControlState {
                    element,
                    kind,
                    name: self.attribute(element, "name").map(str::to_string),
                    id: self.attribute(element, "id").map(str::to_string),
                    value,
                    checked,
                    touched,
                })
            })
            .collect()
    }
}

impl FormDocument for HtmlDocument {
    fn elements(&self) -> Vec<ElementId> {
        (0..self.elements.len()).map(ElementId).collect()
    }

    fn tag_name(&self, element: ElementId) -> Option<&str> {
        self.data(element).map(|data| data.tag.as_str())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.data(element)?.attribute(name)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.data(element)?.parent.map(ElementId)
    }

    fn previous_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        self.data(element)?.previous_sibling.map(ElementId)
    }

    fn text_content(&self, element: ElementId) -> String {
        self.data(element)
            .map(|data| data.text.clone())
            .unwrap_or_default()
    }

    fn options(&self, select: ElementId) -> Vec<SelectOption> {
        let Some(data) = self.data(select) else {
            return Vec::new();
        };
        data.options
            .iter()
            .enumerate()
            .map(|(index, &option)| self.option_at(index, option))
            .collect()
    }

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DocumentError> {
        let data = self.require(element)?;
        if !matches!(data.tag.as_str(), "input" | "textarea") {
            return Err(DocumentError::Unsupported {
                element,
                tag: data.tag.clone(),
                operation: "value",
            });
        }
        self.values.insert(element, value.to_string());
        Ok(())
    }

    fn set_checked(&mut self, element: ElementId, checked: bool) -> Result<(), DocumentError> {
        let data = self.require(element)?;
        if data.tag != "input" {
            return Err(DocumentError::Unsupported {
                element,
                tag: data.tag.clone(),
                operation: "checked",
            });
        }
        self.checked.insert(element, checked);
        Ok(())
    }

    fn select_option(&mut self, select: ElementId, index: usize) -> Result<(), DocumentError> {
        let data = self.require(select)?;
        if data.tag != "select" {
            return Err(DocumentError::Unsupported {
                element: select,
                tag: data.tag.clone(),
                operation: "option selection",
            });
        }
        if index >= data.options.len() {
            return Err(DocumentError::OptionOutOfRange {
                element: select,
                index,
            });
        }
        self.selected.insert(select, index);
        Ok(())
    }

    fn dispatch(&mut self, element: ElementId, event: FormEvent) -> Result<(), DocumentError> {
        self.require(element)?;
        self.events.push(DispatchedEvent { element, event });
        Ok(())
    }
}

/// Option text as browsers report it: ASCII whitespace stripped and collapsed.
fn collapse_whitespace(raw: &str) -> String {
    raw.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
