//! Heuristic form-field matching and autofill.
//!
//! Maps a generic profile record (name, contact details, address, demographic
//! answers) onto an arbitrary third-party HTML form by fuzzy-matching control
//! names, ids, placeholders, ARIA labels, and associated label text.
//!
//! The engine talks to the page only through [`FormDocument`]; [`HtmlDocument`]
//! implements it over parsed HTML.

#![deny(unsafe_code)]

mod candidates;
mod document;
mod engine;
mod enrich;
mod error;
mod html;
mod label;
mod options;
mod patterns;
mod utils;

pub use candidates::{Candidate, discover_candidates};
pub use document::{
    ControlKind, ElementId, FormDocument, FormEvent, SelectOption, describe_element,
};
pub use engine::{
    FieldResolution, FillEngine, FillOptions, FillReport, Resolution, SkipReason, fill_form_data,
    inspect_candidates,
};
pub use enrich::{enrich, split_full_name};
pub use error::DocumentError;
pub use html::{ControlState, DispatchedEvent, HtmlDocument};
pub use label::label_text_for;
pub use options::{FALSE_TOKENS, TRUE_TOKENS, find_matching_option};
pub use patterns::{FIELD_MATCHERS, aliases, matchers_for};
pub use utils::{normalize_for_match, normalize_optional};
