//! Fill engine implementation.

use std::collections::BTreeSet;

use applica_model::{FieldKey, FieldValue, FillOutcome, FormDataError, ProfileRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::candidates::{Candidate, discover_candidates};
use crate::document::{ControlKind, ElementId, FormDocument, FormEvent, describe_element};
use crate::enrich::enrich;
use crate::error::DocumentError;
use crate::options::find_matching_option;
use crate::patterns::matchers_for;

/// Options for a fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOptions {
    /// Derive `first_name`/`last_name` from `full_name` before matching.
    pub enrich_names: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self { enrich_names: true }
    }
}

/// Resolution state of one profile field during a pass.
///
/// `Unmatched → Scanning → Matched | Exhausted`. While scanning, the first
/// unused candidate in document order that matches wins; a candidate whose
/// write fails is passed over and scanning resumes after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unmatched,
    Scanning { position: usize },
    Matched { position: usize, filled: bool },
    Exhausted,
}

/// Why a profile entry was not considered for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NullValue,
    UnknownField,
}

/// Final state of one profile entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    /// Claimed a control. `filled` is false when a select had no matching option.
    Matched {
        element: ElementId,
        kind: ControlKind,
        filled: bool,
    },
    /// No unused candidate matched.
    Exhausted,
    Skipped { reason: SkipReason },
}

/// Per-entry result of a fill pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldResolution {
    pub key: String,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Everything a fill pass did, in profile order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FillReport {
    pub fields: Vec<FieldResolution>,
    /// Controls that received a value.
    pub filled: usize,
    /// Non-null entries of the enriched profile.
    pub total: usize,
}

impl FillReport {
    pub fn outcome(&self) -> FillOutcome {
        FillOutcome::completed(self.filled, self.total)
    }

    /// `(key, element)` pairs for every entry that claimed a control.
    pub fn assignments(&self) -> Vec<(&str, ElementId)> {
        self.fields
            .iter()
            .filter_map(|field| match field.resolution {
                Resolution::Matched { element, .. } => Some((field.key.as_str(), element)),
                _ => None,
            })
            .collect()
    }

    /// The control claimed by a key, if any.
    pub fn element_for(&self, key: &str) -> Option<ElementId> {
        self.assignments()
            .into_iter()
            .find(|(assigned, _)| *assigned == key)
            .map(|(_, element)| element)
    }
}

/// Engine for filling third-party forms from a profile record.
///
/// Matching is greedy and order-sensitive: profile entries are processed in
/// the record's own key order, each claims at most one control, and each
/// control is claimed at most once per pass. There is no backtracking, so an
/// entry can take a control a later entry would have matched better.
///
/// # Example
///
/// ```ignore
/// use applica_fill::{FillEngine, HtmlDocument};
///
/// let mut page = HtmlDocument::parse(html);
/// let report = FillEngine::default().fill(&mut page, &profile);
/// println!("{} of {} fields filled", report.filled, report.total);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FillEngine {
    options: FillOptions,
}

impl FillEngine {
    pub fn new(options: FillOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> FillOptions {
        self.options
    }

    /// Runs one fill pass over the document.
    pub fn fill<D: FormDocument + ?Sized>(
        &self,
        document: &mut D,
        profile: &ProfileRecord,
    ) -> FillReport {
        let profile = if self.options.enrich_names {
            enrich(profile)
        } else {
            profile.clone()
        };
        let candidates = discover_candidates(&*document);
        let span = info_span!(
            "fill_pass",
            candidates = candidates.len(),
            fields = profile.len()
        );
        let _guard = span.enter();

        let mut used: BTreeSet<ElementId> = BTreeSet::new();
        let mut fields = Vec::with_capacity(profile.len());
        let mut filled = 0usize;

        for entry in profile.entries() {
            if entry.value.is_null() {
                fields.push(FieldResolution {
                    key: entry.key.clone(),
                    resolution: Resolution::Skipped {
                        reason: SkipReason::NullValue,
                    },
                });
                continue;
            }
            let Some((field, aliases)) = matchers_for(&entry.key) else {
                debug!(key = entry.key.as_str(), "no matcher entry, skipping");
                fields.push(FieldResolution {
                    key: entry.key.clone(),
                    resolution: Resolution::Skipped {
                        reason: SkipReason::UnknownField,
                    },
                });
                continue;
            };

            let state = resolve_field(
                document,
                &candidates,
                &mut used,
                field,
                aliases,
                &entry.value,
            );
            let resolution = match state {
                FieldState::Matched { position, filled: was_filled } => {
                    let candidate = &candidates[position];
                    if was_filled {
                        filled += 1;
                    }
                    debug!(
                        key = entry.key.as_str(),
                        element = %describe_element(&*document, candidate.element),
                        kind = candidate.kind.as_str(),
                        filled = was_filled,
                        "field matched"
                    );
                    Resolution::Matched {
                        element: candidate.element,
                        kind: candidate.kind,
                        filled: was_filled,
                    }
                }
                _ => {
                    debug!(key = entry.key.as_str(), "no candidate for field");
                    Resolution::Exhausted
                }
            };
            fields.push(FieldResolution {
                key: entry.key.clone(),
                resolution,
            });
        }

        let total = profile.non_null_count();
        info!(filled, total, "fill pass complete");
        FillReport {
            fields,
            filled,
            total,
        }
    }

    /// Validates a raw `form_data` payload and fills the document.
    pub fn try_fill_form_data<D: FormDocument + ?Sized>(
        &self,
        document: &mut D,
        form_data: &Value,
    ) -> Result<FillReport, FormDataError> {
        let profile = ProfileRecord::from_json(form_data)?;
        Ok(self.fill(document, &profile))
    }

    /// Like [`Self::try_fill_form_data`], reduced to the outcome the UI shell displays.
    pub fn fill_form_data<D: FormDocument + ?Sized>(
        &self,
        document: &mut D,
        form_data: &Value,
    ) -> FillOutcome {
        match self.try_fill_form_data(document, form_data) {
            Ok(report) => report.outcome(),
            Err(error) => {
                warn!(%error, "rejected form_data");
                FillOutcome::failed(error.to_string())
            }
        }
    }
}

/// Fills with default options and returns `{filled, total}` or `{error}`.
pub fn fill_form_data<D: FormDocument + ?Sized>(document: &mut D, form_data: &Value) -> FillOutcome {
    FillEngine::default().fill_form_data(document, form_data)
}

/// Candidates of a document without filling anything.
pub fn inspect_candidates<D: FormDocument + ?Sized>(document: &D) -> Vec<Candidate> {
    discover_candidates(document)
}

fn resolve_field<D: FormDocument + ?Sized>(
    document: &mut D,
    candidates: &[Candidate],
    used: &mut BTreeSet<ElementId>,
    field: FieldKey,
    aliases: &[String],
    value: &FieldValue,
) -> FieldState {
    let fill_text = value.fill_text();
    let mut state = FieldState::Unmatched;
    loop {
        state = match state {
            FieldState::Unmatched => FieldState::Scanning { position: 0 },
            FieldState::Scanning { position } => {
                let next = candidates
                    .iter()
                    .enumerate()
                    .skip(position)
                    .find(|(_, candidate)| {
                        !used.contains(&candidate.element) && candidate.matches(field, aliases)
                    })
                    .map(|(idx, _)| idx);
                let Some(found) = next else {
                    break FieldState::Exhausted;
                };
                let candidate = &candidates[found];
                match apply_value(document, candidate, field, value, &fill_text) {
                    Ok(filled) => {
                        used.insert(candidate.element);
                        FieldState::Matched {
                            position: found,
                            filled,
                        }
                    }
                    Err(error) => {
                        warn!(
                            field = field.as_str(),
                            element = %describe_element(&*document, candidate.element),
                            %error,
                            "could not fill element, trying next candidate"
                        );
                        FieldState::Scanning {
                            position: found + 1,
                        }
                    }
                }
            }
            done @ (FieldState::Matched { .. } | FieldState::Exhausted) => break done,
        };
    }
}

/// Writes the value into one control. Returns whether it counts as filled.
fn apply_value<D: FormDocument + ?Sized>(
    document: &mut D,
    candidate: &Candidate,
    field: FieldKey,
    value: &FieldValue,
    fill_text: &str,
) -> Result<bool, DocumentError> {
    let element = candidate.element;
    match candidate.kind {
        ControlKind::Select => {
            let options = document.options(element);
            let Some(option) = find_matching_option(&options, field, value, fill_text) else {
                return Ok(false);
            };
            document.select_option(element, option.index)?;
            document.dispatch(element, FormEvent::Change)?;
            Ok(true)
        }
        ControlKind::Checkbox | ControlKind::Radio => {
            document.set_checked(element, value.is_truthy())?;
            Ok(true)
        }
        ControlKind::Text | ControlKind::TextArea => {
            document.set_value(element, fill_text)?;
            document.dispatch(element, FormEvent::Input)?;
            Ok(true)
        }
    }
}
