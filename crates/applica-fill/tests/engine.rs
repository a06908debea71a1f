use applica_fill::{
    ControlKind, DocumentError, ElementId, FillEngine, FillOptions, FormDocument, FormEvent,
    HtmlDocument, Resolution, SelectOption, SkipReason, fill_form_data,
};
use applica_model::{FieldValue, FillOutcome, ProfileRecord};
use serde_json::json;

const APPLICATION_FORM: &str = r#"
<!DOCTYPE html>
<html>
<body>
<form id="application_form" action="/apply" method="post">
  <input type="hidden" name="authenticity_token" value="abc">
  <div class="row"><label>First Name</label><div class="control"><input type="text" id="question_1"></div></div>
  <div class="row"><label>Last Name</label><div class="control"><input type="text" id="question_2"></div></div>
  <div class="row"><label for="question_3">Email</label><input type="email" id="question_3" name="applicant_email"></div>
  <div class="row"><label for="question_4">Phone number</label><input type="tel" id="question_4"></div>
  <div class="row"><label for="question_5">LinkedIn Profile</label><input type="url" id="question_5"></div>
  <div class="row"><label for="question_6">City</label><input type="text" id="question_6"></div>
  <div class="row">
    <label for="question_7">State</label>
    <select id="question_7">
      <option value="">Select...</option>
      <option value="CA">California</option>
      <option value="NY">New York</option>
    </select>
  </div>
  <div class="row"><label for="question_8">Desired salary</label><input type="text" id="question_8"></div>
  <div class="row">
    <label for="question_9">Will you now or in the future require visa sponsorship?</label>
    <select id="question_9"><option value="">--</option><option>Yes</option><option>No</option></select>
  </div>
  <div class="row">
    <label for="question_10">Gender</label>
    <select id="question_10">
      <option value="">Please select</option>
      <option>Male</option>
      <option>Female</option>
      <option>Decline to self-identify</option>
    </select>
  </div>
  <div class="row">
    <label for="question_11">Veteran status</label>
    <select id="question_11">
      <option value="">Please select</option>
      <option>Yes</option>
      <option>No</option>
      <option>I don't wish to answer</option>
    </select>
  </div>
  <div class="row">
    <label for="question_12">Please describe any accommodations you need</label>
    <textarea id="question_12"></textarea>
  </div>
  <input type="submit" value="Submit Application">
</form>
</body>
</html>
"#;

fn applicant() -> ProfileRecord {
    ProfileRecord::from_json(&json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane@example.com",
        "phone": "555-0100",
        "linkedin_url": "https://linkedin.com/in/jane",
        "city": "Albany",
        "state": "NY",
        "preferred_salary": 120000,
        "requires_sponsorship": false,
        "gender": "Female",
        "is_veteran": true,
        "disabilities": null
    }))
    .unwrap()
}

fn by_attr(doc: &impl FormDocument, attr: &str, value: &str) -> ElementId {
    doc.elements()
        .into_iter()
        .find(|&el| doc.attribute(el, attr) == Some(value))
        .unwrap_or_else(|| panic!("no element with {attr}={value}"))
}

fn touched_summary(doc: &HtmlDocument) -> String {
    doc.control_states()
        .into_iter()
        .filter(|state| state.touched)
        .map(|state| {
            let shown = match (state.value, state.checked) {
                (Some(value), _) => value,
                (None, Some(checked)) => checked.to_string(),
                (None, None) => String::new(),
            };
            format!("{}: {}", state.id.unwrap_or_default(), shown)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn fills_a_typical_application_form() {
    let mut doc = HtmlDocument::parse(APPLICATION_FORM);
    let report = FillEngine::default().fill(&mut doc, &applicant());

    insta::assert_json_snapshot!(report.outcome(), @r#"
    {
      "filled": 11,
      "total": 11
    }
    "#);
    insta::assert_snapshot!(touched_summary(&doc), @r"
    question_1: Jane
    question_2: Doe
    question_3: jane@example.com
    question_4: 555-0100
    question_5: https://linkedin.com/in/jane
    question_6: Albany
    question_7: New York
    question_8: 120000
    question_9: No
    question_10: Female
    question_11: Yes
    ");

    let accommodations = by_attr(&doc, "id", "question_12");
    assert_eq!(doc.value_of(accommodations).as_deref(), Some(""));
    assert_eq!(
        report.fields.last().map(|f| &f.resolution),
        Some(&Resolution::Skipped {
            reason: SkipReason::NullValue
        })
    );
}

#[test]
fn text_inputs_emit_input_and_selects_emit_change() {
    let mut doc = HtmlDocument::parse(
        r#"<input name="city"><select name="gender"><option>Male</option><option>Female</option></select>"#,
    );
    let profile = ProfileRecord::new()
        .with("city", "Albany")
        .with("gender", "female");
    FillEngine::default().fill(&mut doc, &profile);

    let city = by_attr(&doc, "name", "city");
    let gender = by_attr(&doc, "name", "gender");
    let events: Vec<(ElementId, FormEvent)> =
        doc.events().iter().map(|e| (e.element, e.event)).collect();
    assert_eq!(
        events,
        vec![(city, FormEvent::Input), (gender, FormEvent::Change)]
    );
}

#[test]
fn first_matching_input_in_document_order_wins() {
    let mut doc = HtmlDocument::parse(r#"<input name="email"><input name="personal_email">"#);
    let outcome = fill_form_data(&mut doc, &json!({"email": "a@b.com"}));
    assert_eq!(outcome, FillOutcome::completed(1, 1));

    let first = by_attr(&doc, "name", "email");
    let second = by_attr(&doc, "name", "personal_email");
    assert_eq!(doc.value_of(first).as_deref(), Some("a@b.com"));
    assert_eq!(doc.value_of(second), None);
}

#[test]
fn email_type_matches_without_any_hint() {
    let mut doc = HtmlDocument::parse(r#"<input type="text" name="q1"><input type="email" name="q2">"#);
    let report = FillEngine::default().fill(&mut doc, &ProfileRecord::new().with("email", "a@b.com"));
    assert_eq!(report.element_for("email"), Some(by_attr(&doc, "name", "q2")));
}

#[test]
fn veteran_select_picks_yes() {
    let mut doc = HtmlDocument::parse(
        r#"<label for="vet">Are you a protected veteran?</label>
           <select id="vet" name="q_1"><option>Yes</option><option>No</option></select>"#,
    );
    let report = FillEngine::default().fill(&mut doc, &ProfileRecord::new().with("is_veteran", true));
    assert_eq!(report.filled, 1);
    let select = by_attr(&doc, "id", "vet");
    assert_eq!(doc.selected_option(select).unwrap().text, "Yes");
}

#[test]
fn disability_select_prefers_plain_no_over_decline() {
    let mut doc = HtmlDocument::parse(
        r#"<select name="disability_status">
             <option>I don't wish to answer</option><option>Yes</option><option>No</option>
           </select>"#,
    );
    let report =
        FillEngine::default().fill(&mut doc, &ProfileRecord::new().with("is_disabled", false));
    assert_eq!(report.filled, 1);
    let select = by_attr(&doc, "name", "disability_status");
    assert_eq!(doc.selected_option(select).unwrap().text, "No");
}

#[test]
fn claimed_elements_are_never_reused() {
    let mut doc = HtmlDocument::parse(r#"<input name="email_or_phone">"#);
    let profile = ProfileRecord::new()
        .with("email", "a@b.com")
        .with("phone", "555-0100");
    let report = FillEngine::default().fill(&mut doc, &profile);

    assert_eq!(report.outcome(), FillOutcome::completed(1, 2));
    assert_eq!(report.fields[1].resolution, Resolution::Exhausted);
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "email_or_phone")).as_deref(),
        Some("a@b.com")
    );
}

#[test]
fn null_values_consume_nothing_and_are_not_counted() {
    let mut doc = HtmlDocument::parse(r#"<input name="phone"><input name="email">"#);
    let outcome = fill_form_data(&mut doc, &json!({"phone": null, "email": "a@b.com"}));
    assert_eq!(outcome, FillOutcome::completed(1, 1));
    assert_eq!(doc.value_of(by_attr(&doc, "name", "phone")), None);
}

#[test]
fn unknown_keys_count_toward_total_only() {
    let mut doc = HtmlDocument::parse(r#"<input name="favorite_color">"#);
    let report = FillEngine::default().fill(
        &mut doc,
        &ProfileRecord::new().with("favorite_color", "teal"),
    );
    assert_eq!(report.outcome(), FillOutcome::completed(0, 1));
    assert_eq!(
        report.fields[0].resolution,
        Resolution::Skipped {
            reason: SkipReason::UnknownField
        }
    );
}

#[test]
fn caller_key_order_breaks_ties() {
    let page = r#"<input name="first_name"><input name="last_name"><input name="full_name">"#;

    // "name" is a full_name alias, so full_name first grabs the first_name box.
    let mut doc = HtmlDocument::parse(page);
    let report = FillEngine::default().fill(
        &mut doc,
        &ProfileRecord::new().with("full_name", "Jane Mary Doe"),
    );
    assert_eq!(report.element_for("full_name"), Some(by_attr(&doc, "name", "first_name")));
    assert_eq!(report.element_for("first_name"), None);
    assert_eq!(report.element_for("last_name"), Some(by_attr(&doc, "name", "last_name")));
    assert_eq!(report.outcome(), FillOutcome::completed(2, 3));

    let mut doc = HtmlDocument::parse(page);
    let profile = ProfileRecord::new()
        .with("first_name", FieldValue::Null)
        .with("last_name", FieldValue::Null)
        .with("full_name", "Jane Mary Doe");
    let report = FillEngine::default().fill(&mut doc, &profile);
    assert_eq!(report.outcome(), FillOutcome::completed(3, 3));
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "first_name")).as_deref(),
        Some("Jane")
    );
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "last_name")).as_deref(),
        Some("Mary Doe")
    );
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "full_name")).as_deref(),
        Some("Jane Mary Doe")
    );
}

#[test]
fn name_splitting_can_be_disabled() {
    let page = r#"<input id="first"><input id="last">"#;
    let profile = ProfileRecord::new().with("full_name", "Jane Doe");

    let mut doc = HtmlDocument::parse(page);
    let report = FillEngine::default().fill(&mut doc, &profile);
    assert_eq!(report.outcome(), FillOutcome::completed(2, 3));

    let mut doc = HtmlDocument::parse(page);
    let engine = FillEngine::new(FillOptions {
        enrich_names: false,
    });
    let report = engine.fill(&mut doc, &profile);
    assert_eq!(report.outcome(), FillOutcome::completed(0, 1));
    assert!(doc.events().is_empty());
}

#[test]
fn checkboxes_follow_truthiness_without_events() {
    let mut doc = HtmlDocument::parse(
        r#"<label><input type="checkbox" name="c1"> I am willing to relocate</label>
           <label><input type="checkbox" name="c2" checked> Open to travel</label>"#,
    );
    let profile = ProfileRecord::new()
        .with("is_willing_to_relocate", true)
        .with("willing_to_travel", false);
    let report = FillEngine::default().fill(&mut doc, &profile);

    assert_eq!(report.filled, 2);
    assert!(doc.is_checked(by_attr(&doc, "name", "c1")));
    assert!(!doc.is_checked(by_attr(&doc, "name", "c2")));
    assert!(doc.events().is_empty());
    assert!(matches!(
        report.fields[0].resolution,
        Resolution::Matched {
            kind: ControlKind::Checkbox,
            filled: true,
            ..
        }
    ));
}

#[test]
fn radios_are_checked_like_checkboxes() {
    let mut doc = HtmlDocument::parse(
        r#"<p>Open to relocation?</p>
           <label><input type="radio" name="relocation" value="yes"> Yes</label>
           <label><input type="radio" name="relocation" value="no"> No</label>"#,
    );
    let report = FillEngine::default().fill(
        &mut doc,
        &ProfileRecord::new().with("is_willing_to_relocate", true),
    );

    assert_eq!(report.outcome(), FillOutcome::completed(1, 1));
    let radios: Vec<ElementId> = doc
        .elements()
        .into_iter()
        .filter(|&el| doc.attribute(el, "name") == Some("relocation"))
        .collect();
    assert_eq!(
        report.fields[0].resolution,
        Resolution::Matched {
            element: radios[0],
            kind: ControlKind::Radio,
            filled: true
        }
    );
    assert!(doc.is_checked(radios[0]));
    assert!(!doc.is_checked(radios[1]));
    assert!(doc.events().is_empty());
}

#[test]
fn list_values_fill_as_comma_joined_text() {
    let mut doc = HtmlDocument::parse(r#"<input name="email"><textarea name="accommodation"></textarea>"#);
    let outcome = fill_form_data(
        &mut doc,
        &json!({"email": "a@b.com", "disabilities": ["Hearing", "Vision"]}),
    );

    assert_eq!(outcome, FillOutcome::completed(2, 2));
    assert_eq!(doc.value_of(by_attr(&doc, "name", "email")).as_deref(), Some("a@b.com"));
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "accommodation")).as_deref(),
        Some("Hearing,Vision")
    );
}

#[test]
fn tiny_numbers_fill_in_exponent_form() {
    let mut doc = HtmlDocument::parse(r#"<input name="expected_salary">"#);
    fill_form_data(&mut doc, &json!({"preferred_salary": 1.5e-7}));
    assert_eq!(
        doc.value_of(by_attr(&doc, "name", "expected_salary")).as_deref(),
        Some("1.5e-7")
    );
}

#[test]
fn select_without_matching_option_is_consumed_but_not_counted() {
    let mut doc = HtmlDocument::parse(
        r#"<select name="gender"><option>Male</option><option>Female</option></select>
           <input name="gender_identity_other">"#,
    );
    let report = FillEngine::default().fill(&mut doc, &ProfileRecord::new().with("gender", "Nonbinary"));
    assert_eq!(report.outcome(), FillOutcome::completed(0, 1));
    assert_eq!(
        report.fields[0].resolution,
        Resolution::Matched {
            element: by_attr(&doc, "name", "gender"),
            kind: ControlKind::Select,
            filled: false
        }
    );
    assert_eq!(doc.value_of(by_attr(&doc, "name", "gender_identity_other")), None);
    assert!(doc.events().is_empty());
}

#[test]
fn repeated_passes_assign_identically() {
    let mut doc = HtmlDocument::parse(APPLICATION_FORM);
    let engine = FillEngine::default();
    let first = engine.fill(&mut doc, &applicant());
    let events_after_first = doc.events().len();
    let second = engine.fill(&mut doc, &applicant());

    assert_eq!(first, second);
    assert_eq!(doc.events().len(), events_after_first * 2);
}

#[test]
fn invalid_form_data_is_a_single_error() {
    let mut doc = HtmlDocument::parse(r#"<input name="email">"#);
    assert_eq!(
        fill_form_data(&mut doc, &json!(null)),
        FillOutcome::failed("form_data is missing")
    );
    assert_eq!(
        fill_form_data(&mut doc, &json!(["a@b.com"])),
        FillOutcome::failed("form_data must be an object, got array")
    );
    assert!(doc.events().is_empty());
}

/// Wraps a page and rejects value writes to one element.
struct RejectingDocument {
    inner: HtmlDocument,
    reject: ElementId,
}

impl FormDocument for RejectingDocument {
    fn elements(&self) -> Vec<ElementId> {
        self.inner.elements()
    }

    fn tag_name(&self, element: ElementId) -> Option<&str> {
        self.inner.tag_name(element)
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.inner.attribute(element, name)
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.inner.parent(element)
    }

    fn previous_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        self.inner.previous_element_sibling(element)
    }

    fn text_content(&self, element: ElementId) -> String {
        self.inner.text_content(element)
    }

    fn options(&self, select: ElementId) -> Vec<SelectOption> {
        self.inner.options(select)
    }

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DocumentError> {
        if element == self.reject {
            return Err(DocumentError::Rejected {
                element,
                reason: "read-only".to_string(),
            });
        }
        self.inner.set_value(element, value)
    }

    fn set_checked(&mut self, element: ElementId, checked: bool) -> Result<(), DocumentError> {
        self.inner.set_checked(element, checked)
    }

    fn select_option(&mut self, select: ElementId, index: usize) -> Result<(), DocumentError> {
        self.inner.select_option(select, index)
    }

    fn dispatch(&mut self, element: ElementId, event: FormEvent) -> Result<(), DocumentError> {
        self.inner.dispatch(element, event)
    }
}

#[test]
fn failed_writes_skip_the_element_and_continue() {
    let inner = HtmlDocument::parse(
        r#"<input name="email" readonly><input name="work_email"><input name="city">"#,
    );
    let reject = by_attr(&inner, "name", "email");
    let mut doc = RejectingDocument { inner, reject };
    let profile = ProfileRecord::new()
        .with("email", "a@b.com")
        .with("city", "Albany");
    let report = FillEngine::default().fill(&mut doc, &profile);

    assert_eq!(report.outcome(), FillOutcome::completed(2, 2));
    let work_email = by_attr(&doc.inner, "name", "work_email");
    assert_eq!(report.element_for("email"), Some(work_email));
    assert_eq!(doc.inner.value_of(work_email).as_deref(), Some("a@b.com"));
    assert_eq!(doc.inner.value_of(reject), None);
}
