//! Alias tables recognizing each profile field on third-party forms.
//!
//! A field matches a control when any of its normalized aliases occurs in the
//! control's signature.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use applica_model::FieldKey;

use crate::utils::normalize_for_match;

/// Alias tokens recognizing each field on third-party forms, lowercase.
pub const FIELD_MATCHERS: [(FieldKey, &[&str]); 19] = [
    (
        FieldKey::FullName,
        &["full_name", "fullname", "name", "applicant_name", "full-name"],
    ),
    (
        FieldKey::FirstName,
        &[
            "first_name",
            "firstname",
            "first-name",
            "givenname",
            "given_name",
            "fname",
            "first",
        ],
    ),
    (
        FieldKey::LastName,
        &[
            "last_name",
            "lastname",
            "last-name",
            "surname",
            "familyname",
            "family_name",
            "lname",
            "last",
        ],
    ),
    (FieldKey::Email, &["email", "e-mail", "mail"]),
    (
        FieldKey::Phone,
        &["phone", "telephone", "mobile", "cell", "phonenumber"],
    ),
    (
        FieldKey::LinkedinUrl,
        &["linkedin", "linked_in", "linkedin_url", "linkedinurl"],
    ),
    (
        FieldKey::Address,
        &[
            "address",
            "street",
            "address1",
            "address_line_1",
            "address_line1",
        ],
    ),
    (FieldKey::City, &["city"]),
    (FieldKey::State, &["state", "region", "province"]),
    (
        FieldKey::Zip,
        &["zip", "postal", "postal_code", "zipcode", "postalcode"],
    ),
    (
        FieldKey::PreferredSalary,
        &[
            "salary",
            "preferred_salary",
            "compensation",
            "expected_salary",
            "salaryexpectation",
        ],
    ),
    (
        FieldKey::IsWillingToRelocate,
        &[
            "relocate",
            "relocation",
            "willingtorelocate",
            "willing_to_relocate",
            "open_to_relocation",
        ],
    ),
    (
        FieldKey::WillingToTravel,
        &[
            "travel",
            "willingtotravel",
            "willing_to_travel",
            "travelrequired",
            "travel_required",
        ],
    ),
    (
        FieldKey::Gender,
        &["gender", "sex", "eeogender", "gender_identity"],
    ),
    (
        FieldKey::Race,
        &[
            "race",
            "ethnicity",
            "ethnic",
            "eeorace",
            "ethnicity_race",
            "demographic",
        ],
    ),
    (
        FieldKey::IsDisabled,
        &[
            "disability",
            "disabled",
            "eeodisability",
            "has_disability",
            "disability_status",
        ],
    ),
    (
        FieldKey::Disabilities,
        &[
            "disabilities",
            "disability_description",
            "disability_detail",
            "accommodation",
        ],
    ),
    (
        FieldKey::IsVeteran,
        &[
            "veteran",
            "veteranstatus",
            "veteran_status",
            "military",
            "protected_veteran",
        ],
    ),
    (
        FieldKey::RequiresSponsorship,
        &[
            "sponsorship",
            "sponsor",
            "work_authorization",
            "workauthorization",
            "visa",
            "require_sponsorship",
            "authorized_to_work",
        ],
    ),
];

/// Normalized aliases per field, built once.
static NORMALIZED_MATCHERS: LazyLock<BTreeMap<FieldKey, Vec<String>>> =
    LazyLock::new(build_matcher_table);

fn build_matcher_table() -> BTreeMap<FieldKey, Vec<String>> {
    let mut table = BTreeMap::new();
    for (field, aliases) in FIELD_MATCHERS {
        let mut values: Vec<String> = Vec::with_capacity(aliases.len());
        for alias in aliases {
            let normalized = normalize_for_match(alias);
            if !normalized.is_empty() && !values.contains(&normalized) {
                values.push(normalized);
            }
        }
        table.insert(field, values);
    }
    table
}

/// Raw alias list for a field.
pub fn aliases(field: FieldKey) -> &'static [&'static str] {
    FIELD_MATCHERS
        .iter()
        .find(|(key, _)| *key == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or_default()
}

/// Normalized aliases for a `form_data` key, or `None` when the key has no matcher entry.
pub fn matchers_for(key: &str) -> Option<(FieldKey, &'static [String])> {
    let field = FieldKey::from_key(key)?;
    let aliases = NORMALIZED_MATCHERS.get(&field)?;
    if aliases.is_empty() {
        return None;
    }
    Some((field, aliases.as_slice()))
}
