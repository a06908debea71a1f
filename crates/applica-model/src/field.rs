use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic profile fields the autofill engine knows how to place on a form.
///
/// The serialized form is the `form_data` key delivered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    FullName,
    FirstName,
    LastName,
    Email,
    Phone,
    LinkedinUrl,
    Address,
    City,
    State,
    Zip,
    PreferredSalary,
    IsWillingToRelocate,
    WillingToTravel,
    Gender,
    Race,
    IsDisabled,
    Disabilities,
    IsVeteran,
    RequiresSponsorship,
}

impl FieldKey {
    /// Every known field, in the order the backend documents them.
    pub const ALL: [FieldKey; 19] = [
        FieldKey::FullName,
        FieldKey::FirstName,
        FieldKey::LastName,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::LinkedinUrl,
        FieldKey::Address,
        FieldKey::City,
        FieldKey::State,
        FieldKey::Zip,
        FieldKey::PreferredSalary,
        FieldKey::IsWillingToRelocate,
        FieldKey::WillingToTravel,
        FieldKey::Gender,
        FieldKey::Race,
        FieldKey::IsDisabled,
        FieldKey::Disabilities,
        FieldKey::IsVeteran,
        FieldKey::RequiresSponsorship,
    ];

    /// Returns the `form_data` key for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::FullName => "full_name",
            FieldKey::FirstName => "first_name",
            FieldKey::LastName => "last_name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::LinkedinUrl => "linkedin_url",
            FieldKey::Address => "address",
            FieldKey::City => "city",
            FieldKey::State => "state",
            FieldKey::Zip => "zip",
            FieldKey::PreferredSalary => "preferred_salary",
            FieldKey::IsWillingToRelocate => "is_willing_to_relocate",
            FieldKey::WillingToTravel => "willing_to_travel",
            FieldKey::Gender => "gender",
            FieldKey::Race => "race",
            FieldKey::IsDisabled => "is_disabled",
            FieldKey::Disabilities => "disabilities",
            FieldKey::IsVeteran => "is_veteran",
            FieldKey::RequiresSponsorship => "requires_sponsorship",
        }
    }

    /// Looks up a field by its exact `form_data` key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    /// Returns true for yes/no questions whose dropdowns use Yes/No style options.
    pub fn is_boolean(&self) -> bool {
        matches!(
            self,
            FieldKey::IsDisabled
                | FieldKey::IsVeteran
                | FieldKey::IsWillingToRelocate
                | FieldKey::WillingToTravel
                | FieldKey::RequiresSponsorship
        )
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
