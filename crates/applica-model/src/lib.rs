pub mod error;
pub mod field;
pub mod outcome;
pub mod profile;

pub use error::{FormDataError, Result, json_kind};
pub use field::FieldKey;
pub use outcome::FillOutcome;
pub use profile::{FieldValue, ProfileEntry, ProfileRecord};
