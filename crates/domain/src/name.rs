use derive_more::{AsRef, Display};

/// Display name of a user profile, exercise, routine or logged workout.
///
/// Names are trimmed on construction and must be non-empty afterwards.
/// The length cap matches the widest name column of the persisted
/// tables, so any accepted name can be stored as-is.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[as_ref(str)]
pub struct Name(String);

impl Name {
    pub const MAX_LEN: usize = 64;

    pub fn new(name: &str) -> Result<Self, NameError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(NameError::Empty);
        }

        if name.len() > Self::MAX_LEN {
            return Err(NameError::TooLong(name.len()));
        }

        Ok(Self(name.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NameError {
    #[error("Name must not be empty")]
    Empty,
    #[error("Name must be {max} characters or fewer ({0} > {max})", max = Name::MAX_LEN)]
    TooLong(usize),
}
