use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

/// Identifier a household member is known by, e.g. a name or initials.
///
/// Identifiers are opaque: `Bob` and `B` are two different people.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PersonId(String);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersonIdError;

impl fmt::Display for PersonIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "person identifier must not be empty")
    }
}

impl Error for PersonIdError {}

impl PersonId {
    pub fn new<S: Into<String>>(id: S) -> Result<Self, PersonIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(PersonIdError);
        }
        if trimmed.len() == id.len() {
            Ok(PersonId(id))
        } else {
            Ok(PersonId(trimmed.to_string()))
        }
    }

    /// Splits a free-text answer such as `"Alice Bob"` into identifiers.
    pub fn split_list(answer: &str) -> Vec<PersonId> {
        answer
            .split_whitespace()
            .map(|id| PersonId(id.to_string()))
            .collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for PersonId {
    type Error = PersonIdError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        PersonId::new(s)
    }
}

impl TryFrom<String> for PersonId {
    type Error = PersonIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        PersonId::new(s)
    }
}

impl AsRef<str> for PersonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
