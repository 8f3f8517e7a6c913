//! Tags: the numeric identifiers that say what a field means.

use std::fmt;

use crate::error::RegistryError;
use crate::format::tiff::Field;

use super::set::Registrable;

/// Renders a field as human-readable text, e.g. `"f/2.8"` for an FNumber.
pub type FieldInterpreter = fn(&Field) -> String;

#[derive(Clone)]
pub struct Tag {
    id: u16,
    name: String,
    interpreter: Option<FieldInterpreter>,
}

impl Tag {
    pub fn new(id: u16, name: impl Into<String>, interpreter: Option<FieldInterpreter>) -> Self {
        let mut name = name.into();
        if name.is_empty() {
            name = format!("UNNAMED_TAG_{id}");
        }
        Self {
            id,
            name,
            interpreter,
        }
    }

    /// Placeholder for an id no registered set knows about.
    pub fn unknown(id: u16) -> Self {
        Self::new(id, format!("UNKNOWN_TAG_{id}"), None)
    }

    #[inline]
    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interpreter(&self) -> Option<FieldInterpreter> {
        self.interpreter
    }

    /// Run the interpreter on a field, if this tag has one.
    pub fn interpret(&self, field: &Field) -> Option<String> {
        self.interpreter.map(|fi| fi(field))
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("interpreter", &self.interpreter.is_some())
            .finish()
    }
}

impl Registrable for Tag {
    const KIND: &'static str = "tag";

    fn id(&self) -> u16 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn placeholder(id: u16) -> Self {
        Tag::unknown(id)
    }

    fn check_replace(&self, incoming: &Self, set: &str) -> Result<(), RegistryError> {
        if self.name != incoming.name {
            return Err(RegistryError::TagConflict {
                set: set.to_string(),
                id: self.id,
                existing: self.name.clone(),
                name: incoming.name.clone(),
            });
        }
        Ok(())
    }
}
