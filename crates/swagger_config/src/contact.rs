//! API contact information.
//!
//! The contact can be supplied either as a structured record or as a single
//! human-readable string in the form `NAME [<EMAIL> [(URL)]]`, for example
//! `Jane Doe <jane@example.com> (https://example.com)`. Strings are parsed into
//! a [`ContactRecord`] when the configuration is built.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[cfg(test)]
#[path = "contact_tests.rs"]
mod tests;

/// `NAME [<EMAIL> [(URL)]]`, where the name is ASCII word, space and hyphen
/// characters.
const CONTACT_PATTERN: &str = r"^([A-Za-z0-9_ -]+)(?: <(.*)>(?: \((.*)\))?)?$";

fn contact_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CONTACT_PATTERN).expect("contact pattern is a valid regex"))
}

/// Structured contact information published in the API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Contact name
    pub name: String,

    /// Contact e-mail address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Contact web page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ContactRecord {
    /// Parses a `NAME [<EMAIL> [(URL)]]` contact string.
    ///
    /// Returns `None` when the string does not match the pattern. The e-mail
    /// and URL are only set when their group matched a non-empty value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use swagger_config::ContactRecord;
    ///
    /// let contact = ContactRecord::parse("Jane Doe <jane@x.com> (http://x.com)").unwrap();
    /// assert_eq!(contact.name, "Jane Doe");
    /// assert_eq!(contact.email.as_deref(), Some("jane@x.com"));
    /// assert_eq!(contact.url.as_deref(), Some("http://x.com"));
    ///
    /// assert!(ContactRecord::parse("").is_none());
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let captures = contact_pattern().captures(text)?;
        let group = |index: usize| {
            captures
                .get(index)
                .map(|m| m.as_str())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Some(Self {
            name: captures[1].to_string(),
            email: group(2),
            url: group(3),
        })
    }
}

/// Contact as it appears in the configuration.
///
/// After the configuration has been built the contact is a [`ContactField::Record`],
/// unless the configured string did not match the contact pattern. In that
/// case the original text is kept unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactField {
    Record(ContactRecord),
    Text(String),
}

impl ContactField {
    /// Converts a contact string into a record when it matches the pattern.
    pub fn normalize(self) -> Self {
        match self {
            ContactField::Text(text) => match ContactRecord::parse(&text) {
                Some(record) => ContactField::Record(record),
                None => {
                    tracing::debug!("Contact '{}' does not match the contact pattern", text);
                    ContactField::Text(text)
                }
            },
            record => record,
        }
    }

    /// Returns the structured record, if the contact has one.
    pub fn as_record(&self) -> Option<&ContactRecord> {
        match self {
            ContactField::Record(record) => Some(record),
            ContactField::Text(_) => None,
        }
    }
}

impl From<ContactRecord> for ContactField {
    fn from(record: ContactRecord) -> Self {
        ContactField::Record(record)
    }
}
