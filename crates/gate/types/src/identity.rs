use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::CaptureMode;
use crate::error::{IdentityError, IdentityResult};

/// A normalized visitor email.
///
/// Trimmed, lower-cased and guaranteed to contain `@`. This is the id handed
/// to the analytics service, so two spellings of the same address must
/// collapse to one value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize and validate raw input.
    pub fn parse(raw: &str) -> IdentityResult<Self> {
        let normalized = raw.trim().to_lowercase();
        let normalized = normalized.trim();

        if normalized.is_empty() {
            return Err(IdentityError::MissingEmail);
        }
        if !normalized.contains('@') {
            return Err(IdentityError::MalformedEmail(normalized.to_string()));
        }

        Ok(Self(normalized.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

/// A trimmed, non-empty display name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    pub fn parse(raw: &str) -> IdentityResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::MissingName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> Self {
        name.0
    }
}

/// The persisted visitor record.
///
/// Never mutated in place: a fresh submission replaces it wholesale and
/// sign-out erases it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    email: EmailAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<DisplayName>,
}

impl Identity {
    pub fn new(email: EmailAddress, name: Option<DisplayName>) -> Self {
        Self { email, name }
    }

    /// Build an identity from raw form input under the given capture mode.
    ///
    /// The email is checked first, then the name. In [`CaptureMode::EmailOnly`]
    /// a blank name is dropped rather than rejected.
    pub fn capture(mode: CaptureMode, email: &str, name: &str) -> IdentityResult<Self> {
        let email = EmailAddress::parse(email)?;
        let name = match mode {
            CaptureMode::EmailOnly => DisplayName::parse(name).ok(),
            CaptureMode::NameAndEmail => Some(DisplayName::parse(name)?),
        };
        Ok(Self { email, name })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn name(&self) -> Option<&DisplayName> {
        self.name.as_ref()
    }

    /// Does this record carry every field the mode requires?
    pub fn satisfies(&self, mode: CaptureMode) -> bool {
        match mode {
            CaptureMode::EmailOnly => true,
            CaptureMode::NameAndEmail => self.name.is_some(),
        }
    }

    /// Properties forwarded alongside the id on `identify`.
    pub fn analytics_properties(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut props = serde_json::Map::new();
        props.insert("email".into(), self.email.as_str().into());
        if let Some(name) = &self.name {
            props.insert("name".into(), name.as_str().into());
        }
        props
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = EmailAddress::parse("  Ann@Example.COM \n").unwrap();
        assert_eq!(email.as_str(), "ann@example.com");
    }

    #[test]
    fn email_without_at_is_malformed() {
        assert_eq!(
            EmailAddress::parse("not-an-email"),
            Err(IdentityError::MalformedEmail("not-an-email".into()))
        );
    }

    #[test]
    fn blank_email_is_missing() {
        assert_eq!(EmailAddress::parse("   "), Err(IdentityError::MissingEmail));
        assert_eq!(EmailAddress::parse(""), Err(IdentityError::MissingEmail));
    }

    #[test]
    fn email_only_capture_drops_blank_name() {
        let identity = Identity::capture(CaptureMode::EmailOnly, "a@b.com", "  ").unwrap();
        assert!(identity.name().is_none());
        assert!(identity.satisfies(CaptureMode::EmailOnly));
        assert!(!identity.satisfies(CaptureMode::NameAndEmail));
    }

    #[test]
    fn email_only_capture_keeps_given_name() {
        let identity = Identity::capture(CaptureMode::EmailOnly, "a@b.com", " Ann ").unwrap();
        assert_eq!(identity.name().map(DisplayName::as_str), Some("Ann"));
    }

    #[test]
    fn sign_in_capture_requires_name() {
        assert_eq!(
            Identity::capture(CaptureMode::NameAndEmail, "a@b.com", " "),
            Err(IdentityError::MissingName)
        );
    }

    #[test]
    fn email_is_validated_before_name() {
        assert_eq!(
            Identity::capture(CaptureMode::NameAndEmail, "nope", ""),
            Err(IdentityError::MalformedEmail("nope".into()))
        );
    }

    #[test]
    fn analytics_properties_mirror_fields() {
        let identity = Identity::capture(CaptureMode::NameAndEmail, "A@B.com", "Ann").unwrap();
        let props = identity.analytics_properties();
        assert_eq!(props["email"], "a@b.com");
        assert_eq!(props["name"], "Ann");

        let email_only = Identity::capture(CaptureMode::EmailOnly, "a@b.com", "").unwrap();
        assert!(!email_only.analytics_properties().contains_key("name"));
    }

    #[test]
    fn deserializing_normalizes_and_rejects() {
        let identity: Identity =
            serde_json::from_str(r#"{"email":" A@B.COM ","name":"Ann"}"#).unwrap();
        assert_eq!(identity.email().as_str(), "a@b.com");

        assert!(serde_json::from_str::<Identity>(r#"{"email":"nope"}"#).is_err());
    }

    proptest! {
        #[test]
        fn email_normalization_is_idempotent(raw in "\\PC{0,24}") {
            if let Ok(once) = EmailAddress::parse(&raw) {
                let twice = EmailAddress::parse(once.as_str()).unwrap();
                prop_assert_eq!(once, twice);
            }
        }

        #[test]
        fn email_is_accepted_iff_it_has_an_at(raw in "[ a-zA-Z0-9@.]{0,16}") {
            let trimmed = raw.trim();
            let result = EmailAddress::parse(&raw);
            if trimmed.is_empty() {
                prop_assert_eq!(result, Err(IdentityError::MissingEmail));
            } else if trimmed.contains('@') {
                let email = result.unwrap();
                prop_assert_eq!(email.as_str(), trimmed.to_lowercase());
            } else {
                prop_assert!(matches!(result, Err(IdentityError::MalformedEmail(_))));
            }
        }

        #[test]
        fn display_name_is_trimmed(raw in "\\s{0,3}[a-zA-Z]{1,10}\\s{0,3}") {
            let name = DisplayName::parse(&raw).unwrap();
            prop_assert_eq!(name.as_str(), raw.trim());
        }
    }
}
