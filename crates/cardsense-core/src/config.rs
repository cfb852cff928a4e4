//! Application configuration.
//!
//! Strings borrow from the source document when they can, so a profile
//! embedded with `include_str!` costs no allocation. Escaped JSON strings
//! fall back to an owned copy.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Write;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config<'a> {
    #[serde(borrow)]
    pub profile: CardProfile<'a>,
}

/// Contact details shown on the business card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CardProfile<'a> {
    #[serde(borrow)]
    pub first_name: Cow<'a, str>,
    #[serde(borrow)]
    pub last_name: Cow<'a, str>,
    #[serde(borrow)]
    pub role: Cow<'a, str>,
    #[serde(borrow)]
    pub phone_number: Cow<'a, str>,
    #[serde(borrow)]
    pub email: Cow<'a, str>,
    /// Twitter handle without the leading `@`.
    #[serde(borrow)]
    pub twitter: Cow<'a, str>,
}

impl Default for CardProfile<'_> {
    fn default() -> Self {
        Self {
            first_name: Cow::Borrowed("Aryendra"),
            last_name: Cow::Borrowed("Pratap Singh"),
            role: Cow::Borrowed("Software Developer"),
            phone_number: Cow::Borrowed("+1 (123) 456-7890"),
            email: Cow::Borrowed("aryendraps18@gmail.com"),
            twitter: Cow::Borrowed("aryendraps18"),
        }
    }
}

impl CardProfile<'_> {
    pub fn full_name(&self) -> String {
        let mut name = String::new();
        // Writing into a String cannot fail.
        write!(name, "{} {}", self.first_name, self.last_name).ok();
        name
    }

    /// Up to two uppercase initials for the avatar placeholder.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn twitter_handle(&self) -> String {
        let mut handle = String::new();
        write!(handle, "@{}", self.twitter.trim_start_matches('@')).ok();
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_formats() {
        let profile = CardProfile::default();
        assert_eq!(profile.full_name(), "Aryendra Pratap Singh");
        assert_eq!(profile.initials(), "AP");
        assert_eq!(profile.twitter_handle(), "@aryendraps18");
    }

    #[test]
    fn twitter_handle_is_not_doubled() {
        let profile = CardProfile {
            twitter: Cow::Borrowed("@someone"),
            ..CardProfile::default()
        };
        assert_eq!(profile.twitter_handle(), "@someone");
    }

    #[test]
    fn initials_skip_empty_parts() {
        let profile = CardProfile {
            first_name: Cow::Borrowed("ada"),
            last_name: Cow::Borrowed(""),
            ..CardProfile::default()
        };
        assert_eq!(profile.initials(), "A");
    }

    #[test]
    fn profile_borrows_from_json() {
        let json = r#"{"profile":{"first_name":"Grace","last_name":"Hopper","twitter":"@grace"}}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.profile.full_name(), "Grace Hopper");
        assert_eq!(config.profile.twitter_handle(), "@grace");
        assert_eq!(config.profile.role, "Software Developer");
        assert!(matches!(config.profile.first_name, Cow::Borrowed(_)));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
