//! Account credentials.
//!
//! ## Usernames
//!
//! Usernames can be up to 32 characters long and can only consist of
//! alphanumeric characters. Unicode letters and digits are accepted.
//!
//! ## Passwords
//!
//! Passwords must be at least 8 characters long and include a digit,
//! a lowercase letter, an uppercase letter and a symbol. A symbol is
//! anything that is neither a letter nor a digit, including whitespace.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Serialize};

use crate::error::{AdvisoryError, AdvisoryResult};

/// The maximum allowable length of a username.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// The minimum allowable length of a password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// The password requirements, as shown to users.
pub const PASSWORD_CRITERIA: &str = "Passwords must include a number, a lowercase character, \
an uppercase character and a special character, and be a minimum length of 8 characters.";

/// The name of a user account.
#[derive(Serialize, Clone, Debug, Hash, Eq, PartialEq)]
#[serde(transparent)]
pub struct Username(String);

/// Character classes present in a password.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordClasses {
    pub digit: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub symbol: bool,
}

impl Username {
    pub fn new(name: String) -> AdvisoryResult<Self> {
        validate_username(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        use de::Error;
        String::deserialize(deserializer)
            .and_then(|s| Self::new(s).map_err(|e| Error::custom(e.to_string())))
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Username {
    type Err = AdvisoryError;

    fn from_str(name: &str) -> AdvisoryResult<Self> {
        Self::new(name.to_owned())
    }
}

impl PasswordClasses {
    /// Scans a password for the character classes it contains.
    pub fn scan(password: &str) -> Self {
        password.chars().fold(Self::default(), |mut classes, c| {
            if c.is_numeric() {
                classes.digit = true;
            } else if c.is_lowercase() {
                classes.lowercase = true;
            } else if c.is_uppercase() {
                classes.uppercase = true;
            } else if !c.is_alphabetic() {
                classes.symbol = true;
            }
            classes
        })
    }

    /// Returns the number of classes present.
    pub fn count(&self) -> usize {
        [self.digit, self.lowercase, self.uppercase, self.symbol]
            .iter()
            .filter(|present| **present)
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.count() == 4
    }
}

/// Checks that a username is non-empty, short enough and alphanumeric.
pub fn validate_username(name: &str) -> AdvisoryResult<()> {
    let reason = if name.is_empty() {
        Some("Username is required")
    } else if name.chars().count() > MAX_USERNAME_LENGTH {
        Some("Username is too long")
    } else if !name.chars().all(char::is_alphanumeric) {
        Some("Username must not contain symbols")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(AdvisoryError::InvalidUsername {
            name: name.to_owned(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Checks a password against the complexity policy.
pub fn validate_password(password: &str) -> AdvisoryResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH
        || !PasswordClasses::scan(password).is_complete()
    {
        return Err(AdvisoryError::WeakPassword(PASSWORD_CRITERIA));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username() {
        assert!(Username::new("alice".to_string()).is_ok());
        assert!(Username::new("Bob2024".to_string()).is_ok());
        assert!(Username::new("zoë".to_string()).is_ok());

        assert!(Username::new("".to_string()).is_err());
        assert!(Username::new("bad name".to_string()).is_err());
        assert!(Username::new("alice!".to_string()).is_err());
        assert!(Username::new("a".repeat(MAX_USERNAME_LENGTH + 1)).is_err());

        assert_eq!("alice", "alice".parse::<Username>().unwrap().as_str());
        assert!("al!ce".parse::<Username>().is_err());

        let err = validate_username("al_ice").unwrap_err();
        assert_eq!(
            "Invalid username \"al_ice\": Username must not contain symbols",
            err.to_string()
        );
    }

    #[test]
    fn test_password_classes() {
        let classes = PasswordClasses::scan("Abc12345!");
        assert!(classes.is_complete());

        let classes = PasswordClasses::scan("abc12345");
        assert_eq!(
            PasswordClasses {
                digit: true,
                lowercase: true,
                uppercase: false,
                symbol: false,
            },
            classes
        );
        assert_eq!(2, classes.count());

        assert!(PasswordClasses::scan("a B").symbol);
    }

    #[test]
    fn test_password_policy() {
        validate_password("Abc12345!").unwrap();
        validate_password("P@ssw0rdP@ssw0rd").unwrap();

        // Too short, even with every class present
        assert!(validate_password("Ab1!").is_err());

        // Each one missing a single class
        assert!(validate_password("abc12345!").is_err());
        assert!(validate_password("ABC12345!").is_err());
        assert!(validate_password("Abcdefgh!").is_err());
        assert!(validate_password("Abc123456").is_err());
    }
}
