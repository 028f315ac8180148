use std::fmt;

use crate::domain::user::UserError;

const MIN_USERNAME_LENGTH: usize = 3;

/// Account identifier, immutable once the account is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Accepts at least three alphanumeric characters, nothing else.
    pub fn parse(value: &str) -> Result<Self, UserError> {
        if value.chars().count() < MIN_USERNAME_LENGTH {
            return Err(UserError::InvalidUsername);
        }
        if !value.chars().all(char::is_alphanumeric) {
            return Err(UserError::InvalidUsername);
        }
        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Username::parse(&value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    #[test]
    fn accepts_a_plain_alphanumeric_name() {
        let username = Username::parse("alice").unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn rejects_names_shorter_than_three_characters() {
        assert_eq!(Username::parse("al"), Err(UserError::InvalidUsername));
        assert_eq!(Username::parse(""), Err(UserError::InvalidUsername));
    }

    #[test]
    fn rejects_names_with_non_alphanumeric_characters() {
        assert_eq!(Username::parse("ali ce"), Err(UserError::InvalidUsername));
        assert_eq!(Username::parse("a-lice"), Err(UserError::InvalidUsername));
        assert_eq!(Username::parse("al@ce"), Err(UserError::InvalidUsername));
    }

    #[quickcheck]
    fn any_parsed_name_is_alphanumeric_and_long_enough(value: String) -> bool {
        match Username::parse(&value) {
            Ok(username) => {
                username.as_str().chars().count() >= 3
                    && username.as_str().chars().all(char::is_alphanumeric)
            }
            Err(_) => {
                value.chars().count() < 3 || !value.chars().all(char::is_alphanumeric)
            }
        }
    }
}
