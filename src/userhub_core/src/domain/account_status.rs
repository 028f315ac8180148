use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tier of an account. Test accounts are created without an email and expire;
/// valid accounts carry an email and never expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Test,
    Valid,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Test => "test",
            AccountStatus::Valid => "valid",
        }
    }
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "test" => Ok(AccountStatus::Test),
            "valid" => Ok(AccountStatus::Valid),
            other => Err(format!("unknown account status: {other}")),
        }
    }
}
