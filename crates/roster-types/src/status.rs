use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account status codes. Independent of a user's `active` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[repr(u8)]
pub enum Status {
    Inactive = 0,
    Active = 1,
    Pending = 2,
}

impl Status {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Inactive => "Inactive",
            Status::Active => "Active",
            Status::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid status code {0}")]
pub struct InvalidStatusCode(pub u8);

impl TryFrom<u8> for Status {
    type Error = InvalidStatusCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Status::Inactive),
            1 => Ok(Status::Active),
            2 => Ok(Status::Pending),
            other => Err(InvalidStatusCode(other)),
        }
    }
}
