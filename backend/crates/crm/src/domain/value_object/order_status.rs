//! Order Status Value Object
//!
//! Closed set; stored and serialized as the lowercase code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Active,
    Archived,
}

impl OrderStatus {
    /// String code for storage and the API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Parse a stored code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "new" => Some(Self::New),
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    pub const ALL: [OrderStatus; 3] = [Self::New, Self::Active, Self::Archived];
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
