//! Client Entity

use auth::domain::value_object::user_id::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::ids::ClientId;
use crate::error::{CrmError, CrmResult};

/// Mutable fields of a client, replaced wholesale on update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFields {
    pub name: String,
    pub contact: String,
    pub notes: Option<String>,
}

impl ClientFields {
    /// Trim name and contact; both must be non-empty
    pub fn validate(self) -> CrmResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(CrmError::Validation("Client name cannot be empty".into()));
        }

        let contact = self.contact.trim().to_string();
        if contact.is_empty() {
            return Err(CrmError::Validation("Client contact cannot be empty".into()));
        }

        Ok(Self {
            name,
            contact,
            notes: self.notes,
        })
    }
}

/// A customer of the owning user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub client_id: ClientId,
    pub user_id: UserId,
    pub name: String,
    pub contact: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(user_id: UserId, fields: ClientFields) -> Self {
        let now = super::now();
        Self {
            client_id: ClientId::new(),
            user_id,
            name: fields.name,
            contact: fields.contact,
            notes: fields.notes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replace of the mutable fields
    pub fn apply(&mut self, fields: ClientFields) {
        self.name = fields.name;
        self.contact = fields.contact;
        self.notes = fields.notes;
        self.updated_at = super::now();
    }
}
