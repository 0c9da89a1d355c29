//! Marketplace accounts: farmers, buyers, and admins
//!
//! Accounts carry no credential material; authentication is out of scope
//! for this service and handled upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::validation::{self, FieldErrors};
use crate::domain::Resource;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// "farmer" | "buyer" | "admin" by convention; not a closed set.
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl Resource for UserAccount {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn unique_fields() -> &'static [&'static str] {
        &["email"]
    }

    fn field_str(&self, field: &str) -> Option<String> {
        match field {
            "email" => Some(self.email.clone()),
            _ => None,
        }
    }
}

/// Registration / profile-update payload.
///
/// The `id` field is only meaningful for profile updates, where the
/// original API carries it in the body rather than the path.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl UserAccountInput {
    fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        errors.check("name", validation::required(self.name.as_deref()));
        errors.check("address", validation::required(self.address.as_deref()));
        errors.check("phone", validation::required(self.phone.as_deref()));
        errors.check("email", validation::required(self.email.as_deref()));
        if let Some(email) = self.email.as_deref() {
            errors.check("email", validation::email(email));
        }
        errors.check("role", validation::required(self.role.as_deref()));
        errors
    }

    pub fn into_new_account(self) -> Result<UserAccount, FieldErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.assemble(Uuid::new_v4(), Utc::now()))
    }

    /// Validate and apply onto an existing account, preserving its id and
    /// creation time.
    pub fn into_update_of(self, existing: &UserAccount) -> Result<UserAccount, FieldErrors> {
        let errors = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(self.assemble(existing.id, existing.created_at))
    }

    fn assemble(self, id: Uuid, created_at: DateTime<Utc>) -> UserAccount {
        UserAccount {
            id,
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> UserAccountInput {
        UserAccountInput {
            name: Some("Priya Kumar".to_string()),
            address: Some("17 Orchard Road".to_string()),
            phone: Some("0123456789".to_string()),
            email: Some("priya@example.com".to_string()),
            role: Some("farmer".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_registration_builds_account() {
        let account = valid_input().into_new_account().unwrap();
        assert_eq!(account.role, "farmer");
        assert_eq!(account.email, "priya@example.com");
    }

    #[test]
    fn all_fields_are_required() {
        let errors = UserAccountInput::default().into_new_account().unwrap_err();
        for field in ["name", "address", "phone", "email", "role"] {
            assert!(errors.get(field).is_some(), "expected error for {field}");
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut input = valid_input();
        input.email = Some("not-an-address".to_string());
        let errors = input.into_new_account().unwrap_err();
        assert_eq!(errors.get("email"), Some("must be a valid email address"));
    }

    #[test]
    fn update_preserves_id_and_creation_time() {
        let existing = valid_input().into_new_account().unwrap();
        let mut input = valid_input();
        input.name = Some("Priya K.".to_string());
        let updated = input.into_update_of(&existing).unwrap();
        assert_eq!(updated.id, existing.id);
        assert_eq!(updated.created_at, existing.created_at);
        assert_eq!(updated.name, "Priya K.");
    }
}
