//! Mapping of contact fields onto the vendor's wire names.

use serde::Serialize;
use serde_json::{Map, Value};

use super::timestamp::{DateInput, to_epoch_seconds};

/// Contact fields as supplied by the caller.
///
/// Every field is optional; [`ContactPayload::build`] decides which ones
/// reach the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFields {
    /// Email address
    pub email: Option<String>,
    /// Phone number
    pub phone: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Identifier in the caller's own system
    pub external_id: Option<String>,
    /// Owning admin id
    pub owner_id: Option<String>,
    /// Arbitrary attributes, passed through untouched
    pub custom_attributes: Option<Map<String, Value>>,
    /// Sign-up date
    pub signed_up_at: Option<DateInput>,
    /// Last-seen date
    pub last_seen_at: Option<DateInput>,
}

impl ContactFields {
    /// Creates an empty field set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the external id.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Sets the owner id. Numeric ids are stringified.
    #[must_use]
    pub fn with_owner_id(mut self, owner_id: impl ToString) -> Self {
        self.owner_id = Some(owner_id.to_string());
        self
    }

    /// Replaces the custom attributes.
    #[must_use]
    pub fn with_custom_attributes(mut self, attributes: Map<String, Value>) -> Self {
        self.custom_attributes = Some(attributes);
        self
    }

    /// Adds one custom attribute, keeping insertion order.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.custom_attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Sets the sign-up date.
    #[must_use]
    pub fn with_signed_up_at(mut self, value: impl Into<DateInput>) -> Self {
        self.signed_up_at = Some(value.into());
        self
    }

    /// Sets the last-seen date.
    #[must_use]
    pub fn with_last_seen_at(mut self, value: impl Into<DateInput>) -> Self {
        self.last_seen_at = Some(value.into());
        self
    }
}

/// Request body for contact create and update calls.
///
/// Absent fields are omitted from the JSON, never sent as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_up_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<Map<String, Value>>,
}

impl ContactPayload {
    /// Builds the wire payload from caller fields.
    ///
    /// Inclusion rules:
    /// - `email`, `phone`, `name`, `external_id`, `owner_id`: non-empty strings only
    /// - `custom_attributes`: whenever present, even if empty
    /// - `signed_up_at`, `last_seen_at`: only when they coerce to epoch seconds
    #[must_use]
    pub fn build(fields: &ContactFields) -> Self {
        Self {
            email: non_empty(fields.email.as_ref()),
            phone: non_empty(fields.phone.as_ref()),
            name: non_empty(fields.name.as_ref()),
            external_id: non_empty(fields.external_id.as_ref()),
            signed_up_at: to_epoch_seconds(fields.signed_up_at.as_ref()),
            last_seen_at: to_epoch_seconds(fields.last_seen_at.as_ref()),
            owner_id: non_empty(fields.owner_id.as_ref()),
            custom_attributes: fields.custom_attributes.clone(),
        }
    }

    /// Returns true if the payload carries an email, phone or external id.
    #[must_use]
    pub const fn has_identifier(&self) -> bool {
        self.email.is_some() || self.phone.is_some() || self.external_id.is_some()
    }

    /// Serializes the payload into a JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom attribute cannot be represented as JSON.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
