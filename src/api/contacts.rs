//! Contact operations: thin wrappers over [`Intercom::request`].

use serde_json::{Value, json};

use super::{ApiResult, Intercom, RequestError, RequestOptions};
use crate::config::Environment;
use crate::contact::{ContactFields, ContactPayload};
use crate::transport::{HttpClient, HttpError};

impl<H: HttpClient, E: Environment> Intercom<H, E> {
    /// Creates a contact with `POST /contacts`.
    ///
    /// The payload must carry an email, phone or external id; otherwise
    /// the call fails locally.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the transport fails.
    pub async fn create_contact(
        &self,
        fields: &ContactFields,
        token: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let payload = ContactPayload::build(fields);
        if !payload.has_identifier() {
            return Ok(ApiResult::rejected(&RequestError::MissingIdentifier));
        }
        self.send_payload("/contacts", "POST", &payload, token).await
    }

    /// Updates a contact with `PUT /contacts/{id}`.
    ///
    /// The id is percent-encoded. An empty payload is a valid partial update.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the transport fails.
    pub async fn update_contact(
        &self,
        id: &str,
        fields: &ContactFields,
        token: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        if id.is_empty() {
            return Ok(ApiResult::rejected(&RequestError::MissingId));
        }
        let path = format!("/contacts/{}", urlencoding::encode(id));
        let payload = ContactPayload::build(fields);
        self.send_payload(&path, "PUT", &payload, token).await
    }

    /// Searches contacts with `POST /contacts/search`.
    ///
    /// `query` is the vendor filter object and must be a JSON object;
    /// it is sent as `{"query": query}`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when the transport fails.
    pub async fn search_contacts(
        &self,
        query: &Value,
        token: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        if !query.is_object() {
            return Ok(ApiResult::rejected(&RequestError::MissingQuery));
        }
        let options = RequestOptions::new("/contacts/search")
            .with_method("POST")
            .with_body(json!({ "query": query }))
            .with_token(token);
        self.request(options).await
    }

    async fn send_payload(
        &self,
        path: &str,
        method: &str,
        payload: &ContactPayload,
        token: Option<&str>,
    ) -> Result<ApiResult, HttpError> {
        let body = match payload.to_value() {
            Ok(body) => body,
            Err(e) => return Ok(ApiResult::rejected(&RequestError::InvalidBody(e.to_string()))),
        };
        let options = RequestOptions::new(path)
            .with_method(method)
            .with_body(body)
            .with_token(token);
        self.request(options).await
    }
}
