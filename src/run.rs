//! Main run loop for the application.
//!
//! Applies the validated settings to a client, performs the selected
//! operation once and writes the outcome to stdout.

use std::io::Write;

use intercom_lite::api::{ApiResult, Intercom, SelfTestError};
use intercom_lite::config::{Environment, Operation, ValidatedConfig};
use intercom_lite::transport::{HttpClient, HttpError, ReqwestClient};
use thiserror::Error;

/// Errors that end the run with a runtime exit code.
#[derive(Debug, Error)]
pub enum RunError {
    /// The transport could not complete the round trip.
    #[error("Request failed: {0}")]
    Transport(#[from] HttpError),

    /// `GET /me` did not succeed.
    #[error(transparent)]
    SelfTest(#[from] SelfTestError),

    /// The API call completed with a failure result (already printed).
    #[error("API call failed: {error}")]
    Failed {
        /// Error text of the failure result
        error: String,
    },

    /// Writing the result failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// The result could not be serialized.
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Executes the configured operation against the live API.
///
/// # Errors
///
/// See [`execute_with`].
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let mut intercom = Intercom::new(ReqwestClient::new());
    intercom.configure(&config.settings);

    let stdout = std::io::stdout();
    execute_with(&intercom, config.operation, &mut stdout.lock()).await
}

/// Executes one operation and writes its outcome to `out`.
///
/// Results are written as pretty JSON; the self test writes `ok` or
/// `skipped: ...`.
///
/// # Errors
///
/// Returns an error for failure results, transport errors, a failed
/// self test, or when the output cannot be written.
pub async fn execute_with<H, E, W>(
    intercom: &Intercom<H, E>,
    operation: Operation,
    out: &mut W,
) -> Result<(), RunError>
where
    H: HttpClient,
    E: Environment,
    W: Write,
{
    tracing::debug!(operation = operation.name(), "executing");

    let result = match operation {
        Operation::SelfTest => {
            let outcome = intercom.self_test().await?;
            writeln!(out, "{outcome}")?;
            return Ok(());
        }
        Operation::CreateContact(fields) => intercom.create_contact(&fields, None).await?,
        Operation::UpdateContact { id, fields } => {
            intercom.update_contact(&id, &fields, None).await?
        }
        Operation::Search(query) => intercom.search_contacts(&query, None).await?,
        Operation::Request(options) => intercom.request(options).await?,
    };

    write_result(&result, out)?;

    match result {
        ApiResult::Success { .. } => Ok(()),
        ApiResult::Failure { error, .. } => Err(RunError::Failed { error }),
    }
}

fn write_result<W: Write>(result: &ApiResult, out: &mut W) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}
