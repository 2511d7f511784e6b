use resource_kit::Problem;

use crate::contract::error::BlueUserError;
use crate::domain::error::DomainError;
use crate::errors::ErrorCode;

/// Trace id of the current span, if there is one.
pub fn current_trace_id() -> Option<String> {
    tracing::Span::current()
        .id()
        .map(|id| id.into_u64().to_string())
}

/// Map domain errors to catalog Problems
pub fn map_domain_error(e: &DomainError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    match e {
        DomainError::UserNotFound { id } => ErrorCode::UserNotFound.to_problem_at(
            format!("User '{id}' not found"),
            instance,
            trace_id,
        ),
        DomainError::MissingIdentifier { requested, .. } => {
            ErrorCode::UserMissingIdentifier.to_problem_at(
                format!("User '{requested}' has no identifier"),
                instance,
                trace_id,
            )
        }
        DomainError::Store { .. } | DomainError::Export { .. } => {
            tracing::error!(error = %e, "Identity lookup failed");
            ErrorCode::StoreUnavailable.to_problem_at(
                "An internal error occurred",
                instance,
                trace_id,
            )
        }
    }
}

/// Same mapping for errors that already crossed the contract boundary.
pub fn map_contract_error(e: &BlueUserError, instance: &str) -> Problem {
    let trace_id = current_trace_id();
    match e {
        BlueUserError::NotFound { id } => ErrorCode::UserNotFound.to_problem_at(
            format!("User '{id}' not found"),
            instance,
            trace_id,
        ),
        BlueUserError::MissingIdentifier { requested } => {
            ErrorCode::UserMissingIdentifier.to_problem_at(
                format!("User '{requested}' has no identifier"),
                instance,
                trace_id,
            )
        }
        BlueUserError::Internal => ErrorCode::StoreUnavailable.to_problem_at(
            "An internal error occurred",
            instance,
            trace_id,
        ),
    }
}
