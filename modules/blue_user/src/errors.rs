//! Error catalog for the blue_user module.
use resource_kit::Problem;
use resource_kit_errors::ErrDef;

/// Strongly-typed error codes from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// blue_user.user.missing_identifier.v1
    UserMissingIdentifier,
    /// blue_user.user.not_found.v1
    UserNotFound,
    /// blue_user.store.unavailable.v1
    StoreUnavailable,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 3] = [
        ErrorCode::UserMissingIdentifier,
        ErrorCode::UserNotFound,
        ErrorCode::StoreUnavailable,
    ];

    /// Get the HTTP status code for this error
    pub const fn status(&self) -> u16 {
        self.def().status
    }

    /// Get the error definition for this error code
    pub const fn def(&self) -> ErrDef {
        match self {
            ErrorCode::UserMissingIdentifier => ErrDef {
                status: 404,
                title: "User Not Found",
                code: "blue_user.user.missing_identifier.v1",
                type_url: "https://errors.example.com/blue_user.user.missing_identifier.v1",
            },
            ErrorCode::UserNotFound => ErrDef {
                status: 404,
                title: "User Not Found",
                code: "blue_user.user.not_found.v1",
                type_url: "https://errors.example.com/blue_user.user.not_found.v1",
            },
            ErrorCode::StoreUnavailable => ErrDef {
                status: 500,
                title: "Identity Store Unavailable",
                code: "blue_user.store.unavailable.v1",
                type_url: "https://errors.example.com/blue_user.store.unavailable.v1",
            },
        }
    }

    /// Convert to Problem with detail (without instance/trace)
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        self.def().to_problem(detail)
    }

    /// Problem with request context (recommended for handlers)
    pub fn to_problem_at(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        self.def().to_problem_at(detail, instance, trace_id)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.def().code == code)
    }
}
