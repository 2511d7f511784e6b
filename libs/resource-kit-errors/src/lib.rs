//! Runtime helpers for catalog-driven Problem building.
use http::StatusCode;
use resource_kit::problem::Problem;

/// Base URL for problem type documents.
pub const ERRORS_BASE_URL: &str = "https://errors.example.com/";

/// Static error definition from a module's error catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Convert this error definition into a Problem with the given detail.
    #[inline]
    pub fn to_problem(&self, detail: impl Into<String>) -> Problem {
        Problem::new(
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            self.title,
            detail.into(),
        )
        .with_code(self.code)
        .with_type(self.type_url)
    }

    /// Problem for one occurrence: adds the instance path and, when known, the trace id.
    pub fn to_problem_at(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        let problem = self.to_problem(detail).with_instance(instance);
        match trace_id {
            Some(id) => problem.with_trace_id(id),
            None => problem,
        }
    }
}
