use crate::contract::model::{FavoritesRef, UserId};

/// Builds hrefs for user-related resources under the REST base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBuilder {
    rest_base: String,
}

impl LinkBuilder {
    pub fn new(rest_base: impl AsRef<str>) -> Self {
        Self {
            rest_base: rest_base.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// `{rest_base}/users/{id}/`, with the id percent-encoded as one path segment.
    pub fn user_href(&self, id: &UserId) -> String {
        format!(
            "{}/users/{}/",
            self.rest_base,
            urlencoding::encode(id.as_str())
        )
    }

    pub fn favorites_for(&self, id: &UserId) -> FavoritesRef {
        FavoritesRef::new(id.clone(), format!("{}favorites/", self.user_href(id)))
    }
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REST_BASE)
    }
}
