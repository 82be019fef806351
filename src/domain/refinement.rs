use serde::Serialize;

pub const MAX_SUGGESTIONS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementResult {
    pub response: String,
    pub refined_search: Option<String>,
    pub suggestions: Vec<String>,
}

impl RefinementResult {
    /// A reply that leaves the current search untouched.
    pub fn reply(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            refined_search: None,
            suggestions: Vec::new(),
        }
    }

    /// A reply that asks the client to re-run search with `refined_search`.
    pub fn refine(response: impl Into<String>, refined_search: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            refined_search: Some(refined_search.into()),
            suggestions: Vec::new(),
        }
    }

    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions = suggestions
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.trim().is_empty())
            .take(MAX_SUGGESTIONS)
            .collect();
        self
    }
}
