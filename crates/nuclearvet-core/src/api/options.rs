use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Per-call overrides applied on top of the client's defaults.
///
/// Headers set here replace any header of the same name the client would
/// otherwise send, including `Authorization`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn queries<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.query.extend(pairs);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates() {
        let opts = RequestOptions::new()
            .query("fecha", "2024-05-02")
            .queries(vec![("estado".to_string(), "PENDIENTE".to_string())])
            .query("veterinarioId", 4)
            .timeout(Duration::from_secs(5));

        assert_eq!(
            opts.query,
            vec![
                ("fecha".to_string(), "2024-05-02".to_string()),
                ("estado".to_string(), "PENDIENTE".to_string()),
                ("veterinarioId".to_string(), "4".to_string()),
            ]
        );
        assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
        assert!(opts.headers.is_empty());
    }
}
