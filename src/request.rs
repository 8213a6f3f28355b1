//! Incoming HTTP request type.
//!
//! Every route this service exposes is a `GET` with no path parameters, so
//! only the path and query string are kept. Bodies are never read.

/// An incoming HTTP request, reduced to what the handlers read.
pub struct Request {
    pub(crate) path: String,
    pub(crate) query: Option<String>,
}

impl Request {
    pub(crate) fn new(parts: &http::request::Parts) -> Self {
        Self {
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
        }
    }

    pub fn path(&self) -> &str { &self.path }

    /// Every decoded value of query parameter `key`, in order of appearance.
    ///
    /// `?arms=A%20B&arms=C` yields `["A B", "C"]`. `+` decodes to a space.
    pub fn query_values(&self, key: &str) -> Vec<String> {
        let Some(query) = self.query.as_deref() else {
            return Vec::new();
        };
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str) -> Request {
        let (parts, ()) = http::Request::builder().uri(uri).body(()).unwrap().into_parts();
        Request::new(&parts)
    }

    #[test]
    fn query_values_are_decoded_and_repeatable() {
        let req = request("/api/spider?arms=A%20B&doses=10&arms=C+D");
        assert_eq!(req.query_values("arms"), vec!["A B", "C D"]);
        assert_eq!(req.query_values("doses"), vec!["10"]);
        assert!(req.query_values("tumor_types").is_empty());
    }

    #[test]
    fn no_query_string() {
        let req = request("/api/spider");
        assert!(req.query_values("arms").is_empty());
        assert_eq!(req.path(), "/api/spider");
    }
}
