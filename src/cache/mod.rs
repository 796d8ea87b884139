//! Response caching for the Tourbook client.

pub mod ttl_cache;

pub use ttl_cache::TtlCache;

use serde::Serialize;

/// Build a cache key from a logical resource prefix and an optional
/// parameter set.
///
/// Parameters are serialized to JSON; struct fields serialize in declaration
/// order, so semantically identical queries always map to the same key.
pub fn cache_key<P: Serialize>(prefix: &str, params: Option<&P>) -> String {
    match params.and_then(|p| serde_json::to_string(p).ok()) {
        Some(json) => format!("{}:{}", prefix, json),
        None => prefix.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Params {
        category: Option<String>,
        limit: Option<u32>,
    }

    #[test]
    fn test_cache_key_without_params() {
        let key = cache_key::<()>("excursions", None);
        assert_eq!(key, "excursions");
    }

    #[test]
    fn test_cache_key_is_deterministic() {
        let params = Params {
            category: Some("sea".to_string()),
            limit: Some(10),
        };

        let a = cache_key("excursions", Some(&params));
        let b = cache_key("excursions", Some(&params));
        assert_eq!(a, b);
        assert!(a.starts_with("excursions:{"));
    }

    #[test]
    fn test_cache_key_distinguishes_params() {
        let sea = Params {
            category: Some("sea".to_string()),
            limit: None,
        };
        let hiking = Params {
            category: Some("hiking".to_string()),
            limit: None,
        };

        assert_ne!(
            cache_key("excursions", Some(&sea)),
            cache_key("excursions", Some(&hiking))
        );
    }
}
