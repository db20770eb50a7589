use serde_json::Value;

use super::backend::{Backend, GET_VERSIONS};

/// Shown until a fetched list replaces it.
pub const PLACEHOLDER_VERSIONS: &[&str] = &[
    "latest", "1.20.4", "1.20.2", "1.20.1", "1.19.4", "1.18.2", "1.17.1", "1.16.5", "1.12.2",
    "1.8.8",
];

/// Where the Root View gets its version list from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    Constant(Vec<String>),
    Backend,
}

impl VersionSource {
    pub fn placeholder() -> Self {
        VersionSource::Constant(PLACEHOLDER_VERSIONS.iter().map(|v| v.to_string()).collect())
    }

    /// List to show before any request completed.
    pub fn initial(&self) -> Vec<String> {
        match self {
            VersionSource::Constant(versions) => versions.clone(),
            VersionSource::Backend => Vec::new(),
        }
    }

    /// Request the list. `None` means "no data"; callers keep what they have.
    pub async fn fetch<B: Backend + ?Sized>(&self, backend: &B) -> Option<Vec<String>> {
        match self {
            VersionSource::Constant(versions) => Some(versions.clone()),
            VersionSource::Backend => {
                let response = backend.invoke(GET_VERSIONS, Value::Null).await;
                let versions = match response {
                    Ok(value) => serde_json::from_value::<Vec<String>>(value)
                        .map_err(|e| e.to_string()),
                    Err(error) => Err(error),
                };
                match versions {
                    Ok(versions) if !versions.is_empty() => Some(versions),
                    Ok(_) => None,
                    Err(error) => {
                        log::warn!("could not load versions: {error}");
                        None
                    }
                }
            }
        }
    }
}

impl Default for VersionSource {
    fn default() -> Self {
        Self::placeholder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::testing::FakeBackend;
    use serde_json::json;
    use tauri::async_runtime::block_on;

    #[test]
    fn constant_source_never_asks_the_backend() {
        let backend = FakeBackend::new();
        let source = VersionSource::placeholder();
        let fetched = block_on(source.fetch(&backend)).unwrap();
        assert_eq!(fetched, source.initial());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn backend_source_returns_fetched_list() {
        let backend = FakeBackend::new();
        backend.respond(GET_VERSIONS, Ok(json!(["1.21", "1.20.6"])));
        let fetched = block_on(VersionSource::Backend.fetch(&backend));
        assert_eq!(fetched, Some(vec!["1.21".to_string(), "1.20.6".to_string()]));
        assert_eq!(backend.calls_to(GET_VERSIONS), 1);
    }

    #[test]
    fn backend_source_reports_no_data_on_failure_or_empty_list() {
        let backend = FakeBackend::new();
        backend.respond(GET_VERSIONS, Err("offline".into()));
        assert_eq!(block_on(VersionSource::Backend.fetch(&backend)), None);

        backend.respond(GET_VERSIONS, Ok(json!([])));
        assert_eq!(block_on(VersionSource::Backend.fetch(&backend)), None);

        backend.respond(GET_VERSIONS, Ok(json!({"versions": 3})));
        assert_eq!(block_on(VersionSource::Backend.fetch(&backend)), None);
    }
}
