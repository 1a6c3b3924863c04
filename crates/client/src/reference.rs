use futures::future::join_all;
use shared_types::{parse_reference_list, AppError, ReferenceData, ReferenceKind};

use crate::http::ApiClient;

/// Result of loading every lookup list. Lists that failed stay empty and
/// are reported in `failures`; the form is usable either way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceLoad {
    pub data: ReferenceData,
    pub failures: Vec<(ReferenceKind, AppError)>,
}

impl ReferenceLoad {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary for a warning toast.
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.failures.iter().map(|(k, _)| k.label()).collect();
        Some(format!("Could not load: {}", names.join(", ")))
    }
}

/// Fetch topics, languages, writers, translators and tags concurrently.
/// Resolves once every request has either succeeded or failed.
#[tracing::instrument(skip(api))]
pub async fn load_reference_data(api: &ApiClient) -> ReferenceLoad {
    let results = join_all(ReferenceKind::ALL.into_iter().map(|kind| async move {
        let result = api
            .get_json(kind.endpoint())
            .await
            .map(|body| parse_reference_list(kind, &body));
        (kind, result)
    }))
    .await;

    let mut load = ReferenceLoad::default();
    for (kind, result) in results {
        match result {
            Ok(items) => {
                tracing::debug!(
                    list = kind.endpoint(),
                    count = items.len(),
                    "reference list loaded"
                );
                load.data.set(kind, items);
            }
            Err(err) => {
                tracing::warn!(list = kind.endpoint(), error = %err, "reference list failed");
                load.failures.push((kind, err));
            }
        }
    }
    load
}
