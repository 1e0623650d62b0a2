use crate::core::normalize::normalize;
use crate::domain::model::IdSpec;
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CHUNK_SIZE: usize = 100;
pub const DEFAULT_LENGTH_THRESHOLD: usize = 350;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Most IDs sent in one request once a batch is split.
    pub chunk_size: usize,
    /// Longest normalized ID string (in characters) still sent as a single request.
    pub length_threshold: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            length_threshold: DEFAULT_LENGTH_THRESHOLD,
        }
    }
}

/// Splits a normalized ID string into the path segments to request, in order.
///
/// An empty string yields no segments at all.
pub fn plan_requests(normalized: &str, settings: &BatchSettings) -> Vec<String> {
    if normalized.is_empty() {
        return Vec::new();
    }

    if normalized.chars().count() <= settings.length_threshold {
        return vec![normalized.to_string()];
    }

    let tokens: Vec<&str> = normalized.split(',').collect();
    tokens
        .chunks(settings.chunk_size.max(1))
        .map(|group| group.join(","))
        .collect()
}

/// Fetches every entity named by `spec` from `resource_path`, one request per planned segment.
///
/// Requests run one after another and results keep request order. The first failing
/// request aborts the batch.
pub async fn fetch_batch<T: Transport + ?Sized>(
    transport: &T,
    resource_path: &str,
    spec: &IdSpec,
    settings: &BatchSettings,
) -> Result<Vec<Value>> {
    let normalized = normalize(spec);
    let segments = plan_requests(&normalized, settings);

    if segments.is_empty() {
        tracing::debug!("Empty ID list for {}, nothing to request", resource_path);
        return Ok(Vec::new());
    }

    let resource_path = resource_path.trim_end_matches('/');
    let total = segments.len();
    let mut results = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if total > 1 {
            tracing::debug!("Requesting {} chunk {}/{}", resource_path, index + 1, total);
        }

        match transport.get(&format!("{}/{}", resource_path, segment)).await? {
            Value::Array(items) => results.extend(items),
            other => results.push(other),
        }
    }

    tracing::info!(
        "Fetched {} {} entries in {} request(s)",
        results.len(),
        resource_path,
        total
    );
    Ok(results)
}
