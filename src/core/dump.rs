use crate::core::client::FlyffClient;
use crate::core::Storage;
use crate::domain::model::{IdSpec, Resource, SortKey};
use crate::domain::ports::Transport;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DumpReport {
    pub resource: Resource,
    pub file_name: String,
    pub entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpManifest {
    pub version: Value,
    pub generated_at: DateTime<Utc>,
    pub resources: Vec<DumpReport>,
}

/// Orders entries by a numeric field; entries missing it go last, ties keep their order.
pub fn sort_entries(entries: &mut [Value], key: SortKey) {
    let field = key.field();
    entries.sort_by(|a, b| {
        let a = a.get(field).and_then(Value::as_f64);
        let b = b.get(field).and_then(Value::as_f64);
        match (a, b) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Downloads one resource in full and writes it as `<resource>.json`.
///
/// Collections are listed and then fetched by ID; list-only resources are written as the
/// bare endpoint returns them. Arrays are sorted by `sort_key`, falling back to the
/// resource's default key.
pub async fn dump_resource<T: Transport, S: Storage>(
    client: &FlyffClient<T>,
    storage: &S,
    resource: Resource,
    sort_key: Option<SortKey>,
) -> Result<DumpReport> {
    tracing::info!("📥 Dumping {}", resource);

    let mut data = if resource.is_collection() {
        let ids = IdSpec::from_json(resource, &client.list_all(resource).await?)?;
        Value::Array(client.get_many(resource, ids).await?)
    } else {
        client.list_all(resource).await?
    };

    let entries = match &mut data {
        Value::Array(items) => {
            if let Some(key) = sort_key.or_else(|| resource.default_sort_key()) {
                sort_entries(items, key);
            }
            items.len()
        }
        _ => 1,
    };

    let file_name = format!("{}.json", resource.path());
    let json = serde_json::to_string_pretty(&data)?;
    tracing::debug!("Writing {} ({} bytes)", file_name, json.len());
    storage.write_file(&file_name, json.as_bytes()).await?;

    tracing::info!("💾 {} entries written to {}", entries, file_name);
    Ok(DumpReport {
        resource,
        file_name,
        entries,
    })
}

/// Dumps each resource in turn, then writes a manifest with the data version.
pub async fn dump_all<T: Transport, S: Storage>(
    client: &FlyffClient<T>,
    storage: &S,
    resources: &[Resource],
    sort_key: Option<SortKey>,
) -> Result<DumpManifest> {
    let version = client.version().await?.clone();

    let mut reports = Vec::with_capacity(resources.len());
    for resource in resources {
        reports.push(dump_resource(client, storage, *resource, sort_key).await?);
    }

    let manifest = DumpManifest {
        version,
        generated_at: Utc::now(),
        resources: reports,
    };
    storage
        .write_file(MANIFEST_FILE, &serde_json::to_vec_pretty(&manifest)?)
        .await?;

    Ok(manifest)
}
