//! Concurrent load of the seven lookup tables.
//!
//! A table whose request fails is left empty and reported in
//! [`LookupLoad::failed`]; the page only treats the load as failed when every
//! table failed.

use futures::future::join_all;
use serde_json::Value;
use store::{LookupCache, LookupKind};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Clone, Debug, Default)]
pub struct LookupLoad {
    pub cache: LookupCache,
    pub failed: Vec<(LookupKind, ApiError)>,
}

impl LookupLoad {
    pub fn all_failed(&self) -> bool {
        self.failed.len() == LookupKind::ALL.len()
    }
}

pub async fn fetch_lookups(client: &ApiClient) -> LookupLoad {
    let results = join_all(LookupKind::ALL.iter().map(|&kind| fetch_table(client, kind))).await;

    let mut raw = Vec::with_capacity(results.len());
    let mut failed = Vec::new();
    for (kind, result) in results {
        match result {
            Ok(rows) => raw.push((kind, rows)),
            Err(e) => {
                tracing::warn!("⚠️ Lookup {} unavailable: {}", kind.display_name(), e);
                raw.push((kind, Vec::new()));
                failed.push((kind, e));
            }
        }
    }

    let cache = LookupCache::from_raw(raw);
    let counts = cache.counts();
    tracing::info!(total = counts.total, failed = failed.len(), "Lookups loaded");
    LookupLoad { cache, failed }
}

async fn fetch_table(client: &ApiClient, kind: LookupKind) -> (LookupKind, Result<Vec<Value>, ApiError>) {
    let result = client
        .get::<Option<Vec<Value>>>(kind.endpoint())
        .await
        .map(Option::unwrap_or_default);
    (kind, result)
}
