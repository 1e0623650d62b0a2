use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::collections::HashMap;

/// Issues one request against the API and hands back the decoded JSON body.
///
/// `path` is either relative to the configured base endpoint or an absolute `http(s)` URL.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &HashMap<String, String>,
    ) -> Result<Value>;

    async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, &HashMap::new()).await
    }
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn content_type(&self) -> &str;
    fn chunk_size(&self) -> usize;
    fn length_threshold(&self) -> usize;
    fn timeout_seconds(&self) -> Option<u64>;
    fn pass_through_not_found(&self) -> bool;
}
