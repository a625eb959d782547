use super::{LlmClient, LlmError};
use crate::connectors::LlmServiceConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Memoizes one [`LlmClient`] per API key for the life of the process.
///
/// Entries never expire. A miss takes the write lock and inserts only if the
/// key is still absent, so concurrent first uses of a key share one handle.
pub struct ClientCache {
    config: LlmServiceConfig,
    clients: RwLock<HashMap<String, Arc<LlmClient>>>,
}

impl ClientCache {
    pub fn new(config: LlmServiceConfig) -> Self {
        Self {
            config,
            clients: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get_or_create(&self, api_key: &str) -> Result<Arc<LlmClient>, LlmError> {
        {
            let clients = self.clients.read().await;
            if let Some(client) = clients.get(api_key) {
                return Ok(client.clone());
            }
        }

        let mut clients = self.clients.write().await;
        if let Some(client) = clients.get(api_key) {
            return Ok(client.clone());
        }

        let client = Arc::new(LlmClient::new(&self.config, api_key)?);
        clients.insert(api_key.to_string(), client.clone());
        tracing::debug!(
            api_key = %mask_key(api_key),
            cached = clients.len(),
            "Created LLM client"
        );

        Ok(client)
    }

    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

fn mask_key(key: &str) -> String {
    key.chars().take(4).collect::<String>() + "****"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_returns_same_handle() {
        let cache = ClientCache::new(LlmServiceConfig::default());

        let first = cache.get_or_create("gsk_alpha").await.unwrap();
        let second = cache.get_or_create("gsk_alpha").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn different_keys_get_different_handles() {
        let cache = ClientCache::new(LlmServiceConfig::default());

        let alpha = cache.get_or_create("gsk_alpha").await.unwrap();
        let beta = cache.get_or_create("gsk_beta").await.unwrap();

        assert!(!Arc::ptr_eq(&alpha, &beta));
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_first_use_builds_one_handle() {
        let cache = Arc::new(ClientCache::new(LlmServiceConfig::default()));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.get_or_create("gsk_race").await.unwrap() })
            })
            .collect();

        let mut clients = Vec::new();
        for handle in handles {
            clients.push(handle.await.unwrap());
        }

        assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn failed_construction_is_not_cached() {
        let cache = ClientCache::new(LlmServiceConfig::default());

        assert!(cache.get_or_create("bad\nkey").await.is_err());
        assert!(cache.is_empty().await);
    }

    #[test]
    fn masked_key_keeps_four_chars() {
        assert_eq!(mask_key("gsk_1234567"), "gsk_****");
        assert_eq!(mask_key("ab"), "ab****");
    }
}
