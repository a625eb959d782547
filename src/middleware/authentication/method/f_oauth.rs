use crate::configuration::Settings;
use crate::forms;
use crate::middleware::authentication::get_header;
use crate::models;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Users already resolved by the auth provider, keyed by access token.
pub struct OAuthCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedUser>>,
}

struct CachedUser {
    user: models::User,
    expires_at: Instant,
}

impl OAuthCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, token: &str) -> Option<models::User> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.user.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        match entries.get(token) {
            Some(entry) if entry.expires_at > now => Some(entry.user.clone()),
            Some(_) => {
                entries.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn insert(&self, token: String, user: models::User) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            token,
            CachedUser {
                user,
                expires_at: now + self.ttl,
            },
        );
    }
}

fn try_extract_token(authentication: &str) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer missing scheme".to_string()),
    }

    match authentication_parts.next().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => {
            tracing::error!("Bearer token is missing");
            Err("Authentication required".to_string())
        }
    }
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_oauth(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = match get_header::<String>(req, "authorization")? {
        Some(value) => value,
        None => return Ok(false),
    };

    let token = try_extract_token(&authentication)?;
    login(req, token).await?;

    Ok(true)
}

/// Resolves `token` to a user (cache first, then the auth provider) and
/// attaches it to the request.
pub(super) async fn login(req: &mut ServiceRequest, token: String) -> Result<(), String> {
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or("Settings are not configured")?
        .clone();
    let http_client = req
        .app_data::<web::Data<reqwest::Client>>()
        .ok_or("Http client is not configured")?
        .clone();
    let cache = req
        .app_data::<web::Data<OAuthCache>>()
        .ok_or("OAuth cache is not configured")?
        .clone();

    let user = match cache.get(&token).await {
        Some(user) => user,
        None => {
            let user = fetch_user(http_client.get_ref(), settings.auth_url.as_str(), &token).await?;
            cache.insert(token, user.clone()).await;
            user
        }
    };
    tracing::debug!(user_id = %user.id, "Session resolved");

    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(())
}

pub async fn fetch_user(
    client: &reqwest::Client,
    auth_url: &str,
    token: &str,
) -> Result<models::User, String> {
    let resp = client
        .get(auth_url)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| {
            tracing::error!(target: "auth", error = %err, "OAuth request failed");
            "No response from OAuth server".to_string()
        })?;

    if !resp.status().is_success() {
        return Err("401 Unauthorized".to_string());
    }

    resp.json::<forms::UserForm>()
        .await
        .map_err(|_err| "can't parse the response body".to_string())?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> models::User {
        models::User {
            id: id.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            email_confirmed: true,
        }
    }

    #[test]
    fn bearer_scheme_is_required() {
        assert_eq!(try_extract_token("Bearer abc").unwrap(), "abc");
        assert!(try_extract_token("Basic abc").is_err());
        assert!(try_extract_token("Bearer").is_err());
        assert!(try_extract_token("Bearer   ").is_err());
    }

    #[tokio::test]
    async fn cached_users_expire() {
        let cache = OAuthCache::new(Duration::from_millis(20));
        cache.insert("t1".to_string(), user("u1")).await;

        assert_eq!(cache.get("t1").await.map(|u| u.id), Some("u1".to_string()));
        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(cache.get("t1").await.is_none());
        assert!(cache.get("unknown").await.is_none());
    }

    #[tokio::test]
    async fn insert_drops_expired_tokens() {
        let cache = OAuthCache::new(Duration::from_millis(20));
        cache.insert("t1".to_string(), user("u1")).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.insert("t2".to_string(), user("u2")).await;

        let entries = cache.entries.read().await;
        assert_eq!(entries.len(), 1);
        assert!(entries.contains_key("t2"));
    }
}
