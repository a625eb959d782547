use crate::middleware::authentication::get_header;
use actix_web::dev::ServiceRequest;

const TOKEN_COOKIE: &str = "access_token";

fn find_token(cookies: &str) -> Option<String> {
    cookies.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == TOKEN_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let token = match get_header::<String>(req, "cookie")?
        .as_deref()
        .and_then(find_token)
    {
        Some(token) => token,
        None => return Ok(false),
    };

    tracing::debug!("Found access_token in cookies");
    super::f_oauth::login(req, token).await?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_access_token_among_cookies() {
        assert_eq!(
            find_token("theme=dark; access_token=abc123; lang=en").as_deref(),
            Some("abc123")
        );
        assert_eq!(find_token("access_token=xyz").as_deref(), Some("xyz"));
    }

    #[test]
    fn ignores_other_or_empty_cookies() {
        assert!(find_token("theme=dark").is_none());
        assert!(find_token("access_token=").is_none());
        assert!(find_token("my_access_token=abc").is_none());
    }
}
