use actix_web::dev::ServiceRequest;

/// Requests without credentials carry no user; handlers that need one
/// redirect to the login page.
#[tracing::instrument(name = "authenticate as anonym", skip(req))]
pub fn anonym(req: &mut ServiceRequest) -> Result<bool, String> {
    tracing::debug!(path = req.path(), "No session");
    Ok(true)
}
