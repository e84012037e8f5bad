use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;

pub const STAFF_HEADER: &str = "X-User-ID";

/// Id of the staff member making the request.
///
/// Authentication happens upstream; the gateway forwards the authenticated
/// user in `X-User-ID` and this service records it as `createdBy`.
#[derive(Debug, Clone)]
pub struct StaffId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for StaffId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let staff_id = parts
            .headers
            .get(STAFF_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Missing X-User-ID header")))?;

        tracing::Span::current().record("user_id", staff_id);

        Ok(StaffId(staff_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<StaffId, AppError> {
        let (mut parts, _) = request.into_parts();
        StaffId::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn reads_staff_id_from_header() {
        let request = Request::builder()
            .header(STAFF_HEADER, "dr-patel")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.unwrap().0, "dr-patel");
    }

    #[tokio::test]
    async fn blank_header_is_unauthorized() {
        let request = Request::builder()
            .header(STAFF_HEADER, "   ")
            .body(())
            .unwrap();
        assert!(matches!(
            extract(request).await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
