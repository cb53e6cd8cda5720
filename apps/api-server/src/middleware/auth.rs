//! Bearer token identity extraction.

use std::future::{Ready, ready};
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};

use quill_core::domain::Actor;
use quill_core::ports::{AuthError, TokenService};

/// Resolve the acting identity from the `Authorization: Bearer` header.
pub fn authenticate(req: &HttpRequest) -> Result<Actor, AuthError> {
    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or(AuthError::MissingAuth)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    token_service.validate_token(token).map(Actor::from)
}

/// Identity extractor that never fails the request.
///
/// Whether an anonymous caller may proceed is the authorization gate's decision, so
/// a missing or invalid token simply yields `None`.
/// ```ignore
/// async fn create(identity: OptionalIdentity) -> AppResult<HttpResponse> {
///     state.posts.create(input, identity.actor()).await?;
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionalIdentity(pub Option<Actor>);

impl OptionalIdentity {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl FromRequest for OptionalIdentity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match authenticate(req) {
            Ok(actor) => ready(Ok(OptionalIdentity(Some(actor)))),
            Err(AuthError::MissingAuth) => ready(Ok(OptionalIdentity(None))),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                ready(Ok(OptionalIdentity(None)))
            }
        }
    }
}
