use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use storage::models::{Principal, Role};

use crate::error::WebError;

/// Configured API keys and the principal each one authenticates as.
#[derive(Clone, Default)]
pub struct ApiKeys {
    keys: Arc<HashMap<String, Principal>>,
}

impl ApiKeys {
    /// Parses `role:key` entries separated by commas. A bare key is an admin
    /// key; entries with an unknown role are skipped.
    pub fn from_comma_separated(keys_str: &str) -> Self {
        let mut keys = HashMap::new();

        for (index, entry) in keys_str
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
        {
            let (role, key) = match entry.split_once(':') {
                Some((role, key)) => match Role::parse(role) {
                    Some(role) => (role, key.trim()),
                    None => {
                        tracing::warn!("Ignoring API key entry {} with unknown role", index + 1);
                        continue;
                    }
                },
                None => (Role::Admin, entry),
            };

            if key.is_empty() {
                continue;
            }

            let name = match role {
                Role::Admin => format!("admin-key-{}", index + 1),
                Role::Registrar => format!("registrar-key-{}", index + 1),
            };
            keys.insert(key.to_string(), Principal::new(name, role));
        }

        Self {
            keys: Arc::new(keys),
        }
    }

    pub fn principal(&self, key: &str) -> Option<&Principal> {
        self.keys.get(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Middleware state: the key set plus the role a route requires.
#[derive(Clone)]
pub struct AuthGate {
    api_keys: ApiKeys,
    required: Role,
}

impl AuthGate {
    pub fn admin(api_keys: ApiKeys) -> Self {
        Self {
            api_keys,
            required: Role::Admin,
        }
    }

    pub fn registrar(api_keys: ApiKeys) -> Self {
        Self {
            api_keys,
            required: Role::Registrar,
        }
    }

    fn permits(&self, principal: &Principal) -> bool {
        match self.required {
            Role::Admin => principal.role.can_administer(),
            Role::Registrar => principal.role.can_manage_registrations(),
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Resolves the bearer key to a [`Principal`], checks its role and makes it
/// available to handlers as a request extension.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let Some(principal) = bearer_token(&req).and_then(|key| gate.api_keys.principal(key)) else {
        tracing::warn!("Invalid API key attempt");
        return Err(WebError::Unauthorized);
    };

    if !gate.permits(principal) {
        tracing::warn!(principal = %principal, "API key lacks the required role");
        return Err(WebError::Forbidden);
    }

    req.extensions_mut().insert(principal.clone());
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::post,
    };
    use tower::ServiceExt;

    fn keys() -> ApiKeys {
        ApiKeys::from_comma_separated("root-key, registrar:desk-key, judge:nope")
    }

    async fn whoami(Extension(principal): Extension<Principal>) -> String {
        principal.to_string()
    }

    fn app(gate: AuthGate) -> Router {
        Router::new()
            .route("/", post(whoami))
            .route_layer(middleware::from_fn_with_state(gate, require_auth))
    }

    fn request(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_parses_roles_and_bare_keys() {
        let keys = keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.principal("root-key").unwrap().role, Role::Admin);
        assert_eq!(keys.principal("desk-key").unwrap().role, Role::Registrar);
        assert!(keys.principal("nope").is_none());
    }

    #[test]
    fn test_empty_configuration_has_no_keys() {
        assert!(ApiKeys::from_comma_separated(" , ").is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_is_unauthorized() {
        let response = app(AuthGate::registrar(keys()))
            .oneshot(request(None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_key_is_unauthorized() {
        let response = app(AuthGate::registrar(keys()))
            .oneshot(request(Some("guess")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_registrar_key_cannot_reach_admin_routes() {
        let response = app(AuthGate::admin(keys()))
            .oneshot(request(Some("desk-key")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_registrar_key_reaches_registration_routes() {
        let response = app(AuthGate::registrar(keys()))
            .oneshot(request(Some("desk-key")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_key_passes_every_gate() {
        for gate in [AuthGate::admin(keys()), AuthGate::registrar(keys())] {
            let response = app(gate).oneshot(request(Some("root-key"))).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
    }
}
