use std::convert::Infallible;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Method, Request, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use folio_core::api::routes::site;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    AppState,
    handlers::{
        health::{health_handler, ping_handler},
        theme::theme_stylesheet_handler,
    },
    infra::config::CorsConfig,
    routes,
};

/// Build the full router: site routes, the versioned API and the security
/// middleware stack.
///
/// `https_terminates_here` disables the HTTPS redirect for deployments that
/// accept TLS directly.
pub fn create_app(state: AppState, https_terminates_here: bool) -> Router {
    let versioned_api = routes::create_api_router();

    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        build_cors_layer(&state.config().cors)
    };

    let hsts_header_value =
        HeaderValue::from_str(&state.config().security.hsts.header_value())
            .ok();
    let trust_proxy_for_hsts = state.config().security.trust_proxy_headers;
    let hsts_layer =
        middleware::from_fn(move |req: Request<Body>, next: Next| {
            let header_value = hsts_header_value.clone();
            async move {
                let is_https = request_is_https(&req, trust_proxy_for_hsts);

                let mut response = next.run(req).await;
                if is_https && let Some(value) = header_value {
                    response
                        .headers_mut()
                        .insert(header::STRICT_TRANSPORT_SECURITY, value);
                }

                Ok::<Response, Infallible>(response)
            }
        });

    Router::new()
        .route(site::PING, get(ping_handler))
        .route(site::HEALTH, get(health_handler))
        .route(site::STYLESHEET, get(theme_stylesheet_handler))
        .merge(versioned_api)
        // Later layers wrap earlier ones; the HTTPS redirect runs first
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .layer(hsts_layer)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            move |State(app_state): State<AppState>,
                  req: Request<Body>,
                  next: Next| async move {
                let security = &app_state.config().security;
                let enforce_https =
                    security.enforce_https && !app_state.config().dev_mode;

                if !enforce_https
                    || https_terminates_here
                    || request_is_https(&req, security.trust_proxy_headers)
                {
                    return Ok::<_, Infallible>(next.run(req).await);
                }

                Ok::<_, Infallible>(https_redirect(&req))
            },
        ))
        .with_state(state)
}

fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter(|origin| origin.trim() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let restricted = !origins.is_empty();
    let allow_origin = if restricted {
        AllowOrigin::list(origins)
    } else {
        AllowOrigin::any()
    };

    let methods: Vec<Method> = cors
        .allowed_methods
        .iter()
        .filter_map(|method| Method::from_bytes(method.as_bytes()).ok())
        .collect();

    let headers: Vec<HeaderName> = cors
        .allowed_headers
        .iter()
        .filter_map(|name| HeaderName::from_bytes(name.as_bytes()).ok())
        .collect();

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::list(methods))
        .allow_headers(AllowHeaders::list(headers));

    // Credentials cannot be combined with a wildcard origin.
    if cors.allow_credentials && restricted {
        layer = layer.allow_credentials(true);
    }

    layer
}

fn request_is_https(req: &Request<Body>, trust_proxy: bool) -> bool {
    if trust_proxy {
        req.headers()
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("https"))
            .unwrap_or(false)
    } else {
        req.uri()
            .scheme()
            .map(|s| s.as_str().eq_ignore_ascii_case("https"))
            .unwrap_or(false)
    }
}

fn https_redirect(req: &Request<Body>) -> Response {
    let uri = req.uri();
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let https_url = format!(
        "https://{}{}{}",
        host,
        uri.path(),
        uri.query().map(|q| format!("?{q}")).unwrap_or_default()
    );

    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, https_url)])
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwarded_proto_is_only_trusted_when_configured() {
        let req = Request::builder()
            .uri("/theme.css")
            .header("x-forwarded-proto", "https")
            .body(Body::empty())
            .unwrap();

        assert!(request_is_https(&req, true));
        assert!(!request_is_https(&req, false));
    }

    #[test]
    fn redirect_keeps_path_and_query() {
        let req = Request::builder()
            .uri("/api/v1/themes?page=2")
            .header(header::HOST, "folio.test")
            .body(Body::empty())
            .unwrap();

        let response = https_redirect(&req);
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://folio.test/api/v1/themes?page=2"
        );
    }
}
