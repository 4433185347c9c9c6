// Fixed security headers applied to every response
use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

/// Allows Power BI iframes plus the Tailwind and jsDelivr CDNs.
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
script-src 'self' 'unsafe-inline' 'unsafe-eval' https://*.powerbi.com https://*.powerbigov.us https://cdn.tailwindcss.com; \
style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://cdn.tailwindcss.com; \
frame-src 'self' https://*.powerbi.com https://*.powerbigov.us; \
img-src 'self' data: https:; \
connect-src 'self' https://*.powerbi.com https://*.powerbigov.us; \
font-src 'self' data: https://cdn.jsdelivr.net https://cdn.tailwindcss.com;";

pub fn security_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
        (header::X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")),
        (header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
        (
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ),
    ]
}

/// Wrap every route and the fallback so the headers are set whatever the
/// handler or status code.
pub fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    security_headers()
        .into_iter()
        .fold(router, |router, (name, value)| {
            router.layer(SetResponseHeaderLayer::overriding(name, value))
        })
}
