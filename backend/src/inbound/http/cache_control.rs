//! Response header policies for badge and probe endpoints.

use actix_web::http::header;

use crate::domain::cache_max_age;

/// Probe responses must never be cached.
pub const NO_STORE: &str = "no-store";

/// `Cache-Control` value for badge responses, matching the `cacheSeconds`
/// hint in the body.
#[must_use]
pub fn badge_cache_control() -> String {
    cache_max_age()
}

/// Header tuples attached to every successful badge response.
///
/// shields.io fetches endpoint badges cross-origin, so the response allows any
/// origin for `GET`.
#[must_use]
pub fn badge_headers() -> [(header::HeaderName, String); 3] {
    [
        (header::CACHE_CONTROL, badge_cache_control()),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_owned()),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET".to_owned()),
    ]
}

/// Build the cache-control header tuple for probe responses.
#[must_use]
pub const fn no_store_header() -> (header::HeaderName, &'static str) {
    (header::CACHE_CONTROL, NO_STORE)
}
