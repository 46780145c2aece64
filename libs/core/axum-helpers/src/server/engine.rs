use axum::Router;
use core_config::EngineOptions;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

use crate::errors::{method_not_allowed, not_found};
use crate::http::{create_gzip_layer, create_mirror_cors_layer, create_panic_layer};

/// Wraps a route table with the cross-cutting layers selected by `options`.
///
/// Layer order, innermost first:
/// - panic recovery (always)
/// - gzip compression (`gzip_enable`)
/// - CORS (`cors_enable`)
/// - per-request trace spans at DEBUG (`debug`); production mode omits them
///
/// Unknown paths get a JSON 404 and known paths with an unregistered method
/// get a JSON 405.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_engine;
/// use core_config::EngineOptions;
///
/// let options = EngineOptions { gzip_enable: true, ..Default::default() };
/// let engine = create_engine(Router::new().route("/ping", get(ping)), &options);
/// ```
pub fn create_engine(routes: Router, options: &EngineOptions) -> Router {
    let mut router = routes
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(create_panic_layer());

    if options.gzip_enable {
        router = router.layer(create_gzip_layer());
    }

    if options.cors_enable {
        router = router.layer(create_mirror_cors_layer());
    }

    if options.debug {
        router = router.layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        );
    }

    info!(
        debug = options.debug,
        gzip = options.gzip_enable,
        cors = options.cors_enable,
        "HTTP engine created"
    );

    router
}
