use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::{And, NotForContentType, Predicate, SizeAbove};

/// Which responses get compressed: any size, except gRPC, images and SSE streams
pub type GzipPredicate =
    And<And<And<SizeAbove, NotForContentType>, NotForContentType>, NotForContentType>;

/// Creates a gzip-only compression layer.
///
/// Clients that do not send `Accept-Encoding: gzip` get the identity body.
/// Unlike the tower-http default, tiny bodies are compressed too.
pub fn create_gzip_layer() -> CompressionLayer<GzipPredicate> {
    let predicate = SizeAbove::new(0)
        .and(NotForContentType::GRPC)
        .and(NotForContentType::IMAGES)
        .and(NotForContentType::SSE);

    CompressionLayer::new()
        .no_br()
        .no_deflate()
        .no_zstd()
        .compress_when(predicate)
}
