pub mod ai_service;
pub mod application_service;
pub mod auth_service;
pub mod captcha_service;
pub mod screening_service;

/// Boxed future used by the external-oracle traits so they stay object-safe
/// behind `Arc<dyn ...>`.
pub type BoxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;
