//! Greeting route.

/// Plain-text greeting at the root path.
pub async fn index() -> &'static str {
    "Hello, World!"
}
