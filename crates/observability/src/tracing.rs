//! Span helpers shared by the runtime

/// Span for fetching and extracting a hotel page.
///
/// ```rust
/// use innkeeper_observability::fetch_span;
///
/// let span = fetch_span!("https://hotel.test/");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! fetch_span {
    ($url:expr) => {
        tracing::info_span!(
            "excerpt.fetch",
            http.url = %$url,
            excerpt.chars = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span for one chat-completion call.
///
/// ```rust
/// use innkeeper_observability::completion_span;
///
/// let span = completion_span!("groq", "llama-3.1-8b-instant", 3);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! completion_span {
    ($provider:expr, $model:expr, $messages:expr) => {
        tracing::info_span!(
            "llm.completion",
            llm.provider = %$provider,
            llm.model = %$model,
            llm.messages = $messages,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and log it.
pub fn record_error<E: std::fmt::Display + ?Sized>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record elapsed milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
