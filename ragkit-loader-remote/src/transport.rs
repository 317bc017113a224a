use ragkit_core::RagKitError;

/// Transport-level send attempts before giving up on a request, per remote
/// loader (spec.md §4.2's remote loaders all share this shape).
const MAX_SEND_ATTEMPTS: u32 = 3;

/// Sends a request built fresh by `build` on every attempt, retrying
/// transport-level failures (connection reset, DNS, timeout) up to
/// [`MAX_SEND_ATTEMPTS`] times with a `warn!` log on each retry. Non-2xx
/// responses are not retried here — the caller decides how to handle those.
pub(crate) async fn send_with_retry<F>(url: &str, mut build: F) -> Result<reqwest::Response, RagKitError>
where
    F: FnMut() -> reqwest::RequestBuilder,
{
    let mut attempt = 1;
    loop {
        match build().send().await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < MAX_SEND_ATTEMPTS => {
                log::warn!("request to {url} failed ({e}), retrying (attempt {attempt}/{MAX_SEND_ATTEMPTS})");
                attempt += 1;
            }
            Err(e) => return Err(RagKitError::transport(url, None, e.to_string())),
        }
    }
}

/// Reads a non-2xx response's body for an error excerpt. Reading the body
/// is itself best-effort: if it fails, logs a `warn!` and falls back to an
/// empty string rather than masking the original status-code failure.
pub(crate) async fn error_body(response: reqwest::Response, url: &str) -> String {
    match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::warn!("failed to read error response body from {url}: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exhausts_retries_and_returns_a_transport_error() {
        let client = reqwest::Client::new();
        let url = "http://127.0.0.1:1";
        let result = send_with_retry(url, || client.get(url)).await;
        assert!(matches!(result, Err(RagKitError::Transport { .. })));
    }
}
