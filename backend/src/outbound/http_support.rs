//! Transport helpers shared by the reqwest adapters.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};

/// User-agent sent on every outbound request.
pub(crate) const USER_AGENT: &str = concat!("pokedex-backend/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest client with the shared user-agent and request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Append path segments to `base`, percent-encoding each one.
///
/// A trailing slash on `base` is ignored so `https://host/api/v2/` and
/// `https://host/api/v2` resolve to the same endpoint.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, String> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| format!("base url {base} cannot carry path segments"))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Drain a response into its status and body bytes.
pub(crate) async fn read_response(
    response: Response,
) -> Result<(StatusCode, Vec<u8>), reqwest::Error> {
    let status = response.status();
    let body = response.bytes().await?;
    Ok((status, body.to_vec()))
}

/// Render a non-success status with a short body preview.
pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    }
}

/// Whether the status means the upstream gave up waiting.
pub(crate) fn is_timeout_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT
    )
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        format!("{preview}...")
    } else {
        compact
    }
}
