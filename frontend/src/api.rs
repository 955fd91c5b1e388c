use seed::prelude::*;
use shared::{ApiError, SearchRequest, SearchResponse};
use tracing::{debug, warn};

use crate::error::SearchError;

/// One `POST` round trip to the course endpoint.
pub async fn recommend_courses(
    endpoint: String,
    payload: SearchRequest,
) -> Result<SearchResponse, SearchError> {
    debug!(
        "fetching courses for lat={:.5} lon={:.5} distance={}km",
        payload.latitude, payload.longitude, payload.distance_km
    );
    let request = Request::new(endpoint)
        .method(Method::Post)
        .json(&payload)
        .map_err(|err| SearchError::Network(format!("{err:?}")))?;
    let response = request
        .fetch()
        .await
        .map_err(|err| SearchError::Network(format!("{err:?}")))?;

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!("could not read response body: {err:?}");
            String::new()
        }
    };
    interpret_response(status.code, &status.text, &body)
}

/// Turns a status line and raw body into the search outcome.
///
/// Non-2xx bodies are probed for a server-supplied `error` string; a body
/// that is not JSON falls back to the numeric status and its reason phrase.
pub fn interpret_response(
    code: u16,
    status_text: &str,
    body: &str,
) -> Result<SearchResponse, SearchError> {
    if (200..300).contains(&code) {
        let response: SearchResponse = serde_json::from_str(body)?;
        debug!(
            "courses received: {}",
            response.courses.as_ref().map_or(0, Vec::len)
        );
        return Ok(response);
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            let message = serde_json::from_value::<ApiError>(value)
                .ok()
                .map(|api| api.error)
                .filter(|message| !message.is_empty());
            Err(match message {
                Some(message) => SearchError::Server(message),
                None => SearchError::Status(code),
            })
        }
        Err(_) => Err(SearchError::StatusText {
            code,
            text: status_text.to_string(),
        }),
    }
}
