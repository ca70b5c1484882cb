use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

use super::series_store::SeriesInput;

const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(12);

fn post<P, T>(url: &str, payload: &P) -> ChartResult<T>
where
    P: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let body = serde_json::to_vec(payload)
        .map_err(|e| ChartError::Submit(format!("request encode error: {e}")))?;
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ChartError::Submit(format!("client error: {e}")))?;

    debug!(url, body_len = body.len(), "submitting json request");
    client
        .post(url)
        .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(body)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| ChartError::Submit(format!("request error: {e}")))?
        .json()
        .map_err(|e| ChartError::Submit(format!("response decode error: {e}")))
}

/// POSTs `payload` as JSON to `url` and returns the parsed JSON response.
///
/// Network failures, non-2xx statuses and malformed bodies all surface as
/// [`ChartError::Submit`]; nothing is retried.
pub fn submit_json<P>(url: &str, payload: &P) -> ChartResult<serde_json::Value>
where
    P: Serialize + ?Sized,
{
    post(url, payload)
}

/// Like [`submit_json`], decoding the response as a list of series.
pub fn submit_series<P>(url: &str, payload: &P) -> ChartResult<Vec<SeriesInput>>
where
    P: Serialize + ?Sized,
{
    post(url, payload)
}
