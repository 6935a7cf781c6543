use gloo_net::http::Request;
use serde::Deserialize;
use web_sys::RequestCredentials;

use crate::participant::Estado;
use crate::settings::API_BASE_URL;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        source: gloo_net::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        source: gloo_net::Error,
    },
}

/// Body of `POST /api/detalle/{id}/toggle`.
#[derive(Debug, Deserialize)]
pub struct ToggleResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub estado: Estado,
}

pub fn detalle_toggle_url(detalle_id: u32) -> String {
    format!("{}/api/detalle/{}/toggle", API_BASE_URL, detalle_id)
}

/// Flips the paid state of a detalle on the server and returns the state the
/// server ended up with.
pub async fn toggle_detalle(detalle_id: u32) -> Result<Estado, ApiError> {
    let url = detalle_toggle_url(detalle_id);
    let resp = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;

    if !resp.ok() {
        return Err(ApiError::Status {
            url,
            status: resp.status(),
        });
    }

    let body = resp
        .json::<ToggleResponse>()
        .await
        .map_err(|source| ApiError::Decode {
            url: url.clone(),
            source,
        })?;
    log::debug!(
        "detalle {} toggled: status={:?} estado={}",
        detalle_id,
        body.status,
        body.estado.label()
    );
    Ok(body.estado)
}

/// Fetches a server-rendered HTML fragment.
pub async fn fetch_fragment(url: &str) -> Result<String, ApiError> {
    let resp = Request::get(url)
        .credentials(RequestCredentials::Include)
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .map_err(|source| ApiError::Network {
            url: url.to_string(),
            source,
        })?;

    if !resp.ok() {
        return Err(ApiError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    resp.text().await.map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builds_toggle_url() {
        assert_eq!(detalle_toggle_url(42), "/api/detalle/42/toggle");
    }

    #[test]
    fn decodes_toggle_response() {
        let body: ToggleResponse =
            serde_json::from_str(r#"{"status": "ok", "estado": "Pagado"}"#).unwrap();
        assert_eq!(body.estado, Estado::Pagado);
        assert_eq!(body.status.as_deref(), Some("ok"));

        let body: ToggleResponse = serde_json::from_str(r#"{"estado": "Debe"}"#).unwrap();
        assert_eq!(body.estado, Estado::Debe);
    }

    #[test]
    fn rejects_unknown_estado() {
        assert!(serde_json::from_str::<ToggleResponse>(r#"{"estado": "Quizas"}"#).is_err());
        assert!(serde_json::from_str::<ToggleResponse>(r#"{"status": "ok"}"#).is_err());
    }

    #[test]
    fn status_error_message() {
        let err = ApiError::Status {
            url: "/movimientos?page=2".to_string(),
            status: 500,
        };
        assert_eq!(err.to_string(), "/movimientos?page=2 answered with HTTP 500");
    }
}
