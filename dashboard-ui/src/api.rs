use alert_core::model::{Alert, HealthStatus};
use alert_core::report::{ReportPayload, SubmitOutcome};
use alert_core::wire;
use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::console;

const HEALTH_PATH: &str = "/health";
const ALERTS_PATH: &str = "/api/v1/alerts";
const REPORT_PATH: &str = "/api/v1/report";

const API_BASE_GLOBAL: &str = "ALERTRIX_API_BASE";
const DEFAULT_API_BASE: &str = "http://localhost:8000";

fn js_err(err: JsValue) -> String {
    format!("{err:?}")
}

fn log_error(message: &str) {
    console::error_1(&JsValue::from_str(message));
}

struct RawResponse {
    status: u16,
    ok: bool,
    body: String,
}

/// HTTP client for the Alertrix backend. Holds the base URL explicitly;
/// none of its operations ever surface a transport error to the caller.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Reads `window.ALERTRIX_API_BASE`, falling back to the local backend.
    pub fn from_window() -> Self {
        let configured = web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str(API_BASE_GLOBAL)).ok())
            .and_then(|value| value.as_string())
            .filter(|value| !value.trim().is_empty());
        ApiClient::new(configured.as_deref().unwrap_or(DEFAULT_API_BASE))
    }

    pub async fn check_health(&self) -> HealthStatus {
        match self.get_json(HEALTH_PATH).await {
            Ok(value) => wire::parse_health(&value),
            Err(err) => {
                log_error(&format!("Failed to fetch health status: {err}"));
                HealthStatus::default()
            }
        }
    }

    /// Latest alert snapshot, newest first. Degrades to an empty snapshot on
    /// any transport or shape failure so rendering is never blocked.
    pub async fn fetch_alerts(&self) -> Vec<Alert> {
        match self.get_json(ALERTS_PATH).await {
            Ok(value) => {
                let (mut alerts, dropped) = wire::parse_alerts(&value);
                for reason in dropped {
                    console::warn_1(&JsValue::from_str(&format!("Dropped alert: {reason}")));
                }
                wire::sort_newest_first(&mut alerts);
                alerts
            }
            Err(err) => {
                log_error(&format!("Failed to fetch alerts: {err}"));
                Vec::new()
            }
        }
    }

    pub async fn post_report(&self, payload: &ReportPayload) -> SubmitOutcome {
        let body = match serde_json::to_string(payload) {
            Ok(body) => body,
            Err(err) => {
                log_error(&format!("Failed to encode report: {err}"));
                return SubmitOutcome::rejected(None);
            }
        };

        match self.request("POST", REPORT_PATH, Some(body)).await {
            Ok(response) if response.ok => SubmitOutcome::accepted(),
            Ok(response) => {
                log_error(&format!("Report rejected with HTTP {}", response.status));
                SubmitOutcome::rejected(wire::extract_detail(&response.body).as_deref())
            }
            Err(err) => {
                log_error(&format!("Failed to post report: {err}"));
                SubmitOutcome::rejected(None)
            }
        }
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, String> {
        let response = self.request("GET", path, None).await?;
        if !response.ok {
            return Err(format!("HTTP {}", response.status));
        }
        serde_json::from_str(&response.body).map_err(|e| e.to_string())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<String>,
    ) -> Result<RawResponse, String> {
        let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;

        let init = web_sys::RequestInit::new();
        init.set_method(method);
        if let Some(body) = body {
            init.set_body(&JsValue::from_str(&body));
        }

        let url = format!("{}{}", self.base_url, path);
        let request =
            web_sys::Request::new_with_str_and_init(&url, &init).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let response: web_sys::Response = response
            .dyn_into()
            .map_err(|_| "fetch did not return a Response".to_string())?;

        let text = JsFuture::from(response.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;

        Ok(RawResponse {
            status: response.status(),
            ok: response.ok(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}
