//! Browser plumbing: local storage, DOM events and `fetch`.

use airwatch_core::geocode::GeocodeRequest;
use airwatch_core::reading::decode_readings;
use airwatch_core::theme::THEME_KEY;
use airwatch_core::{
    FetchError, GeocodeError, PreferencesError, Reading, ThemeChanged, ThemeStore,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AbortSignal, CustomEvent, CustomEventInit, Request, RequestInit, RequestMode, Response, Storage,
};

/// DOM event fired on `window` after every theme switch.
pub const THEME_CHANGED_EVENT: &str = "themeChanged";

/// Requests still pending after this are aborted.
const FETCH_TIMEOUT_MS: u32 = 10_000;

fn js_error(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// The `theme` key of `window.localStorage`.
pub struct LocalStorageThemeStore;

impl LocalStorageThemeStore {
    fn storage() -> Result<Storage, PreferencesError> {
        let window = web_sys::window()
            .ok_or_else(|| PreferencesError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| PreferencesError::Unavailable(js_error(&e)))?
            .ok_or_else(|| PreferencesError::Unavailable("localStorage disabled".to_string()))
    }
}

impl ThemeStore for LocalStorageThemeStore {
    fn load(&self) -> Result<Option<String>, PreferencesError> {
        Self::storage()?
            .get_item(THEME_KEY)
            .map_err(|e| PreferencesError::Unavailable(js_error(&e)))
    }

    fn save(&mut self, value: &str) -> Result<(), PreferencesError> {
        Self::storage()?
            .set_item(THEME_KEY, value)
            .map_err(|e| PreferencesError::Unavailable(js_error(&e)))
    }
}

/// Announces a theme switch so other scripts on the page can restyle.
/// `event.detail.theme` is `"light"` or `"dark"`.
pub fn dispatch_theme_changed(event: ThemeChanged) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let detail = match serde_wasm_bindgen::to_value(&event) {
        Ok(detail) => detail,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to encode theme event: {error}").into());
            return;
        }
    };

    let init = CustomEventInit::new();
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(THEME_CHANGED_EVENT, &init) {
        Ok(custom) => {
            if window.dispatch_event(&custom).is_err() {
                web_sys::console::error_1(&"Failed to dispatch themeChanged".into());
            }
        }
        Err(error) => web_sys::console::error_1(&error),
    }
}

/// `GET` `url` and return the status and body text. Aborted after
/// [`FETCH_TIMEOUT_MS`], body included.
async fn get_text(url: &str, mode: RequestMode) -> Result<(u16, String), String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(mode);
    opts.set_signal(Some(&AbortSignal::timeout_with_u32(FETCH_TIMEOUT_MS)));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| js_error(&e))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| js_error(&e))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error(&e))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|_| "Failed to read response".to_string())?;

    let status = response.status();
    let body_promise = response.text().map_err(|e| js_error(&e))?;
    let body = JsFuture::from(body_promise)
        .await
        .map_err(|e| js_error(&e))?
        .as_string()
        .unwrap_or_default();
    Ok((status, body))
}

const fn is_success(status: u16) -> bool {
    status >= 200 && status < 300
}

pub async fn fetch_readings(url: &str) -> Result<Vec<Reading>, FetchError> {
    let (status, body) = get_text(url, RequestMode::SameOrigin)
        .await
        .map_err(FetchError::Transport)?;
    if !is_success(status) {
        return Err(FetchError::Status(status));
    }
    decode_readings(&body)
}

fn search_url(base: &str, request: &GeocodeRequest) -> String {
    let query = request
        .params()
        .into_iter()
        .map(|(key, value)| {
            let encoded: String = js_sys::encode_uri_component(&value).into();
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base}?{query}")
}

pub async fn search_location(
    base: &str,
    request: &GeocodeRequest,
) -> Result<Option<airwatch_core::geocode::GeocodeResult>, GeocodeError> {
    let url = search_url(base, request);
    let (status, body) = get_text(&url, RequestMode::Cors)
        .await
        .map_err(GeocodeError::Transport)?;
    if !is_success(status) {
        return Err(GeocodeError::Status(status));
    }
    request.parse_response(&body)
}

/// Blocking browser alert.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if window.alert_with_message(message).is_err() {
            web_sys::console::error_1(&format!("Failed to show alert: {message}").into());
        }
    }
}

/// Seconds since the epoch, from the browser clock.
pub fn now_seconds() -> f64 {
    js_sys::Date::now() / 1000.0
}
