use serde::Deserialize;
use shared::Coordinate;
use wasm_bindgen::prelude::{JsValue, wasm_bindgen};
use wasm_bindgen_futures::JsFuture;

use crate::error::GeolocationError;

#[wasm_bindgen(module = "/geolocation.js")]
extern "C" {
    #[wasm_bindgen(js_name = geolocationSupported)]
    fn geolocation_supported() -> bool;
    #[wasm_bindgen(js_name = currentPosition)]
    fn current_position_js() -> js_sys::Promise;
}

#[derive(Deserialize)]
struct Fix {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct FixFailure {
    code: u16,
}

pub fn is_supported() -> bool {
    geolocation_supported()
}

/// One-shot position request; resolves exactly once.
pub async fn current_position() -> Result<Coordinate, GeolocationError> {
    match JsFuture::from(current_position_js()).await {
        Ok(value) => serde_wasm_bindgen::from_value::<Fix>(value)
            .map(|fix| Coordinate::new(fix.lat, fix.lon))
            .map_err(|err| {
                tracing::error!("unreadable position payload: {err}");
                GeolocationError::Unknown
            }),
        Err(value) => Err(failure_code(value)),
    }
}

fn failure_code(value: JsValue) -> GeolocationError {
    match serde_wasm_bindgen::from_value::<FixFailure>(value) {
        Ok(failure) => GeolocationError::from_code(failure.code),
        Err(_) => GeolocationError::Unknown,
    }
}
