//! 計算API連携

use futures::future::LocalBoxFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::error::CalcError;
use crate::models::{CalcResult, FormValues};

/// 計算エンドポイント
pub trait CalcClient {
    fn calculate(&self, values: &FormValues) -> LocalBoxFuture<'static, Result<CalcResult, CalcError>>;
}

/// `POST {base_url}/calculate` を fetch で呼ぶクライアント
pub struct HttpCalcClient {
    url: String,
}

impl HttpCalcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl CalcClient for HttpCalcClient {
    fn calculate(&self, values: &FormValues) -> LocalBoxFuture<'static, Result<CalcResult, CalcError>> {
        let url = self.url.clone();
        let values = *values;
        Box::pin(async move { post_calculate(&url, &values).await })
    }
}

async fn post_calculate(url: &str, values: &FormValues) -> Result<CalcResult, CalcError> {
    let body = serde_json::to_string(values).map_err(|e| CalcError::Request(e.to_string()))?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|e| CalcError::Request(format!("{:?}", e)))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| CalcError::Request(format!("{:?}", e)))?;

    let window = web_sys::window().ok_or_else(|| CalcError::Network("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| CalcError::Network(format!("{:?}", e)))?;

    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| CalcError::Decode("fetch did not return a Response".to_string()))?;

    if !resp.ok() {
        return Err(CalcError::Status(resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(|e| CalcError::Decode(format!("{:?}", e)))?)
        .await
        .map_err(|e| CalcError::Decode(format!("{:?}", e)))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| CalcError::Decode(e.to_string()))
}
