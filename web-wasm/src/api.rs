//! fetchによるバックエンドAPI呼び出し
//!
//! 応答の解釈は pdf_extract_common::protocol に任せる。

use pdf_extract_common::protocol::{self, FORM_CONTENT_TYPE, UPLOAD_FILES_FIELD, UPLOAD_MODE_FIELD};
use pdf_extract_common::{
    DeleteResponse, DeviceInfo, DocumentDetail, DocumentStore, DocumentSummary, Endpoints, Error,
    ExtractionMode, Result, UploadResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Headers, Request, RequestInit, RequestMode, Response};

fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value));
    Error::Transport(message)
}

fn browser_window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::Transport("window unavailable".into()))
}

/// ブラウザ用ストア（ページと同じオリジンのAPIを呼ぶ）
#[derive(Debug, Clone)]
pub struct WebStore {
    endpoints: Endpoints,
}

impl WebStore {
    pub fn new(endpoints: Endpoints) -> Self {
        Self { endpoints }
    }

    /// 現在のページのオリジンを基点にする
    pub fn from_location() -> Result<Self> {
        let window = browser_window()?;
        let origin = window.location().origin().map_err(js_error)?;
        Ok(Self::new(Endpoints::parse(&origin)?))
    }

    /// リクエストを送り、ステータスと本文を返す
    async fn send(url: &str, opts: &RequestInit) -> Result<(u16, String)> {
        let request = Request::new_with_str_and_init(url, opts).map_err(js_error)?;

        let window = browser_window()?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        Ok((resp.status(), text.as_string().unwrap_or_default()))
    }

    async fn get(url: &str) -> Result<(u16, String)> {
        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::SameOrigin);
        Self::send(url, &opts).await
    }
}

impl DocumentStore for WebStore {
    type File = File;

    async fn fetch_device_info(&self) -> DeviceInfo {
        match Self::get(self.endpoints.device_info().as_str()).await {
            Ok((status, body)) => protocol::parse_device_info(status, &body),
            Err(e) => {
                gloo::console::error!(format!("Error loading device info: {}", e));
                DeviceInfo::fallback()
            }
        }
    }

    async fn fetch_document_list(&self) -> Result<Vec<DocumentSummary>> {
        let (status, body) = Self::get(self.endpoints.pdf_list().as_str()).await?;
        protocol::parse_document_list(status, &body)
    }

    async fn fetch_document_detail(&self, stem: &str) -> Result<DocumentDetail> {
        let (status, body) = Self::get(self.endpoints.pdf_details(stem).as_str()).await?;
        protocol::parse_document_detail(status, &body)
    }

    async fn fetch_output_text(&self, path: &str) -> Result<String> {
        let (status, body) = Self::get(&self.endpoints.output(path)).await?;
        protocol::parse_output_text(status, body)
    }

    async fn upload_documents(
        &self,
        files: &[File],
        mode: ExtractionMode,
    ) -> Result<UploadResponse> {
        let form = FormData::new().map_err(js_error)?;
        for file in files {
            form.append_with_blob_and_filename(UPLOAD_FILES_FIELD, file, &file.name())
                .map_err(js_error)?;
        }
        form.append_with_str(UPLOAD_MODE_FIELD, mode.as_str())
            .map_err(js_error)?;

        // Content-Type（boundary付き）はブラウザが付ける
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_body(&form);

        let (status, body) = Self::send(self.endpoints.upload().as_str(), &opts).await?;
        protocol::parse_upload(status, &body)
    }

    async fn delete_document(&self, stem: &str) -> Result<DeleteResponse> {
        let headers = Headers::new().map_err(js_error)?;
        headers.set("Content-Type", FORM_CONTENT_TYPE).map_err(js_error)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::SameOrigin);
        opts.set_headers(&headers);
        opts.set_body(&JsValue::from_str(&protocol::delete_form_body(stem)));

        let (status, body) = Self::send(self.endpoints.delete().as_str(), &opts).await?;
        protocol::parse_delete(status, &body)
    }
}
