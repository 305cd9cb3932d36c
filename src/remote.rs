//! reqwestによるバックエンドAPI呼び出し
//!
//! 応答の解釈は pdf_extract_common::protocol に任せ、ここでは送受信だけを行う。

use crate::config::parse_server_url;
use crate::error::{AppError, Result};
use pdf_extract_common::protocol::{self, FORM_CONTENT_TYPE, UPLOAD_FILES_FIELD, UPLOAD_MODE_FIELD};
use pdf_extract_common::{
    DeleteResponse, DeviceInfo, DocumentDetail, DocumentStore, DocumentSummary, Endpoints, Error,
    ExtractionMode, UploadResponse,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// アップロードするPDF
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// ファイルを読み込む
    pub async fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AppError::FileNotFound(path.display().to_string()));
        }
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.pdf".to_string());
        Ok(Self { file_name, bytes })
    }
}

pub struct HttpStore {
    client: reqwest::Client,
    endpoints: Endpoints,
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

impl HttpStore {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let endpoints = parse_server_url(server_url)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpClient(e.to_string()))?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn read(response: reqwest::Response) -> pdf_extract_common::Result<(u16, String)> {
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport)?;
        tracing::debug!("HTTP {} ({} bytes)", status, body.len());
        Ok((status, body))
    }

    async fn get(&self, url: Url) -> pdf_extract_common::Result<(u16, String)> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(transport)?;
        Self::read(response).await
    }
}

impl DocumentStore for HttpStore {
    type File = UploadFile;

    async fn fetch_device_info(&self) -> DeviceInfo {
        match self.get(self.endpoints.device_info()).await {
            Ok((status, body)) => protocol::parse_device_info(status, &body),
            Err(e) => {
                tracing::warn!("device info unavailable: {}", e);
                DeviceInfo::fallback()
            }
        }
    }

    async fn fetch_document_list(&self) -> pdf_extract_common::Result<Vec<DocumentSummary>> {
        let (status, body) = self.get(self.endpoints.pdf_list()).await?;
        protocol::parse_document_list(status, &body)
    }

    async fn fetch_document_detail(
        &self,
        stem: &str,
    ) -> pdf_extract_common::Result<DocumentDetail> {
        let (status, body) = self.get(self.endpoints.pdf_details(stem)).await?;
        protocol::parse_document_detail(status, &body)
    }

    async fn fetch_output_text(&self, path: &str) -> pdf_extract_common::Result<String> {
        let url = Url::parse(&self.endpoints.output(path))?;
        let (status, body) = self.get(url).await?;
        protocol::parse_output_text(status, body)
    }

    async fn upload_documents(
        &self,
        files: &[UploadFile],
        mode: ExtractionMode,
    ) -> pdf_extract_common::Result<UploadResponse> {
        let mut form = Form::new();
        for file in files {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str("application/pdf")
                .map_err(transport)?;
            form = form.part(UPLOAD_FILES_FIELD, part);
        }
        form = form.text(UPLOAD_MODE_FIELD, mode.as_str());

        let url = self.endpoints.upload();
        tracing::debug!("POST {} ({} files)", url, files.len());
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let (status, body) = Self::read(response).await?;
        protocol::parse_upload(status, &body)
    }

    async fn delete_document(&self, stem: &str) -> pdf_extract_common::Result<DeleteResponse> {
        let url = self.endpoints.delete();
        tracing::debug!("POST {} stem={}", url, stem);
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(protocol::delete_form_body(stem))
            .send()
            .await
            .map_err(transport)?;
        let (status, body) = Self::read(response).await?;
        protocol::parse_delete(status, &body)
    }
}
