//! バックエンドAPIの契約
//!
//! エンドポイントURLの組み立てと、HTTP応答（ステータス + ボディ文字列）の解釈。
//! 通信そのものは行わないので、ブラウザ(fetch)とCLI(reqwest)の両方から使う。

use crate::error::{Error, Result};
use crate::types::{
    DeleteResponse, DeviceInfo, DocumentDetail, DocumentListResponse, DocumentSummary,
    UploadResponse,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

/// マルチパートのファイルフィールド名
pub const UPLOAD_FILES_FIELD: &str = "files[]";
/// マルチパートの抽出モードフィールド名
pub const UPLOAD_MODE_FIELD: &str = "extraction_mode";
/// 削除リクエストのContent-Type
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// 削除失敗時にボディが空だった場合の文言
const DELETE_FAILED: &str = "Delete failed";

/// エンドポイント一覧
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// http(s) 以外、またはパスを持てないURLは受け付けない
    pub fn new(base: Url) -> Result<Self> {
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(Error::UnsupportedUrl(base.to_string()));
        }
        Ok(Self { base })
    }

    pub fn parse(base: &str) -> Result<Self> {
        Self::new(Url::parse(base)?)
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn device_info(&self) -> Url {
        self.with_segments(&["api", "device-info"])
    }

    pub fn pdf_list(&self) -> Url {
        self.with_segments(&["api", "pdf-list"])
    }

    /// stemはパスセグメントとしてエンコードされる（`/` も `%2F` になる）
    pub fn pdf_details(&self, stem: &str) -> Url {
        self.with_segments(&["api", "pdf-details", stem])
    }

    pub fn upload(&self) -> Url {
        self.with_segments(&["api", "upload"])
    }

    pub fn delete(&self) -> Url {
        self.with_segments(&["api", "delete"])
    }

    /// 出力ファイルの絶対URL
    ///
    /// パスは加工せず前置するだけ。
    pub fn output(&self, path: &str) -> String {
        let base = self.base.as_str().trim_end_matches('/');
        format!("{}{}", base, output_href(path))
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // baseは new() で検証済み
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// 出力ファイルの相対href（`/output/{path}`）
pub fn output_href(path: &str) -> String {
    format!("/output/{}", path)
}

/// 削除リクエストのボディ
pub fn delete_form_body(stem: &str) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .append_pair("stem", stem)
        .finish()
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// `error` フィールド（空文字・false・0・null は「エラーなし」）
fn error_field(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(msg) if !msg.is_empty() => Some(msg.clone()),
        Value::String(_) | Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

fn reported(status: u16, message: String) -> Error {
    if status == 404 {
        Error::NotFound(message)
    } else if is_success(status) {
        Error::ServerReported(message)
    } else {
        Error::Server { status, message }
    }
}

/// JSON応答の共通解釈
///
/// 1. JSONでない: 非2xxなら `Server`、2xxなら `Parse`
/// 2. `error` あり: 404 → `NotFound`、非2xx → `Server`、2xx → `ServerReported`
/// 3. 非2xx → `Server`
/// 4. 期待する型に変換できなければ `Parse`
pub fn interpret<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return Err(if is_success(status) {
                Error::Parse(format!("{}: {}", e, snippet(body)))
            } else {
                Error::Server { status, message: body.to_string() }
            });
        }
    };

    if let Some(message) = error_field(&value) {
        return Err(reported(status, message));
    }

    if !is_success(status) {
        return Err(Error::Server { status, message: body.to_string() });
    }

    serde_json::from_value(value).map_err(|e| Error::Parse(e.to_string()))
}

fn snippet(body: &str) -> String {
    const MAX: usize = 120;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// デバイス情報の解釈（失敗はフォールバック値に吸収）
pub fn parse_device_info(status: u16, body: &str) -> DeviceInfo {
    match interpret::<DeviceInfo>(status, body) {
        Ok(info) => info,
        Err(e) => {
            tracing::warn!("device info unavailable: {}", e);
            DeviceInfo::fallback()
        }
    }
}

pub fn parse_document_list(status: u16, body: &str) -> Result<Vec<DocumentSummary>> {
    interpret::<DocumentListResponse>(status, body).map(|r| r.pdfs)
}

pub fn parse_document_detail(status: u16, body: &str) -> Result<DocumentDetail> {
    interpret(status, body)
}

pub fn parse_upload(status: u16, body: &str) -> Result<UploadResponse> {
    interpret(status, body)
}

/// 削除応答の解釈
///
/// JSONでないボディはステータスに関わらず失敗とし、生テキストをメッセージにする。
pub fn parse_delete(status: u16, body: &str) -> Result<DeleteResponse> {
    let raw_message = || {
        if body.trim().is_empty() {
            DELETE_FAILED.to_string()
        } else {
            body.to_string()
        }
    };

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            return Err(if is_success(status) {
                Error::Parse(raw_message())
            } else {
                Error::Server { status, message: raw_message() }
            });
        }
    };

    if let Some(message) = error_field(&value) {
        return Err(reported(status, message));
    }

    if !is_success(status) {
        return Err(Error::Server { status, message: raw_message() });
    }

    serde_json::from_value(value).map_err(|_| Error::Parse(raw_message()))
}

/// 出力ファイル（テキスト）の解釈
pub fn parse_output_text(status: u16, body: String) -> Result<String> {
    if is_success(status) {
        Ok(body)
    } else {
        Err(Error::Server { status, message: body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::parse("http://127.0.0.1:5000").unwrap()
    }

    #[test]
    fn test_endpoint_paths() {
        let e = endpoints();
        assert_eq!(e.device_info().as_str(), "http://127.0.0.1:5000/api/device-info");
        assert_eq!(e.pdf_list().as_str(), "http://127.0.0.1:5000/api/pdf-list");
        assert_eq!(e.upload().as_str(), "http://127.0.0.1:5000/api/upload");
        assert_eq!(e.delete().as_str(), "http://127.0.0.1:5000/api/delete");
    }

    #[test]
    fn test_endpoint_with_base_path() {
        let e = Endpoints::parse("http://example.com/extract/").unwrap();
        assert_eq!(e.pdf_list().as_str(), "http://example.com/extract/api/pdf-list");
        assert_eq!(e.output("a/a.md"), "http://example.com/extract/output/a/a.md");
    }

    #[test]
    fn test_endpoint_rejects_non_http_base() {
        let err = Endpoints::parse("localhost:5000").unwrap_err();
        assert!(matches!(err, Error::UnsupportedUrl(_)));
        assert!(Endpoints::parse("data:text/plain,hello").is_err());
        assert!(Endpoints::parse("ftp://example.com/").is_err());
        assert!(Endpoints::parse("https://example.com").is_ok());
    }

    #[test]
    fn test_details_stem_is_encoded() {
        let e = endpoints();
        assert_eq!(
            e.pdf_details("my paper").as_str(),
            "http://127.0.0.1:5000/api/pdf-details/my%20paper"
        );
        assert_eq!(
            e.pdf_details("a/b").as_str(),
            "http://127.0.0.1:5000/api/pdf-details/a%2Fb"
        );
    }

    #[test]
    fn test_output_is_prefixed_only() {
        let e = endpoints();
        assert_eq!(
            e.output("paper/figures/fig 1.png"),
            "http://127.0.0.1:5000/output/paper/figures/fig 1.png"
        );
        assert_eq!(output_href("paper/paper.md"), "/output/paper/paper.md");
    }

    #[test]
    fn test_delete_form_body() {
        assert_eq!(delete_form_body("paper"), "stem=paper");
        assert_eq!(delete_form_body("a b&c"), "stem=a+b%26c");
    }

    #[test]
    fn test_interpret_detail_not_found() {
        let err = parse_document_detail(404, r#"{"error": "PDF not found"}"#).unwrap_err();
        assert!(matches!(err, Error::NotFound(ref m) if m == "PDF not found"));
    }

    #[test]
    fn test_interpret_error_on_success_status() {
        let err = parse_document_detail(200, r#"{"error": "corrupt output"}"#).unwrap_err();
        assert!(matches!(err, Error::ServerReported(ref m) if m == "corrupt output"));
    }

    #[test]
    fn test_interpret_falsy_error_is_ignored() {
        let detail = parse_document_detail(200, r#"{"stem": "a", "error": ""}"#).unwrap();
        assert_eq!(detail.stem, "a");
        assert!(parse_document_detail(200, r#"{"stem": "a", "error": false}"#).is_ok());
        assert!(parse_document_detail(200, r#"{"stem": "a", "error": 0}"#).is_ok());

        let response = parse_delete(200, r#"{"success": true, "error": null}"#).unwrap();
        assert!(response.success);
    }

    #[test]
    fn test_interpret_truthy_non_string_error() {
        let err = parse_upload(200, r#"{"error": true}"#).unwrap_err();
        assert!(matches!(err, Error::ServerReported(ref m) if m == "true"));
    }

    #[test]
    fn test_detail_with_malformed_metadata_still_parses() {
        let body = r#"{
            "stem": "a",
            "figures_count": null,
            "figures": [{"page": 2.0}, {"page": -1}],
            "figure_images": ["a/figures/1.png", "a/figures/2.png"]
        }"#;
        let detail = parse_document_detail(200, body).unwrap();
        assert_eq!(detail.figures_count, 0);
        assert_eq!(detail.figures[0].page, Some(2));
        assert_eq!(detail.figures[1].page, None);
    }

    #[test]
    fn test_interpret_server_error_with_field() {
        let err = parse_upload(400, r#"{"error": "No files provided"}"#).unwrap_err();
        assert!(matches!(err, Error::Server { status: 400, .. }));
        assert_eq!(err.user_message(), "No files provided");
    }

    #[test]
    fn test_interpret_non_json_success_is_parse_failure() {
        let err = parse_document_list(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_interpret_non_json_failure_is_server_error() {
        let err = parse_document_detail(502, "Bad Gateway").unwrap_err();
        assert!(matches!(
            err,
            Error::Server { status: 502, ref message } if message == "Bad Gateway"
        ));
    }

    #[test]
    fn test_document_list() {
        let body = r#"{"pdfs": [{"stem": "a", "output_dir": "a"}, {"stem": "b"}]}"#;
        let list = parse_document_list(200, body).unwrap();
        assert_eq!(list, vec![DocumentSummary::new("a"), DocumentSummary::new("b")]);

        let empty = parse_document_list(200, r#"{"pdfs": []}"#).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_device_info_fallback() {
        assert_eq!(parse_device_info(500, "Internal Server Error"), DeviceInfo::fallback());
        assert_eq!(parse_device_info(200, "not json"), DeviceInfo::fallback());

        let body = r#"{"device": "cuda", "device_name": "A100", "cuda_available": true}"#;
        let info = parse_device_info(200, body);
        assert!(info.cuda_available);
        assert_eq!(info.device_name.as_deref(), Some("A100"));
    }

    #[test]
    fn test_delete_success() {
        let response = parse_delete(200, r#"{"success": true}"#).unwrap();
        assert!(response.success);
    }

    #[test]
    fn test_delete_error_field() {
        let err = parse_delete(404, r#"{"error": "Not found"}"#).unwrap_err();
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn test_delete_raw_text_is_message() {
        let err = parse_delete(500, "Internal Server Error").unwrap_err();
        assert_eq!(err.user_message(), "Internal Server Error");

        let err = parse_delete(200, "<html>proxy page</html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert_eq!(err.user_message(), "<html>proxy page</html>");
    }

    #[test]
    fn test_delete_empty_body() {
        let err = parse_delete(500, "").unwrap_err();
        assert_eq!(err.user_message(), "Delete failed");
    }

    #[test]
    fn test_output_text() {
        assert_eq!(parse_output_text(200, "# Title".to_string()).unwrap(), "# Title");
        assert!(parse_output_text(404, "missing".to_string()).is_err());
    }
}
