//! バックエンドとやり取りする型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - DocumentSummary: 一覧の1行
//! - DocumentDetail: 1文書の抽出結果一式
//! - DeviceInfo: バックエンドの処理デバイス
//! - UploadResponse / DeleteResponse: 変更系APIの応答

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// 処理済み文書の識別子（ファイル名の拡張子抜き）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub stem: String,
}

impl DocumentSummary {
    pub fn new(stem: impl Into<String>) -> Self {
        Self { stem: stem.into() }
    }
}

/// `/api/pdf-list` の応答
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentListResponse {
    #[serde(default)]
    pub pdfs: Vec<DocumentSummary>,
}

/// 0以上の整数として読める数値（`2.0` も可）
fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32)
}

/// ページ番号: 正の整数以外は「なし」
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_count).filter(|page| *page > 0))
}

/// 件数: null や数値でない値は0
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_count).unwrap_or(0))
}

fn lenient_optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_count))
}

/// 図・表のメタデータ
///
/// 他のフィールド（bbox, type等）は読み捨てる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementMeta {
    #[serde(deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

/// 1文書の抽出結果
///
/// 数値のメタデータは寛容に読む（不正な値で詳細全体を失敗させない）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDetail {
    pub stem: String,
    #[serde(deserialize_with = "lenient_count")]
    pub figures_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub tables_count: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub elements_count: u32,
    pub annotated_pdf: Option<String>,
    pub markdown_path: Option<String>,
    pub figures: Vec<ElementMeta>,
    pub tables: Vec<ElementMeta>,
    pub figure_images: Vec<String>,
    pub table_images: Vec<String>,
}

/// 処理デバイス種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cuda,
    Cpu,
    #[default]
    #[serde(other)]
    Unknown,
}

/// `/api/device-info` の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(default)]
    pub device: Device,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub cuda_available: bool,
    #[serde(default)]
    pub device_count: Option<u32>,
}

impl DeviceInfo {
    /// 取得失敗時の値
    pub fn fallback() -> Self {
        Self::default()
    }

    /// 詳細画面の Device タイル表示
    pub fn tile_label(&self) -> &'static str {
        if self.device == Device::Cuda {
            "GPU"
        } else {
            "CPU"
        }
    }

    /// ヘッダーのバッジ表示
    pub fn badge(&self) -> &'static str {
        if self.cuda_available {
            "GPU"
        } else {
            "CPU"
        }
    }

    /// バッジ横の説明
    pub fn description(&self) -> String {
        if self.cuda_available {
            self.device_name
                .clone()
                .unwrap_or_else(|| "CUDA Device".to_string())
        } else {
            "CPU Processing".to_string()
        }
    }
}

/// 抽出モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMode {
    #[default]
    Fast,
    Accurate,
}

impl ExtractionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMode::Fast => "fast",
            ExtractionMode::Accurate => "accurate",
        }
    }
}

impl fmt::Display for ExtractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast" => Ok(ExtractionMode::Fast),
            "accurate" => Ok(ExtractionMode::Accurate),
            other => Err(format!("unknown extraction mode: {other}")),
        }
    }
}

/// アップロード結果（1ファイル分）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadResult {
    pub filename: Option<String>,
    pub stem: Option<String>,
    pub error: Option<String>,
    #[serde(deserialize_with = "lenient_optional_count")]
    pub figures_count: Option<u32>,
    #[serde(deserialize_with = "lenient_optional_count")]
    pub tables_count: Option<u32>,
    #[serde(deserialize_with = "lenient_optional_count")]
    pub elements_count: Option<u32>,
}

impl UploadResult {
    /// 成功した結果のstem
    pub fn succeeded_stem(&self) -> Option<&str> {
        match (&self.stem, &self.error) {
            (Some(stem), None) => Some(stem.as_str()),
            _ => None,
        }
    }

    /// 表示用の名前（ファイル名 > stem）
    pub fn display_name(&self) -> &str {
        self.filename
            .as_deref()
            .or(self.stem.as_deref())
            .unwrap_or("(unknown file)")
    }
}

/// `/api/upload` の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub results: Vec<UploadResult>,
}

impl UploadResponse {
    /// 最初に成功したファイルのstem
    pub fn first_success(&self) -> Option<&str> {
        self.results.iter().find_map(UploadResult::succeeded_stem)
    }

    /// 失敗したファイル
    pub fn failures(&self) -> impl Iterator<Item = &UploadResult> {
        self.results.iter().filter(|r| r.error.is_some())
    }
}

/// `/api/delete` の応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(default, alias = "ok")]
    pub success: bool,
    #[serde(default)]
    pub deleted: Option<String>,
}
