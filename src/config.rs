use crate::error::{AppError, Result};
use pdf_extract_common::{Endpoints, ExtractionMode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV: &str = "PDF_EXTRACT_SERVER";

/// サーバーURLの検証（http/https のみ）
pub fn parse_server_url(url: &str) -> Result<Endpoints> {
    Endpoints::parse(url).map_err(|e| AppError::InvalidServerUrl(format!("{} ({})", url, e)))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
    pub default_mode: ExtractionMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            // 抽出はサーバー側で数分かかることがある
            timeout_seconds: 120,
            default_mode: ExtractionMode::Fast,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AppError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("pdf-extract").join("config.json"))
    }

    /// 接続先URL
    ///
    /// 優先順位: コマンドライン > 環境変数 > 設定ファイル
    pub fn resolve_server(&self, cli_override: Option<&str>) -> String {
        if let Some(url) = cli_override {
            return url.to_string();
        }
        match std::env::var(SERVER_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.server_url.clone(),
        }
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        parse_server_url(&url)?;
        self.server_url = url;
        self.save()
    }
}
