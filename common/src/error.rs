//! エラー型定義
//!
//! バックエンド呼び出しの失敗を4系統に分類する:
//! 通信失敗 / サーバー報告エラー（2xx + `error`）/ 非2xx / パース失敗

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// ネットワーク・DNS・タイムアウト
    #[error("Network error: {0}")]
    Transport(String),

    /// HTTP成功だがボディに `error` を含む
    #[error("{0}")]
    ServerReported(String),

    /// 404 + `error`
    #[error("{0}")]
    NotFound(String),

    /// 非2xxステータス
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// JSONを期待したが解釈できない
    #[error("Invalid response: {0}")]
    Parse(String),

    /// アップロード対象が0件
    #[error("Please select at least one PDF file")]
    NoFilesSelected,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// http(s) でないサーバーURL
    #[error("Unsupported server URL: {0}")]
    UnsupportedUrl(String),
}

impl Error {
    /// ユーザーに表示する文言
    ///
    /// サーバー由来のメッセージは加工せずそのまま返す。
    pub fn user_message(&self) -> String {
        match self {
            Error::ServerReported(msg) | Error::NotFound(msg) | Error::Parse(msg) => msg.clone(),
            Error::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// バックエンドまで到達できなかったか
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
