//! アップロードの状態遷移
//!
//! `Idle -> Uploading -> Idle(成功) / Idle(失敗)`

use crate::error::{Error, Result};
use crate::types::UploadResponse;

/// ファイル単位の失敗
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

impl FileFailure {
    pub fn display(&self) -> String {
        format!("{}: {}", self.file_name, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UploadPhase {
    #[default]
    Idle,
    Uploading { file_count: usize },
    /// 完了（一部ファイルの失敗は許容）
    Succeeded {
        selected: Option<String>,
        failures: Vec<FileFailure>,
    },
    /// 失敗（メッセージはそのまま表示する）
    Failed { message: String },
}

impl UploadPhase {
    pub fn is_uploading(&self) -> bool {
        matches!(self, UploadPhase::Uploading { .. })
    }

    /// ファイル選択欄をクリアすべきか（成功時のみ）
    pub fn clears_input(&self) -> bool {
        matches!(self, UploadPhase::Succeeded { .. })
    }

    pub fn failures(&self) -> &[FileFailure] {
        match self {
            UploadPhase::Succeeded { failures, .. } => failures,
            _ => &[],
        }
    }

    /// 送信開始
    ///
    /// ファイル未選択なら通信せずに拒否する。
    pub fn begin(&mut self, file_count: usize) -> Result<()> {
        if file_count == 0 {
            return Err(Error::NoFilesSelected);
        }
        *self = UploadPhase::Uploading { file_count };
        Ok(())
    }

    /// 応答を反映し、自動選択するstemを返す
    pub fn complete(&mut self, result: Result<UploadResponse>) -> Result<Option<String>> {
        match result {
            Ok(response) => {
                let selected = response.first_success().map(str::to_string);
                let failures = response
                    .failures()
                    .map(|r| FileFailure {
                        file_name: r.display_name().to_string(),
                        message: r.error.clone().unwrap_or_default(),
                    })
                    .collect();
                *self = UploadPhase::Succeeded {
                    selected: selected.clone(),
                    failures,
                };
                Ok(selected)
            }
            Err(e) => {
                *self = UploadPhase::Failed {
                    message: e.user_message(),
                };
                Err(e)
            }
        }
    }
}
