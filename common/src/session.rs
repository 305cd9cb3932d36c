//! クライアントセッション状態
//!
//! 選択状態・詳細ペイン・Markdownプレビュー・アップロード状態・デバイス情報を
//! 1つにまとめ、ストア呼び出しの結果を純粋な状態遷移として反映する。
//!
//! 詳細取得ごとに世代番号を払い出し、古い世代の応答は捨てる
//! （選択を素早く切り替えても最後に選んだ文書が表示される）。

use crate::error::Result;
use crate::selection::SelectionState;
use crate::types::{DeleteResponse, DeviceInfo, DocumentDetail, DocumentSummary, UploadResponse};
use crate::upload::UploadPhase;
use crate::view::{DetailView, ListView};

/// 詳細ペインの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailPane {
    #[default]
    Empty,
    Loading { stem: String },
    Loaded(DocumentDetail),
    Failed { stem: String, message: String },
    /// 表示中の文書を削除した直後
    Deleted { stem: String },
}

impl DetailPane {
    /// このstemを表示（または取得中）しているか
    pub fn shows(&self, stem: &str) -> bool {
        match self {
            DetailPane::Empty => false,
            DetailPane::Loading { stem: s }
            | DetailPane::Failed { stem: s, .. }
            | DetailPane::Deleted { stem: s } => s == stem,
            DetailPane::Loaded(detail) => detail.stem == stem,
        }
    }
}

/// Markdownプレビューの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MarkdownPreview {
    #[default]
    Hidden,
    Loading,
    Loaded(String),
    Failed,
}

/// 詳細取得の払い出し券
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    generation: u64,
    stem: String,
}

/// Markdown取得の払い出し券
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownTicket {
    generation: u64,
    path: String,
}

impl MarkdownTicket {
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    selection: SelectionState,
    detail: DetailPane,
    markdown: MarkdownPreview,
    upload: UploadPhase,
    device: DeviceInfo,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    pub fn markdown(&self) -> &MarkdownPreview {
        &self.markdown
    }

    pub fn upload(&self) -> &UploadPhase {
        &self.upload
    }

    pub fn device(&self) -> &DeviceInfo {
        &self.device
    }

    pub fn set_device(&mut self, device: DeviceInfo) {
        self.device = device;
    }

    pub fn list_view(&self) -> ListView {
        ListView::project(&self.selection)
    }

    /// 取得済みの詳細があればビューモデルを返す
    pub fn detail_view(&self) -> Option<DetailView> {
        match &self.detail {
            DetailPane::Loaded(detail) => Some(DetailView::project(detail, &self.device)),
            _ => None,
        }
    }

    /// 処理中インジケータ
    pub fn processing_visible(&self) -> bool {
        self.upload.is_uploading()
    }

    /// 結果パネル（一覧 + 詳細）
    pub fn results_visible(&self) -> bool {
        !self.upload.is_uploading() && !self.selection.documents().is_empty()
    }

    /// 空状態の案内
    pub fn empty_state_visible(&self) -> bool {
        !self.upload.is_uploading() && self.selection.documents().is_empty()
    }

    /// 一覧取得の反映
    ///
    /// 失敗時は以前の一覧をそのまま残す。
    pub fn complete_list(&mut self, result: Result<Vec<DocumentSummary>>) {
        match result {
            Ok(documents) => self.selection.replace_list(documents),
            Err(e) => tracing::warn!("keeping previous document list: {}", e),
        }
    }

    /// 文書を選択し、詳細取得の券を払い出す
    pub fn begin_select(&mut self, stem: &str) -> DetailTicket {
        self.selection.select(stem);
        self.generation += 1;
        self.detail = DetailPane::Loading { stem: stem.to_string() };
        self.markdown = MarkdownPreview::Hidden;
        DetailTicket {
            generation: self.generation,
            stem: stem.to_string(),
        }
    }

    pub fn is_current(&self, ticket: &DetailTicket) -> bool {
        ticket.generation == self.generation
    }

    /// 詳細取得の反映
    ///
    /// 古い券なら何もしない。Markdownを読み込むべきときはその券を返す。
    pub fn complete_detail(
        &mut self,
        ticket: DetailTicket,
        result: Result<DocumentDetail>,
    ) -> Option<MarkdownTicket> {
        if !self.is_current(&ticket) {
            tracing::debug!("dropping stale detail response for {}", ticket.stem);
            return None;
        }

        match result {
            Ok(detail) => {
                let markdown = detail.markdown_path.clone().map(|path| MarkdownTicket {
                    generation: ticket.generation,
                    path,
                });
                self.markdown = if markdown.is_some() {
                    MarkdownPreview::Loading
                } else {
                    MarkdownPreview::Hidden
                };
                self.detail = DetailPane::Loaded(detail);
                markdown
            }
            Err(e) => {
                self.detail = DetailPane::Failed {
                    stem: ticket.stem,
                    message: e.user_message(),
                };
                self.markdown = MarkdownPreview::Hidden;
                None
            }
        }
    }

    /// Markdownプレビューの反映
    pub fn complete_markdown(&mut self, ticket: MarkdownTicket, result: Result<String>) {
        if ticket.generation != self.generation {
            return;
        }
        self.markdown = match result {
            Ok(text) => MarkdownPreview::Loaded(text),
            Err(e) => {
                tracing::warn!("markdown preview {} failed: {}", ticket.path, e);
                MarkdownPreview::Failed
            }
        };
    }

    /// 削除の反映
    ///
    /// 成功時: 選択中なら解除してから一覧から除く。表示中だった場合は
    /// 詳細ペインを削除通知に切り替え、取得中の詳細は破棄する。
    pub fn complete_delete(&mut self, stem: &str, result: Result<DeleteResponse>) -> Result<()> {
        result?;

        let was_selected = self.selection.clear_if_selected(stem);
        let was_displayed = self.detail.shows(stem);
        self.selection.remove(stem);

        if was_selected || was_displayed {
            self.generation += 1;
            self.detail = DetailPane::Deleted { stem: stem.to_string() };
            self.markdown = MarkdownPreview::Hidden;
        }
        tracing::debug!("deleted {} (selected: {})", stem, was_selected);
        Ok(())
    }

    /// アップロード開始
    pub fn begin_upload(&mut self, file_count: usize) -> Result<()> {
        self.upload.begin(file_count)
    }

    /// アップロード完了の反映（自動選択するstemを返す）
    pub fn complete_upload(&mut self, result: Result<UploadResponse>) -> Result<Option<String>> {
        self.upload.complete(result)
    }

    /// 直前のアップロード失敗メッセージ
    pub fn upload_error(&self) -> Option<&str> {
        match &self.upload {
            UploadPhase::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl From<Vec<DocumentSummary>> for Session {
    fn from(documents: Vec<DocumentSummary>) -> Self {
        let mut session = Session::new();
        session.selection.replace_list(documents);
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::UploadResult;

    fn session_with(stems: &[&str]) -> Session {
        Session::from(stems.iter().map(|s| DocumentSummary::new(*s)).collect::<Vec<_>>())
    }

    fn detail(stem: &str) -> DocumentDetail {
        DocumentDetail {
            stem: stem.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_panels_follow_list() {
        let empty = Session::new();
        assert!(empty.empty_state_visible());
        assert!(!empty.results_visible());

        let filled = session_with(&["a"]);
        assert!(!filled.empty_state_visible());
        assert!(filled.results_visible());
    }

    #[test]
    fn test_upload_hides_results() {
        let mut session = session_with(&["a"]);
        session.begin_upload(1).unwrap();
        assert!(session.processing_visible());
        assert!(!session.results_visible());
        assert!(!session.empty_state_visible());
    }

    #[test]
    fn test_stale_detail_is_dropped() {
        let mut session = session_with(&["a", "b"]);
        let first = session.begin_select("a");
        let second = session.begin_select("b");

        session.complete_detail(second, Ok(detail("b")));
        session.complete_detail(first, Ok(detail("a")));

        assert_eq!(session.detail(), &DetailPane::Loaded(detail("b")));
        assert_eq!(session.selection().current_stem(), Some("b"));
    }

    #[test]
    fn test_detail_failure_is_shown() {
        let mut session = session_with(&["a"]);
        let ticket = session.begin_select("a");
        session.complete_detail(ticket, Err(Error::NotFound("PDF not found".into())));
        assert_eq!(
            session.detail(),
            &DetailPane::Failed {
                stem: "a".into(),
                message: "PDF not found".into()
            }
        );
    }

    #[test]
    fn test_markdown_requested_after_detail() {
        let mut session = session_with(&["a"]);
        let ticket = session.begin_select("a");
        let md = session
            .complete_detail(
                ticket,
                Ok(DocumentDetail {
                    markdown_path: Some("a/a.md".into()),
                    ..detail("a")
                }),
            )
            .expect("markdown ticket");
        assert_eq!(md.path(), "a/a.md");
        assert_eq!(session.markdown(), &MarkdownPreview::Loading);

        session.complete_markdown(md, Ok("# A".into()));
        assert_eq!(session.markdown(), &MarkdownPreview::Loaded("# A".into()));
    }

    #[test]
    fn test_markdown_from_previous_selection_is_dropped() {
        let mut session = session_with(&["a", "b"]);
        let ticket = session.begin_select("a");
        let md = session
            .complete_detail(
                ticket,
                Ok(DocumentDetail {
                    markdown_path: Some("a/a.md".into()),
                    ..detail("a")
                }),
            )
            .unwrap();
        session.begin_select("b");
        session.complete_markdown(md, Ok("# A".into()));
        assert_eq!(session.markdown(), &MarkdownPreview::Hidden);
    }

    #[test]
    fn test_delete_selected() {
        let mut session = session_with(&["a", "b"]);
        let ticket = session.begin_select("a");
        session.complete_detail(ticket, Ok(detail("a")));

        session
            .complete_delete("a", Ok(DeleteResponse { success: true, deleted: None }))
            .unwrap();

        assert_eq!(session.selection().current_stem(), None);
        assert!(!session.selection().contains("a"));
        assert_eq!(session.detail(), &DetailPane::Deleted { stem: "a".into() });
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut session = session_with(&["a", "b"]);
        let ticket = session.begin_select("a");
        session.complete_detail(ticket, Ok(detail("a")));

        session.complete_delete("b", Ok(DeleteResponse::default())).unwrap();

        assert_eq!(session.selection().current_stem(), Some("a"));
        assert_eq!(session.detail(), &DetailPane::Loaded(detail("a")));
    }

    #[test]
    fn test_delete_drops_inflight_detail() {
        let mut session = session_with(&["a"]);
        let ticket = session.begin_select("a");
        session.complete_delete("a", Ok(DeleteResponse::default())).unwrap();
        session.complete_detail(ticket, Ok(detail("a")));
        assert_eq!(session.detail(), &DetailPane::Deleted { stem: "a".into() });
    }

    #[test]
    fn test_delete_failure_changes_nothing() {
        let mut session = session_with(&["a"]);
        session.begin_select("a");
        let err = session
            .complete_delete("a", Err(Error::Server { status: 500, message: "disk full".into() }))
            .unwrap_err();
        assert_eq!(err.user_message(), "disk full");
        assert_eq!(session.selection().current_stem(), Some("a"));
        assert!(session.selection().contains("a"));
    }

    #[test]
    fn test_failed_list_keeps_previous() {
        let mut session = session_with(&["a"]);
        session.complete_list(Err(Error::Transport("offline".into())));
        assert!(session.selection().contains("a"));

        session.complete_list(Ok(vec![]));
        assert!(session.selection().documents().is_empty());
    }

    #[test]
    fn test_upload_flow() {
        let mut session = Session::new();
        session.begin_upload(1).unwrap();
        assert!(session.processing_visible());

        let selected = session
            .complete_upload(Ok(UploadResponse {
                results: vec![UploadResult {
                    stem: Some("a".into()),
                    ..Default::default()
                }],
            }))
            .unwrap();
        assert_eq!(selected.as_deref(), Some("a"));
        assert!(!session.processing_visible());
        assert!(session.upload_error().is_none());
    }
}
