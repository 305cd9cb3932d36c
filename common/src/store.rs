//! リモートストアの抽象とコントローラ
//!
//! `DocumentStore` はバックエンドAPIの呼び出し口。ブラウザ(fetch)とCLI(reqwest)で
//! 実装を差し替える。`Controller` はストア呼び出しを順に await し、結果を
//! `Session` に反映する。自動リトライはしない。

use crate::error::Result;
use crate::session::Session;
use crate::types::{
    DeleteResponse, DeviceInfo, DocumentDetail, DocumentSummary, ExtractionMode, UploadResponse,
};

/// バックエンドAPI
///
/// WASMでも使うので Send は要求しない。
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// アップロードするファイルの表現（ブラウザなら `web_sys::File`）
    type File;

    /// 失敗時はフォールバック値を返す
    async fn fetch_device_info(&self) -> DeviceInfo;

    async fn fetch_document_list(&self) -> Result<Vec<DocumentSummary>>;

    async fn fetch_document_detail(&self, stem: &str) -> Result<DocumentDetail>;

    /// `/output/{path}` のテキスト
    async fn fetch_output_text(&self, path: &str) -> Result<String>;

    async fn upload_documents(
        &self,
        files: &[Self::File],
        mode: ExtractionMode,
    ) -> Result<UploadResponse>;

    async fn delete_document(&self, stem: &str) -> Result<DeleteResponse>;
}

/// ストア呼び出しの順序付け
pub struct Controller<S> {
    store: S,
    session: Session,
}

impl<S: DocumentStore> Controller<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 起動時: デバイス情報と一覧を取得（一覧取得の成否を返す）
    pub async fn start(&mut self) -> bool {
        let device = self.store.fetch_device_info().await;
        tracing::debug!("backend device: {:?}", device.device);
        self.session.set_device(device);
        self.refresh_list().await
    }

    /// 一覧の再取得（失敗しても以前の一覧を残し、false を返す）
    pub async fn refresh_list(&mut self) -> bool {
        let result = self.store.fetch_document_list().await;
        let ok = result.is_ok();
        self.session.complete_list(result);
        ok
    }

    /// 文書を選択して詳細を表示
    ///
    /// 一覧にないstemでも取得を試みる。Markdownプレビューは詳細の後に読み込む。
    pub async fn select(&mut self, stem: &str) {
        let ticket = self.session.begin_select(stem);
        let result = self.store.fetch_document_detail(stem).await;
        if let Err(e) = &result {
            tracing::warn!("detail for {} failed: {}", stem, e);
        }

        if let Some(markdown) = self.session.complete_detail(ticket, result) {
            let text = self.store.fetch_output_text(markdown.path()).await;
            self.session.complete_markdown(markdown, text);
        }
    }

    /// 削除して一覧を更新
    pub async fn delete(&mut self, stem: &str) -> Result<()> {
        let result = self.store.delete_document(stem).await;
        self.session.complete_delete(stem, result)?;
        self.refresh_list().await;
        Ok(())
    }

    /// アップロードして一覧を更新し、最初に成功した文書を表示
    ///
    /// 自動選択したstemを返す。
    pub async fn upload(
        &mut self,
        files: &[S::File],
        mode: ExtractionMode,
    ) -> Result<Option<String>> {
        self.session.begin_upload(files.len())?;
        tracing::info!("uploading {} file(s) in {} mode", files.len(), mode);

        let result = self.store.upload_documents(files, mode).await;
        let selected = self.session.complete_upload(result)?;

        self.refresh_list().await;
        if let Some(stem) = &selected {
            self.select(stem).await;
        }
        Ok(selected)
    }
}
