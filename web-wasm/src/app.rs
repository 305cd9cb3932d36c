//! メインアプリケーションコンポーネント

use crate::api::WebStore;
use crate::components::{
    detail_panel::DetailPanel,
    document_list::DocumentList,
    header::Header,
    progress_bar::ProgressBar,
    upload_area::UploadArea,
};
use crate::theme_store;
use gloo::console;
use gloo::dialogs::{alert, confirm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use pdf_extract_common::view::delete_confirmation;
use pdf_extract_common::{DocumentStore, ExtractionMode, Session};
use web_sys::File;

/// 画面操作
///
/// ストア呼び出しを await し、結果を `Session` に反映する。
/// 同時に走った操作は調停しない（詳細表示は世代番号で最後の選択が勝つ）。
#[derive(Clone, Copy)]
pub struct Actions {
    store: StoredValue<WebStore>,
    session: RwSignal<Session>,
}

impl Actions {
    pub fn new(store: WebStore, session: RwSignal<Session>) -> Self {
        Self {
            store: StoredValue::new(store),
            session,
        }
    }

    /// 起動時: デバイス情報と一覧
    pub fn start(self) {
        spawn_local(async move {
            let device = self.store.get_value().fetch_device_info().await;
            self.session.update(|s| s.set_device(device));
            self.refresh_list().await;
        });
    }

    pub fn select(self, stem: String) {
        spawn_local(async move {
            self.show_details(stem).await;
        });
    }

    /// 確認のうえ削除
    pub fn delete(self, stem: String) {
        if !confirm(&delete_confirmation(&stem)) {
            return;
        }

        spawn_local(async move {
            let result = self.store.get_value().delete_document(&stem).await;
            match self.session.try_update(|s| s.complete_delete(&stem, result)) {
                Some(Ok(())) => {
                    self.refresh_list().await;
                }
                Some(Err(e)) => {
                    console::error!(format!("Delete error: {}", e));
                    alert(&format!("Failed to delete: {}", e.user_message()));
                }
                None => {}
            }
        });
    }

    /// アップロード
    ///
    /// 成功したら `on_success`（ファイル入力のクリア）を呼び、一覧を更新して
    /// 最初に成功した文書を表示する。
    pub fn upload<F>(self, files: Vec<File>, mode: ExtractionMode, on_success: F)
    where
        F: FnOnce() + 'static,
    {
        match self.session.try_update(|s| s.begin_upload(files.len())) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                alert(&e.user_message());
                return;
            }
            None => return,
        }

        spawn_local(async move {
            let result = self.store.get_value().upload_documents(&files, mode).await;
            match self.session.try_update(|s| s.complete_upload(result)) {
                Some(Ok(selected)) => {
                    if self.session.with_untracked(|s| s.upload().clears_input()) {
                        on_success();
                    }
                    self.refresh_list().await;
                    if let Some(stem) = selected {
                        self.show_details(stem).await;
                    }
                }
                Some(Err(e)) => {
                    console::error!(format!("Upload error: {}", e));
                    alert(&format!("Error processing files: {}", e.user_message()));
                }
                None => {}
            }
        });
    }

    /// 一覧の再取得（失敗時は以前の一覧を残す）
    async fn refresh_list(self) {
        let result = self.store.get_value().fetch_document_list().await;
        if let Err(e) = &result {
            console::error!(format!("Error loading PDF list: {}", e));
        }
        self.session.update(|s| s.complete_list(result));
    }

    /// 詳細を取得し、続けてMarkdownプレビューを読み込む
    async fn show_details(self, stem: String) {
        let Some(ticket) = self.session.try_update(|s| s.begin_select(&stem)) else {
            return;
        };

        let store = self.store.get_value();
        let result = store.fetch_document_detail(&stem).await;
        if let Err(e) = &result {
            console::error!(format!("Error loading PDF details: {}", e));
        }

        let markdown = self
            .session
            .try_update(|s| s.complete_detail(ticket, result))
            .flatten();
        if let Some(markdown) = markdown {
            let text = store.fetch_output_text(markdown.path()).await;
            if let Err(e) = &text {
                console::error!(format!("Error loading markdown: {}", e));
            }
            self.session.update(|s| s.complete_markdown(markdown, text));
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let theme = RwSignal::new(theme_store::load_theme());
    theme_store::apply_theme(theme.get_untracked());

    let store = match WebStore::from_location() {
        Ok(store) => store,
        Err(e) => {
            console::error!(e.to_string());
            return view! {
                <div class="container">
                    <div class="alert alert-danger">{e.user_message()}</div>
                </div>
            }
            .into_any();
        }
    };

    let session = RwSignal::new(Session::new());
    let actions = Actions::new(store, session);
    actions.start();

    view! {
        <div class="container">
            <Header theme=theme session=session />

            <UploadArea session=session actions=actions />

            <Show when=move || session.with(|s| s.processing_visible())>
                <ProgressBar session=session />
            </Show>

            <Show when=move || session.with(|s| s.results_visible())>
                <div class="row results-section">
                    <div class="col-md-4">
                        <DocumentList session=session actions=actions />
                    </div>
                    <div class="col-md-8">
                        <DetailPanel session=session actions=actions />
                    </div>
                </div>
            </Show>

            <Show when=move || session.with(|s| s.empty_state_visible())>
                <div class="empty-state text-center text-muted">
                    <i class="fas fa-file-pdf fa-4x mb-3"></i>
                    <p>"Upload PDF files to extract figures, tables and text"</p>
                </div>
            </Show>
        </div>
    }
    .into_any()
}
