//! 処理中インジケータ

use leptos::prelude::*;
use pdf_extract_common::{Session, UploadPhase};

#[component]
pub fn ProgressBar(session: RwSignal<Session>) -> impl IntoView {
    let file_count = move || {
        session.with(|s| match s.upload() {
            UploadPhase::Uploading { file_count } => *file_count,
            _ => 0,
        })
    };

    view! {
        <div class="progress-container processing-section">
            <div class="progress-bar">
                <div class="progress-fill progress-indeterminate" />
            </div>
            <p class="progress-text">
                <i class="fas fa-spinner fa-spin me-2"></i>
                {move || {
                    format!("Processing {} file(s)... this may take a few minutes", file_count())
                }}
            </p>
        </div>
    }
}
