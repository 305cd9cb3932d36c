//! ヘッダーコンポーネント（テーマ切り替え・デバイス表示）

use crate::theme_store;
use leptos::prelude::*;
use pdf_extract_common::{Session, Theme};

#[component]
pub fn Header(theme: RwSignal<Theme>, session: RwSignal<Session>) -> impl IntoView {
    let on_toggle = move |_| {
        let next = theme.get_untracked().toggled();
        theme_store::set_theme(next);
        theme.set(next);
    };

    let badge_class = move || {
        if session.with(|s| s.device().cuda_available) {
            "badge bg-success"
        } else {
            "badge bg-secondary"
        }
    };

    view! {
        <header class="header">
            <h1>
                <i class="fas fa-file-pdf me-2"></i>
                "PDF Extractor"
            </h1>
            <div class="header-status">
                <span class=badge_class>{move || session.with(|s| s.device().badge())}</span>
                <span class="device-name">
                    {move || session.with(|s| s.device().description())}
                </span>
                <button class="btn btn-sm theme-toggle" title="Toggle theme" on:click=on_toggle>
                    <i class=move || theme.get().toggle_icon()></i>
                </button>
            </div>
        </header>
    }
}
