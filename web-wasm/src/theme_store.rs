//! テーマの永続化（localStorage）
//!
//! 値はJSONではなく `light` / `dark` の生文字列で保存する。

use gloo::storage::{LocalStorage, Storage};
use pdf_extract_common::theme::THEME_STORAGE_KEY;
use pdf_extract_common::Theme;

/// 保存済みのテーマ（なければライト）
pub fn load_theme() -> Theme {
    let stored = LocalStorage::raw().get_item(THEME_STORAGE_KEY).ok().flatten();
    Theme::from_stored(stored.as_deref())
}

pub fn save_theme(theme: Theme) {
    if LocalStorage::raw().set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
        gloo::console::warn!("テーマを保存できませんでした");
    }
}

/// `<body data-theme="...">` に反映
pub fn apply_theme(theme: Theme) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let _ = body.set_attribute("data-theme", theme.as_str());
    }
}

/// 反映して保存
pub fn set_theme(theme: Theme) {
    apply_theme(theme);
    save_theme(theme);
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_theme_roundtrip() {
        set_theme(Theme::Dark);
        assert_eq!(load_theme(), Theme::Dark);

        let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
        assert_eq!(body.get_attribute("data-theme").as_deref(), Some("dark"));

        set_theme(Theme::Light);
        assert_eq!(load_theme(), Theme::Light);
    }

    #[wasm_bindgen_test]
    fn wasm_unknown_value_falls_back_to_light() {
        LocalStorage::raw().set_item(THEME_STORAGE_KEY, "sepia").unwrap();
        assert_eq!(load_theme(), Theme::Light);
        LocalStorage::delete(THEME_STORAGE_KEY);
    }
}
