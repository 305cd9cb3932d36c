//! ターミナル向け描画
//!
//! pdf_extract_common のビューモデルをテキストに変換する。

use pdf_extract_common::view::{self, Gallery, EMPTY_LIST_MESSAGE, MARKDOWN_ERROR, MARKDOWN_LOADING};
use pdf_extract_common::{
    DetailPane, DetailView, DeviceInfo, Endpoints, ListView, MarkdownPreview, Session, UploadPhase,
};
use std::fmt::Write;

/// デバイスバッジ
pub fn device_line(device: &DeviceInfo) -> String {
    format!("[{}] {}", device.badge(), device.description())
}

/// 一覧
pub fn render_list(list: &ListView) -> String {
    match list {
        ListView::Empty => format!("  {}\n", EMPTY_LIST_MESSAGE),
        ListView::Rows(rows) => rows
            .iter()
            .map(|row| format!("{} {}\n", if row.active { "▶" } else { " " }, row.stem))
            .collect(),
    }
}

/// 詳細ペイン全体（状態に応じた表示）
pub fn render_detail_pane(
    session: &Session,
    endpoints: &Endpoints,
    preview_lines: usize,
) -> String {
    match session.detail() {
        DetailPane::Empty => String::new(),
        DetailPane::Loading { stem } => format!("{} を読み込み中...\n", stem),
        DetailPane::Failed { message, .. } => format!("✖ {}\n", view::detail_error(message)),
        DetailPane::Deleted { stem } => format!("✔ {}\n", view::deleted_notice(stem)),
        DetailPane::Loaded(_) => {
            let mut out = session
                .detail_view()
                .map(|v| render_detail(&v, endpoints))
                .unwrap_or_default();
            out.push_str(&render_markdown(session.markdown(), preview_lines));
            out
        }
    }
}

/// 詳細カード
pub fn render_detail(detail: &DetailView, endpoints: &Endpoints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📄 {}", detail.stem);

    let tiles: Vec<String> = detail
        .tiles
        .iter()
        .map(|t| format!("{}: {}", t.label, t.value))
        .collect();
    let _ = writeln!(out, "  {}", tiles.join(" | "));

    for link in &detail.downloads {
        let _ = writeln!(out, "  ⬇ {}: {}", link.label, endpoints.output(&link.path));
    }

    for gallery in [&detail.figures, &detail.tables].into_iter().flatten() {
        out.push_str(&render_gallery(gallery, endpoints));
    }
    out
}

fn render_gallery(gallery: &Gallery, endpoints: &Endpoints) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", gallery.heading);
    for entry in &gallery.entries {
        let href = endpoints.output(&entry.image_path);
        match &entry.page_caption {
            Some(caption) => {
                let _ = writeln!(out, "  {} ({}): {}", entry.title, caption, href);
            }
            None => {
                let _ = writeln!(out, "  {}: {}", entry.title, href);
            }
        }
    }
    out
}

/// Markdownプレビュー（先頭 `max_lines` 行）
pub fn render_markdown(preview: &MarkdownPreview, max_lines: usize) -> String {
    match preview {
        MarkdownPreview::Hidden => String::new(),
        MarkdownPreview::Loading => format!("\nMarkdown Preview\n  {}\n", MARKDOWN_LOADING),
        MarkdownPreview::Failed => format!("\nMarkdown Preview\n  {}\n", MARKDOWN_ERROR),
        MarkdownPreview::Loaded(text) => {
            let mut out = String::from("\nMarkdown Preview\n");
            let total = text.lines().count();
            for line in text.lines().take(max_lines) {
                let _ = writeln!(out, "  │ {}", line);
            }
            if total > max_lines {
                let _ = writeln!(out, "  │ ... (残り{}行)", total - max_lines);
            }
            out
        }
    }
}

/// アップロード結果のうち失敗したファイル
pub fn render_upload_failures(phase: &UploadPhase) -> String {
    phase
        .failures()
        .iter()
        .map(|f| format!("  ⚠ {}\n", f.display()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_extract_common::{DocumentDetail, DocumentSummary, ElementMeta, SelectionState};

    fn endpoints() -> Endpoints {
        Endpoints::parse("http://localhost:5000").unwrap()
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&ListView::Empty), "  No PDFs processed yet\n");
    }

    #[test]
    fn test_render_list_marks_active() {
        let mut state = SelectionState::new();
        state.replace_list(vec![DocumentSummary::new("a"), DocumentSummary::new("b")]);
        state.select("b");
        assert_eq!(render_list(&ListView::project(&state)), "  a\n▶ b\n");
    }

    #[test]
    fn test_render_detail_uses_absolute_urls() {
        let detail = DocumentDetail {
            stem: "paper".into(),
            figures_count: 1,
            annotated_pdf: Some("paper/paper_layout.pdf".into()),
            figures: vec![ElementMeta { page: Some(4) }],
            figure_images: vec!["paper/figures/1.png".into()],
            ..Default::default()
        };
        let view = DetailView::project(&detail, &DeviceInfo::fallback());
        let text = render_detail(&view, &endpoints());

        assert!(text.contains("📄 paper"));
        assert!(text.contains("Figures: 1 | Tables: 0 | Total Elements: 0 | Device: CPU"));
        assert!(text.contains(
            "Download Annotated PDF: http://localhost:5000/output/paper/paper_layout.pdf"
        ));
        assert!(
            text.contains("Figure 1 (Page 4): http://localhost:5000/output/paper/figures/1.png")
        );
        assert!(!text.contains("Tables ("));
    }

    #[test]
    fn test_render_markdown_truncates() {
        let preview = MarkdownPreview::Loaded("one\ntwo\nthree".into());
        let text = render_markdown(&preview, 2);
        assert!(text.contains("│ one"));
        assert!(text.contains("│ two"));
        assert!(!text.contains("│ three"));
        assert!(text.contains("残り1行"));
    }

    #[test]
    fn test_render_markdown_failure() {
        let text = render_markdown(&MarkdownPreview::Failed, 10);
        assert!(text.contains("Error loading markdown content"));
        assert_eq!(render_markdown(&MarkdownPreview::Hidden, 10), "");
    }

    #[test]
    fn test_device_line() {
        assert_eq!(device_line(&DeviceInfo::fallback()), "[CPU] CPU Processing");
    }
}
