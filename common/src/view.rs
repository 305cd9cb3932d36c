//! 表示用ビューモデル
//!
//! 状態から画面に出す内容を組み立てる純粋な射影。
//! ブラウザ(Leptos)もCLIもここで作った値を描画するだけにする。

use crate::protocol::output_href;
use crate::selection::SelectionState;
use crate::types::{DeviceInfo, DocumentDetail, ElementMeta};

/// 一覧が空のときの表示
pub const EMPTY_LIST_MESSAGE: &str = "No PDFs processed yet";
/// Markdownプレビュー読込中の表示
pub const MARKDOWN_LOADING: &str = "Loading markdown...";
/// Markdownプレビュー失敗時の表示
pub const MARKDOWN_ERROR: &str = "Error loading markdown content";

/// 削除確認の文言
pub fn delete_confirmation(stem: &str) -> String {
    format!("Delete processed outputs for \"{}\"? This cannot be undone.", stem)
}

/// 削除成功の通知
pub fn deleted_notice(stem: &str) -> String {
    format!("Deleted \"{}\" successfully.", stem)
}

/// 詳細取得失敗の表示
pub fn detail_error(message: &str) -> String {
    format!("Error loading PDF details: {}", message)
}

/// 一覧の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub stem: String,
    pub active: bool,
}

/// 一覧表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// プレースホルダ表示
    Empty,
    Rows(Vec<ListRow>),
}

impl ListView {
    /// 選択状態から一覧を作る
    ///
    /// 未選択のときは先頭行をアクティブ表示にする（状態は変えない）。
    pub fn project(state: &SelectionState) -> Self {
        let documents = state.documents();
        if documents.is_empty() {
            return ListView::Empty;
        }

        let current = state.current_stem();
        let rows = documents
            .iter()
            .enumerate()
            .map(|(index, doc)| ListRow {
                stem: doc.stem.clone(),
                active: current == Some(doc.stem.as_str()) || (index == 0 && current.is_none()),
            })
            .collect();
        ListView::Rows(rows)
    }

    pub fn rows(&self) -> &[ListRow] {
        match self {
            ListView::Empty => &[],
            ListView::Rows(rows) => rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ListView::Empty)
    }
}

/// 統計タイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTile {
    pub label: &'static str,
    pub value: String,
    /// Font Awesome のアイコン名
    pub icon: &'static str,
}

/// ダウンロードリンク
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub label: &'static str,
    /// バックエンドが返した出力パス
    pub path: String,
    pub href: String,
    pub primary: bool,
}

/// ギャラリー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKind {
    Figures,
    Tables,
}

impl GalleryKind {
    fn item_label(&self) -> &'static str {
        match self {
            GalleryKind::Figures => "Figure",
            GalleryKind::Tables => "Table",
        }
    }

    fn heading_label(&self) -> &'static str {
        match self {
            GalleryKind::Figures => "Figures",
            GalleryKind::Tables => "Tables",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GalleryKind::Figures => "fa-images",
            GalleryKind::Tables => "fa-table",
        }
    }
}

/// ギャラリーの1枚
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    pub title: String,
    pub image_path: String,
    pub image_href: String,
    pub page_caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub kind: GalleryKind,
    pub heading: String,
    pub entries: Vec<GalleryEntry>,
}

impl Gallery {
    /// 画像パスとメタデータを添字で対応付ける
    ///
    /// メタデータが足りない分は空として扱う。画像が無ければ None。
    pub fn project(kind: GalleryKind, images: &[String], meta: &[ElementMeta]) -> Option<Self> {
        if images.is_empty() {
            return None;
        }

        let entries = images
            .iter()
            .enumerate()
            .map(|(index, path)| {
                let page = meta.get(index).and_then(|m| m.page).filter(|p| *p > 0);
                GalleryEntry {
                    title: format!("{} {}", kind.item_label(), index + 1),
                    image_path: path.clone(),
                    image_href: output_href(path),
                    page_caption: page.map(|p| format!("Page {}", p)),
                }
            })
            .collect();

        Some(Self {
            kind,
            heading: format!("{} ({})", kind.heading_label(), images.len()),
            entries,
        })
    }
}

/// 詳細表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub stem: String,
    pub tiles: Vec<StatTile>,
    pub downloads: Vec<DownloadLink>,
    pub figures: Option<Gallery>,
    pub tables: Option<Gallery>,
    /// プレビュー対象のMarkdown（相対パス）
    pub markdown_path: Option<String>,
}

impl DetailView {
    pub fn project(detail: &DocumentDetail, device: &DeviceInfo) -> Self {
        let tiles = vec![
            StatTile {
                label: "Figures",
                value: detail.figures_count.to_string(),
                icon: "fa-images",
            },
            StatTile {
                label: "Tables",
                value: detail.tables_count.to_string(),
                icon: "fa-table",
            },
            StatTile {
                label: "Total Elements",
                value: detail.elements_count.to_string(),
                icon: "fa-list",
            },
            StatTile {
                label: "Device",
                value: device.tile_label().to_string(),
                icon: "fa-microchip",
            },
        ];

        let mut downloads = Vec::new();
        if let Some(path) = &detail.annotated_pdf {
            downloads.push(DownloadLink {
                label: "Download Annotated PDF",
                path: path.clone(),
                href: output_href(path),
                primary: true,
            });
        }
        if let Some(path) = &detail.markdown_path {
            downloads.push(DownloadLink {
                label: "Download Markdown",
                path: path.clone(),
                href: output_href(path),
                primary: false,
            });
        }

        Self {
            stem: detail.stem.clone(),
            tiles,
            downloads,
            figures: Gallery::project(GalleryKind::Figures, &detail.figure_images, &detail.figures),
            tables: Gallery::project(GalleryKind::Tables, &detail.table_images, &detail.tables),
            markdown_path: detail.markdown_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Device, DocumentSummary};

    fn state_with(stems: &[&str]) -> SelectionState {
        let mut state = SelectionState::new();
        state.replace_list(stems.iter().map(|s| DocumentSummary::new(*s)).collect());
        state
    }

    fn active_stems(view: &ListView) -> Vec<&str> {
        view.rows().iter().filter(|r| r.active).map(|r| r.stem.as_str()).collect()
    }

    #[test]
    fn test_empty_list_is_placeholder() {
        let view = ListView::project(&SelectionState::new());
        assert!(view.is_empty());
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_first_row_active_when_nothing_selected() {
        let state = state_with(&["a", "b"]);
        let view = ListView::project(&state);
        assert_eq!(active_stems(&view), vec!["a"]);
        // 表示だけで状態は変わらない
        assert_eq!(state.current_stem(), None);
    }

    #[test]
    fn test_selected_row_active() {
        let mut state = state_with(&["a", "b", "c"]);
        state.select("c");
        assert_eq!(active_stems(&ListView::project(&state)), vec!["c"]);
    }

    #[test]
    fn test_selection_outside_list_marks_nothing() {
        let mut state = state_with(&["a", "b"]);
        state.select("ghost");
        assert!(active_stems(&ListView::project(&state)).is_empty());
    }

    #[test]
    fn test_gallery_with_fewer_meta_than_images() {
        let detail = DocumentDetail {
            stem: "paper".into(),
            figures: vec![ElementMeta { page: Some(2) }],
            figure_images: vec![
                "paper/figures/1.png".into(),
                "paper/figures/2.png".into(),
                "paper/figures/3.png".into(),
            ],
            ..Default::default()
        };
        let view = DetailView::project(&detail, &DeviceInfo::fallback());
        let gallery = view.figures.expect("figures gallery");

        assert_eq!(gallery.heading, "Figures (3)");
        assert_eq!(gallery.entries.len(), 3);
        assert_eq!(gallery.entries[0].page_caption.as_deref(), Some("Page 2"));
        assert!(gallery.entries[1].page_caption.is_none());
        assert!(gallery.entries[2].page_caption.is_none());
        assert_eq!(gallery.entries[2].title, "Figure 3");
        assert_eq!(gallery.entries[2].image_href, "/output/paper/figures/3.png");
        assert!(view.tables.is_none());
    }

    #[test]
    fn test_page_zero_has_no_caption() {
        let gallery = Gallery::project(
            GalleryKind::Tables,
            &["t.png".to_string()],
            &[ElementMeta { page: Some(0) }],
        )
        .unwrap();
        assert_eq!(gallery.entries[0].title, "Table 1");
        assert!(gallery.entries[0].page_caption.is_none());
    }

    #[test]
    fn test_tiles_and_downloads() {
        let detail = DocumentDetail {
            stem: "paper".into(),
            figures_count: 4,
            tables_count: 2,
            elements_count: 31,
            annotated_pdf: Some("paper/paper_layout.pdf".into()),
            ..Default::default()
        };
        let device = DeviceInfo {
            device: Device::Cuda,
            cuda_available: true,
            ..Default::default()
        };
        let view = DetailView::project(&detail, &device);

        let values: Vec<_> = view.tiles.iter().map(|t| (t.label, t.value.as_str())).collect();
        assert_eq!(
            values,
            vec![("Figures", "4"), ("Tables", "2"), ("Total Elements", "31"), ("Device", "GPU")]
        );
        assert_eq!(view.downloads.len(), 1);
        assert_eq!(view.downloads[0].href, "/output/paper/paper_layout.pdf");
        assert!(view.markdown_path.is_none());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            delete_confirmation("a"),
            "Delete processed outputs for \"a\"? This cannot be undone."
        );
        assert_eq!(deleted_notice("a"), "Deleted \"a\" successfully.");
        assert_eq!(detail_error("PDF not found"), "Error loading PDF details: PDF not found");
    }
}
