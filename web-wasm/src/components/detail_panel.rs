//! 選択中PDFの詳細（統計・ダウンロード・ギャラリー・Markdownプレビュー）

use crate::app::Actions;
use leptos::prelude::*;
use pdf_extract_common::view::{
    self, DetailView, Gallery, StatTile, MARKDOWN_ERROR, MARKDOWN_LOADING,
};
use pdf_extract_common::{DetailPane, MarkdownPreview, Session};

#[component]
pub fn DetailPanel(session: RwSignal<Session>, actions: Actions) -> impl IntoView {
    // Markdownの読み込みではカードを作り直さない
    let pane = Memo::new(move |_| session.with(|s| (s.detail().clone(), s.detail_view())));

    view! {
        <div class="pdf-details">
            {move || {
                let (state, detail_view) = pane.get();
                match state {
                    DetailPane::Empty => ().into_any(),
                    DetailPane::Loading { stem } => {
                        view! {
                            <div class="text-center text-muted p-4">
                                <i class="fas fa-spinner fa-spin me-2"></i>
                                {format!("Loading {}...", stem)}
                            </div>
                        }
                            .into_any()
                    }
                    DetailPane::Failed { message, .. } => {
                        view! {
                            <div class="alert alert-danger">
                                <i class="fas fa-exclamation-circle me-2"></i>
                                {view::detail_error(&message)}
                            </div>
                        }
                            .into_any()
                    }
                    DetailPane::Deleted { stem } => {
                        view! {
                            <div class="alert alert-success">
                                <i class="fas fa-check-circle me-2"></i>
                                {view::deleted_notice(&stem)}
                            </div>
                        }
                            .into_any()
                    }
                    DetailPane::Loaded(_) => match detail_view {
                        Some(detail) => {
                            view! { <DetailCard detail=detail session=session actions=actions /> }
                                .into_any()
                        }
                        None => ().into_any(),
                    },
                }
            }}
        </div>
    }
}

#[component]
fn DetailCard(detail: DetailView, session: RwSignal<Session>, actions: Actions) -> impl IntoView {
    let on_delete = {
        let stem = detail.stem.clone();
        move |_| actions.delete(stem.clone())
    };
    let has_markdown = detail.markdown_path.is_some();

    view! {
        <div class="card shadow-sm mb-4">
            <div class="card-header bg-primary-custom text-white">
                <h5 class="mb-0">
                    <i class="fas fa-file-pdf me-2"></i>
                    {detail.stem.clone()}
                </h5>
                <button
                    class="btn btn-sm btn-danger float-end"
                    title="Delete this processed PDF"
                    on:click=on_delete
                >
                    <i class="fas fa-trash-alt me-1"></i>
                    " Delete"
                </button>
            </div>
            <div class="card-body">
                <div class="row mb-4">
                    {detail
                        .tiles
                        .into_iter()
                        .map(|tile| view! { <StatCard tile=tile /> })
                        .collect_view()}
                </div>
                <div class="download-btn-group">
                    {detail
                        .downloads
                        .into_iter()
                        .map(|link| {
                            let class = if link.primary {
                                "btn btn-primary"
                            } else {
                                "btn btn-outline-primary"
                            };
                            view! {
                                <a href=link.href class=class download="">
                                    <i class="fas fa-download me-2"></i>
                                    {link.label}
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>

        {detail.figures.map(|gallery| view! { <GallerySection gallery=gallery /> })}
        {detail.tables.map(|gallery| view! { <GallerySection gallery=gallery /> })}

        {has_markdown.then(|| view! { <MarkdownCard session=session /> })}
    }
}

#[component]
fn StatCard(tile: StatTile) -> impl IntoView {
    view! {
        <div class="col-md-3">
            <div class="stat-card">
                <i class=format!("fas {} fa-2x text-primary mb-2", tile.icon)></i>
                <div class="stat-value">{tile.value}</div>
                <div class="stat-label">{tile.label}</div>
            </div>
        </div>
    }
}

#[component]
fn GallerySection(gallery: Gallery) -> impl IntoView {
    view! {
        <div class="card shadow-sm mb-4">
            <div class="card-header">
                <h5 class="mb-0">
                    <i class=format!("fas {} me-2", gallery.kind.icon())></i>
                    {gallery.heading}
                </h5>
            </div>
            <div class="card-body">
                <div class="image-gallery">
                    {gallery
                        .entries
                        .into_iter()
                        .map(|entry| {
                            view! {
                                <div class="image-item">
                                    <img
                                        src=entry.image_href
                                        alt=entry.title.clone()
                                        loading="lazy"
                                    />
                                    <div class="image-caption">
                                        <strong>{entry.title}</strong>
                                        {entry.page_caption.map(|caption| view! {
                                            <br />
                                            <small class="text-muted">{caption}</small>
                                        })}
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </div>
    }
}

#[component]
fn MarkdownCard(session: RwSignal<Session>) -> impl IntoView {
    view! {
        <div class="card shadow-sm">
            <div class="card-header">
                <h5 class="mb-0">
                    <i class="fas fa-file-code me-2"></i>
                    "Markdown Preview"
                </h5>
            </div>
            <div class="card-body">
                <div class="markdown-preview">
                    {move || match session.with(|s| s.markdown().clone()) {
                        MarkdownPreview::Hidden => String::new(),
                        MarkdownPreview::Loading => MARKDOWN_LOADING.to_string(),
                        MarkdownPreview::Loaded(text) => text,
                        MarkdownPreview::Failed => MARKDOWN_ERROR.to_string(),
                    }}
                </div>
            </div>
        </div>
    }
}
