//! アップロードエリアコンポーネント

use crate::app::Actions;
use leptos::ev::{DragEvent, SubmitEvent};
use leptos::html::Input;
use leptos::prelude::*;
use pdf_extract_common::{ExtractionMode, Session};
use web_sys::{File, FileList};

fn collect_files(list: &FileList) -> Vec<File> {
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

fn mode_label(mode: ExtractionMode) -> &'static str {
    match mode {
        ExtractionMode::Fast => "Fast",
        ExtractionMode::Accurate => "Accurate",
    }
}

#[component]
pub fn UploadArea(session: RwSignal<Session>, actions: Actions) -> impl IntoView {
    let input_ref = NodeRef::<Input>::new();
    let (mode, set_mode) = signal(ExtractionMode::default());
    let (selected_count, set_selected_count) = signal(0u32);
    let (is_dragover, set_is_dragover) = signal(false);

    let refresh_count = move || {
        let count = input_ref
            .get_untracked()
            .and_then(|input| input.files())
            .map(|files| files.length())
            .unwrap_or(0);
        set_selected_count.set(count);
    };

    // ドロップしたファイルは入力欄に移し、送信はフォームから行う
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);

        let files = ev.data_transfer().and_then(|dt| dt.files());
        if let (Some(input), Some(files)) = (input_ref.get_untracked(), files) {
            input.set_files(Some(&files));
            refresh_count();
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let files = input_ref
            .get_untracked()
            .and_then(|input| input.files())
            .map(|list| collect_files(&list))
            .unwrap_or_default();

        // 入力欄は成功時だけクリアする
        let clear_input = move || {
            if let Some(input) = input_ref.get_untracked() {
                input.set_value("");
            }
            set_selected_count.set(0);
        };
        actions.upload(files, mode.get_untracked(), clear_input);
    };

    let failures = move || session.with(|s| s.upload().failures().to_vec());

    view! {
        <form class="upload-form" on:submit=on_submit>
            <div
                class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=move |_| set_is_dragover.set(false)
            >
                <div class="upload-icon">
                    <i class="fas fa-cloud-upload-alt fa-3x"></i>
                </div>
                <p>"Drag & drop PDF files here, or choose files"</p>
                <input
                    type="file"
                    id="fileInput"
                    accept=".pdf,application/pdf"
                    multiple=true
                    node_ref=input_ref
                    on:change=move |_| refresh_count()
                />
                <p class="text-muted">
                    {move || match selected_count.get() {
                        0 => "No files selected".to_string(),
                        n => format!("{} file(s) selected", n),
                    }}
                </p>
            </div>

            <div class="mode-options">
                {[ExtractionMode::Fast, ExtractionMode::Accurate]
                    .into_iter()
                    .map(|m| {
                        view! {
                            <label class="form-check">
                                <input
                                    type="radio"
                                    name="extractionMode"
                                    value=m.as_str()
                                    prop:checked=move || mode.get() == m
                                    on:change=move |_| set_mode.set(m)
                                />
                                {mode_label(m)}
                            </label>
                        }
                    })
                    .collect_view()}
            </div>

            <button type="submit" class="btn btn-primary">
                <i class="fas fa-cogs me-2"></i>
                "Process PDFs"
            </button>

            {move || {
                session
                    .with(|s| s.upload_error().map(|m| format!("Error processing files: {}", m)))
                    .map(|message| {
                        view! { <div class="alert alert-danger upload-error">{message}</div> }
                    })
            }}

            <Show when=move || !failures().is_empty()>
                <div class="alert alert-warning upload-failures">
                    <ul class="mb-0">
                        {move || {
                            failures()
                                .into_iter()
                                .map(|f| view! { <li>{f.display()}</li> })
                                .collect_view()
                        }}
                    </ul>
                </div>
            </Show>
        </form>
    }
}
