//! サブコマンドの実処理
//!
//! いずれも Controller を通してセッションを更新し、display で描画する。

use crate::display;
use crate::error::Result;
use crate::remote::{HttpStore, UploadFile};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use pdf_extract_common::view::{delete_confirmation, deleted_notice};
use pdf_extract_common::{Controller, Error, ExtractionMode};
use std::path::PathBuf;
use std::time::Duration;

pub type Client = Controller<HttpStore>;

/// 起動処理（一覧取得に失敗したら警告だけ出す）
pub async fn start(controller: &mut Client) {
    if !controller.start().await {
        eprintln!(
            "⚠ 一覧を取得できませんでした（サーバー: {}）",
            controller.store().endpoints().base()
        );
    }
}

pub fn print_list(controller: &Client) {
    println!("処理済みPDF:");
    print!("{}", display::render_list(&controller.session().list_view()));
}

pub fn print_detail(controller: &Client, preview_lines: usize) {
    let out = display::render_detail_pane(
        controller.session(),
        controller.store().endpoints(),
        preview_lines,
    );
    if !out.is_empty() {
        println!();
        print!("{}", out);
    }
}

/// 文書を選択して詳細を表示
pub async fn show(controller: &mut Client, stem: &str, preview_lines: usize) {
    controller.select(stem).await;
    print_detail(controller, preview_lines);
}

pub async fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(UploadFile::read(path).await?);
    }
    Ok(files)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let template = "{spinner:.cyan} {msg} [{elapsed}]";
    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// アップロード → 一覧更新 → 最初の成功結果を表示
///
/// 失敗はここで表示し、false を返す。
pub async fn upload(
    controller: &mut Client,
    files: &[UploadFile],
    mode: ExtractionMode,
    preview_lines: usize,
) -> bool {
    let pb = spinner(&format!("{}件のPDFを処理中 ({})...", files.len(), mode));
    let result = controller.upload(files, mode).await;
    pb.finish_and_clear();

    match result {
        Ok(selected) => {
            println!("✔ アップロード完了");
            print!("{}", display::render_upload_failures(controller.session().upload()));
            print_list(controller);
            if selected.is_some() {
                print_detail(controller, preview_lines);
            }
            true
        }
        Err(e @ Error::NoFilesSelected) => {
            eprintln!("✖ {}", e);
            false
        }
        Err(e) => {
            eprintln!("✖ Error processing files: {}", e.user_message());
            false
        }
    }
}

/// 削除の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
    /// 失敗（表示済み）
    Failed,
}

/// 削除（確認あり）
pub async fn delete(
    controller: &mut Client,
    stem: &str,
    skip_confirm: bool,
) -> Result<DeleteOutcome> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(delete_confirmation(stem))
            .default(false)
            .interact()?;
        if !confirmed {
            return Ok(DeleteOutcome::Cancelled);
        }
    }

    match controller.delete(stem).await {
        Ok(()) => {
            println!("✔ {}", deleted_notice(stem));
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            eprintln!("✖ Failed to delete: {}", e.user_message());
            Ok(DeleteOutcome::Failed)
        }
    }
}
