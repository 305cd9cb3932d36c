//! 対話モード
//!
//! 一覧から文書を選んで詳細を表示し、削除やアップロードを行う。
//! 操作の失敗は表示するだけでループは続ける。

use crate::commands::{self, Client, DeleteOutcome};
use crate::display;
use crate::error::Result;
use dialoguer::{Input, Select};
use pdf_extract_common::ExtractionMode;
use std::path::PathBuf;

/// 一覧画面のメニュー項目
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    Document(String),
    Upload,
    Refresh,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> String {
        match self {
            MenuItem::Document(stem) => format!("📄 {}", stem),
            MenuItem::Upload => "⬆ PDFをアップロード".to_string(),
            MenuItem::Refresh => "🔄 一覧を更新".to_string(),
            MenuItem::Quit => "終了".to_string(),
        }
    }
}

/// メニューを組み立て、アクティブ行の位置を返す
pub fn build_menu(controller: &Client) -> (Vec<MenuItem>, usize) {
    let list = controller.session().list_view();
    let default = list.rows().iter().position(|r| r.active).unwrap_or(0);
    let mut items: Vec<MenuItem> = list
        .rows()
        .iter()
        .map(|r| MenuItem::Document(r.stem.clone()))
        .collect();
    items.extend([MenuItem::Upload, MenuItem::Refresh, MenuItem::Quit]);
    (items, default)
}

/// 空白区切りのパス入力を分解
pub fn parse_paths(input: &str) -> Vec<PathBuf> {
    input.split_whitespace().map(PathBuf::from).collect()
}

pub async fn run(
    controller: &mut Client,
    default_mode: ExtractionMode,
    preview_lines: usize,
) -> Result<()> {
    commands::start(controller).await;
    println!("{}\n", display::device_line(controller.session().device()));

    loop {
        let (items, default) = build_menu(controller);
        let labels: Vec<String> = items.iter().map(MenuItem::label).collect();
        let choice = Select::new()
            .with_prompt("文書を選択")
            .items(&labels)
            .default(default)
            .interact()?;

        match &items[choice] {
            MenuItem::Document(stem) => document_menu(controller, stem, preview_lines).await?,
            MenuItem::Upload => upload_prompt(controller, default_mode, preview_lines).await?,
            MenuItem::Refresh => {
                if !controller.refresh_list().await {
                    eprintln!("⚠ 一覧を取得できませんでした");
                }
            }
            MenuItem::Quit => break,
        }
    }
    Ok(())
}

async fn document_menu(controller: &mut Client, stem: &str, preview_lines: usize) -> Result<()> {
    commands::show(controller, stem, preview_lines).await;

    let actions = ["戻る", "🗑 削除"];
    let choice = Select::new()
        .with_prompt(stem)
        .items(&actions)
        .default(0)
        .interact()?;

    if choice == 1 && commands::delete(controller, stem, false).await? == DeleteOutcome::Deleted {
        commands::print_detail(controller, preview_lines);
    }
    Ok(())
}

async fn upload_prompt(
    controller: &mut Client,
    default_mode: ExtractionMode,
    preview_lines: usize,
) -> Result<()> {
    let input: String = Input::new()
        .with_prompt("PDFファイルのパス（空白区切り）")
        .allow_empty(true)
        .interact_text()?;
    let paths = parse_paths(&input);

    let modes = [ExtractionMode::Fast, ExtractionMode::Accurate];
    let default = modes.iter().position(|m| *m == default_mode).unwrap_or(0);
    let mode_choice = Select::new()
        .with_prompt("抽出モード")
        .items(&modes)
        .default(default)
        .interact()?;

    let files = match commands::read_files(&paths).await {
        Ok(files) => files,
        Err(e) => {
            eprintln!("✖ {}", e);
            return Ok(());
        }
    };

    // 0件ならController側で拒否される。失敗は表示済み
    commands::upload(controller, &files, modes[mode_choice], preview_lines).await;
    Ok(())
}
