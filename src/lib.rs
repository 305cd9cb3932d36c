//! PDF抽出サービスのターミナルクライアント

pub mod browse;
pub mod cli;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod remote;
