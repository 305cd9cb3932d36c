//! PDF Extract Common Library
//!
//! CLIとWeb(WASM)で共有される型・状態・ビューモデル

pub mod error;
pub mod protocol;
pub mod selection;
pub mod session;
pub mod store;
pub mod theme;
pub mod types;
pub mod upload;
pub mod view;

pub use error::{Error, Result};
pub use protocol::Endpoints;
pub use selection::SelectionState;
pub use session::{DetailPane, DetailTicket, MarkdownPreview, MarkdownTicket, Session};
pub use store::{Controller, DocumentStore};
pub use theme::Theme;
pub use types::{
    DeleteResponse, Device, DeviceInfo, DocumentDetail, DocumentSummary, ElementMeta,
    ExtractionMode, UploadResponse, UploadResult,
};
pub use upload::{FileFailure, UploadPhase};
pub use view::{DetailView, ListRow, ListView};
