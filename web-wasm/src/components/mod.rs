pub mod detail_panel;
pub mod document_list;
pub mod header;
pub mod progress_bar;
pub mod upload_area;
