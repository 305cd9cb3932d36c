//! 選択状態
//!
//! 文書一覧と、選択中の文書（高々1つ）を保持する。

use crate::types::DocumentSummary;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    current_stem: Option<String>,
    documents: Vec<DocumentSummary>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_stem(&self) -> Option<&str> {
        self.current_stem.as_deref()
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn is_selected(&self, stem: &str) -> bool {
        self.current_stem.as_deref() == Some(stem)
    }

    pub fn contains(&self, stem: &str) -> bool {
        self.documents.iter().any(|d| d.stem == stem)
    }

    /// 選択を切り替える
    ///
    /// 一覧に存在するかは確認しない（呼び出し側の責任）。
    pub fn select(&mut self, stem: impl Into<String>) {
        self.current_stem = Some(stem.into());
    }

    /// 選択中なら解除し、解除したかを返す
    pub fn clear_if_selected(&mut self, stem: &str) -> bool {
        if self.is_selected(stem) {
            self.current_stem = None;
            true
        } else {
            false
        }
    }

    /// 一覧を丸ごと置き換える（選択は維持）
    pub fn replace_list(&mut self, documents: Vec<DocumentSummary>) {
        self.documents = documents;
    }

    /// 一覧から取り除く
    pub fn remove(&mut self, stem: &str) {
        self.documents.retain(|d| d.stem != stem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(stems: &[&str]) -> SelectionState {
        let mut state = SelectionState::new();
        state.replace_list(stems.iter().map(|s| DocumentSummary::new(*s)).collect());
        state
    }

    #[test]
    fn test_select_without_membership_check() {
        let mut state = state_with(&["a"]);
        state.select("ghost");
        assert_eq!(state.current_stem(), Some("ghost"));
        assert!(!state.contains("ghost"));
    }

    #[test]
    fn test_clear_if_selected() {
        let mut state = state_with(&["a", "b"]);
        state.select("a");

        assert!(!state.clear_if_selected("b"));
        assert_eq!(state.current_stem(), Some("a"));

        assert!(state.clear_if_selected("a"));
        assert_eq!(state.current_stem(), None);
    }

    #[test]
    fn test_replace_list_keeps_selection() {
        let mut state = state_with(&["a", "b"]);
        state.select("b");
        state.replace_list(vec![DocumentSummary::new("c")]);
        assert_eq!(state.current_stem(), Some("b"));
        assert_eq!(state.documents(), &[DocumentSummary::new("c")]);
    }

    #[test]
    fn test_remove() {
        let mut state = state_with(&["a", "b", "c"]);
        state.remove("b");
        let stems: Vec<_> = state.documents().iter().map(|d| d.stem.as_str()).collect();
        assert_eq!(stems, vec!["a", "c"]);
    }
}
