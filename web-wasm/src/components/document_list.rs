//! 処理済みPDF一覧

use crate::app::Actions;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use pdf_extract_common::view::EMPTY_LIST_MESSAGE;
use pdf_extract_common::{ListRow, ListView, Session};

#[component]
pub fn DocumentList(session: RwSignal<Session>, actions: Actions) -> impl IntoView {
    let list = Memo::new(move |_| session.with(|s| s.list_view()));

    view! {
        <div class="card shadow-sm">
            <div class="card-header">
                <h5 class="mb-0">
                    <i class="fas fa-list me-2"></i>
                    "Processed PDFs"
                </h5>
            </div>
            <div class="list-group list-group-flush pdf-list">
                {move || match list.get() {
                    ListView::Empty => {
                        view! { <div class="text-center text-muted p-3">{EMPTY_LIST_MESSAGE}</div> }
                            .into_any()
                    }
                    ListView::Rows(rows) => {
                        rows.into_iter()
                            .map(|row| view! { <DocumentRow row=row actions=actions /> })
                            .collect_view()
                            .into_any()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn DocumentRow(row: ListRow, actions: Actions) -> impl IntoView {
    let class = if row.active {
        "list-group-item d-flex align-items-center justify-content-between active"
    } else {
        "list-group-item d-flex align-items-center justify-content-between"
    };

    let on_select = {
        let stem = row.stem.clone();
        move |ev: MouseEvent| {
            ev.prevent_default();
            actions.select(stem.clone());
        }
    };

    let on_delete = {
        let stem = row.stem.clone();
        move |ev: MouseEvent| {
            ev.prevent_default();
            ev.stop_propagation();
            actions.delete(stem.clone());
        }
    };

    view! {
        <div class=class>
            <a href="#" class="flex-grow-1 text-decoration-none text-reset" on:click=on_select>
                <h6 class="mb-0">
                    <i class="fas fa-file-pdf me-2"></i>
                    {row.stem.clone()}
                </h6>
            </a>
            <button
                class="btn btn-sm btn-outline-danger ms-3"
                title=format!("Delete \"{}\"", row.stem)
                on:click=on_delete
            >
                <i class="fas fa-trash-alt"></i>
            </button>
        </div>
    }
}
