// ============================================================================
// MY REPORTS VIEW - renders the state, forwards clicks to the viewmodel
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::app::BrowserViewModel;
use crate::dom::{append_child, clear, confirm, ElementBuilder};
use crate::models::report::{Report, ReportStatus};
use crate::state::my_reports_state::ViewState;

const CONFIRM_MARK_FOUND: &str = "Tandai laporan ini sebagai selesai?";
const CONFIRM_DELETE: &str = "Hapus laporan ini? Tindakan ini tidak dapat dibatalkan.";

/// Full re-render of `root`.
pub fn render_my_reports(root: &Element, vm: &BrowserViewModel) -> Result<(), JsValue> {
    let snapshot = vm.state().snapshot();
    clear(root);

    append_child(
        root,
        &ElementBuilder::new("h1")?.text("Laporan Saya").build(),
    )?;

    if let Some(notice) = &snapshot.notice {
        append_child(
            root,
            &ElementBuilder::new("div")?
                .class("my-laporan-notice")
                .text(notice)
                .build(),
        )?;
    }

    append_child(root, &render_filters(vm, snapshot.filter)?)?;

    let body = match snapshot.view_state() {
        ViewState::Loading => ElementBuilder::new("p")?
            .class("my-laporan-loading")
            .text("Memuat laporan Anda...")
            .build(),
        ViewState::Error(message) => ElementBuilder::new("div")?
            .class("my-laporan-error")
            .text(&message)
            .build(),
        ViewState::Empty => ElementBuilder::new("p")?
            .class("my-laporan-empty")
            .text(&format!(
                "Tidak ada laporan dengan status '{}'",
                snapshot.filter.label()
            ))
            .build(),
        ViewState::Loaded | ViewState::LoadedFromCache => {
            let list = ElementBuilder::new("ul")?.class("my-laporan-grid").build();
            for report in snapshot.visible() {
                append_child(&list, &render_card(vm, report, snapshot.is_busy(report.id))?)?;
            }
            list
        }
    };
    append_child(root, &body)
}

fn render_filters(vm: &BrowserViewModel, current: ReportStatus) -> Result<Element, JsValue> {
    let bar = ElementBuilder::new("div")?.class("my-laporan-filters").build();
    for status in ReportStatus::FILTERS {
        let class = if status == current {
            "my-laporan-filter-btn active"
        } else {
            "my-laporan-filter-btn inactive"
        };
        let vm = vm.clone();
        let button = ElementBuilder::new("button")?
            .class(class)
            .text(status.label())
            .on_click(move |_| vm.set_filter(status))?
            .build();
        append_child(&bar, &button)?;
    }
    Ok(bar)
}

fn render_card(
    vm: &BrowserViewModel,
    report: &Report,
    busy: bool,
) -> Result<Element, JsValue> {
    let card = ElementBuilder::new("li")?
        .class("my-laporan-card")
        .attr("data-id", &report.id.to_string())?
        .build();

    let category = report.category_name.as_deref().unwrap_or("Kategori");
    append_child(&card, &ElementBuilder::new("span")?.text(category).build())?;
    append_child(&card, &ElementBuilder::new("h3")?.text(&report.title).build())?;
    append_child(
        &card,
        &ElementBuilder::new("span")?
            .class("my-laporan-card-status")
            .text(report.status.label())
            .build(),
    )?;
    if let Some(description) = &report.description {
        append_child(&card, &ElementBuilder::new("p")?.text(description).build())?;
    }
    let location = report.display_location().unwrap_or("—");
    let lost_date = report.lost_date.as_deref().unwrap_or("—");
    append_child(
        &card,
        &ElementBuilder::new("p")?
            .text(&format!("Lokasi: {} · Tanggal hilang: {}", location, lost_date))
            .build(),
    )?;

    let id = report.id;
    if report.status == ReportStatus::Active {
        let vm = vm.clone();
        let button = ElementBuilder::new("button")?
            .text("✓ Selesai")
            .on_click(move |_| {
                if !confirm(CONFIRM_MARK_FOUND) {
                    return;
                }
                let vm = vm.clone();
                spawn_local(async move {
                    vm.mark_found(id).await;
                });
            })?
            .build();
        append_child(&card, &button)?;
    }

    let mut delete = ElementBuilder::new("button")?.text(if busy { "..." } else { "✕ Hapus" });
    if busy {
        delete = delete.attr("disabled", "true")?;
    }
    let vm = vm.clone();
    let delete = delete
        .on_click(move |_| {
            if !confirm(CONFIRM_DELETE) {
                return;
            }
            let vm = vm.clone();
            spawn_local(async move {
                vm.delete(id).await;
            });
        })?
        .build();
    append_child(&card, &delete)?;

    Ok(card)
}
