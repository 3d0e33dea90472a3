use std::fmt::Write;

use bills::{BillRecord, PageDescriptor, favourites::FavouriteSet};

use crate::{
    models::BillView,
    utils::{format_long_title, sponsor_name},
};

const TITLE_WIDTH: usize = 48;

pub fn bills_table(records: &[BillRecord], favourites: &FavouriteSet) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {:<10} {:<10} {:<12} {:<width$} Sponsor",
        "Bill",
        "Type",
        "Status",
        "Title",
        width = TITLE_WIDTH
    );

    for record in records {
        let view = BillView::from_record(record);
        let key = view.key();
        let marker = if favourites.contains(&key) { '*' } else { ' ' };

        let _ = writeln!(
            out,
            "{marker} {:<10} {:<10} {:<12} {:<width$} {}",
            key,
            view.bill_type,
            view.status,
            truncate(&view.short_title_en, TITLE_WIDTH),
            sponsor_name(&view),
            width = TITLE_WIDTH
        );
    }

    out
}

pub fn pagination(descriptor: &PageDescriptor) -> String {
    if descriptor.total_count() == 0 {
        return "No bills found".to_string();
    }

    let mut out = format!(
        "Page {} of {} ({} bills, {} per page)",
        descriptor.page().saturating_add(1),
        descriptor.total_pages(),
        descriptor.total_count(),
        descriptor.page_size()
    );

    if descriptor.has_prev_page() {
        let _ = write!(out, "  [prev: --page {}]", descriptor.page().saturating_sub(1));
    }
    if descriptor.has_next_page() {
        let _ = write!(out, "  [next: --page {}]", descriptor.page().saturating_add(1));
    }

    out
}

pub fn bill_detail(record: &BillRecord) -> String {
    let view = BillView::from_record(record);
    let mut out = String::new();

    let _ = writeln!(out, "Bill {} ({}, {})", view.key(), view.bill_type, view.status);
    let _ = writeln!(out, "Sponsor: {}", sponsor_name(&view));

    for (heading, short, long) in [
        ("English", &view.short_title_en, &view.long_title_en),
        ("Gaeilge", &view.short_title_ga, &view.long_title_ga),
    ] {
        let _ = writeln!(out, "\n[{heading}]");
        let _ = writeln!(out, "{short}");

        for line in format_long_title(long) {
            let _ = writeln!(out, "  {line}");
        }
    }

    out
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}
