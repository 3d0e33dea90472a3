use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::models::{BillView, NO_SPONSOR, ShowAs};

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SEMICOLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*;\s*").unwrap());
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\.\s+([A-Z][a-z])").unwrap());
static TRAILING_STOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\.\s*$").unwrap());

/// Primary sponsor first, else the first listed. Prefers the office (`as`) over the member (`by`).
pub fn sponsor_name(bill: &BillView) -> String {
    let sponsor = bill
        .sponsors
        .iter()
        .find(|s| s.sponsor.is_primary)
        .or_else(|| bill.sponsors.first());

    let show_as = |party: &Option<ShowAs>| {
        party
            .as_ref()
            .and_then(|p| p.show_as.as_deref())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    };

    sponsor
        .and_then(|s| show_as(&s.sponsor.as_).or_else(|| show_as(&s.sponsor.by)))
        .unwrap_or_else(|| NO_SPONSOR.to_string())
}

pub fn unique_bill_types(bills: &[BillView]) -> Vec<String> {
    bills
        .iter()
        .map(|b| b.bill_type.clone())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Strips markup and breaks the text after semicolons and sentence ends.
pub fn strip_html_and_format(html: &str) -> String {
    let text = HTML_TAG.replace_all(html, "");
    let text = WHITESPACE.replace_all(&text, " ");
    let text = text.trim();

    let text = SEMICOLON.replace_all(text, ";\n");
    let text = SENTENCE.replace_all(&text, ".\n$1");

    TRAILING_STOP.replace_all(&text, ".\n").into_owned()
}

pub fn format_long_title(html: &str) -> Vec<String> {
    strip_html_and_format(html)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
