use crate::data::{Category, ImageRecord, NameAssignments};

pub const PLACEHOLDER_OPTION: &str = "Select an option";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Placeholder first, then one option per category in source order.
pub fn render_category_options(categories: &[Category]) -> String {
    let mut html = format!(r#"<option value="">{PLACEHOLDER_OPTION}</option>"#);
    for Category { id, name } in categories {
        html.push_str(&format!(
            r#"<option value="{}">{}</option>"#,
            escape_html(id),
            escape_html(name)
        ));
    }
    html
}

pub fn render_card(record: &ImageRecord, name: &str) -> String {
    let id = escape_html(&record.id);
    let url = escape_html(&record.url);
    let name = escape_html(name);
    format!(
        r#"<div class="cat-card" data-id="{id}"><img src="{url}" alt="A cool cat named {name}" class="cat-image"/><div class="cat-name-container"><h2 class="cat-name">{name}</h2></div></div>"#
    )
}

/// A card per record, naming unseen ids with `pick`. Returns the markup, the
/// `(name, url)` pairs in order, and whether any new name was assigned.
pub fn render_results(
    records: &[ImageRecord],
    names: &mut NameAssignments,
    mut pick: impl FnMut() -> String,
) -> (String, Vec<(String, String)>, bool) {
    let mut html = String::new();
    let mut cards = Vec::with_capacity(records.len());
    let mut new_entry = false;
    for record in records {
        let (name, created) = names.get_or_assign(&record.id, &mut pick);
        new_entry |= created;
        html.push_str(&render_card(record, name));
        cards.push((name.to_string(), record.url.clone()));
    }
    (html, cards, new_entry)
}
