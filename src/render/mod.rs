//! Turning feed events into the text block that gets inserted.

mod date_format;
mod select;
mod template;

pub use date_format::format_date;
pub use select::{SelectionMode, select};
pub use template::{render_template, replace_token};

use chrono::NaiveDate;

use crate::state::EventRecord;

/// What: Render the insertion text for today's local date.
///
/// Inputs:
/// - `events`: Feed response; only the first `count` are used.
/// - `count`: Number of events to render.
/// - `title_template`: Heading template; `{{date}}` becomes the formatted date.
/// - `item_template`: Per-event template.
/// - `date_format`: Pattern for `{{date}}`.
///
/// Output:
/// - Title segment followed by one item segment per event; `""` when there is nothing to insert.
#[must_use]
pub fn render(
    events: &[EventRecord],
    count: usize,
    title_template: &str,
    item_template: &str,
    date_format: &str,
) -> String {
    render_on(
        events,
        count,
        title_template,
        item_template,
        date_format,
        chrono::Local::now().date_naive(),
    )
}

/// What: [`render`] with an explicit date for the title.
///
/// Inputs:
/// - Same as [`render`], plus `today` used for `{{date}}`.
///
/// Output:
/// - Rendered text, or `""` when `events` or `item_template` is empty.
///
/// Details:
/// - Takes the first `count` events in their existing order.
/// - Item rendering drops `{{if year}}...{{endif}}` blocks when the year is unknown and strips
///   only the markers otherwise; `{{if category}}` works the same way.
/// - Tokens: `{{description}}`, `{{year}}`, `{{category}}`. Unknown tokens stay as written.
#[must_use]
pub fn render_on(
    events: &[EventRecord],
    count: usize,
    title_template: &str,
    item_template: &str,
    date_format: &str,
    today: NaiveDate,
) -> String {
    if events.is_empty() || item_template.is_empty() {
        return String::new();
    }
    let mut out = render_title(title_template, date_format, today);
    for event in events.iter().take(count) {
        out.push_str(&render_item(item_template, event));
    }
    out
}

/// Title segment: every `{{date}}` replaced once by the formatted date.
#[must_use]
pub fn render_title(title_template: &str, date_format: &str, today: NaiveDate) -> String {
    if title_template.is_empty() {
        return String::new();
    }
    replace_token(title_template, "date", &format_date(today, date_format))
}

/// One item segment for `event`.
#[must_use]
pub fn render_item(item_template: &str, event: &EventRecord) -> String {
    let present = |field: &str| match field {
        "year" => event.year.is_some(),
        "category" => event.category.is_some(),
        "description" => !event.description.is_empty(),
        _ => false,
    };
    let lookup = |name: &str| match name {
        "description" => Some(event.description.clone()),
        "year" => Some(event.year.map(|y| y.to_string()).unwrap_or_default()),
        "category" => Some(event.category.clone().unwrap_or_default()),
        _ => None,
    };
    render_template(item_template, &present, &lookup)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEM: &str = "* {{description}} {{if year}}({{year}}){{endif}}\n";

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 19).expect("valid date")
    }

    #[test]
    fn year_block_removed_when_year_unknown() {
        let e = EventRecord::new("Example", None, Some(0));
        assert_eq!(render_item(ITEM, &e), "* Example \n");
    }

    #[test]
    fn year_block_kept_when_year_known() {
        let e = EventRecord::new("Example", None, Some(1990));
        assert_eq!(render_item(ITEM, &e), "* Example (1990)\n");
    }

    #[test]
    fn category_token_and_block() {
        let t = "{{description}}{{if category}} [{{category}}]{{endif}}";
        let with = EventRecord::new("A", Some("births".into()), None);
        let without = EventRecord::new("B", None, None);
        assert_eq!(render_item(t, &with), "A [births]");
        assert_eq!(render_item(t, &without), "B");
    }

    #[test]
    /// What: Empty inputs render nothing.
    ///
    /// Inputs:
    /// - Empty events with a full template; events with an empty item template.
    ///
    /// Output:
    /// - `""` in both cases, even with a non-empty title template.
    fn empty_inputs_render_nothing() {
        assert_eq!(render_on(&[], 3, "# {{date}}\n", ITEM, "YYYY", day()), "");
        let events = vec![EventRecord::new("x", None, Some(1))];
        assert_eq!(render_on(&events, 3, "# {{date}}\n", "", "YYYY", day()), "");
    }

    #[test]
    fn title_then_items_in_order() {
        let events = vec![
            EventRecord::new("First", None, Some(1900)),
            EventRecord::new("Second", None, None),
            EventRecord::new("Third", None, Some(2000)),
        ];
        let out = render_on(&events, 2, "# {{date}}\n", ITEM, "MMMM Do", day());
        assert_eq!(out, "# October 19th\n* First (1900)\n* Second \n");
    }

    #[test]
    fn empty_title_template_renders_items_only() {
        let events = vec![EventRecord::new("Only", None, None)];
        assert_eq!(render_on(&events, 1, "", ITEM, "YYYY", day()), "* Only \n");
    }
}
