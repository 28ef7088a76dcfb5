//! Rendering through the public API.

use chrono::NaiveDate;
use onthisday::render::{format_date, render_on};
use onthisday::settings::{DEFAULT_ITEM_TEMPLATE, DEFAULT_TITLE_DATE_FORMAT, DEFAULT_TITLE_TEMPLATE};
use onthisday::state::EventRecord;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 19).expect("valid date")
}

fn events() -> Vec<EventRecord> {
    vec![
        EventRecord::new("First", None, Some(1990)),
        EventRecord::new("Second", None, None),
        EventRecord::new("Third", None, Some(-44)),
    ]
}

#[test]
/// What: Only the first `count` events are rendered, in feed order, under the title.
fn count_limits_items() {
    let text = render_on(
        &events(),
        2,
        DEFAULT_TITLE_TEMPLATE,
        DEFAULT_ITEM_TEMPLATE,
        DEFAULT_TITLE_DATE_FORMAT,
        day(),
    );
    assert_eq!(
        text,
        "## On this day, October 19th\n\n* First (1990)\n* Second \n"
    );
}

#[test]
/// What: Events past `count` have no influence on the output.
///
/// Inputs:
/// - Two event lists sharing their first two records, differing everywhere after.
///
/// Output:
/// - Identical rendered text for `count = 2`.
fn events_past_count_do_not_matter() {
    let mut changed = events();
    changed[2] = EventRecord::new("Replaced", Some("births".into()), Some(2000));
    changed.push(EventRecord::new("Appended", None, Some(1)));

    let render = |evs: &[EventRecord]| {
        render_on(
            evs,
            2,
            DEFAULT_TITLE_TEMPLATE,
            DEFAULT_ITEM_TEMPLATE,
            DEFAULT_TITLE_DATE_FORMAT,
            day(),
        )
    };
    assert_eq!(render(&events()), render(&changed));
    assert_eq!(render(&events()[..2]), render(&changed));
}

#[test]
/// What: A date that itself looks like a token is not substituted again.
fn date_is_substituted_once() {
    let text = render_on(
        &events(),
        1,
        "{{date}} / {{date}}\n",
        "{{description}}\n",
        "[{{date}}]",
        day(),
    );
    assert_eq!(text, "{{date}} / {{date}}\nFirst\n");
}

#[test]
/// What: Nothing is rendered without events or without an item template.
fn empty_inputs_render_nothing() {
    let none: Vec<EventRecord> = Vec::new();
    assert_eq!(render_on(&none, 3, "t", "i", "YYYY", day()), "");
    assert_eq!(render_on(&events(), 3, "t", "", "YYYY", day()), "");
}

#[test]
/// What: Moment-style and strftime patterns both work.
fn date_patterns() {
    assert_eq!(format_date(day(), "dddd, MMMM Do YYYY"), "Saturday, October 19th 2024");
    assert_eq!(format_date(day(), "%d.%m.%Y"), "19.10.2024");
}
