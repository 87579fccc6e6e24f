//! ICS file generation.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use icalendar::{Alarm, Calendar, Component, EventLike, Property, Trigger, ValueType};

use crate::event::{NormalizedEvent, RawFields};
use crate::options::ConvertOptions;

const PRODID: &str = "-//sheetcal//Spreadsheet to ICS//EN";

/// Domain appended to generated UIDs.
const UID_DOMAIN: &str = "sheetcal";

/// One `<header>: <value>` line per source column, in column order.
///
/// Line breaks inside a value are folded into spaces so every column stays on
/// its own line. This is lossy: a multi-line cell comes back as one line when
/// the notes are split on `\n`, while `fields` itself keeps the original text.
pub fn render_notes(fields: &RawFields) -> String {
    fields
        .iter()
        .map(|(header, value)| format!("{}: {}", single_line(header), single_line(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Generate .ics content for one event with its travel alarm.
pub fn render_document(
    event: &NormalizedEvent,
    options: &ConvertOptions,
    created: DateTime<Utc>,
) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("{}@{}", uuid::Uuid::new_v4(), UID_DOMAIN));
    ics_event.summary(&strip_cr(&event.title));

    let stamp = created.format("%Y%m%dT%H%M%SZ").to_string();
    ics_event.add_property("DTSTAMP", &stamp);
    ics_event.add_property("CREATED", &stamp);

    add_datetime_property(&mut ics_event, "DTSTART", &event.start);
    add_datetime_property(&mut ics_event, "DTEND", &event.end);

    if !event.venue.is_empty() {
        ics_event.location(&strip_cr(&event.venue));
    }
    ics_event.description(&render_notes(&event.raw_fields));
    ics_event.add_property("TRANSP", "OPAQUE");

    // Apple Calendar travel time
    ics_event.add_property("X-APPLE-TRAVEL-ADVISORY-BEHAVIOR", "AUTOMATIC");
    let mut travel = Property::new(
        "X-APPLE-TRAVEL-DURATION",
        format!("PT{}M", options.travel_minutes),
    );
    travel.append_parameter(ValueType::Duration);
    ics_event.append_property(travel);

    ics_event.alarm(travel_alarm(&event.title, options.alert_minutes));

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Display alarm firing `minutes` before the start.
fn travel_alarm(title: &str, minutes: u32) -> Alarm {
    let description = format!("Leave now for {} to arrive on time.", strip_cr(title));
    let mut alarm = Alarm::display(
        &description,
        Trigger::before_start(Duration::minutes(i64::from(minutes))),
    );
    // Written by hand so the value is always the short -PT<n>M form.
    alarm.add_property("TRIGGER", format!("-PT{}M", minutes));
    alarm.add_property("X-APPLE-LOCAL-DEFAULT-ALARM", "TRUE");
    alarm.add_property("X-APPLE-DEFAULT-ALARM", "TRUE");
    alarm
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with ours
/// - Remove CALSCALE:GREGORIAN (it's the default)
/// - Remove DTSTAMP and UID inside VALARM sections (not required by RFC 5545)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    let mut in_valarm = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        if line == "BEGIN:VALARM" {
            in_valarm = true;
        } else if line == "END:VALARM" {
            in_valarm = false;
        }

        if in_valarm && (line.starts_with("DTSTAMP:") || line.starts_with("UID:")) {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

/// Local time with a TZID parameter, or a `Z` suffix for UTC.
fn add_datetime_property(ics_event: &mut icalendar::Event, name: &str, time: &DateTime<Tz>) {
    let tz = time.timezone();
    if matches!(tz, Tz::UTC | Tz::Etc__UTC) {
        ics_event.add_property(name, time.format("%Y%m%dT%H%M%SZ").to_string());
    } else {
        let mut prop = Property::new(name, time.naive_local().format("%Y%m%dT%H%M%S").to_string());
        prop.add_parameter("TZID", tz.name());
        ics_event.append_property(prop);
    }
}

fn strip_cr(s: &str) -> String {
    s.replace('\r', "")
}

fn single_line(s: &str) -> String {
    s.replace("\r\n", " ").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use icalendar::{
        CalendarDateTime, DatePerhapsTime,
        parser::{read_calendar, unfold},
    };

    fn options(alert_minutes: u32) -> ConvertOptions {
        ConvertOptions::new("UTC", i64::from(alert_minutes), 0).unwrap()
    }

    fn make_test_event(tz: Tz) -> NormalizedEvent {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        NormalizedEvent {
            row: 1,
            title: "Standup".to_string(),
            start: tz.from_local_datetime(&date.and_hms_opt(9, 0, 0).unwrap()).unwrap(),
            end: tz.from_local_datetime(&date.and_hms_opt(9, 15, 0).unwrap()).unwrap(),
            venue: "Room A".to_string(),
            raw_fields: [
                ("Title", "Standup"),
                ("Date", "2024-03-04"),
                ("Time", "9:00 AM - 9:15 AM"),
                ("Venue", "Room A"),
            ]
            .into_iter()
            .collect(),
        }
    }

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap()
    }

    /// Parse DTSTART/DTEND back into zoned datetimes.
    fn parsed_times(ics: &str) -> (DateTime<Tz>, DateTime<Tz>) {
        let unfolded = unfold(ics);
        let calendar = read_calendar(&unfolded).unwrap();
        let vevent = calendar
            .components
            .iter()
            .find(|c| c.name == "VEVENT")
            .unwrap();
        let to_zoned = |name: &str| {
            match DatePerhapsTime::try_from(vevent.find_prop(name).unwrap()).unwrap() {
                DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => dt.with_timezone(&Tz::UTC),
                DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
                    let tz: Tz = tzid.parse().unwrap();
                    tz.from_local_datetime(&date_time).unwrap()
                }
                other => panic!("unexpected {name}: {other:?}"),
            }
        };
        (to_zoned("DTSTART"), to_zoned("DTEND"))
    }

    // --- notes ---

    #[test]
    fn notes_list_every_field_in_order() {
        let event = make_test_event(Tz::UTC);
        let notes = render_notes(&event.raw_fields);
        assert_eq!(
            notes,
            "Title: Standup\nDate: 2024-03-04\nTime: 9:00 AM - 9:15 AM\nVenue: Room A"
        );
    }

    #[test]
    fn notes_round_trip_on_first_separator() {
        let fields: RawFields = [("Agenda", "item: one"), ("Empty", "")].into_iter().collect();
        let notes = render_notes(&fields);
        let parsed: Vec<(&str, &str)> = notes
            .lines()
            .map(|l| l.split_once(": ").unwrap())
            .collect();
        assert_eq!(parsed, vec![("Agenda", "item: one"), ("Empty", "")]);
    }

    #[test]
    fn notes_keep_one_line_per_field() {
        let fields: RawFields = [("Notes", "line one\r\nline two\nthree"), ("Venue", "HQ")]
            .into_iter()
            .collect();
        let notes = render_notes(&fields);

        assert_eq!(notes, "Notes: line one line two three\nVenue: HQ");
        assert_eq!(notes.lines().count(), fields.len());
        // The folding only affects the rendered notes.
        assert_eq!(fields.get("Notes"), Some("line one\r\nline two\nthree"));
    }

    // --- document ---

    #[test]
    fn standup_document() {
        let event = make_test_event(Tz::UTC);
        let ics = render_document(&event, &options(15), created());
        let unfolded = unfold(&ics);

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains("PRODID:-//sheetcal//Spreadsheet to ICS//EN\r\n"));
        assert!(!ics.contains("CALSCALE"));
        assert!(ics.contains("SUMMARY:Standup\r\n"));
        assert!(ics.contains("LOCATION:Room A\r\n"));
        assert!(ics.contains("DTSTART:20240304T090000Z\r\n"));
        assert!(ics.contains("DTEND:20240304T091500Z\r\n"));
        assert!(ics.contains("DTSTAMP:20240201T120000Z\r\n"));
        assert!(ics.contains("CREATED:20240201T120000Z\r\n"));
        assert!(ics.contains("TRANSP:OPAQUE\r\n"));
        assert!(unfolded.contains("DESCRIPTION:Title: Standup\\nDate: 2024-03-04\\n"));

        let (start, end) = parsed_times(&ics);
        assert_eq!(start, event.start);
        assert_eq!(end, event.end);
    }

    #[test]
    fn travel_properties_present() {
        let event = make_test_event(Tz::UTC);
        let ics = render_document(&event, &options(30), created());
        assert!(ics.contains("X-APPLE-TRAVEL-ADVISORY-BEHAVIOR:AUTOMATIC\r\n"));
        assert!(ics.contains("X-APPLE-TRAVEL-DURATION;VALUE=DURATION:PT0M\r\n"));
    }

    #[test]
    fn travel_duration_follows_options() {
        let event = make_test_event(Tz::UTC);
        let opts = ConvertOptions::new("UTC", 30, 25).unwrap();
        let ics = render_document(&event, &opts, created());
        assert!(ics.contains("X-APPLE-TRAVEL-DURATION;VALUE=DURATION:PT25M\r\n"));
    }

    #[test]
    fn exactly_one_minimal_display_alarm() {
        let event = make_test_event(Tz::UTC);
        let ics = render_document(&event, &options(15), created());

        assert_eq!(ics.matches("BEGIN:VALARM").count(), 1);
        let valarm_section: String = ics
            .split("BEGIN:VALARM")
            .nth(1)
            .unwrap()
            .split("END:VALARM")
            .next()
            .unwrap()
            .to_string();
        assert!(valarm_section.contains("ACTION:DISPLAY"));
        assert!(valarm_section.contains("TRIGGER:-PT15M\r\n"));
        assert!(unfold(&valarm_section).contains("Leave now for Standup to arrive on time."));
        assert!(valarm_section.contains("X-APPLE-DEFAULT-ALARM:TRUE"));
        assert!(!valarm_section.contains("UID:"), "VALARM should not have UID");
        assert!(!valarm_section.contains("DTSTAMP:"), "VALARM should not have DTSTAMP");
    }

    #[test]
    fn zero_alert_fires_at_start() {
        let event = make_test_event(Tz::UTC);
        let ics = render_document(&event, &options(0), created());
        assert!(ics.contains("TRIGGER:-PT0M\r\n"));
    }

    #[test]
    fn zoned_times_use_tzid() {
        let tz = chrono_tz::Europe::Berlin;
        let event = make_test_event(tz);
        let ics = render_document(&event, &options(15), created());

        assert!(ics.contains("DTSTART;TZID=Europe/Berlin:20240304T090000\r\n"));
        assert!(ics.contains("DTEND;TZID=Europe/Berlin:20240304T091500\r\n"));

        let (start, end) = parsed_times(&ics);
        assert_eq!(start, event.start);
        assert_eq!(end, event.end);
        assert_eq!(start.to_rfc3339(), "2024-03-04T09:00:00+01:00");
    }

    #[test]
    fn empty_venue_omits_location() {
        let mut event = make_test_event(Tz::UTC);
        event.venue.clear();
        let ics = render_document(&event, &options(15), created());
        assert!(!ics.contains("LOCATION"));
    }

    #[test]
    fn special_characters_are_escaped() {
        let mut event = make_test_event(Tz::UTC);
        event.title = "Lunch, team; all".to_string();
        event.venue = "Cafe, 2nd floor".to_string();
        let ics = render_document(&event, &options(15), created());
        let unfolded = unfold(&ics);

        assert!(unfolded.contains("SUMMARY:Lunch\\, team\\; all"));
        assert!(unfolded.contains("LOCATION:Cafe\\, 2nd floor"));
    }

    #[test]
    fn uids_are_unique_per_render() {
        let event = make_test_event(Tz::UTC);
        let uid = |ics: &str| {
            ics.lines()
                .find(|l| l.starts_with("UID:"))
                .unwrap()
                .to_string()
        };
        let a = render_document(&event, &options(15), created());
        let b = render_document(&event, &options(15), created());
        assert_ne!(uid(&a), uid(&b));
        assert!(uid(&a).ends_with("@sheetcal"));
    }
}
