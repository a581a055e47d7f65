//! CSV rendering for workshop exports.

use crate::entity::Workshop;

/// Column header of a workshop export.
pub const WORKSHOP_HEADER: &[&str] = &[
    "workshopId",
    "workshopDate",
    "startTime",
    "duration",
    "name",
    "category",
    "locationId",
    "organizerId",
    "description",
    "createdOn",
    "lastUpdatedOn",
];

/// Sorts workshops the way they appear in an export: date, start time, name.
pub fn sort_for_export(workshops: &mut [Workshop]) {
    workshops.sort_by(|a, b| {
        a.workshop_date
            .cmp(&b.workshop_date)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Renders workshops as CSV, header first, one line per workshop.
///
/// Rows keep the order of `workshops`. Lines end with `\n`.
pub fn render_workshops(workshops: &[Workshop]) -> String {
    let mut out = String::new();
    out.push_str(&WORKSHOP_HEADER.join(","));
    out.push('\n');

    for workshop in workshops {
        let fields = [
            workshop.workshop_id.clone(),
            workshop.workshop_date.format("%Y-%m-%d").to_string(),
            workshop.start_time.format("%H:%M:%S").to_string(),
            workshop.duration.to_string(),
            workshop.name.clone(),
            workshop.category.clone(),
            workshop.location_id.clone().unwrap_or_default(),
            workshop.organizer_id.clone().unwrap_or_default(),
            workshop.description.clone().unwrap_or_default(),
            format_timestamp(workshop.created_on),
            format_timestamp(workshop.last_updated_on),
        ];

        let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn format_timestamp(value: Option<chrono::NaiveDateTime>) -> String {
    value
        .map(|v| v.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Quotes a field if it contains a comma, quote or line break.
fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
