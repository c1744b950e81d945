//! Text and JSON rendering of directory screens.

use std::io::{self, Write};

use serde_json::json;

use super::OutputFormat;
use crate::favorites::FavoriteSet;
use crate::model::{Employee, Note};

const STAR: &str = "★";
const NO_STAR: &str = "☆";

fn star(is_favorite: bool) -> &'static str {
    if is_favorite {
        STAR
    } else {
        NO_STAR
    }
}

/// Render a list of employees with their favorite markers.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn employees(
    out: &mut impl Write,
    employees: &[Employee],
    favorites: &FavoriteSet,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = employees
                .iter()
                .map(|employee| {
                    json!({
                        "employee": employee,
                        "favorite": favorites.contains(&employee.id),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)
        }
        OutputFormat::Plain => {
            if employees.is_empty() {
                return writeln!(out, "No employees found.");
            }
            for employee in employees {
                writeln!(
                    out,
                    "{} {}  {}  <{}>",
                    star(favorites.contains(&employee.id)),
                    employee.id,
                    employee.full_name(),
                    employee.email
                )?;
            }
            Ok(())
        }
        OutputFormat::Table => {
            let id_width = column_width("ID", employees.iter().map(|e| e.id.chars().count()));
            let name_width = column_width(
                "NAME",
                employees.iter().map(|e| e.full_name().chars().count()),
            );
            let email_width =
                column_width("EMAIL", employees.iter().map(|e| e.email.chars().count()));

            writeln!(
                out,
                "  {:<id_width$}  {:<name_width$}  {:<email_width$}  PHONE",
                "ID", "NAME", "EMAIL"
            )?;
            for employee in employees {
                writeln!(
                    out,
                    "{} {:<id_width$}  {:<name_width$}  {:<email_width$}  {}",
                    star(favorites.contains(&employee.id)),
                    employee.id,
                    employee.full_name(),
                    employee.email,
                    employee.phone
                )?;
            }
            writeln!(out, "{} employee(s)", employees.len())
        }
    }
}

fn column_width(header: &str, widths: impl Iterator<Item = usize>) -> usize {
    widths.max().unwrap_or(0).max(header.len())
}

/// Render one employee with notes.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn employee_detail(
    out: &mut impl Write,
    employee: &Employee,
    notes: &[Note],
    is_favorite: bool,
    format: OutputFormat,
) -> io::Result<()> {
    if format == OutputFormat::Json {
        let value = json!({
            "employee": employee,
            "favorite": is_favorite,
            "notes": notes,
        });
        return writeln!(out, "{}", serde_json::to_string_pretty(&value)?);
    }

    writeln!(out, "{} {}", star(is_favorite), employee.full_name())?;
    writeln!(out, "  ID:       {}", employee.id)?;
    writeln!(out, "  Email:    {}", employee.email)?;
    writeln!(out, "  Phone:    {}", employee.phone)?;
    writeln!(out, "  Picture:  {}", employee.picture_url)?;
    if let Some(address) = &employee.address {
        writeln!(out, "  Address:  {}", address.one_line())?;
    }
    writeln!(out)?;
    writeln!(out, "Notes ({})", notes.len())?;
    if notes.is_empty() {
        writeln!(out, "  (none)")?;
    }
    for note in notes {
        self::note(out, note)?;
    }
    Ok(())
}

/// Render a single note line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn note(out: &mut impl Write, note: &Note) -> io::Result<()> {
    match note.created_at_utc() {
        Some(at) => writeln!(out, "  [{}] {}", at.format("%Y-%m-%d %H:%M"), note.content),
        None => writeln!(out, "  [{}] {}", note.created_at, note.content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{employee, note as fixture_note, roster};
    use crate::model::Address;

    fn render_list(format: OutputFormat, favorites: &FavoriteSet) -> String {
        let mut out = Vec::new();
        employees(&mut out, &roster(), favorites, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_marks_favorites() {
        let favorites = FavoriteSet::from(["2".to_string()]);
        let text = render_list(OutputFormat::Plain, &favorites);

        assert!(text.contains("★ 2  Grace Hopper"));
        assert!(text.contains("☆ 1  Ada Lovelace"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_plain_empty_list() {
        let mut out = Vec::new();
        employees(&mut out, &[], &FavoriteSet::new(), OutputFormat::Plain).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No employees found.\n");
    }

    #[test]
    fn test_table_has_header_and_footer() {
        let text = render_list(OutputFormat::Table, &FavoriteSet::new());
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].contains("NAME"));
        assert!(lines[0].contains("EMAIL"));
        assert_eq!(lines.last().copied(), Some("4 employee(s)"));
    }

    #[test]
    fn test_json_list_is_parseable() {
        let favorites = FavoriteSet::from(["3".to_string()]);
        let text = render_list(OutputFormat::Json, &favorites);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2]["employee"]["firstName"], "Alan");
        assert_eq!(rows[2]["favorite"], true);
        assert_eq!(rows[0]["favorite"], false);
    }

    #[test]
    fn test_detail_plain_includes_address_and_notes() {
        let mut ada = employee("1", "Ada", "Lovelace");
        ada.address = Some(Address {
            street: "12 St James's Square".to_string(),
            city: "London".to_string(),
            state: "Greater London".to_string(),
            country: "UK".to_string(),
            postal_code: "SW1Y 4JH".to_string(),
        });
        let notes = vec![fixture_note("n1", "1", "Bernoulli numbers")];

        let mut out = Vec::new();
        employee_detail(&mut out, &ada, &notes, true, OutputFormat::Plain).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("★ Ada Lovelace"));
        assert!(text.contains("London"));
        assert!(text.contains("Notes (1)"));
        assert!(text.contains("[2024-03-01 09:30] Bernoulli numbers"));
    }

    #[test]
    fn test_detail_without_notes() {
        let mut out = Vec::new();
        employee_detail(
            &mut out,
            &employee("2", "Grace", "Hopper"),
            &[],
            false,
            OutputFormat::Table,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("(none)"));
        assert!(!text.contains("Address"));
    }

    #[test]
    fn test_note_line_formats() {
        let mut parsed = fixture_note("n1", "1", "UTC");
        parsed.created_at = "2024-03-01T10:30:00+01:00".to_string();
        let mut naive = fixture_note("n2", "1", "Naive");
        naive.created_at = "2024-03-01T09:30:00".to_string();
        let mut raw = fixture_note("n3", "1", "Raw");
        raw.created_at = "last week".to_string();

        let mut out = Vec::new();
        for n in [&parsed, &naive, &raw] {
            note(&mut out, n).unwrap();
        }
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("  [2024-03-01 09:30] UTC\n"));
        assert!(text.contains("  [2024-03-01 09:30] Naive\n"));
        assert!(text.contains("  [last week] Raw\n"));
    }

    #[test]
    fn test_detail_json() {
        let mut out = Vec::new();
        employee_detail(
            &mut out,
            &employee("2", "Grace", "Hopper"),
            &[fixture_note("n2", "2", "COBOL")],
            false,
            OutputFormat::Json,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["notes"][0]["employeeId"], "2");
        assert_eq!(value["favorite"], false);
    }
}
