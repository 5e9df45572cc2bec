//! CSV rendering for downloadable reports.
//!
//! Hand-rendered RFC 4180 output: every field is quoted and embedded quotes
//! are doubled, so names with commas or quotes survive spreadsheet imports.

use chrono::NaiveDate;

use crate::domain::cashflow::DentistProductionRow;

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn write_row(out: &mut String, fields: &[&str]) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        out.push_str(&quote(field));
        first = false;
    }
    out.push_str("\r\n");
}

/// Render dentist production rows as a CSV document.
pub fn dentist_production_csv(rows: &[DentistProductionRow]) -> String {
    let mut out = String::new();
    write_row(
        &mut out,
        &["Dentist", "Appointments", "Revenue", "Commission", "Net"],
    );
    for row in rows {
        write_row(
            &mut out,
            &[
                &row.dentist_name,
                &row.appointment_count.to_string(),
                &row.revenue.amount().to_string(),
                &row.commission.amount().to_string(),
                &row.net.to_string(),
            ],
        );
    }
    out
}

/// Download filename carrying the report range.
pub fn dentist_production_filename(start: NaiveDate, end: NaiveDate) -> String {
    format!("dentist-production-{start}-to-{end}.csv")
}
