use serde::Serialize;

use super::table::Table;
use super::value::Value;

/// One patient observation at one time point.
///
/// Every field is optional: a column absent from the file and a missing
/// cell both read as `None`, and serialise as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub subject_id: Option<String>,
    pub arm: Option<String>,
    pub dose: Option<f64>,
    pub tumor_type: Option<String>,
    pub change: Option<f64>,
    pub days: Option<i64>,
}

/// Positions of the record fields within a table's columns.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Columns {
    subject_id: Option<usize>,
    arm: Option<usize>,
    dose: Option<usize>,
    tumor_type: Option<usize>,
    change: Option<usize>,
    days: Option<usize>,
}

impl Record {
    pub(crate) fn columns_in(table: &Table) -> Columns {
        Columns {
            subject_id: table.column_index("subject_id"),
            arm: table.column_index("arm"),
            dose: table.column_index("dose"),
            tumor_type: table.column_index("tumor_type"),
            change: table.column_index("change"),
            days: table.column_index("days"),
        }
    }

    pub(crate) fn from_row(row: &[Value], cols: &Columns) -> Self {
        Self {
            subject_id: cell(row, cols.subject_id).and_then(Value::as_text),
            arm: cell(row, cols.arm).and_then(Value::as_text),
            dose: cell(row, cols.dose).and_then(Value::as_f64),
            tumor_type: cell(row, cols.tumor_type).and_then(Value::as_text),
            change: cell(row, cols.change).and_then(Value::as_f64),
            days: cell(row, cols.days).and_then(Value::as_i64),
        }
    }
}

fn cell(row: &[Value], idx: Option<usize>) -> Option<&Value> {
    idx.and_then(|i| row.get(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(header: &[&str], rows: &[&[&str]]) -> Table {
        Table::from_raw(
            header.iter().map(|h| (*h).to_owned()).collect(),
            rows.iter().map(|r| r.iter().map(|c| (*c).to_owned()).collect()).collect(),
        )
    }

    #[test]
    fn projects_by_column_name_in_any_order() {
        let t = table(
            &["days", "change", "extra", "tumor_type", "dose", "arm", "subject_id"],
            &[&["5", "-20", "x", "lung", "10", "A", "1"]],
        );
        assert_eq!(
            t.records(),
            vec![Record {
                subject_id: Some("1".into()),
                arm: Some("A".into()),
                dose: Some(10.0),
                tumor_type: Some("lung".into()),
                change: Some(-20.0),
                days: Some(5),
            }]
        );
    }

    #[test]
    fn missing_cells_and_columns_are_none() {
        let t = table(&["subject_id", "dose", "days"], &[&["S1", "", "3.0"], &["S2", "5", "nan"]]);
        let records = t.records();
        assert_eq!(records[0].dose, None);
        assert_eq!(records[0].days, Some(3));
        assert_eq!(records[0].arm, None);
        assert_eq!(records[1].days, None);
        let json = serde_json::to_value(&records[0]).unwrap();
        assert_eq!(json["dose"], serde_json::Value::Null);
        assert_eq!(json["change"], serde_json::Value::Null);
    }
}
