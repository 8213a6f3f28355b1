//! The spider-plot view: filtered, per-patient time series.
//!
//! Rows are filtered by arm, then dose, then tumor type, stable-sorted by
//! `(subject_id, days)` and rows without a usable subject are dropped. The
//! sort uses the native column type, so numeric subject ids order
//! numerically (`2` before `10`). Missing `days` sort last within a subject.

use std::cmp::Ordering;

use serde::Serialize;

use crate::data::{Record, Table, Value};
use crate::error::QueryError;
use crate::request::Request;

/// Optional set-membership filters from the query string.
///
/// `None` means no filtering on that column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpiderQuery {
    pub arms: Option<Vec<String>>,
    pub doses: Option<Vec<f64>>,
    pub tumor_types: Option<Vec<String>>,
}

impl SpiderQuery {
    /// Reads `arms`, `doses` and `tumor_types` from the request's query.
    pub fn from_request(req: &Request) -> Result<Self, QueryError> {
        Self::from_values(
            &req.query_values("arms"),
            &req.query_values("doses"),
            &req.query_values("tumor_types"),
        )
    }

    /// Each argument holds every occurrence of one parameter. Occurrences are
    /// comma-separated lists; their items are trimmed, empty items dropped,
    /// and all occurrences unioned.
    pub fn from_values(
        arms: &[String],
        doses: &[String],
        tumor_types: &[String],
    ) -> Result<Self, QueryError> {
        let doses = match split(doses) {
            Some(items) => Some(
                items
                    .into_iter()
                    .map(|item| item.parse::<f64>().map_err(|_| QueryError::InvalidDose(item)))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };

        Ok(Self {
            arms: split(arms),
            doses,
            tumor_types: split(tumor_types),
        })
    }

    /// Whether `record` passes every supplied filter.
    pub fn matches(&self, record: &Record) -> bool {
        contains(&self.arms, record.arm.as_ref())
            && match &self.doses {
                None => true,
                Some(doses) => record.dose.is_some_and(|d| doses.contains(&d)),
            }
            && contains(&self.tumor_types, record.tumor_type.as_ref())
    }
}

fn split(raw: &[String]) -> Option<Vec<String>> {
    let items: Vec<String> = raw
        .iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();
    (!items.is_empty()).then_some(items)
}

fn contains(filter: &Option<Vec<String>>, value: Option<&String>) -> bool {
    match filter {
        None => true,
        Some(set) => value.is_some_and(|v| set.contains(v)),
    }
}

/// One point of the spider plot. Nullable fields serialise as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpiderRow {
    pub subject_id: String,
    pub arm: Option<String>,
    pub dose: Option<f64>,
    pub tumor_type: Option<String>,
    pub change: Option<f64>,
    pub days: Option<i64>,
}

/// Filters, sorts and projects `table` into spider-plot rows.
pub fn spider_rows(table: &Table, query: &SpiderQuery) -> Vec<SpiderRow> {
    let subject_col = table.column_index("subject_id");

    let mut kept: Vec<(Value, Record)> = table
        .rows()
        .iter()
        .zip(table.records())
        .filter(|(_, record)| query.matches(record))
        .map(|(row, record)| {
            let key = subject_col.map_or(Value::Null, |i| row[i].clone());
            (key, record)
        })
        .collect();

    // `sort_by` is stable: equal keys keep file order.
    kept.sort_by(|(sa, ra), (sb, rb)| sa.cmp(sb).then_with(|| nulls_last(ra.days, rb.days)));

    kept.into_iter()
        .filter_map(|(_, r)| {
            let subject_id = r.subject_id.filter(|s| s != "nan")?;
            Some(SpiderRow {
                subject_id,
                arm: r.arm,
                dose: r.dose,
                tumor_type: r.tumor_type,
                change: r.change,
                days: r.days,
            })
        })
        .collect()
}

fn nulls_last(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &[&str] = &["subject_id", "arm", "dose", "tumor_type", "change", "days"];

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_raw(
            HEADER.iter().map(|h| (*h).to_owned()).collect(),
            rows.iter().map(|r| r.iter().map(|c| (*c).to_owned()).collect()).collect(),
        )
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn sample() -> Table {
        table(&[
            &["10", "B", "20", "breast", "5", "7"],
            &["2", "A", "10", "lung", "-20", "5"],
            &["2", "A", "10", "lung", "-5", "1"],
            &["", "A", "10", "lung", "0", "0"],
            &["3", "A", "", "skin", "1.5", ""],
            &["3", "A", "", "skin", "2", "3"],
        ])
    }

    #[test]
    fn sorts_by_subject_then_days() {
        let rows = spider_rows(&sample(), &SpiderQuery::default());
        let keys: Vec<_> = rows.iter().map(|r| (r.subject_id.as_str(), r.days)).collect();
        assert_eq!(
            keys,
            vec![("2", Some(1)), ("2", Some(5)), ("3", Some(3)), ("3", None), ("10", Some(7))]
        );
    }

    #[test]
    fn drops_missing_subjects() {
        let rows = spider_rows(&sample(), &SpiderQuery::default());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| !r.subject_id.is_empty()));
    }

    #[test]
    fn nan_spellings_in_text_ids_are_real_subjects() {
        let t = table(&[&["P1", "A", "1", "x", "0", "0"], &["Nan", "A", "1", "x", "0", "1"]]);
        let ids: Vec<_> = spider_rows(&t, &SpiderQuery::default()).into_iter().map(|r| r.subject_id).collect();
        assert_eq!(ids, strings(&["Nan", "P1"]));
    }

    #[test]
    fn nan_in_numeric_ids_is_dropped_without_widening() {
        let t = table(&[&["101", "A", "1", "x", "0", "0"], &["NAN", "A", "1", "x", "0", "1"]]);
        let ids: Vec<_> = spider_rows(&t, &SpiderQuery::default()).into_iter().map(|r| r.subject_id).collect();
        assert_eq!(ids, strings(&["101"]));
    }

    #[test]
    fn filters_combine() {
        let query = SpiderQuery::from_values(&strings(&["A"]), &strings(&["10"]), &[]).unwrap();
        let rows = spider_rows(&sample(), &query);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.arm.as_deref() == Some("A") && r.dose == Some(10.0)));
    }

    #[test]
    fn dose_filter_never_matches_missing_dose() {
        let query = SpiderQuery::from_values(&[], &strings(&["10,20"]), &[]).unwrap();
        let rows = spider_rows(&sample(), &query);
        assert!(rows.iter().all(|r| r.dose.is_some()));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn missing_dose_serialises_as_null() {
        let query = SpiderQuery::from_values(&[], &[], &strings(&["skin"])).unwrap();
        let rows = spider_rows(&sample(), &query);
        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["dose"], serde_json::Value::Null);
        assert_eq!(json[0]["subject_id"], "3");
        assert_eq!(json[1]["days"], serde_json::Value::Null);
    }

    #[test]
    fn query_parsing() {
        let q = SpiderQuery::from_values(
            &strings(&["A, B", "C"]),
            &strings(&["10,", " 2.5"]),
            &strings(&[""]),
        )
        .unwrap();
        assert_eq!(q.arms, Some(strings(&["A", "B", "C"])));
        assert_eq!(q.doses, Some(vec![10.0, 2.5]));
        assert_eq!(q.tumor_types, None);
    }

    #[test]
    fn bad_dose_is_rejected() {
        let err = SpiderQuery::from_values(&[], &strings(&["10,high"]), &[]).unwrap_err();
        assert_eq!(err, QueryError::InvalidDose("high".into()));
    }
}
