use serde::ser::{Serialize, SerializeMap, Serializer};

use super::record::Record;
use super::value::{Value, is_missing};

/// An immutable, column-typed table.
///
/// Every row has exactly `columns.len()` cells. An empty table (no rows) is
/// the uniform "no data" signal: a missing file, a parse failure and a
/// header-only file all end up here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from raw CSV text cells, inferring one type per column.
    ///
    /// A column whose non-missing cells all parse as `i64` becomes integer;
    /// failing that, if they all parse as `f64` it becomes float; otherwise
    /// it stays text. Missing markers become [`Value::Null`] in every column,
    /// and so does any other spelling of NaN in a numeric column.
    /// Repeated header names get `.1`, `.2`, ... suffixes.
    ///
    /// Short rows are padded with nulls; cells beyond the header are ignored.
    pub fn from_raw(header: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let columns = dedupe(header);
        let width = columns.len();
        let kinds: Vec<Kind> = (0..width)
            .map(|c| Kind::infer(raw_rows.iter().filter_map(|r| r.get(c)).map(String::as_str)))
            .collect();

        let rows = raw_rows
            .iter()
            .map(|raw| {
                kinds.iter()
                    .enumerate()
                    .map(|(c, kind)| raw.get(c).map_or(Value::Null, |cell| kind.parse(cell)))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Vec<Value>] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `name`, top to bottom; `None` if there is no such column.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// Typed view of every row, in table order.
    pub fn records(&self) -> Vec<Record> {
        let lookup = Record::columns_in(self);
        self.rows.iter().map(|row| Record::from_row(row, &lookup)).collect()
    }

    /// One JSON object per row, keyed by column name in header order.
    pub fn row_objects(&self) -> Vec<RowObject<'_>> {
        self.rows.iter()
            .map(|cells| RowObject { columns: &self.columns, cells })
            .collect()
    }
}

/// The whole table as a JSON array of row objects.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(self.row_objects())
    }
}

/// A table row serialised as `{"column": value, ...}`.
pub struct RowObject<'a> {
    columns: &'a [String],
    cells: &'a [Value],
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

// ── Column type inference ─────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Int,
    Float,
    Text,
}

impl Kind {
    fn infer<'a>(cells: impl Iterator<Item = &'a str>) -> Self {
        let mut kind = Self::Int;
        for cell in cells.filter(|c| !is_missing(c) && !is_nan(c)) {
            let cell = cell.trim();
            if kind == Self::Int && cell.parse::<i64>().is_err() {
                kind = Self::Float;
            }
            if kind == Self::Float && cell.parse::<f64>().is_err() {
                return Self::Text;
            }
        }
        kind
    }

    fn parse(self, cell: &str) -> Value {
        if is_missing(cell) {
            return Value::Null;
        }
        // Inference guarantees every other present cell parses for its kind.
        match self {
            Self::Int => cell.trim().parse().map_or(Value::Null, Value::Int),
            Self::Float => match cell.trim().parse::<f64>() {
                Ok(f) if !f.is_nan() => Value::Float(f),
                _ => Value::Null,
            },
            Self::Text => Value::Text(cell.to_owned()),
        }
    }
}

/// `f64::from_str` accepts `NAN`, `Nan` and friends, which are not in the
/// missing-marker list but carry no number either.
fn is_nan(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok_and(f64::is_nan)
}

fn dedupe(header: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(header.len());
    for name in header {
        let mut candidate = name.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{n}");
            n += 1;
        }
        seen.push(candidate);
    }
    seen
}
