use crate::dataset::{Column, DatasetView, SalesRecord};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar position of a month label such as `Jan` or `january`
pub fn month_ordinal(label: &str) -> Option<usize> {
    let prefix = label.get(..3)?;
    MONTHS
        .iter()
        .position(|month| month.eq_ignore_ascii_case(prefix))
}

/// Value of one grouping column for one group
///
/// Keys order the way a reader expects: numbers numerically, text
/// lexically, month labels in calendar order (unknown labels last).
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum GroupKey {
    Int(i64),
    Real(f64),
    Text(String),
    Month(String),
}

impl GroupKey {
    /// Grouping key of `record` for `column`, `None` when the cell is missing
    pub fn of(record: &SalesRecord, column: Column) -> Option<Self> {
        match column {
            Column::Year => Some(GroupKey::Int(record.year as i64)),
            Column::Month => record.month.clone().map(GroupKey::Month),
            Column::VehicleType => record.vehicle_type.clone().map(GroupKey::Text),
            Column::Recession => record.recession.map(|flag| GroupKey::Int(flag as i64)),
            Column::AutomobileSales | Column::AdvertisingExpenditure | Column::UnemploymentRate => {
                record.value(column).map(GroupKey::Real)
            }
        }
    }

    /// Numeric reading of the key, for placing it on a continuous axis
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GroupKey::Int(value) => Some(*value as f64),
            GroupKey::Real(value) => Some(*value),
            GroupKey::Text(_) | GroupKey::Month(_) => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            GroupKey::Int(_) | GroupKey::Real(_) => 0,
            GroupKey::Month(_) => 1,
            GroupKey::Text(_) => 2,
        }
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupKey::Int(value) => write!(f, "{}", value),
            GroupKey::Real(value) => write!(f, "{}", value),
            GroupKey::Text(label) | GroupKey::Month(label) => f.write_str(label),
        }
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupKey::Int(a), GroupKey::Int(b)) => a.cmp(b),
            (GroupKey::Text(a), GroupKey::Text(b)) => a.cmp(b),
            (GroupKey::Month(a), GroupKey::Month(b)) => {
                let a_pos = month_ordinal(a).unwrap_or(MONTHS.len());
                let b_pos = month_ordinal(b).unwrap_or(MONTHS.len());
                a_pos.cmp(&b_pos).then_with(|| a.cmp(b))
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.rank().cmp(&b.rank()),
            },
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl From<i32> for GroupKey {
    fn from(value: i32) -> Self {
        GroupKey::Int(value as i64)
    }
}

impl From<f64> for GroupKey {
    fn from(value: f64) -> Self {
        GroupKey::Real(value)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Text(value.to_string())
    }
}

/// Reduction applied to the value column of each group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Mean,
    Sum,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn finish(&self, aggregate: Aggregate) -> f64 {
        match aggregate {
            Aggregate::Sum => self.sum,
            Aggregate::Mean => self.sum / self.count as f64,
        }
    }
}

/// One group of a [`SummaryTable`]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub key: Vec<GroupKey>,
    pub value: f64,
}

/// Result of a group-by and aggregate over a dataset view
///
/// Rows are sorted by ascending key. A table over a missing column or an
/// empty view has no rows.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryTable {
    pub keys: Vec<Column>,
    pub value: Column,
    pub aggregate: Aggregate,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn empty(keys: &[Column], value: Column, aggregate: Aggregate) -> Self {
        Self {
            keys: keys.to_vec(),
            value,
            aggregate,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Aggregated value of the group with exactly this key
    pub fn get(&self, key: &[GroupKey]) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.key.as_slice() == key)
            .map(|row| row.value)
    }

    /// Aggregated value of a single-column group
    pub fn get_one(&self, key: impl Into<GroupKey>) -> Option<f64> {
        self.get(&[key.into()])
    }

    /// Sum of the aggregated values over all groups
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|row| row.value).sum()
    }

    /// Position of `column` among the grouping keys
    pub fn key_index(&self, column: Column) -> Option<usize> {
        self.keys.iter().position(|key| *key == column)
    }

    /// Distinct values of one grouping column, in table order of first appearance
    pub fn distinct(&self, column: Column) -> Vec<GroupKey> {
        let Some(index) = self.key_index(column) else {
            return Vec::new();
        };
        let mut seen: Vec<GroupKey> = Vec::new();
        for row in &self.rows {
            let key = &row.key[index];
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
        seen
    }
}

/// Pending group-by over a view, finished by [`GroupBy::mean`] or [`GroupBy::sum`]
pub struct GroupBy<'v, 'a> {
    view: &'v DatasetView<'a>,
    keys: Vec<Column>,
}

impl<'a> DatasetView<'a> {
    /// Groups this view by one or more columns
    ///
    /// # Examples
    /// ```
    /// use autostats::dataset::{Column, Dataset};
    ///
    /// let data = Dataset::from_reader(
    ///     "Year,Vehicle_Type,Automobile_Sales\n2000,Sports,10\n2000,Sports,20\n".as_bytes(),
    /// )
    /// .unwrap();
    /// let view = data.view();
    /// let table = view.group_by(&[Column::VehicleType]).mean(Column::AutomobileSales);
    /// assert_eq!(table.get_one("Sports"), Some(15.0));
    /// ```
    pub fn group_by<'v>(&'v self, keys: &[Column]) -> GroupBy<'v, 'a> {
        GroupBy {
            view: self,
            keys: keys.to_vec(),
        }
    }
}

impl GroupBy<'_, '_> {
    pub fn mean(&self, value: Column) -> SummaryTable {
        self.aggregate(value, Aggregate::Mean)
    }

    pub fn sum(&self, value: Column) -> SummaryTable {
        self.aggregate(value, Aggregate::Sum)
    }

    /// Computes `aggregate(value)` per group
    ///
    /// Rows missing a key or the value are left out of every group.
    pub fn aggregate(&self, value: Column, aggregate: Aggregate) -> SummaryTable {
        let dataset = self.view.dataset();
        let columns_present = self
            .keys
            .iter()
            .chain(std::iter::once(&value))
            .all(|column| dataset.has_column(*column));
        if self.keys.is_empty() || !columns_present {
            return SummaryTable::empty(&self.keys, value, aggregate);
        }

        let mut groups: BTreeMap<Vec<GroupKey>, Accumulator> = BTreeMap::new();
        for record in self.view.rows() {
            let Some(key) = self
                .keys
                .iter()
                .map(|column| GroupKey::of(record, *column))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let Some(amount) = record.value(value) else {
                continue;
            };
            let entry = groups.entry(key).or_default();
            entry.sum += amount;
            entry.count += 1;
        }

        SummaryTable {
            keys: self.keys.clone(),
            value,
            aggregate,
            rows: groups
                .into_iter()
                .map(|(key, acc)| SummaryRow {
                    key,
                    value: acc.finish(aggregate),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn months_sort_in_calendar_order() {
        let mut keys: Vec<GroupKey> = ["Mar", "Jan", "Dec", "Feb"]
            .iter()
            .map(|m| GroupKey::Month(m.to_string()))
            .collect();
        keys.sort();
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["Jan", "Feb", "Mar", "Dec"]);
    }

    #[test]
    fn unknown_month_labels_sort_last() {
        assert!(GroupKey::Month("Dec".into()) < GroupKey::Month("Q1".into()));
        assert_eq!(month_ordinal("september"), Some(8));
        assert_eq!(month_ordinal("Q1"), None);
    }

    #[test]
    fn numeric_keys_compare_across_int_and_real() {
        assert!(GroupKey::Int(2) < GroupKey::Real(2.5));
        assert_eq!(GroupKey::Real(3.0), GroupKey::Int(3));
    }
}
