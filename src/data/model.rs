use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FieldValue – a single cell of the salary table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, used for filter domains and the detail
/// table. Filter sets are `BTreeSet`s so `FieldValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord so we can put FieldValue in BTreeSet --

impl Eq for FieldValue {}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use FieldValue::*;
        fn discriminant(v: &FieldValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for FieldValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Float(f) => f.to_bits().hash(state),
            FieldValue::Text(s) => s.hash(state),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v:.2}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Integer(i as i64)
    }
}

// ---------------------------------------------------------------------------
// Column – the attributes of a salary record
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Year,
    Seniority,
    ContractType,
    CompanySize,
    RoleTitle,
    RemoteType,
    ResidenceCountry,
    SalaryUsd,
}

impl Column {
    /// All columns in display order.
    pub const ALL: [Column; 8] = [
        Column::Year,
        Column::Seniority,
        Column::ContractType,
        Column::CompanySize,
        Column::RoleTitle,
        Column::RemoteType,
        Column::ResidenceCountry,
        Column::SalaryUsd,
    ];

    /// Canonical header name.
    pub fn header(self) -> &'static str {
        match self {
            Column::Year => "year",
            Column::Seniority => "seniority",
            Column::ContractType => "contract_type",
            Column::CompanySize => "company_size",
            Column::RoleTitle => "role_title",
            Column::RemoteType => "remote_type",
            Column::ResidenceCountry => "residence_country_code",
            Column::SalaryUsd => "salary_usd",
        }
    }

    /// Header used by the Portuguese-language source dataset.
    pub fn legacy_header(self) -> &'static str {
        match self {
            Column::Year => "ano",
            Column::Seniority => "senioridade",
            Column::ContractType => "contrato",
            Column::CompanySize => "tamanho_empresa",
            Column::RoleTitle => "cargo",
            Column::RemoteType => "remoto",
            Column::ResidenceCountry => "residencia_iso3",
            Column::SalaryUsd => "usd",
        }
    }

    /// Whether `name` is an accepted header for this column.
    pub fn matches_header(self, name: &str) -> bool {
        let name = name.trim();
        name == self.header() || name == self.legacy_header()
    }

    /// Human-readable label for widgets and table headers.
    pub fn label(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Seniority => "Seniority",
            Column::ContractType => "Contract type",
            Column::CompanySize => "Company size",
            Column::RoleTitle => "Role",
            Column::RemoteType => "Work arrangement",
            Column::ResidenceCountry => "Country",
            Column::SalaryUsd => "Salary (USD)",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the salary table
// ---------------------------------------------------------------------------

/// One salary observation. The serde aliases accept the headers of the
/// Portuguese-headed CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(alias = "ano")]
    pub year: i32,
    #[serde(alias = "senioridade")]
    pub seniority: String,
    #[serde(alias = "contrato")]
    pub contract_type: String,
    #[serde(alias = "tamanho_empresa")]
    pub company_size: String,
    #[serde(alias = "cargo")]
    pub role_title: String,
    #[serde(alias = "remoto")]
    pub remote_type: String,
    #[serde(alias = "residencia_iso3")]
    pub residence_country_code: String,
    #[serde(alias = "usd")]
    pub salary_usd: f64,
}

impl Record {
    /// The value of `column` as a [`FieldValue`].
    pub fn value(&self, column: Column) -> FieldValue {
        match column {
            Column::Year => FieldValue::Integer(self.year as i64),
            Column::SalaryUsd => FieldValue::Float(self.salary_usd),
            text => FieldValue::Text(self.text(text).unwrap_or_default().to_string()),
        }
    }

    /// Borrow a text column without allocating; `None` for numeric columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Seniority => Some(&self.seniority),
            Column::ContractType => Some(&self.contract_type),
            Column::CompanySize => Some(&self.company_size),
            Column::RoleTitle => Some(&self.role_title),
            Column::RemoteType => Some(&self.remote_type),
            Column::ResidenceCountry => Some(&self.residence_country_code),
            Column::Year | Column::SalaryUsd => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn from_records(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Sorted set of distinct values observed in `column`.
    pub fn unique_values(&self, column: Column) -> BTreeSet<FieldValue> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn record(
        year: i32,
        seniority: &str,
        contract: &str,
        size: &str,
        role: &str,
        remote: &str,
        country: &str,
        salary: f64,
    ) -> Record {
        Record {
            year,
            seniority: seniority.into(),
            contract_type: contract.into(),
            company_size: size.into(),
            role_title: role.into(),
            remote_type: remote.into(),
            residence_country_code: country.into(),
            salary_usd: salary,
        }
    }

    /// The two-record dataset used by the scenario tests.
    pub(crate) fn two_record_dataset() -> Dataset {
        Dataset::from_records(vec![
            record(2023, "senior", "full_time", "large", "Data Scientist", "remote", "USA", 150_000.0),
            record(2023, "junior", "full_time", "medium", "Data Analyst", "onsite", "BRA", 60_000.0),
        ])
    }

    #[test]
    fn years_sort_numerically() {
        let ds = Dataset::from_records(vec![
            record(2024, "a", "c", "s", "r", "x", "USA", 1.0),
            record(2020, "a", "c", "s", "r", "x", "USA", 1.0),
            record(2100, "a", "c", "s", "r", "x", "USA", 1.0),
            record(2020, "a", "c", "s", "r", "x", "USA", 1.0),
        ]);
        let years: Vec<FieldValue> = ds.unique_values(Column::Year).into_iter().collect();
        assert_eq!(years, vec![2020.into(), 2024.into(), 2100.into()]);
    }

    #[test]
    fn text_values_sort_lexicographically() {
        let ds = Dataset::from_records(vec![
            record(2024, "senior", "c", "s", "r", "x", "USA", 1.0),
            record(2024, "junior", "c", "s", "r", "x", "USA", 1.0),
            record(2024, "executive", "c", "s", "r", "x", "USA", 1.0),
        ]);
        let levels: Vec<String> = ds
            .unique_values(Column::Seniority)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(levels, ["executive", "junior", "senior"]);
    }

    #[test]
    fn headers_accept_both_languages() {
        assert!(Column::RoleTitle.matches_header("cargo"));
        assert!(Column::RoleTitle.matches_header("role_title"));
        assert!(Column::SalaryUsd.matches_header(" usd "));
        assert!(!Column::SalaryUsd.matches_header("salario"));
    }
}
