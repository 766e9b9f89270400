use tabled::{settings::Style, Table, Tabled};
use crate::dependency::StoredDependency;
use crate::takeover::TakeoverFinding;

#[derive(Tabled)]
pub struct DependencyRow {
    #[tabled(rename = "URL")]
    pub url: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Version")]
    pub version: String,
    #[tabled(rename = "Type")]
    pub kind: String,
}

impl From<&StoredDependency> for DependencyRow {
    fn from(stored: &StoredDependency) -> Self {
        Self {
            url: stored.source_url.clone(),
            name: stored.record.name.clone(),
            version: stored.record.version.clone(),
            kind: stored.record.kind.to_string(),
        }
    }
}

#[derive(Tabled)]
pub struct FindingRow {
    #[tabled(rename = "Package")]
    pub package: String,
    #[tabled(rename = "Affected URLs")]
    pub urls: String,
}

#[derive(Tabled)]
pub struct MetricRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Stored results, one row per record
pub fn dependencies_table(records: &[StoredDependency]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let rows: Vec<DependencyRow> = records.iter().map(DependencyRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Flagged packages with their affected URLs stacked in one cell
pub fn findings_table(findings: &[TakeoverFinding]) -> String {
    if findings.is_empty() {
        return String::new();
    }
    let rows: Vec<FindingRow> = findings
        .iter()
        .map(|f| FindingRow {
            package: f.package_name.clone(),
            urls: f.affected_urls.iter().cloned().collect::<Vec<_>>().join("\n"),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &[(&str, String)]) -> String {
    if stats.is_empty() {
        return String::new();
    }
    let rows: Vec<MetricRow> = stats
        .iter()
        .map(|(label, value)| MetricRow {
            metric: label.to_string(),
            value: value.clone(),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
