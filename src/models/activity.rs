use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use super::ProjectorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityType {
    Transactions,
    LiquidityProvision,
    Staking,
    GovernanceParticipation,
    KaitoYaps,
    #[default]
    Custom,
}

impl ActivityType {
    pub const ALL: [ActivityType; 6] = [
        ActivityType::Transactions,
        ActivityType::LiquidityProvision,
        ActivityType::Staking,
        ActivityType::GovernanceParticipation,
        ActivityType::KaitoYaps,
        ActivityType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Transactions => "Transactions",
            ActivityType::LiquidityProvision => "Liquidity Provision",
            ActivityType::Staking => "Staking",
            ActivityType::GovernanceParticipation => "Governance Participation",
            ActivityType::KaitoYaps => "Kaito Yaps",
            ActivityType::Custom => "Custom",
        }
    }

    /// Accepts display labels and variant names, ignoring case and separators.
    /// A blank label maps to `Custom`.
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "" | "custom" => Some(ActivityType::Custom),
            "transactions" | "tx" => Some(ActivityType::Transactions),
            "liquidityprovision" | "lp" => Some(ActivityType::LiquidityProvision),
            "staking" => Some(ActivityType::Staking),
            "governanceparticipation" | "governance" => Some(ActivityType::GovernanceParticipation),
            "kaitoyaps" | "yaps" => Some(ActivityType::KaitoYaps),
            _ => None,
        }
    }

    /// Only `Custom` may appear on more than one row.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, ActivityType::Custom)
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|t| t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ActivityType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        ActivityType::from_str(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown activity type: {}", raw)))
    }
}

/// Raw text of a numeric form field.
///
/// Fields keep what the user typed; numbers are only extracted when the
/// engine reads them, using the same leading-prefix rule a browser form
/// applies (`"12abc"` reads as 12, `"abc"` reads as nothing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldValue(String);

impl FieldValue {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn blank() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn parse(&self) -> Option<f64> {
        let s = self.0.trim();
        let len = numeric_prefix_len(s);
        if len == 0 {
            return None;
        }
        s[..len].parse::<f64>().ok()
    }

    /// Metric reading: anything that is not a finite, non-negative number is 0.
    pub fn metric(&self) -> f64 {
        match self.parse() {
            Some(v) if v.is_finite() && v > 0.0 => v,
            _ => 0.0,
        }
    }

    /// Weight reading: `None` marks the row as invalid rather than zero-weighted.
    pub fn weight(&self) -> Option<f64> {
        self.parse().filter(|w| w.is_finite() && *w >= 0.0)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Number(n)) => FieldValue::from(n),
            Some(Raw::Text(s)) => FieldValue(s),
            None => FieldValue::blank(),
        })
    }
}

fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;

    if i < b.len() && (b[i] == b'+' || b[i] == b'-') {
        i += 1;
    }

    if s[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_start = i;
    while i < b.len() && b[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < b.len() && b[i] == b'.' {
        let mut j = i + 1;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        digits += j - (i + 1);
        i = j;
    }

    if digits == 0 {
        return 0;
    }

    if i < b.len() && (b[i] == b'e' || b[i] == b'E') {
        let mut j = i + 1;
        if j < b.len() && (b[j] == b'+' || b[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < b.len() && b[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowField {
    Type,
    UserMetric,
    Unit,
    TotalMetric,
    Weight,
}

impl RowField {
    pub const ALL: [RowField; 5] = [
        RowField::Type,
        RowField::UserMetric,
        RowField::Unit,
        RowField::TotalMetric,
        RowField::Weight,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RowField::Type => "Type",
            RowField::UserMetric => "Your Metric",
            RowField::Unit => "Unit",
            RowField::TotalMetric => "Total Metric",
            RowField::Weight => "Weight",
        }
    }
}

fn default_weight() -> FieldValue {
    FieldValue::from(1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRow {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type", default)]
    pub activity_type: ActivityType,
    #[serde(default)]
    pub user_metric: FieldValue,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub total_metric: FieldValue,
    #[serde(default = "default_weight")]
    pub weight: FieldValue,
}

impl ActivityRow {
    pub fn new(id: u64, activity_type: ActivityType) -> Self {
        Self {
            id,
            activity_type,
            user_metric: FieldValue::blank(),
            unit: String::new(),
            total_metric: FieldValue::blank(),
            weight: default_weight(),
        }
    }

    pub fn with_metrics(
        mut self,
        user_metric: impl Into<FieldValue>,
        total_metric: impl Into<FieldValue>,
        weight: impl Into<FieldValue>,
    ) -> Self {
        self.user_metric = user_metric.into();
        self.total_metric = total_metric.into();
        self.weight = weight.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn field_text(&self, field: RowField) -> String {
        match field {
            RowField::Type => self.activity_type.to_string(),
            RowField::UserMetric => self.user_metric.to_string(),
            RowField::Unit => self.unit.clone(),
            RowField::TotalMetric => self.total_metric.to_string(),
            RowField::Weight => self.weight.to_string(),
        }
    }
}

/// Non-repeatable types that appear on more than one row, in first-seen order.
pub fn duplicate_types(rows: &[ActivityRow]) -> Vec<ActivityType> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for row in rows {
        let t = row.activity_type;
        if !t.is_repeatable() && !seen.insert(t) && !duplicates.contains(&t) {
            duplicates.push(t);
        }
    }
    duplicates
}

/// Reads a JSON array of rows. Rows are renumbered in file order.
pub fn read_activity_rows<P: AsRef<Path>>(path: P) -> Result<Vec<ActivityRow>, ProjectorError> {
    let raw = std::fs::read_to_string(path)?;
    let mut rows: Vec<ActivityRow> = serde_json::from_str(&raw)?;
    for (id, row) in rows.iter_mut().enumerate() {
        row.id = id as u64;
    }
    Ok(rows)
}
