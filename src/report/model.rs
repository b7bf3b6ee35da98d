use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static EMPTY_STATS: StatMap = StatMap::new();

/// Category to count mapping that keeps the order categories arrived in.
///
/// Chart slices follow this order, so it must survive a trip through the
/// cache unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatMap(Vec<(String, i64)>);

impl StatMap {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key` to `value`, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<String>, value: i64) {
        let key = key.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(key, value)| (key.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.0
            .iter()
            .fold(0i64, |sum, (_, value)| sum.saturating_add(*value))
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for StatMap {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut map = StatMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl Serialize for StatMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for StatMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatMapVisitor;

        impl<'de> Visitor<'de> for StatMapVisitor {
            type Value = StatMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<StatMap, A::Error> {
                let mut map = StatMap::new();
                while let Some((key, value)) = access.next_entry::<String, i64>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(StatMapVisitor)
    }
}

/// One employee row as produced by the report computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeRef {
    pub employee_name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentRef(pub String);

impl fmt::Display for DepartmentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Report numbers delivered by the server. Every field may be missing.
///
/// Keys the widget does not know about are carried along in `extra` so that
/// a cached snapshot is a faithful copy of what was received.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_stats: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_stats: Option<StatMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_employees: Option<Vec<EmployeeRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offboarding_employees: Option<Vec<EmployeeRef>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ReportPayload {
    /// True when the payload carries no keys at all.
    pub fn is_empty(&self) -> bool {
        self.onboarding_stats.is_none()
            && self.offboarding_stats.is_none()
            && self.onboarding_employees.is_none()
            && self.offboarding_employees.is_none()
            && self.extra.is_empty()
    }

    pub fn onboarding_stats(&self) -> &StatMap {
        self.onboarding_stats.as_ref().unwrap_or(&EMPTY_STATS)
    }

    pub fn offboarding_stats(&self) -> &StatMap {
        self.offboarding_stats.as_ref().unwrap_or(&EMPTY_STATS)
    }

    pub fn onboarding_employees(&self) -> &[EmployeeRef] {
        self.onboarding_employees.as_deref().unwrap_or(&[])
    }

    pub fn offboarding_employees(&self) -> &[EmployeeRef] {
        self.offboarding_employees.as_deref().unwrap_or(&[])
    }

    pub fn has_data(&self) -> bool {
        !self.onboarding_stats().is_empty()
            || !self.offboarding_stats().is_empty()
            || !self.onboarding_employees().is_empty()
            || !self.offboarding_employees().is_empty()
    }
}

/// Payload handed to the widget when it is mounted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportContext {
    pub report_data: Option<ReportPayload>,
    #[serde(deserialize_with = "null_as_default")]
    pub date_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub departments: Vec<DepartmentRef>,
}

impl ReportContext {
    /// Returns the payload only when it has at least one key.
    pub fn live_payload(&self) -> Option<&ReportPayload> {
        self.report_data
            .as_ref()
            .filter(|payload| !payload.is_empty())
    }
}

/// The single persisted copy of the last live report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CachedSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub report_data: ReportPayload,
    #[serde(deserialize_with = "null_as_default")]
    pub date_from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub departments: Vec<DepartmentRef>,
    /// Milliseconds since the Unix epoch at the time of writing.
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: i64,
}

#[derive(Debug, Hash, Eq, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Onboarding,
    Offboarding,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Onboarding, ReportType::Offboarding];

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Onboarding => "Onboarding",
            ReportType::Offboarding => "Offboarding",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
