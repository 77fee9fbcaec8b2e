//! Permission record - per-identity module allow-list override.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::ModuleKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    Full,
    Limited,
}

/// Explicit override narrowing an identity's module visibility.
///
/// An identity without a record is a different state from a record with an
/// empty `modules` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPermissionRecord")]
pub struct PermissionRecord {
    pub mode: PermissionMode,
    pub modules: BTreeSet<ModuleKey>,
}

/// Backend shape. Module strings this build does not know are dropped, a
/// null module list is empty, and any mode other than `full` is limited.
#[derive(Debug, Deserialize)]
struct RawPermissionRecord {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    modules: Option<Vec<String>>,
}

impl From<RawPermissionRecord> for PermissionRecord {
    fn from(raw: RawPermissionRecord) -> Self {
        let mode = match raw.mode.as_deref() {
            Some("full") => PermissionMode::Full,
            Some("limited") => PermissionMode::Limited,
            other => {
                tracing::warn!(mode = ?other, "Unknown permission mode, treating as limited");
                PermissionMode::Limited
            }
        };

        let Some(keys) = raw.modules else {
            tracing::warn!("Permission record without a module list, treating as empty");
            return Self {
                mode,
                modules: BTreeSet::new(),
            };
        };

        let mut modules = BTreeSet::new();
        for key in keys {
            match key.parse::<ModuleKey>() {
                Ok(module) => {
                    modules.insert(module);
                }
                Err(e) => {
                    tracing::warn!(module = %key, error = %e, "Ignoring unknown module in permission record");
                }
            }
        }
        Self { mode, modules }
    }
}

impl PermissionRecord {
    pub fn full() -> Self {
        Self {
            mode: PermissionMode::Full,
            modules: BTreeSet::new(),
        }
    }

    pub fn limited(modules: impl IntoIterator<Item = ModuleKey>) -> Self {
        Self {
            mode: PermissionMode::Limited,
            modules: modules.into_iter().collect(),
        }
    }

    pub fn grants(&self, module: ModuleKey) -> bool {
        self.modules.contains(&module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_drops_unknown_modules() {
        let record: PermissionRecord = serde_json::from_str(
            r#"{"mode":"limited","modules":["students","staff","pre-enrollments"]}"#,
        )
        .unwrap();

        assert_eq!(record.mode, PermissionMode::Limited);
        assert_eq!(
            record.modules,
            BTreeSet::from([ModuleKey::Students, ModuleKey::PreEnrollments])
        );
    }

    #[test]
    fn test_deserialize_missing_modules_is_empty() {
        let record: PermissionRecord = serde_json::from_str(r#"{"mode":"full"}"#).unwrap();
        assert_eq!(record, PermissionRecord::full());
    }

    #[test]
    fn test_null_module_list_is_empty() {
        let record: PermissionRecord =
            serde_json::from_str(r#"{"mode":"limited","modules":null}"#).unwrap();
        assert_eq!(record, PermissionRecord::limited([]));
    }

    #[test]
    fn test_unknown_mode_is_limited() {
        let record: PermissionRecord =
            serde_json::from_str(r#"{"mode":"custom","modules":["reports"]}"#).unwrap();
        assert_eq!(record, PermissionRecord::limited([ModuleKey::Reports]));

        let record: PermissionRecord = serde_json::from_str(r#"{"modules":[]}"#).unwrap();
        assert_eq!(record.mode, PermissionMode::Limited);
    }

    #[test]
    fn test_serialize_shape() {
        let record = PermissionRecord::limited([ModuleKey::Enrollments]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"mode": "limited", "modules": ["enrollments"]})
        );
    }
}
