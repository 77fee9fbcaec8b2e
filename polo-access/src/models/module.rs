//! Feature modules of the admin application.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Feature area an admin may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModuleKey {
    #[serde(rename = "dracmas")]
    Dracmas,
    #[serde(rename = "dracmas_settings")]
    DracmasSettings,
    #[serde(rename = "financeiro")]
    Financeiro,
    #[serde(rename = "polos")]
    Polos,
    #[serde(rename = "manage_users")]
    ManageUsers,
    #[serde(rename = "settings")]
    Settings,
    #[serde(rename = "settings_events")]
    SettingsEvents,
    #[serde(rename = "security")]
    Security,
    #[serde(rename = "backup")]
    Backup,
    #[serde(rename = "students")]
    Students,
    #[serde(rename = "enrollments")]
    Enrollments,
    #[serde(rename = "pre-enrollments")]
    PreEnrollments,
    #[serde(rename = "attendance")]
    Attendance,
    #[serde(rename = "reports")]
    Reports,
    #[serde(rename = "directorate")]
    Directorate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown module key: {0}")]
pub struct UnknownModule(pub String);

impl ModuleKey {
    pub const ALL: [ModuleKey; 15] = [
        ModuleKey::Dracmas,
        ModuleKey::DracmasSettings,
        ModuleKey::Financeiro,
        ModuleKey::Polos,
        ModuleKey::ManageUsers,
        ModuleKey::Settings,
        ModuleKey::SettingsEvents,
        ModuleKey::Security,
        ModuleKey::Backup,
        ModuleKey::Students,
        ModuleKey::Enrollments,
        ModuleKey::PreEnrollments,
        ModuleKey::Attendance,
        ModuleKey::Reports,
        ModuleKey::Directorate,
    ];

    /// Modules that make up the settings section of the navigation.
    pub const SETTINGS_GROUP: [ModuleKey; 6] = [
        ModuleKey::Settings,
        ModuleKey::ManageUsers,
        ModuleKey::SettingsEvents,
        ModuleKey::DracmasSettings,
        ModuleKey::Security,
        ModuleKey::Backup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKey::Dracmas => "dracmas",
            ModuleKey::DracmasSettings => "dracmas_settings",
            ModuleKey::Financeiro => "financeiro",
            ModuleKey::Polos => "polos",
            ModuleKey::ManageUsers => "manage_users",
            ModuleKey::Settings => "settings",
            ModuleKey::SettingsEvents => "settings_events",
            ModuleKey::Security => "security",
            ModuleKey::Backup => "backup",
            ModuleKey::Students => "students",
            ModuleKey::Enrollments => "enrollments",
            ModuleKey::PreEnrollments => "pre-enrollments",
            ModuleKey::Attendance => "attendance",
            ModuleKey::Reports => "reports",
            ModuleKey::Directorate => "directorate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModuleKey::Dracmas => "Drácmas",
            ModuleKey::DracmasSettings => "Ajustes de Drácmas",
            ModuleKey::Financeiro => "Financeiro",
            ModuleKey::Polos => "Gerenciar Polos",
            ModuleKey::ManageUsers => "Usuários",
            ModuleKey::Settings => "Configurações",
            ModuleKey::SettingsEvents => "Eventos",
            ModuleKey::Security => "Segurança",
            ModuleKey::Backup => "Backup",
            ModuleKey::Students => "Gerenciar Alunos",
            ModuleKey::Enrollments => "Gerenciar Turmas",
            ModuleKey::PreEnrollments => "Gerenciar Pré-matrículas",
            ModuleKey::Attendance => "Frequência",
            ModuleKey::Reports => "Relatórios",
            ModuleKey::Directorate => "Diretoria",
        }
    }

    /// Finance modules are gated on role alone.
    pub fn is_finance(&self) -> bool {
        matches!(
            self,
            ModuleKey::Dracmas | ModuleKey::DracmasSettings | ModuleKey::Financeiro
        )
    }
}

impl FromStr for ModuleKey {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleKey::ALL
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownModule(s.to_string()))
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings_match_serde() {
        for module in ModuleKey::ALL {
            let json = serde_json::to_string(&module).unwrap();
            assert_eq!(json, format!("\"{}\"", module.as_str()));
            assert_eq!(module.as_str().parse::<ModuleKey>().unwrap(), module);
        }
    }

    #[test]
    fn test_pre_enrollments_uses_hyphen() {
        assert_eq!(
            "pre-enrollments".parse::<ModuleKey>().unwrap(),
            ModuleKey::PreEnrollments
        );
        assert!("pre_enrollments".parse::<ModuleKey>().is_err());
    }

    #[test]
    fn test_unknown_module() {
        let err = "staff".parse::<ModuleKey>().unwrap_err();
        assert_eq!(err, UnknownModule("staff".to_string()));
    }

    #[test]
    fn test_finance_modules() {
        let finance: Vec<_> = ModuleKey::ALL.iter().filter(|m| m.is_finance()).collect();
        assert_eq!(finance.len(), 3);
        assert!(!ModuleKey::Polos.is_finance());
    }
}
