//! Role model - the closed set of administrative roles.
//!
//! Role strings arrive from the backend in several historical spellings. They
//! are normalised once, at parse time, so every classification set downstream
//! only ever compares canonical values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Administrative role of an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    AdminGeral,
    DiretorGeral,
    ViceDiretorGeral,
    CoordenadorGeral,
    ViceCoordenadorGeral,
    PrimeiroSecretarioGeral,
    SegundoSecretarioGeral,
    PrimeiroTesoureiroGeral,
    SegundoTesoureiroGeral,
    DiretorPolo,
    ViceDiretorPolo,
    CoordenadorPolo,
    ViceCoordenadorPolo,
    PrimeiroSecretarioPolo,
    SegundoSecretarioPolo,
    PrimeiroTesoureiroPolo,
    SegundoTesoureiroPolo,
    Professor,
    Auxiliar,
    /// A role string this build does not know. Classified as neither general
    /// nor branch leadership.
    Unrecognized,
}

/// Coarse grouping of roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleFamily {
    /// Organization-wide board.
    General,
    /// Board of a single branch.
    BranchOfficer,
    /// Teaching staff of a single branch.
    Instructional,
    Unrecognized,
}

/// Legacy spellings and the canonical role they stand for.
pub const LEGACY_ALIASES: &[(&str, Role)] = &[
    ("secretario_geral", Role::PrimeiroSecretarioGeral),
    ("tesoureiro_geral", Role::PrimeiroTesoureiroGeral),
    ("secretario_polo", Role::PrimeiroSecretarioPolo),
    ("tesoureiro_polo", Role::PrimeiroTesoureiroPolo),
    ("secretario", Role::PrimeiroSecretarioPolo),
    ("tesoureiro", Role::PrimeiroTesoureiroPolo),
    ("diretor", Role::DiretorPolo),
    ("coordenador", Role::CoordenadorPolo),
];

impl Role {
    /// Every canonical role, general board first.
    pub const ALL: [Role; 20] = [
        Role::SuperAdmin,
        Role::AdminGeral,
        Role::DiretorGeral,
        Role::ViceDiretorGeral,
        Role::CoordenadorGeral,
        Role::ViceCoordenadorGeral,
        Role::PrimeiroSecretarioGeral,
        Role::SegundoSecretarioGeral,
        Role::PrimeiroTesoureiroGeral,
        Role::SegundoTesoureiroGeral,
        Role::DiretorPolo,
        Role::ViceDiretorPolo,
        Role::CoordenadorPolo,
        Role::ViceCoordenadorPolo,
        Role::PrimeiroSecretarioPolo,
        Role::SegundoSecretarioPolo,
        Role::PrimeiroTesoureiroPolo,
        Role::SegundoTesoureiroPolo,
        Role::Professor,
        Role::Auxiliar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::AdminGeral => "admin_geral",
            Role::DiretorGeral => "diretor_geral",
            Role::ViceDiretorGeral => "vice_diretor_geral",
            Role::CoordenadorGeral => "coordenador_geral",
            Role::ViceCoordenadorGeral => "vice_coordenador_geral",
            Role::PrimeiroSecretarioGeral => "primeiro_secretario_geral",
            Role::SegundoSecretarioGeral => "segundo_secretario_geral",
            Role::PrimeiroTesoureiroGeral => "primeiro_tesoureiro_geral",
            Role::SegundoTesoureiroGeral => "segundo_tesoureiro_geral",
            Role::DiretorPolo => "diretor_polo",
            Role::ViceDiretorPolo => "vice_diretor_polo",
            Role::CoordenadorPolo => "coordenador_polo",
            Role::ViceCoordenadorPolo => "vice_coordenador_polo",
            Role::PrimeiroSecretarioPolo => "primeiro_secretario_polo",
            Role::SegundoSecretarioPolo => "segundo_secretario_polo",
            Role::PrimeiroTesoureiroPolo => "primeiro_tesoureiro_polo",
            Role::SegundoTesoureiroPolo => "segundo_tesoureiro_polo",
            Role::Professor => "professor",
            Role::Auxiliar => "auxiliar",
            Role::Unrecognized => "unrecognized",
        }
    }

    /// Display label used by the admin screens.
    pub fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::AdminGeral => "Admin Geral",
            Role::DiretorGeral => "Diretor Geral",
            Role::ViceDiretorGeral => "Vice-Diretor Geral",
            Role::CoordenadorGeral => "1º Coordenador Geral",
            Role::ViceCoordenadorGeral => "2º Coordenador Geral",
            Role::PrimeiroSecretarioGeral => "1º Secretário Geral",
            Role::SegundoSecretarioGeral => "2º Secretário Geral",
            Role::PrimeiroTesoureiroGeral => "1º Tesoureiro Geral",
            Role::SegundoTesoureiroGeral => "2º Tesoureiro Geral",
            Role::DiretorPolo => "Diretor do Polo",
            Role::ViceDiretorPolo => "Vice-Diretor do Polo",
            Role::CoordenadorPolo => "1º Coordenador do Polo",
            Role::ViceCoordenadorPolo => "2º Coordenador do Polo",
            Role::PrimeiroSecretarioPolo => "1º Secretário do Polo",
            Role::SegundoSecretarioPolo => "2º Secretário do Polo",
            Role::PrimeiroTesoureiroPolo => "1º Tesoureiro do Polo",
            Role::SegundoTesoureiroPolo => "2º Tesoureiro do Polo",
            Role::Professor => "Professor",
            Role::Auxiliar => "Auxiliar",
            Role::Unrecognized => "Desconhecido",
        }
    }

    pub fn family(&self) -> RoleFamily {
        match self {
            Role::SuperAdmin
            | Role::AdminGeral
            | Role::DiretorGeral
            | Role::ViceDiretorGeral
            | Role::CoordenadorGeral
            | Role::ViceCoordenadorGeral
            | Role::PrimeiroSecretarioGeral
            | Role::SegundoSecretarioGeral
            | Role::PrimeiroTesoureiroGeral
            | Role::SegundoTesoureiroGeral => RoleFamily::General,
            Role::DiretorPolo
            | Role::ViceDiretorPolo
            | Role::CoordenadorPolo
            | Role::ViceCoordenadorPolo
            | Role::PrimeiroSecretarioPolo
            | Role::SegundoSecretarioPolo
            | Role::PrimeiroTesoureiroPolo
            | Role::SegundoTesoureiroPolo => RoleFamily::BranchOfficer,
            Role::Professor | Role::Auxiliar => RoleFamily::Instructional,
            Role::Unrecognized => RoleFamily::Unrecognized,
        }
    }

    /// Resolve a role string, following legacy aliases.
    ///
    /// Never fails: unknown strings become [`Role::Unrecognized`].
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if let Some(role) = Role::ALL.iter().find(|r| r.as_str() == s) {
            return *role;
        }
        LEGACY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == s)
            .map(|(_, role)| *role)
            .unwrap_or(Role::Unrecognized)
    }

    pub fn is_recognized(&self) -> bool {
        *self != Role::Unrecognized
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
