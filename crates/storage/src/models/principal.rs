use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Registrar,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "registrar" => Some(Self::Registrar),
            _ => None,
        }
    }

    /// Registrars manage loop entries; everything else is admin-only.
    pub fn can_manage_registrations(&self) -> bool {
        matches!(self, Self::Admin | Self::Registrar)
    }

    pub fn can_administer(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// The caller on whose behalf a mutation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub name: String,
    pub role: Role,
}

impl Principal {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role = match self.role {
            Role::Admin => "admin",
            Role::Registrar => "registrar",
        };
        write!(f, "{}({})", self.name, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" registrar "), Some(Role::Registrar));
        assert_eq!(Role::parse("owner"), None);
    }

    #[test]
    fn test_registrar_cannot_administer() {
        assert!(Role::Registrar.can_manage_registrations());
        assert!(!Role::Registrar.can_administer());
        assert!(Role::Admin.can_administer());
    }

    #[test]
    fn test_principal_display() {
        let principal = Principal::new("desk-1", Role::Registrar);
        assert_eq!(principal.to_string(), "desk-1(registrar)");
    }
}
