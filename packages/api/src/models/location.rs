//! # Location hierarchy
//!
//! Users are placed in a five-level administrative hierarchy. Each level has its own
//! endpoint and its own JSON key prefix:
//!
//! | [`Level`] | Endpoint | Keys |
//! |-----------|----------|------|
//! | `Department` | `GET /departamentos` | `Dpto_ID`, `Dpto_Name` |
//! | `Area` | `GET /areas/{dpto_id}` | `Area_ID`, `Area_Name` |
//! | `City` | `GET /ciudades/{area_id}` | `Ciud_ID`, `Ciud_Name` |
//! | `District` | `GET /veredas/{ciud_id}` | `Vere_ID`, `Vere_Name` |
//! | `Locality` | `GET /localidades/{vere_id}` | `Loca_ID`, `Loca_Name` |
//!
//! [`LocationOption`] accepts any of the prefixes, so one type serves every level.

use serde::{Deserialize, Serialize};

/// One level of the location hierarchy, ordered from broadest to narrowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Department,
    Area,
    City,
    District,
    Locality,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Department,
        Level::Area,
        Level::City,
        Level::District,
        Level::Locality,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The level whose options depend on this one.
    pub fn next(self) -> Option<Level> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// The level this one depends on.
    pub fn parent(self) -> Option<Level> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Department => "Department",
            Level::Area => "Area",
            Level::City => "City",
            Level::District => "District",
            Level::Locality => "Locality",
        }
    }

    /// Key prefix used by the backend for this level's rows.
    pub fn wire_prefix(self) -> &'static str {
        match self {
            Level::Department => "Dpto",
            Level::Area => "Area",
            Level::City => "Ciud",
            Level::District => "Vere",
            Level::Locality => "Loca",
        }
    }

    fn collection(self) -> &'static str {
        match self {
            Level::Department => "departamentos",
            Level::Area => "areas",
            Level::City => "ciudades",
            Level::District => "veredas",
            Level::Locality => "localidades",
        }
    }

    /// Endpoint path listing this level's options.
    ///
    /// Departments are listed without a parent; every other level needs the id
    /// selected at its parent level. Returns `None` when the parent id does not match
    /// that rule.
    pub fn path(self, parent_id: Option<i64>) -> Option<String> {
        match (self, parent_id) {
            (Level::Department, None) => Some(format!("/{}", self.collection())),
            (Level::Department, Some(_)) | (_, None) => None,
            (_, Some(id)) => Some(format!("/{}/{}", self.collection(), id)),
        }
    }
}

/// One selectable row at any level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationOption {
    #[serde(
        alias = "Dpto_ID",
        alias = "Area_ID",
        alias = "Ciud_ID",
        alias = "Vere_ID",
        alias = "Loca_ID"
    )]
    pub id: i64,
    #[serde(
        alias = "Dpto_Name",
        alias = "Area_Name",
        alias = "Ciud_Name",
        alias = "Vere_Name",
        alias = "Loca_Name"
    )]
    pub name: String,
}

impl LocationOption {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order() {
        assert_eq!(Level::Department.next(), Some(Level::Area));
        assert_eq!(Level::District.next(), Some(Level::Locality));
        assert_eq!(Level::Locality.next(), None);
        assert_eq!(Level::Department.parent(), None);
        assert_eq!(Level::City.parent(), Some(Level::Area));
        assert!(Level::Department < Level::Locality);
    }

    #[test]
    fn test_paths() {
        assert_eq!(Level::Department.path(None).as_deref(), Some("/departamentos"));
        assert_eq!(Level::Area.path(Some(5)).as_deref(), Some("/areas/5"));
        assert_eq!(Level::City.path(Some(12)).as_deref(), Some("/ciudades/12"));
        assert_eq!(Level::District.path(Some(40)).as_deref(), Some("/veredas/40"));
        assert_eq!(Level::Locality.path(Some(77)).as_deref(), Some("/localidades/77"));
        assert_eq!(Level::Department.path(Some(1)), None);
        assert_eq!(Level::Area.path(None), None);
    }

    #[test]
    fn test_options_decode_every_prefix() {
        let departments: Vec<LocationOption> =
            serde_json::from_str(r#"[{"Dpto_ID":5,"Dpto_Name":"Antioquia"}]"#).unwrap();
        assert_eq!(departments, vec![LocationOption::new(5, "Antioquia")]);

        let localities: Vec<LocationOption> =
            serde_json::from_str(r#"[{"Loca_ID":301,"Loca_Name":"El Poblado"}]"#).unwrap();
        assert_eq!(localities[0].id, 301);
        assert_eq!(localities[0].name, "El Poblado");
    }
}
