//! Department value object
//!
//! A department is a functional production category (story, character,
//! visual, ...). The set of known departments is closed so that dimension
//! selection and weight lookup are enforced by the compiler; anything else
//! falls into `Custom` and receives the balanced fallback treatment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Production departments (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Department {
    Story,
    Character,
    Worldbuilding,
    Visual,
    Audio,
    Video,
    /// Department not in the known set; graded with balanced weights
    Custom(String),
}

/// Grading class of a department
///
/// Creative departments are scored on creativity, technical departments on
/// technical execution. General departments (custom/unknown) get neither
/// extra dimension and use balanced weights across the core four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepartmentClass {
    Creative,
    Technical,
    General,
}

impl Department {
    /// Get the string identifier for this department
    pub fn as_str(&self) -> &str {
        match self {
            Department::Story => "story",
            Department::Character => "character",
            Department::Worldbuilding => "worldbuilding",
            Department::Visual => "visual",
            Department::Audio => "audio",
            Department::Video => "video",
            Department::Custom(s) => s,
        }
    }

    /// All known departments in canonical order
    pub fn known() -> Vec<Department> {
        vec![
            Department::Story,
            Department::Character,
            Department::Worldbuilding,
            Department::Visual,
            Department::Audio,
            Department::Video,
        ]
    }

    /// Grading class for this department
    pub fn class(&self) -> DepartmentClass {
        match self {
            Department::Story
            | Department::Character
            | Department::Worldbuilding
            | Department::Visual => DepartmentClass::Creative,
            Department::Audio | Department::Video => DepartmentClass::Technical,
            Department::Custom(_) => DepartmentClass::General,
        }
    }

    /// Declared upstream dependencies of this department
    ///
    /// A department may only start once every department it depends on has
    /// completed. Custom departments declare no dependencies.
    pub fn default_dependencies(&self) -> Vec<Department> {
        match self {
            Department::Story => vec![],
            Department::Character => vec![Department::Story],
            Department::Worldbuilding => vec![Department::Story],
            Department::Visual => vec![Department::Character],
            Department::Audio => vec![Department::Story],
            Department::Video => vec![Department::Visual, Department::Audio],
            Department::Custom(_) => vec![],
        }
    }

    /// Check if this is one of the known departments
    pub fn is_known(&self) -> bool {
        !matches!(self, Department::Custom(_))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Department {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "story" => Department::Story,
            "character" => Department::Character,
            "worldbuilding" => Department::Worldbuilding,
            "visual" => Department::Visual,
            "audio" => Department::Audio,
            "video" => Department::Video,
            _ => Department::Custom(s.to_string()),
        })
    }
}

impl Serialize for Department {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Department {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
