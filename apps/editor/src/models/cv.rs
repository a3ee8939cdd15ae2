use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Contact block shown in the CV header. `linked_in` and `website` are
/// optional in import files and default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linked_in: String,
    #[serde(default)]
    pub website: String,
}

/// One professional experience entry.
///
/// The id is assigned at creation and never changes or gets reused.
/// `current == true` implies an empty `end_date`; `responsibilities` and
/// `achievements` keep at least one element while the entry exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// `YYYY-MM` as produced by month inputs; stored verbatim.
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub challenge: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Experience {
    /// A blank entry ready for form editing: single empty responsibility
    /// and achievement slots, no technologies.
    pub fn empty(id: Uuid) -> Self {
        Experience {
            id,
            job_title: String::new(),
            company: String::new(),
            location: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            current: false,
            challenge: String::new(),
            responsibilities: vec![String::new()],
            achievements: vec![String::new()],
            technologies: Vec::new(),
        }
    }
}

/// One education entry. No sub-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: Uuid,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub graduation_date: String,
    #[serde(default)]
    pub gpa: String,
}

impl Education {
    pub fn empty(id: Uuid) -> Self {
        Education {
            id,
            degree: String::new(),
            institution: String::new(),
            location: String::new(),
            graduation_date: String::new(),
            gpa: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Language,
}

impl SkillCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Language => "language",
        }
    }
}

impl FromStr for SkillCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "technical" => Ok(SkillCategory::Technical),
            "soft" => Ok(SkillCategory::Soft),
            "language" => Ok(SkillCategory::Language),
            other => Err(AppError::Validation(format!(
                "unknown skill category '{other}', expected technical, soft or language"
            ))),
        }
    }
}

/// One named skill with a stable id and a closed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: SkillCategory,
}

impl Skill {
    pub fn empty(id: Uuid) -> Self {
        Skill {
            id,
            name: String::new(),
            category: SkillCategory::Technical,
        }
    }
}

/// The full in-memory CV state. Replaced wholesale on every mutation;
/// entry order is display order (insertion order by default).
///
/// Serializes in camelCase so export files stay interchangeable with the
/// original web application's data files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl Document {
    /// True when the user has entered anything worth protecting before an
    /// import overwrites it: a name, an email, a summary, any experience or
    /// education entry, or any named skill.
    pub fn has_content(&self) -> bool {
        !self.personal_info.full_name.is_empty()
            || !self.personal_info.email.is_empty()
            || !self.summary.is_empty()
            || !self.experience.is_empty()
            || !self.education.is_empty()
            || self.skills.iter().any(|s| !s.name.is_empty())
    }
}
