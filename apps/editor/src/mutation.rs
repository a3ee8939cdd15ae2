//! Pure edit operations over the CV document.
//!
//! Every operation takes the current document by reference and returns a
//! new one; the argument is never mutated. Unknown ids and out-of-range
//! indices are silent no-ops, so callers wired to UI events never have to
//! handle failures from this module.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::cv::{Document, Education, Experience, Skill, SkillCategory};

// ────────────────────────────────────────────────────────────────────────────
// Partial updates
// ────────────────────────────────────────────────────────────────────────────

/// Field-wise partial update for an experience entry. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceUpdate {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub challenge: Option<String>,
    pub responsibilities: Option<Vec<String>>,
    pub achievements: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationUpdate {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub location: Option<String>,
    pub graduation_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUpdate {
    pub name: Option<String>,
    pub category: Option<SkillCategory>,
}

/// The two sequences inside an experience entry that are edited item by
/// item. `technologies` is replaced wholesale through
/// [`ExperienceUpdate`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListField {
    Responsibilities,
    Achievements,
}

impl ListField {
    fn slot_mut(self, exp: &mut Experience) -> &mut Vec<String> {
        match self {
            ListField::Responsibilities => &mut exp.responsibilities,
            ListField::Achievements => &mut exp.achievements,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience
// ────────────────────────────────────────────────────────────────────────────

/// Appends a blank experience entry and returns the generated id.
/// New entries always land at the end of the list.
pub fn add_experience(doc: &Document) -> (Document, Uuid) {
    let id = Uuid::new_v4();
    let mut next = doc.clone();
    next.experience.push(Experience::empty(id));
    (next, id)
}

/// Merges `update` into the entry matching `id`. Unknown id returns the
/// document unchanged.
pub fn update_experience(doc: &Document, id: Uuid, update: ExperienceUpdate) -> Document {
    let mut next = doc.clone();
    if let Some(exp) = next.experience.iter_mut().find(|e| e.id == id) {
        if let Some(v) = update.job_title {
            exp.job_title = v;
        }
        if let Some(v) = update.company {
            exp.company = v;
        }
        if let Some(v) = update.location {
            exp.location = v;
        }
        if let Some(v) = update.start_date {
            exp.start_date = v;
        }
        if let Some(v) = update.end_date {
            exp.end_date = v;
        }
        if let Some(v) = update.current {
            exp.current = v;
        }
        if let Some(v) = update.challenge {
            exp.challenge = v;
        }
        if let Some(v) = update.responsibilities {
            exp.responsibilities = v;
        }
        if let Some(v) = update.achievements {
            exp.achievements = v;
        }
        if let Some(v) = update.technologies {
            exp.technologies = v;
        }
        repair_experience(exp);
    }
    next
}

pub fn remove_experience(doc: &Document, id: Uuid) -> Document {
    let mut next = doc.clone();
    next.experience.retain(|e| e.id != id);
    next
}

/// Restores the entry invariants after any change to it: a current
/// position has no end date, and both item lists keep at least one slot.
/// Runs once per mutation instead of being spread over call sites.
pub(crate) fn repair_experience(exp: &mut Experience) {
    if exp.current {
        exp.end_date.clear();
    }
    if exp.responsibilities.is_empty() {
        exp.responsibilities.push(String::new());
    }
    if exp.achievements.is_empty() {
        exp.achievements.push(String::new());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Experience item lists
// ────────────────────────────────────────────────────────────────────────────

/// Appends `value` to the named list of the identified experience entry.
pub fn add_list_item(doc: &Document, experience_id: Uuid, field: ListField, value: &str) -> Document {
    let mut next = doc.clone();
    if let Some(exp) = next.experience.iter_mut().find(|e| e.id == experience_id) {
        field.slot_mut(exp).push(value.to_string());
    }
    next
}

/// Replaces the element at `index`. Out-of-range indices never grow the
/// list and never panic.
pub fn update_list_item(
    doc: &Document,
    experience_id: Uuid,
    field: ListField,
    index: usize,
    value: &str,
) -> Document {
    let mut next = doc.clone();
    if let Some(exp) = next.experience.iter_mut().find(|e| e.id == experience_id) {
        let list = field.slot_mut(exp);
        if let Some(slot) = list.get_mut(index) {
            *slot = value.to_string();
        }
    }
    next
}

/// Removes the element at `index` unless it is the last one remaining.
pub fn remove_list_item(
    doc: &Document,
    experience_id: Uuid,
    field: ListField,
    index: usize,
) -> Document {
    let mut next = doc.clone();
    if let Some(exp) = next.experience.iter_mut().find(|e| e.id == experience_id) {
        let list = field.slot_mut(exp);
        if list.len() > 1 && index < list.len() {
            list.remove(index);
        }
    }
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

pub fn add_education(doc: &Document) -> (Document, Uuid) {
    let id = Uuid::new_v4();
    let mut next = doc.clone();
    next.education.push(Education::empty(id));
    (next, id)
}

pub fn update_education(doc: &Document, id: Uuid, update: EducationUpdate) -> Document {
    let mut next = doc.clone();
    if let Some(edu) = next.education.iter_mut().find(|e| e.id == id) {
        if let Some(v) = update.degree {
            edu.degree = v;
        }
        if let Some(v) = update.institution {
            edu.institution = v;
        }
        if let Some(v) = update.location {
            edu.location = v;
        }
        if let Some(v) = update.graduation_date {
            edu.graduation_date = v;
        }
        if let Some(v) = update.gpa {
            edu.gpa = v;
        }
    }
    next
}

pub fn remove_education(doc: &Document, id: Uuid) -> Document {
    let mut next = doc.clone();
    next.education.retain(|e| e.id != id);
    next
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

pub fn add_skill(doc: &Document) -> (Document, Uuid) {
    let id = Uuid::new_v4();
    let mut next = doc.clone();
    next.skills.push(Skill::empty(id));
    (next, id)
}

pub fn update_skill(doc: &Document, id: Uuid, update: SkillUpdate) -> Document {
    let mut next = doc.clone();
    if let Some(skill) = next.skills.iter_mut().find(|s| s.id == id) {
        if let Some(v) = update.name {
            skill.name = v;
        }
        if let Some(v) = update.category {
            skill.category = v;
        }
    }
    next
}

pub fn remove_skill(doc: &Document, id: Uuid) -> Document {
    let mut next = doc.clone();
    next.skills.retain(|s| s.id != id);
    next
}
