use serde::{Deserialize, Serialize};

use crate::models::cv::Document;

/// Result of the print gate. `missing` lists exactly the required fields
/// still empty, in the order the form shows them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintReadiness {
    pub passed: bool,
    pub missing: Vec<String>,
}

/// The three fields a CV must have before it can be handed to a renderer:
/// full name, email and the professional summary.
pub fn print_readiness(doc: &Document) -> PrintReadiness {
    let mut missing = Vec::new();
    if doc.personal_info.full_name.is_empty() {
        missing.push("nome".to_string());
    }
    if doc.personal_info.email.is_empty() {
        missing.push("email".to_string());
    }
    if doc.summary.is_empty() {
        missing.push("resumo profissional".to_string());
    }
    PrintReadiness {
        passed: missing.is_empty(),
        missing,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Complete,
    Partial,
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHealth {
    pub section: String,
    pub entry_count: usize,
    pub status: SectionStatus,
}

/// Per-section fill summary the shell turns into hints next to the form.
/// Purely informational; nothing here blocks an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletenessReport {
    pub sections: Vec<SectionHealth>,
    pub missing_sections: Vec<String>,
    pub print_ready: bool,
}

pub fn completeness_report(doc: &Document) -> CompletenessReport {
    let mut sections = Vec::new();

    let personal_filled = [
        &doc.personal_info.full_name,
        &doc.personal_info.email,
        &doc.personal_info.phone,
        &doc.personal_info.location,
    ]
    .iter()
    .filter(|f| !f.is_empty())
    .count();
    sections.push(SectionHealth {
        section: "personal".to_string(),
        entry_count: personal_filled,
        status: match personal_filled {
            4 => SectionStatus::Complete,
            0 => SectionStatus::Empty,
            _ => SectionStatus::Partial,
        },
    });

    sections.push(SectionHealth {
        section: "summary".to_string(),
        entry_count: usize::from(!doc.summary.is_empty()),
        status: if doc.summary.is_empty() {
            SectionStatus::Empty
        } else {
            SectionStatus::Complete
        },
    });

    let blank_experience = doc
        .experience
        .iter()
        .filter(|e| e.job_title.is_empty() || e.company.is_empty())
        .count();
    sections.push(SectionHealth {
        section: "experience".to_string(),
        entry_count: doc.experience.len(),
        status: entry_list_status(doc.experience.len(), blank_experience),
    });

    let blank_education = doc
        .education
        .iter()
        .filter(|e| e.degree.is_empty() || e.institution.is_empty())
        .count();
    sections.push(SectionHealth {
        section: "education".to_string(),
        entry_count: doc.education.len(),
        status: entry_list_status(doc.education.len(), blank_education),
    });

    let named_skills = doc.skills.iter().filter(|s| !s.name.is_empty()).count();
    sections.push(SectionHealth {
        section: "skills".to_string(),
        entry_count: named_skills,
        status: entry_list_status(doc.skills.len(), doc.skills.len() - named_skills),
    });

    let missing_sections = sections
        .iter()
        .filter(|s| s.status == SectionStatus::Empty)
        .map(|s| s.section.clone())
        .collect();

    CompletenessReport {
        sections,
        missing_sections,
        print_ready: print_readiness(doc).passed,
    }
}

fn entry_list_status(total: usize, blank: usize) -> SectionStatus {
    if total == 0 {
        SectionStatus::Empty
    } else if blank > 0 {
        SectionStatus::Partial
    } else {
        SectionStatus::Complete
    }
}
