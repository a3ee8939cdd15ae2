//! Import reconciliation.
//!
//! An imported candidate document is never applied blindly over existing
//! work: the reconciler holds it while the shell asks the user to cancel,
//! merge, or overwrite. An empty live document skips the question and
//! takes the candidate outright.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::cv::{Document, PersonalInfo};

/// The three choices the shell must offer while a candidate is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportChoice {
    Cancel,
    Merge,
    Overwrite,
}

#[derive(Debug, Default)]
enum ImportState {
    #[default]
    Idle,
    AwaitingDecision(Document),
}

/// State machine for loading an external data file over live state.
/// Owned by the session; one candidate at a time.
#[derive(Debug, Default)]
pub struct Reconciler {
    state: ImportState,
}

impl Reconciler {
    pub fn new() -> Self {
        Reconciler::default()
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self.state, ImportState::AwaitingDecision(_))
    }

    /// The candidate waiting on a user decision, if any. Shells use this
    /// to preview what an import would bring in.
    pub fn pending_candidate(&self) -> Option<&Document> {
        match &self.state {
            ImportState::AwaitingDecision(candidate) => Some(candidate),
            ImportState::Idle => None,
        }
    }

    /// Accepts a parsed candidate. Returns the new document when it can be
    /// applied immediately (nothing to protect), or `None` when a decision
    /// is now pending.
    pub fn receive_candidate(&mut self, current: &Document, candidate: Document) -> Option<Document> {
        if !current.has_content() {
            info!("Import applied directly, live document was empty");
            self.state = ImportState::Idle;
            return Some(candidate);
        }
        info!(
            "Import held for decision: {} experience / {} education entries pending",
            candidate.experience.len(),
            candidate.education.len()
        );
        self.state = ImportState::AwaitingDecision(candidate);
        None
    }

    /// Resolves a pending decision. Returns the resulting document, or
    /// `None` when no candidate was pending. Cancel always leaves the
    /// current document exactly as it was.
    pub fn decide(&mut self, choice: ImportChoice, current: &Document) -> Option<Document> {
        match std::mem::take(&mut self.state) {
            ImportState::Idle => None,
            ImportState::AwaitingDecision(candidate) => {
                info!("Import decision: {choice:?}");
                Some(match choice {
                    ImportChoice::Cancel => current.clone(),
                    ImportChoice::Overwrite => candidate,
                    ImportChoice::Merge => merge_documents(current, &candidate),
                })
            }
        }
    }
}

/// Merge policy: scalar fields prefer the candidate when it is non-empty,
/// entry lists concatenate with the current entries first. Ids are kept
/// as-is on both sides; duplicates are accepted rather than deduplicated.
/// Skills follow the same concatenation rule as experience and education.
pub fn merge_documents(current: &Document, candidate: &Document) -> Document {
    Document {
        personal_info: PersonalInfo {
            full_name: filled_or(
                &candidate.personal_info.full_name,
                &current.personal_info.full_name,
            ),
            email: filled_or(&candidate.personal_info.email, &current.personal_info.email),
            phone: filled_or(&candidate.personal_info.phone, &current.personal_info.phone),
            location: filled_or(
                &candidate.personal_info.location,
                &current.personal_info.location,
            ),
            linked_in: filled_or(
                &candidate.personal_info.linked_in,
                &current.personal_info.linked_in,
            ),
            website: filled_or(
                &candidate.personal_info.website,
                &current.personal_info.website,
            ),
        },
        summary: filled_or(&candidate.summary, &current.summary),
        experience: [current.experience.clone(), candidate.experience.clone()].concat(),
        education: [current.education.clone(), candidate.education.clone()].concat(),
        skills: [current.skills.clone(), candidate.skills.clone()].concat(),
    }
}

fn filled_or(candidate: &str, current: &str) -> String {
    if candidate.is_empty() {
        current.to_string()
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::{add_experience, add_skill, update_skill, SkillUpdate};

    fn named(name: &str) -> Document {
        let mut doc = Document::default();
        doc.personal_info.full_name = name.to_string();
        doc
    }

    #[test]
    fn test_empty_current_applies_without_prompt() {
        let mut rec = Reconciler::new();
        let candidate = named("Beatriz");
        let out = rec.receive_candidate(&Document::default(), candidate.clone());
        assert_eq!(out, Some(candidate));
        assert!(!rec.is_awaiting());
    }

    #[test]
    fn test_existing_data_holds_candidate() {
        let mut rec = Reconciler::new();
        let current = named("Ana");
        let out = rec.receive_candidate(&current, named("Beatriz"));
        assert_eq!(out, None);
        assert!(rec.is_awaiting());
        assert_eq!(
            rec.pending_candidate().map(|d| d.personal_info.full_name.as_str()),
            Some("Beatriz")
        );
    }

    #[test]
    fn test_cancel_keeps_current() {
        let mut rec = Reconciler::new();
        let current = named("Ana");
        rec.receive_candidate(&current, named("Beatriz"));
        let out = rec.decide(ImportChoice::Cancel, &current);
        assert_eq!(out, Some(current));
        assert!(!rec.is_awaiting());
    }

    #[test]
    fn test_overwrite_takes_candidate() {
        let mut rec = Reconciler::new();
        let current = named("Ana");
        rec.receive_candidate(&current, named("Beatriz"));
        let out = rec.decide(ImportChoice::Overwrite, &current).unwrap();
        assert_eq!(out.personal_info.full_name, "Beatriz");
    }

    #[test]
    fn test_merge_prefers_filled_candidate_fields() {
        let mut rec = Reconciler::new();
        let mut current = named("Ana");
        current.personal_info.phone = "(11) 99999-9999".to_string();
        current.summary = "Resumo atual".to_string();
        let mut candidate = named("Beatriz");
        candidate.personal_info.email = "beatriz@exemplo.com".to_string();
        rec.receive_candidate(&current, candidate);
        let out = rec.decide(ImportChoice::Merge, &current).unwrap();
        assert_eq!(out.personal_info.full_name, "Beatriz");
        assert_eq!(out.personal_info.email, "beatriz@exemplo.com");
        // Candidate had no phone or summary, current values survive.
        assert_eq!(out.personal_info.phone, "(11) 99999-9999");
        assert_eq!(out.summary, "Resumo atual");
    }

    #[test]
    fn test_merge_concatenates_entry_lists_current_first() {
        let (current, current_id) = add_experience(&named("Ana"));
        let (candidate, candidate_id) = add_experience(&Document::default());
        let merged = merge_documents(&current, &candidate);
        assert_eq!(merged.experience.len(), 2);
        assert_eq!(merged.experience[0].id, current_id);
        assert_eq!(merged.experience[1].id, candidate_id);
    }

    #[test]
    fn test_merge_does_not_deduplicate_shared_ids() {
        let (current, _) = add_experience(&named("Ana"));
        let mut candidate = Document::default();
        candidate.experience = current.experience.clone();
        let merged = merge_documents(&current, &candidate);
        assert_eq!(merged.experience.len(), 2);
        assert_eq!(merged.experience[0].id, merged.experience[1].id);
    }

    #[test]
    fn test_merge_concatenates_skills() {
        let (current, id_a) = add_skill(&named("Ana"));
        let current = update_skill(
            &current,
            id_a,
            SkillUpdate {
                name: Some("React".to_string()),
                ..Default::default()
            },
        );
        let (candidate, id_b) = add_skill(&Document::default());
        let candidate = update_skill(
            &candidate,
            id_b,
            SkillUpdate {
                name: Some("Go".to_string()),
                ..Default::default()
            },
        );
        let merged = merge_documents(&current, &candidate);
        let names: Vec<_> = merged.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["React", "Go"]);
    }

    #[test]
    fn test_decide_while_idle_is_noop() {
        let mut rec = Reconciler::new();
        let current = named("Ana");
        assert_eq!(rec.decide(ImportChoice::Overwrite, &current), None);
    }

    #[test]
    fn test_reconciler_is_reentrant() {
        let mut rec = Reconciler::new();
        let current = named("Ana");
        rec.receive_candidate(&current, named("Beatriz"));
        rec.decide(ImportChoice::Cancel, &current);
        let out = rec.receive_candidate(&current, named("Clara"));
        assert_eq!(out, None);
        assert!(rec.is_awaiting());
    }
}
