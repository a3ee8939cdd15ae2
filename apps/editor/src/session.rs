//! The editing session: owns the live document and drives the flows the
//! shell triggers. Toasts, file pickers and print windows stay outside
//! the core behind the capability traits defined here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cv::{Document, SkillCategory};
use crate::mutation::{self, EducationUpdate, ExperienceUpdate, ListField, SkillUpdate};
use crate::reconcile::{ImportChoice, Reconciler};
use crate::render;
use crate::snapshot::{self, Snapshot};
use crate::validation::print_readiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Toast-style user feedback. Implemented by the shell.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NoticeKind, title: &str, message: &str);
}

/// Source of import bytes, typically a user-selected file. Reading is the
/// only asynchronous boundary in the whole core; everything after the
/// bytes arrive runs synchronously.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read(&self) -> Result<Vec<u8>, AppError>;
}

/// Reads a local file through tokio.
pub struct DiskFileSource {
    path: PathBuf,
}

impl DiskFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DiskFileSource { path: path.into() }
    }
}

#[async_trait]
impl FileSource for DiskFileSource {
    async fn read(&self) -> Result<Vec<u8>, AppError> {
        Ok(tokio::fs::read(&self.path).await?)
    }
}

/// Produces the printable view from a finalized document.
pub trait PrintRenderer: Send + Sync {
    fn render(&self, doc: &Document) -> String;
}

/// Default renderer backed by [`render::print_html`].
pub struct HtmlPrintRenderer;

impl PrintRenderer for HtmlPrintRenderer {
    fn render(&self, doc: &Document) -> String {
        render::print_html(doc)
    }
}

/// Outcome of feeding import bytes into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The candidate replaced the (empty) live document immediately.
    Applied,
    /// Existing data is at stake; the shell must ask the user to cancel,
    /// merge or overwrite, then call [`Session::resolve_import`].
    AwaitingDecision,
}

/// One editing session over one document. Single-threaded by design: the
/// document is replaced wholesale on every edit and nothing else holds a
/// reference to it.
pub struct Session {
    document: Document,
    reconciler: Reconciler,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Session {
            document: Document::default(),
            reconciler: Reconciler::new(),
            notifier,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    // ── Edits ───────────────────────────────────────────────────────────

    pub fn add_experience(&mut self) -> Uuid {
        let (doc, id) = mutation::add_experience(&self.document);
        self.document = doc;
        debug!("Added experience entry {id}");
        id
    }

    pub fn update_experience(&mut self, id: Uuid, update: ExperienceUpdate) {
        self.document = mutation::update_experience(&self.document, id, update);
        debug!("Updated experience entry {id}");
    }

    pub fn remove_experience(&mut self, id: Uuid) {
        self.document = mutation::remove_experience(&self.document, id);
        debug!("Removed experience entry {id}");
    }

    pub fn add_list_item(&mut self, experience_id: Uuid, field: ListField, value: &str) {
        self.document = mutation::add_list_item(&self.document, experience_id, field, value);
    }

    pub fn update_list_item(
        &mut self,
        experience_id: Uuid,
        field: ListField,
        index: usize,
        value: &str,
    ) {
        self.document =
            mutation::update_list_item(&self.document, experience_id, field, index, value);
    }

    pub fn remove_list_item(&mut self, experience_id: Uuid, field: ListField, index: usize) {
        self.document = mutation::remove_list_item(&self.document, experience_id, field, index);
    }

    pub fn add_education(&mut self) -> Uuid {
        let (doc, id) = mutation::add_education(&self.document);
        self.document = doc;
        debug!("Added education entry {id}");
        id
    }

    pub fn update_education(&mut self, id: Uuid, update: EducationUpdate) {
        self.document = mutation::update_education(&self.document, id, update);
    }

    pub fn remove_education(&mut self, id: Uuid) {
        self.document = mutation::remove_education(&self.document, id);
    }

    pub fn add_skill(&mut self) -> Uuid {
        let (doc, id) = mutation::add_skill(&self.document);
        self.document = doc;
        debug!("Added skill {id}");
        id
    }

    pub fn update_skill(&mut self, id: Uuid, update: SkillUpdate) {
        self.document = mutation::update_skill(&self.document, id, update);
    }

    /// String-facing category update for shells wired to raw form values.
    /// Unknown categories are rejected and reported; the document stays
    /// unchanged.
    pub fn update_skill_category(&mut self, id: Uuid, category: &str) -> Result<(), AppError> {
        match category.parse::<SkillCategory>() {
            Ok(parsed) => {
                self.update_skill(
                    id,
                    SkillUpdate {
                        category: Some(parsed),
                        ..Default::default()
                    },
                );
                Ok(())
            }
            Err(err) => {
                self.notifier.notify(
                    NoticeKind::Error,
                    "Categoria inválida",
                    "Use technical, soft ou language.",
                );
                Err(err)
            }
        }
    }

    pub fn remove_skill(&mut self, id: Uuid) {
        self.document = mutation::remove_skill(&self.document, id);
    }

    // ── Export ──────────────────────────────────────────────────────────

    pub fn export(&self) -> Result<Snapshot, AppError> {
        snapshot::snapshot(&self.document)
    }

    /// Writes the export file into `dir` and notifies the user.
    pub async fn export_to(&self, dir: &Path) -> Result<PathBuf, AppError> {
        let path = snapshot::write_snapshot(dir, &self.document).await?;
        self.notifier.notify(
            NoticeKind::Info,
            "CV exportado",
            &format!("Arquivo salvo como {}.", snapshot::export_filename(&self.document)),
        );
        Ok(path)
    }

    // ── Import ──────────────────────────────────────────────────────────

    /// Reads and parses an import file, then hands the candidate to the
    /// reconciler. A file that fails to read or parse leaves the document
    /// untouched and the reconciler idle.
    pub async fn import_from(&mut self, source: &dyn FileSource) -> Result<ImportOutcome, AppError> {
        let bytes = match source.read().await {
            Ok(bytes) => bytes,
            Err(err) => {
                self.notifier
                    .notify(NoticeKind::Error, "Erro ao importar", &err.user_message());
                return Err(err);
            }
        };
        let candidate = match snapshot::parse_document(&bytes) {
            Ok(candidate) => candidate,
            Err(err) => {
                self.notifier
                    .notify(NoticeKind::Error, "Arquivo inválido", &err.user_message());
                return Err(err);
            }
        };
        match self.reconciler.receive_candidate(&self.document, candidate) {
            Some(doc) => {
                self.document = doc;
                self.notifier.notify(
                    NoticeKind::Info,
                    "Dados importados",
                    "Seu currículo foi carregado com sucesso.",
                );
                Ok(ImportOutcome::Applied)
            }
            None => Ok(ImportOutcome::AwaitingDecision),
        }
    }

    /// The candidate pending a decision, for shells that preview it.
    pub fn pending_import(&self) -> Option<&Document> {
        self.reconciler.pending_candidate()
    }

    /// Applies the user's choice for a pending import. Returns `true` when
    /// a pending candidate was resolved, `false` when none existed.
    pub fn resolve_import(&mut self, choice: ImportChoice) -> bool {
        match self.reconciler.decide(choice, &self.document) {
            Some(doc) => {
                self.document = doc;
                match choice {
                    ImportChoice::Cancel => self.notifier.notify(
                        NoticeKind::Info,
                        "Importação cancelada",
                        "Seus dados atuais foram mantidos.",
                    ),
                    ImportChoice::Merge | ImportChoice::Overwrite => self.notifier.notify(
                        NoticeKind::Info,
                        "Dados importados",
                        "Seu currículo foi carregado com sucesso.",
                    ),
                }
                true
            }
            None => false,
        }
    }

    // ── Print ───────────────────────────────────────────────────────────

    /// Gate plus render: a document missing any of the three required
    /// fields never reaches the renderer.
    pub fn print_document(&self, renderer: &dyn PrintRenderer) -> Result<String, AppError> {
        let readiness = print_readiness(&self.document);
        if !readiness.passed {
            self.notifier.notify(
                NoticeKind::Error,
                "Dados incompletos",
                "Preencha pelo menos nome, email e resumo profissional antes de gerar o CV.",
            );
            return Err(AppError::Validation(format!(
                "campos obrigatórios ausentes: {}",
                readiness.missing.join(", ")
            )));
        }
        let view = renderer.render(&self.document);
        info!("Rendered printable CV for {}", self.document.personal_info.full_name);
        self.notifier.notify(
            NoticeKind::Info,
            "CV pronto para impressão",
            "Seu currículo foi aberto em uma nova janela para download/impressão.",
        );
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<(NoticeKind, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, kind: NoticeKind, title: &str, _message: &str) {
            self.notices.lock().unwrap().push((kind, title.to_string()));
        }
    }

    impl RecordingNotifier {
        fn titles(&self) -> Vec<String> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .map(|(_, t)| t.clone())
                .collect()
        }
    }

    struct StaticFileSource {
        bytes: Vec<u8>,
    }

    #[async_trait]
    impl FileSource for StaticFileSource {
        async fn read(&self) -> Result<Vec<u8>, AppError> {
            Ok(self.bytes.clone())
        }
    }

    fn session() -> (Session, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        (Session::new(notifier.clone()), notifier)
    }

    fn candidate_json(name: &str) -> Vec<u8> {
        format!(r#"{{"personalInfo": {{"fullName": "{name}"}}}}"#).into_bytes()
    }

    #[test]
    fn test_edits_flow_through_the_session() {
        let (mut session, _) = session();
        let id = session.add_experience();
        session.update_experience(
            id,
            ExperienceUpdate {
                job_title: Some("Desenvolvedora".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(session.document().experience[0].job_title, "Desenvolvedora");
        session.remove_experience(id);
        assert!(session.document().experience.is_empty());
    }

    #[test]
    fn test_invalid_skill_category_is_rejected_and_reported() {
        let (mut session, notifier) = session();
        let id = session.add_skill();
        let err = session.update_skill_category(id, "managerial").unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(session.document().skills[0].category, SkillCategory::Technical);
        assert_eq!(notifier.titles(), vec!["Categoria inválida"]);
    }

    #[test]
    fn test_valid_skill_category_string() {
        let (mut session, _) = session();
        let id = session.add_skill();
        session.update_skill_category(id, "language").unwrap();
        assert_eq!(session.document().skills[0].category, SkillCategory::Language);
    }

    #[tokio::test]
    async fn test_import_into_empty_session_applies_directly() {
        let (mut session, notifier) = session();
        let source = StaticFileSource {
            bytes: candidate_json("Beatriz"),
        };
        let outcome = session.import_from(&source).await.unwrap();
        assert_eq!(outcome, ImportOutcome::Applied);
        assert_eq!(session.document().personal_info.full_name, "Beatriz");
        assert_eq!(notifier.titles(), vec!["Dados importados"]);
    }

    #[tokio::test]
    async fn test_import_over_existing_data_waits_for_decision() {
        let (mut session, _) = session();
        let id = session.add_experience();
        session.update_experience(
            id,
            ExperienceUpdate {
                job_title: Some("Dev".to_string()),
                ..Default::default()
            },
        );
        let source = StaticFileSource {
            bytes: candidate_json("Beatriz"),
        };
        let outcome = session.import_from(&source).await.unwrap();
        assert_eq!(outcome, ImportOutcome::AwaitingDecision);
        assert_eq!(
            session.pending_import().map(|d| d.personal_info.full_name.as_str()),
            Some("Beatriz")
        );
        // Nothing applied yet.
        assert_eq!(session.document().personal_info.full_name, "");
    }

    #[tokio::test]
    async fn test_import_decision_cancel_keeps_document() {
        let (mut session, _) = session();
        let id = session.add_skill();
        session.update_skill(
            id,
            SkillUpdate {
                name: Some("React".to_string()),
                ..Default::default()
            },
        );
        let before = session.document().clone();
        let source = StaticFileSource {
            bytes: candidate_json("Beatriz"),
        };
        session.import_from(&source).await.unwrap();
        assert!(session.resolve_import(ImportChoice::Cancel));
        assert_eq!(session.document(), &before);
    }

    #[tokio::test]
    async fn test_import_decision_merge_combines() {
        let (mut session, _) = session();
        let id = session.add_experience();
        session.update_experience(
            id,
            ExperienceUpdate {
                company: Some("Acme".to_string()),
                ..Default::default()
            },
        );
        let source = StaticFileSource {
            bytes: candidate_json("Beatriz"),
        };
        session.import_from(&source).await.unwrap();
        session.resolve_import(ImportChoice::Merge);
        assert_eq!(session.document().personal_info.full_name, "Beatriz");
        assert_eq!(session.document().experience[0].company, "Acme");
    }

    #[tokio::test]
    async fn test_malformed_import_leaves_everything_untouched() {
        let (mut session, notifier) = session();
        let id = session.add_experience();
        session.update_experience(
            id,
            ExperienceUpdate {
                company: Some("Acme".to_string()),
                ..Default::default()
            },
        );
        let before = session.document().clone();
        let source = StaticFileSource {
            bytes: b"{ definitely not a cv".to_vec(),
        };
        let err = session.import_from(&source).await.unwrap_err();
        assert_eq!(err.code(), "PARSE_ERROR");
        assert_eq!(session.document(), &before);
        assert!(session.pending_import().is_none());
        assert_eq!(notifier.titles(), vec!["Arquivo inválido"]);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_reported() {
        let (mut session, notifier) = session();
        let source = DiskFileSource::new("/definitely/missing/cv.json");
        let err = session.import_from(&source).await.unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
        assert_eq!(notifier.titles(), vec!["Erro ao importar"]);
    }

    #[test]
    fn test_resolve_without_pending_import_is_noop() {
        let (mut session, notifier) = session();
        assert!(!session.resolve_import(ImportChoice::Overwrite));
        assert!(notifier.titles().is_empty());
    }

    #[tokio::test]
    async fn test_print_blocked_until_required_fields_filled() {
        let (mut session, notifier) = session();
        let err = session.print_document(&HtmlPrintRenderer).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err
            .user_message()
            .contains("nome, email, resumo profissional"));
        assert_eq!(notifier.titles(), vec!["Dados incompletos"]);

        let source = StaticFileSource {
            bytes: br#"{
                "personalInfo": {"fullName": "Ana", "email": "ana@exemplo.com"},
                "summary": "Engenheira de software"
            }"#
            .to_vec(),
        };
        session.import_from(&source).await.unwrap();
        let html = session.print_document(&HtmlPrintRenderer).unwrap();
        assert!(html.contains("<h1>Ana</h1>"));
    }

    #[tokio::test]
    async fn test_export_to_disk_notifies() {
        let (session, notifier) = session();
        let dir = tempfile::tempdir().unwrap();
        let path = session.export_to(dir.path()).await.unwrap();
        assert!(path.ends_with("cv-dados.json"));
        assert_eq!(notifier.titles(), vec!["CV exportado"]);
    }
}
