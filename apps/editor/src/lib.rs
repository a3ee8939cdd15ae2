//! Core engine for an ATS-friendly CV editor.
//!
//! Holds the canonical document state, the pure mutation operations the
//! form layer calls, the import reconciler, JSON export/import and the
//! print pipeline. UI concerns (markup, toasts, file pickers) live in the
//! embedding shell and reach the core only through the capability traits
//! in [`session`].

pub mod errors;
pub mod logging;
pub mod models;
pub mod mutation;
pub mod reconcile;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod validation;

pub use errors::AppError;
pub use models::cv::Document;
pub use reconcile::ImportChoice;
pub use session::Session;
