//! Content store contracts and implementations.
//!
//! # Responsibility
//! - Provide read access to content documents keyed by relative path.
//! - Resolve language-qualified paths with bottom-up and top-down policies.
//!
//! # Invariants
//! - Stores are read-only from the resolution engine's perspective.
//! - Paths use `/` separators regardless of the backing medium.
//!
//! # See also
//! - `service::day_service` for the documents each resolution step reads.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod fs;
mod library;
mod memory;
mod sqlite;

pub use fs::FsContentStore;
pub use library::{is_language_tag, Document, Library};
pub use memory::MemoryContentStore;
pub use sqlite::SqliteContentStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// No candidate path exists for the requested document.
    NotFound { path: String },
    Io { path: PathBuf, source: std::io::Error },
    InvalidRoot { root: PathBuf, expected: String },
    InvalidLanguage(String),
    InvalidBundle(String),
    Db(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "failed to locate {path}"),
            Self::Io { path, source } => write!(f, "failed to read `{}`: {source}", path.display()),
            Self::InvalidRoot { root, expected } => write!(
                f,
                "bad content root `{}`: missing {expected}",
                root.display()
            ),
            Self::InvalidLanguage(lang) => write!(
                f,
                "invalid language tag `{lang}`; expected segments like `en` or `cu/ru`"
            ),
            Self::InvalidBundle(message) => write!(f, "invalid content bundle: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::InvalidRoot { .. }
            | Self::InvalidLanguage(_)
            | Self::InvalidBundle(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Path-keyed document repository.
pub trait ContentStore {
    /// Fails only when the backing medium cannot answer.
    fn has(&self, path: &str) -> StoreResult<bool>;

    /// Fails with `StoreError::NotFound` when `path` is absent.
    fn get(&self, path: &str) -> StoreResult<String>;
}

impl<S: ContentStore + ?Sized> ContentStore for &S {
    fn has(&self, path: &str) -> StoreResult<bool> {
        (**self).has(path)
    }

    fn get(&self, path: &str) -> StoreResult<String> {
        (**self).get(path)
    }
}
