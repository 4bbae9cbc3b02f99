use super::{ContentStore, StoreError, StoreResult};
use once_cell::sync::Lazy;
use regex::Regex;

static LANGUAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(?:/[A-Za-z0-9_-]+)*$").expect("valid language regex")
});

/// True for tags like `en` or `cu/ru`.
pub fn is_language_tag(lang: &str) -> bool {
    LANGUAGE_RE.is_match(lang)
}

/// A document together with the store path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: String,
    pub text: String,
}

/// Language-aware view over a content store.
///
/// A tag `a/b` yields the prefixes `a/b`, `a` and the bare path; more
/// specific data overrides more general defaults.
pub struct Library<'s, S: ContentStore + ?Sized> {
    store: &'s S,
    segments: Vec<String>,
}

impl<'s, S: ContentStore + ?Sized> Library<'s, S> {
    /// Binds `store` to a language tag. An empty tag reads unqualified paths only.
    pub fn new(store: &'s S, lang: &str) -> StoreResult<Self> {
        let lang = lang.trim_matches('/');
        if !lang.is_empty() && !is_language_tag(lang) {
            return Err(StoreError::InvalidLanguage(lang.to_string()));
        }
        let segments = lang
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Self { store, segments })
    }

    pub fn store(&self) -> &'s S {
        self.store
    }

    pub fn language(&self) -> String {
        self.segments.join("/")
    }

    fn candidate(&self, depth: usize, path: &str) -> String {
        let mut parts: Vec<&str> = self.segments[..depth].iter().map(String::as_str).collect();
        parts.push(path);
        parts.join("/")
    }

    /// First existing candidate, most specific prefix first.
    ///
    /// Store failures propagate; only a clean miss on every candidate is
    /// `StoreError::NotFound`.
    pub fn find_bottom_up(&self, path: &str) -> StoreResult<String> {
        for depth in (0..=self.segments.len()).rev() {
            let candidate = self.candidate(depth, path);
            if self.store.has(&candidate)? {
                return Ok(candidate);
            }
        }
        Err(StoreError::NotFound {
            path: path.to_string(),
        })
    }

    /// Every existing candidate, least specific first.
    pub fn find_top_down(&self, path: &str) -> StoreResult<Vec<String>> {
        let mut found = Vec::new();
        for depth in 0..=self.segments.len() {
            let candidate = self.candidate(depth, path);
            if self.store.has(&candidate)? {
                found.push(candidate);
            }
        }
        Ok(found)
    }

    pub fn read_bottom_up(&self, path: &str) -> StoreResult<Document> {
        let found = self.find_bottom_up(path)?;
        let text = self.store.get(&found)?;
        Ok(Document { path: found, text })
    }

    pub fn read_top_down(&self, path: &str) -> StoreResult<Vec<Document>> {
        self.find_top_down(path)?
            .into_iter()
            .map(|found| {
                let text = self.store.get(&found)?;
                Ok(Document { path: found, text })
            })
            .collect()
    }

    pub fn triodion(&self, day: i64) -> StoreResult<Document> {
        self.read_bottom_up(&triodion_path(day))
    }

    pub fn pentecostarion(&self, day: i64) -> StoreResult<Document> {
        self.read_bottom_up(&pentecostarion_path(day))
    }

    pub fn menaion(&self, month: u32, day: u32) -> StoreResult<Document> {
        self.read_bottom_up(&menaion_path(month, day))
    }

    pub fn lives(&self, cid: &str) -> StoreResult<Vec<Document>> {
        self.read_top_down(&lives_path(cid))
    }

    pub fn fasting(&self) -> StoreResult<Vec<Document>> {
        self.read_top_down(FASTING_PATH)
    }

    pub fn divine_liturgy(&self) -> StoreResult<Document> {
        self.read_bottom_up(DIVINE_LITURGY_PATH)
    }
}

pub(crate) const FASTING_PATH: &str = "xml/Commands/Fasting.xml";
pub(crate) const DIVINE_LITURGY_PATH: &str = "xml/Commands/DivineLiturgy.xml";

pub(crate) fn triodion_path(day: i64) -> String {
    format!("xml/triodion/{day:02}.xml")
}

pub(crate) fn pentecostarion_path(day: i64) -> String {
    format!("xml/pentecostarion/{day:02}.xml")
}

pub(crate) fn menaion_path(month: u32, day: u32) -> String {
    format!("xml/{month:02}/{day:02}.xml")
}

pub(crate) fn lives_path(cid: &str) -> String {
    if cid.len() == 1 && cid.bytes().all(|byte| byte.is_ascii_digit()) {
        format!("xml/lives/0{cid}.xml")
    } else {
        format!("xml/lives/{cid}.xml")
    }
}
