//! Font identifier resolution.
//!
//! Decorations name fonts the way a style sheet does (`"Pacifico, cursive"`,
//! `'"Comic Neue", cursive'`). [`FontBook`] turns such a stack into concrete font bytes using a
//! fontdb database filled from system fonts and configured font directories.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

/// Font bytes selected for an identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFont {
    pub family: String,
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
}

/// One entry of a parsed font stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontFamilyName {
    Named(String),
    Serif,
    SansSerif,
    Cursive,
    Fantasy,
    Monospace,
}

/// Split a comma-separated font stack, unquoting names and recognizing generic families.
pub fn parse_font_stack(identifier: &str) -> Vec<FontFamilyName> {
    identifier
        .split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|part| !part.is_empty())
        .map(|part| match part.to_ascii_lowercase().as_str() {
            "serif" => FontFamilyName::Serif,
            "sans-serif" => FontFamilyName::SansSerif,
            "cursive" => FontFamilyName::Cursive,
            "fantasy" => FontFamilyName::Fantasy,
            "monospace" => FontFamilyName::Monospace,
            _ => FontFamilyName::Named(part.to_string()),
        })
        .collect()
}

pub struct FontBook {
    db: fontdb::Database,
    cache: HashMap<String, Option<ResolvedFont>>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.db.len())
            .field("cached", &self.cache.len())
            .finish()
    }
}

impl FontBook {
    /// A book with no faces; every lookup misses until fonts are added.
    pub fn empty() -> Self {
        Self {
            db: fontdb::Database::new(),
            cache: HashMap::new(),
        }
    }

    /// System fonts plus every `.ttf`/`.otf`/`.ttc` file found directly in `dirs`.
    pub fn with_system_fonts(dirs: &[PathBuf]) -> Self {
        let mut book = Self::empty();
        book.db.load_system_fonts();
        for dir in dirs {
            book.load_dir(dir);
        }
        tracing::debug!(faces = book.db.len(), "font book loaded");
        book
    }

    pub fn load_dir(&mut self, dir: &Path) {
        load_fonts_from_dir(&mut self.db, dir);
        self.cache.clear();
    }

    pub fn load_font_data(&mut self, bytes: Vec<u8>) {
        self.db.load_font_data(bytes);
        self.cache.clear();
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve a font stack to font bytes.
    ///
    /// Tries every family of the stack in order, then sans-serif, then any face at all.
    /// Returns `None` only when the book holds no usable face.
    pub fn resolve(&mut self, identifier: &str) -> Option<ResolvedFont> {
        if let Some(hit) = self.cache.get(identifier) {
            return hit.clone();
        }

        let resolved = self.lookup(identifier);
        if resolved.is_none() {
            tracing::warn!(identifier, "no font face available");
        }
        self.cache.insert(identifier.to_string(), resolved.clone());
        resolved
    }

    fn lookup(&self, identifier: &str) -> Option<ResolvedFont> {
        let stack = parse_font_stack(identifier);
        let mut families: Vec<fontdb::Family<'_>> = stack
            .iter()
            .map(|f| match f {
                FontFamilyName::Named(name) => fontdb::Family::Name(name.as_str()),
                FontFamilyName::Serif => fontdb::Family::Serif,
                FontFamilyName::SansSerif => fontdb::Family::SansSerif,
                FontFamilyName::Cursive => fontdb::Family::Cursive,
                FontFamilyName::Fantasy => fontdb::Family::Fantasy,
                FontFamilyName::Monospace => fontdb::Family::Monospace,
            })
            .collect();
        families.push(fontdb::Family::SansSerif);

        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))?;

        let family = self
            .db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let (bytes, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))?;

        if !stack.iter().any(|f| matches!(f, FontFamilyName::Named(n) if n.eq_ignore_ascii_case(&family)))
        {
            tracing::debug!(identifier, family, "font stack resolved to fallback family");
        }

        Some(ResolvedFont {
            family,
            bytes: Arc::new(bytes),
            index,
        })
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
