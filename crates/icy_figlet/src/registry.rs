use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rust_embed::RustEmbed;

use crate::{FigError, Font, Result};

#[derive(RustEmbed)]
#[folder = "fonts"]
struct BundledFonts;

pub const FONT_EXTENSION: &str = "flf";

/// Process wide registry that only knows the bundled fonts.
pub static DEFAULT_REGISTRY: Lazy<FontRegistry> = Lazy::new(FontRegistry::default);

/// Loads a bundled font through [`DEFAULT_REGISTRY`].
pub fn load_font(name: &str) -> Result<Arc<Font>> {
    DEFAULT_REGISTRY.get(name)
}

/// Maps font names to fonts that are loaded on first use and kept afterwards.
///
/// Names are looked up in the fonts bundled with the crate first, then as
/// `<name>.flf` or `<name>` in each search path, in order.
#[derive(Default)]
pub struct FontRegistry {
    search_paths: Vec<PathBuf>,
    cache: Mutex<HashMap<String, Arc<Font>>>,
}

impl FontRegistry {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        self.search_paths.push(path.into());
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn get(&self, name: &str) -> Result<Arc<Font>> {
        let key = normalize_name(name);
        let mut cache = self.cache.lock();
        if let Some(font) = cache.get(&key) {
            return Ok(font.clone());
        }
        let font = Arc::new(self.load(&key)?.with_name(key.clone()));
        log::debug!("loaded font {key} ({} glyphs)", font.glyph_count());
        cache.insert(key, font.clone());
        Ok(font)
    }

    /// True if the font was already loaded.
    pub fn is_loaded(&self, name: &str) -> bool {
        self.cache.lock().contains_key(&normalize_name(name))
    }

    /// Names of all bundled fonts and fonts found in the search paths, sorted.
    pub fn font_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        for file in BundledFonts::iter() {
            if let Some(name) = font_name(Path::new(file.as_ref())) {
                names.insert(name);
            }
        }
        for dir in &self.search_paths {
            let Ok(entries) = fs::read_dir(dir) else {
                log::warn!("can't read font directory {}", dir.display());
                continue;
            };
            for entry in entries.flatten() {
                if let Some(name) = font_name(&entry.path()) {
                    names.insert(name);
                }
            }
        }
        names.into_iter().collect()
    }

    fn load(&self, name: &str) -> Result<Font> {
        let file_name = format!("{name}.{FONT_EXTENSION}");
        if let Some(file) = BundledFonts::get(&file_name) {
            return Font::from_bytes(&file.data);
        }
        for dir in &self.search_paths {
            for candidate in [dir.join(&file_name), dir.join(name)] {
                if candidate.is_file() {
                    log::debug!("loading font {}", candidate.display());
                    return Font::load(&candidate);
                }
            }
        }
        Err(FigError::UnknownFont(name.to_string()))
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim().to_lowercase();
    match name.strip_suffix(".flf") {
        Some(stem) => stem.to_string(),
        None => name,
    }
}

fn font_name(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_string_lossy().to_lowercase();
    if extension != FONT_EXTENSION {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().to_lowercase())
}
