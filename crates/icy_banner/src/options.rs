use std::{fs, path::PathBuf};

use icy_figlet::MissingGlyph;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MissingGlyphOption {
    #[default]
    Fail,
    Skip,
    Replace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default = "default_font")]
    pub default_font: String,

    /// Extra directories searched for `.flf` files.
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,

    #[serde(default)]
    pub missing_glyph: MissingGlyphOption,

    #[serde(default = "default_replacement_char")]
    pub replacement_char: char,
}

fn default_font() -> String {
    "standard".to_string()
}

fn default_replacement_char() -> char {
    '?'
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_font: default_font(),
            font_dirs: Vec::new(),
            missing_glyph: MissingGlyphOption::default(),
            replacement_char: default_replacement_char(),
        }
    }
}

impl Options {
    /// Reads `options.toml` from the config directory, falls back to defaults
    /// if there is none.
    pub fn load_options() -> anyhow::Result<Self> {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "icy_banner") {
            let options_file = proj_dirs.config_dir().join("options.toml");
            if options_file.exists() {
                let content = fs::read_to_string(&options_file)?;
                return Self::from_toml(&content);
            }
        }
        Ok(Options::default())
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let options: Options = toml::from_str(content)?;
        Ok(options)
    }

    pub fn missing_glyph(&self, mode: MissingGlyphOption) -> MissingGlyph {
        match mode {
            MissingGlyphOption::Fail => MissingGlyph::Fail,
            MissingGlyphOption::Skip => MissingGlyph::Skip,
            MissingGlyphOption::Replace => MissingGlyph::Replace(self.replacement_char),
        }
    }
}
