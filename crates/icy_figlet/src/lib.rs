#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc
)]
//! FIGlet compatible banner rendering.
//!
//! ```no_run
//! use icy_figlet::{load_font, Renderer};
//!
//! let font = load_font("standard")?;
//! println!("{}", Renderer::new(&font).render("Hello")?);
//! # Ok::<(), icy_figlet::FigError>(())
//! ```

mod errors;
pub use errors::*;

mod layout;
pub use layout::*;

pub mod header;
pub use header::Header;

mod glyph;
pub use glyph::*;

mod font;
pub use font::*;

mod smushing;

mod parser;
pub use parser::FontParser;

mod renderer;
pub use renderer::*;

mod writer;

mod registry;
pub use registry::*;

pub type Result<T> = std::result::Result<T, FigError>;
