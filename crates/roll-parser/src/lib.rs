//! # roll-parser
//!
//! Credits extraction for Rollcall.
//!
//! Recovers a role to contributor-list structure from three credits families
//! whose only structural signal is formatting:
//! - **Plain text**: `_`-prefixed section and role labels
//! - **Size-coded markup**: `fontsize` attributes, with embedded releases
//! - **Style-coded markup**: `style` tags
//!
//! Every parser consults the same [`InclusionFilter`] and canonicalizes names
//! through [`NameCanonicalizer`]. [`CreditsEngine`] routes a
//! [`CreditsSource`] to the right parser, classifying markup by dialect.

pub mod canonical;
pub mod classifier;
pub mod engine;
pub mod error;
pub mod filter;
pub mod formats;
pub mod markup;
pub mod source;

pub use canonical::NameCanonicalizer;
pub use classifier::{classify, detect_dialect};
pub use engine::{CreditsEngine, CreditsFormat};
pub use error::ParserError;
pub use filter::InclusionFilter;
pub use formats::{parse_plain_text, parse_size_coded, parse_style_coded};
pub use markup::load_markup;
pub use source::{CreditsSource, decode_source};
