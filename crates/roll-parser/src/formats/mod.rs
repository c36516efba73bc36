//! One parser per credits family.

mod plain_text;
mod size_coded;
mod style_coded;

pub use plain_text::parse_plain_text;
pub use size_coded::parse_size_coded;
pub use style_coded::parse_style_coded;
