pub mod aggregate;
pub mod dispatch;
pub mod parse;
pub mod process;
pub mod run;
pub mod schema;
pub mod shared;
pub mod stats;
