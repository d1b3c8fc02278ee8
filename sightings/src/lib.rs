pub mod error;
pub use error::*;

pub mod filter;
pub use filter::*;

pub mod table;
pub use table::*;

pub mod directory;
pub use directory::*;

pub mod client;
pub use client::*;

pub mod query;
pub use query::*;
