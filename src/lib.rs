// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // Code items in docs - extensive doc changes needed
#![allow(clippy::module_name_repetitions)] // Type names matching module - acceptable

//! # sortq - Sort Query Parsing with Safe ORDER BY Rendering
//!
//! Turns an untrusted, URL-safe "sort" parameter and/or a SQL-style order
//! string into one validated, ordered list of field/direction pairs, and
//! renders that list back as a canonical string, an ordered mapping, or a
//! quoted ORDER BY clause. Web handlers hand the raw request values in;
//! the data layer gets an injection-safe ordering instruction out.
//!
//! ## Quick Start
//!
//! ```
//! use sortq::prelude::*;
//!
//! let parser = sortq::parse(Some("email_desc!name_desc"), Some("email ASC, phone ASC"));
//!
//! // Sort-string fields win over order-string fields; the rest is merged
//! // in order, one entry per field.
//! assert_eq!(parser.to_sort_string(), "email_desc!name_desc!phone_asc");
//! assert_eq!(parser.to_order_clause(), "email DESC, name DESC, phone ASC");
//! ```
//!
//! ## The two grammars
//!
//! | Input | Example | Token shape |
//! |-------|---------|-------------|
//! | Sort string | `"email_desc!name_asc"` | `<field>_<asc\|desc>`, `!`-separated |
//! | Order string | `"email ASC, phone"` | `<field> [ASC\|DESC]`, `,`-separated |
//!
//! Fields are ASCII letters, digits, underscores and dots (`users.name`).
//! Anything else never parses, so injection payloads are dropped before
//! rendering is ever reached:
//!
//! ```
//! use sortq::prelude::*;
//!
//! let parser = sortq::parse(Some("(SELECT 1); DROP TABLE users--_asc"), Some("email"));
//! assert_eq!(parser.to_order_clause(), "email ASC");
//! ```
//!
//! ## Whitelisting
//!
//! Restrict which fields clients may sort by, from literal names and table
//! descriptors. A column name occurring in more than one place stays
//! reachable only through its qualified form:
//!
//! ```
//! use sortq::prelude::*;
//!
//! let parser = sortq::parse(Some("users.email_desc!secret_asc"), None)
//!     .whitelist([Source::from("name"), Source::table("users", ["email", "id"])]);
//!
//! assert_eq!(parser.to_order_clause(), "users.email DESC");
//! ```
//!
//! ## Quoting
//!
//! The ORDER BY renderer quotes each dotted-path segment through a
//! caller-supplied function; [`Dialect`] implementations cover the common
//! conventions:
//!
//! ```
//! use sortq::prelude::*;
//!
//! let parser = sortq::parse(None, Some("users.name DESC"));
//! assert_eq!(
//!     parser.to_order_clause_with(Mysql.quoter()),
//!     "`users`.`name` DESC"
//! );
//! ```

mod dialect;
mod merge;
mod parser;
mod render;
mod toggle;
mod tokenize;
mod types;
mod whitelist;

pub use dialect::{Dialect, Mysql, Postgres, Sqlite};
pub use merge::merge;
pub use parser::Parser;
pub use render::{mapping, order_clause, sort_string};
pub use toggle::Toggler;
pub use tokenize::{
    Tokenized, is_valid_sort_field, parse_order, parse_sort, tokenize_order, tokenize_sort,
};
pub use types::{CustomList, Direction, SortEntry};
pub use whitelist::{Source, Whitelist};

/// Re-export of [`indexmap::IndexMap`], the insertion-ordered map returned
/// by [`Parser::to_map`].
pub use indexmap::IndexMap;

/// Parse a sort string and an order string into a [`Parser`].
///
/// Convenience constructor; equivalent to [`Parser::new`].
#[must_use]
pub fn parse(sort: Option<&str>, order: Option<&str>) -> Parser {
    Parser::new(sort, order)
}

/// Prelude module for convenient imports.
///
/// ```
/// use sortq::prelude::*;
///
/// let parser = sortq::parse(Some("email_desc"), None);
/// assert_eq!(parser.to_sort_string(), "email_desc");
/// ```
pub mod prelude {
    pub use crate::{
        CustomList, Dialect, Direction, IndexMap, Mysql, Parser, Postgres, SortEntry, Source,
        Sqlite, Toggler, Tokenized, Whitelist, is_valid_sort_field, merge, parse, parse_order,
        parse_sort, tokenize_order, tokenize_sort,
    };
}


// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
