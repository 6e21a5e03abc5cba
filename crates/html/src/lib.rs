//! In-memory page tree for documentation pages: a tolerant tokenizer, a tree
//! builder, tree-walk queries and text utilities.

pub mod collect;
pub mod debug;
pub mod query;
pub mod serialize;

mod dom_builder;
mod entities;
mod page;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_page, parse_page};
pub use crate::page::Page;
pub use crate::tokenizer::tokenize;
pub use crate::types::{NodeId, NodeKind, Token};

