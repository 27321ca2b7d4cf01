//! Field schema model for custom resume sections
//!
//! `vitae-fields` is a standalone, schema-only crate: it defines the
//! vocabulary of field kinds, the shape of a field definition, and the
//! coercion rules that turn a submitted raw value into its canonical
//! stored representation. It knows nothing about sections, entries, or
//! ordering; consumers own the containers.
//!
//! # Architecture
//!
//! - **Schema-only**: owns field definitions and value coercion, not
//!   field storage
//! - **Closed kind set**: `FieldKind` is a tagged union, so adding a
//!   kind forces every dispatch site through the compiler
//! - **Opaque rich content**: rich-text values are carried as an opaque
//!   serializable blob and never inspected here

pub mod error;
pub mod types;
pub mod value;

pub use error::{FieldsError, Result};
pub use types::{validate_definition, Display, Editor, FieldDefinition, FieldId, FieldKind};
pub use value::{coerce_value, FieldValue, RichContent};
