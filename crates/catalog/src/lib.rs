//! Product catalog (static, read-only).
//!
//! The catalog is the only source of product descriptors a quote can
//! reference. It is validated once at construction and never mutated.

pub mod catalog;
pub mod product;

pub use catalog::{Catalog, Category};
pub use product::{ProductDescriptor, ProductId};
