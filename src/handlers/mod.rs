//! Lab endpoint handlers.
//!
//! All handlers are stateless and independent; none calls another. Page
//! handlers render HTML through [`render`], the rest produce JSON, plain
//! text, or raw bytes.

pub mod cache;
pub mod pages;
pub mod redirect;
pub mod render;
pub mod utility;
