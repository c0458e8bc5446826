//! Newsletter signup forms.
//!
//! This module provides:
//! - SignupForm: CMS signup form documents and the built-in default form
//! - resolve: picks the form that applies to a page
//! - SignupEmbed: the pieces of an embed the site re-injects into its own form

pub mod embed;
pub mod form;
pub mod resolver;

pub use embed::SignupEmbed;
pub use form::{DEFAULT_SIGNUP_FORM, PageRef, SINGLE_PAGE_TYPE, SignupForm};
pub use resolver::{collection_page_type, resolve};
