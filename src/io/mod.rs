//! Input/output helpers.
//!
//! - HTML start-tag scanning (`html`)
//! - page loading from HTML or attribute maps (`page`)
//! - fetching pages from the portal (`fetch`)
//! - chart config exports (`export`)

pub mod export;
pub mod fetch;
pub mod html;
pub mod page;

pub use export::*;
pub use fetch::PortalClient;
pub use page::Page;
