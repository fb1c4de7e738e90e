//! Page behaviors for the server-rendered hospital dashboards.
//!
//! Every behavior is generic over the [`page::Page`] boundary, so the same
//! code runs against the browser DOM (`hospital-ui-dom`) and against the
//! in-memory [`test_page::TestPage`].

pub mod autofill;
pub mod cascade;
pub mod config;
pub mod delete_guard;
pub mod filters;
pub mod init;
pub mod page;
pub mod regions;
pub mod stats;
pub mod test_page;

pub use config::PageConfig;
pub use init::{initialize_page, Behavior, InitReport};
pub use page::{EventKind, FetchError, Page, PageEvent, PageNode, SelectOption};
pub use regions::{RegionMap, RegionMapError};
