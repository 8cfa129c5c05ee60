//! Client-side search core for the iTunes Store catalog.
//!
//! The crate tracks exactly one logical "current search" at a time: a new
//! search supersedes the previous one, and completions of superseded work
//! can never reach the visible state. The same guarantee covers per-row
//! thumbnail downloads, where table rows are recycled while fetches are
//! still in flight.
//!
//! - [`SearchCoordinator`] owns the [`SearchState`] machine and the single
//!   in-flight catalog request.
//! - [`ImageLoadManager`] runs token-guarded thumbnail fetches per display
//!   slot.
//! - [`Fetcher`] is the seam both sit on; [`HttpFetcher`] is the reqwest
//!   implementation, test doubles drive the rest deterministically.

pub mod coordinator;
pub mod fetch;
pub mod images;
pub mod logging;
pub mod model;

pub use coordinator::SearchCoordinator;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use images::{ImageLoadHandle, ImageLoadManager, SlotId};
pub use model::{Category, SearchConfig, SearchOutcome, SearchResult, SearchState};
