//! # Reskit Params
//!
//! List parameters for resource collection views and the machinery that
//! keeps them synchronized with a navigable location.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ params: ListParams + minimal query codec    │
//! └─────────────────────────────────────────────┘
//!                     ↕
//! ┌─────────────────────────────────────────────┐
//! │ sync: ParamSync                             │
//! │  - canonical owner of a view's params       │
//! │  - reset-to-page-1 on search/sort/filter    │
//! │  - minimal round-trippable query strings    │
//! └─────────────────────────────────────────────┘
//!                     ↕
//! ┌─────────────────────────────────────────────┐
//! │ navigation: Navigator port (location/push)  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Params are canonical**: the location is a derived, round-trippable
//!    encoding, not an independent source of truth (except on initial load)
//! 2. **Minimal serialization**: default-equal and empty values never appear
//!    in the query string
//! 3. **Forward compatible**: unrecognized query keys survive as filters

mod navigation;
mod params;
mod sync;

pub use navigation::{Location, MemoryNavigator, Navigator};
pub use params::{ListParams, ParamsError, ParamsPatch, SortOrder, DEFAULT_LIMIT};
pub use sync::ParamSync;
