//! Card search: structured filters and the lazy filter engine.
//!
//! ## Key Types
//!
//! - `CardSearchFilters`: A query, renderable to and from a canonical string
//! - `CardFilter`: Lazy, restartable iterator of matching cards
//!
//! All text matching ignores case. Filter keys are property paths as listed
//! by [`CardGame::flattened_properties`](crate::CardGame::flattened_properties).

pub mod engine;
pub mod filters;

pub use engine::CardFilter;
pub use filters::CardSearchFilters;
