//! Data layer: core types, loading, filtering, and derived views.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table (held by Loader)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterParameters → filtered Table, top_n
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  views    │  filtered table + top-N by output + top-N by growth
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  filtered Table → .csv / .json
//!   └──────────┘
//! ```

pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
