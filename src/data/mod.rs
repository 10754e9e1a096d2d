//! Data layer: plot-file parsing, the sample model, and alignment.
//!
//! Architecture:
//! ```text
//!  test.plt / reference.plt
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  text → Vec<Row> (7 or 9 fields per line)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ transform  │  Row → (SampleKey, AmplitudePair) → Dataset
//!   └───────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  align    │  two Datasets → AlignedPair on the shared keys
//!   └──────────┘
//! ```

pub mod align;
pub mod loader;
pub mod model;
pub mod transform;
