//! # georegistry-types
//!
//! Administrative hierarchy entity types for the georegistry engine.
//!
//! This crate provides the four entity levels of a national geographic
//! registry, each owned by its parent:
//!
//! - **`Province`** — top level, addressed by a globally unique code
//! - **`District`** — owned by a province
//! - **`Municipality`** — owned by a district, classified by [`MunicipalityType`]
//! - **`Ward`** — owned by a municipality, addressed by a ward number
//!
//! All types are serializable with Serde and built on top of the `geo`
//! crate's geometric primitives. Aggregate statistics (population totals,
//! descendant counts) are computed on read from live children and never
//! stored redundantly.
//!
//! ## Examples
//!
//! ```rust
//! use georegistry_types::{District, Province};
//!
//! let province = Province::new("P1", "Koshi")
//!     .with_population(4_961_412)
//!     .with_district(District::new("D1", "Morang"));
//!
//! assert_eq!(province.district_count(), 1);
//! ```

pub mod district;
pub mod municipality;
pub mod province;
pub mod ward;

pub use district::District;
pub use municipality::{Municipality, MunicipalityType};
pub use province::Province;
pub use ward::Ward;

/// Maximum length of an entity code.
pub const MAX_CODE_LEN: usize = 10;

/// Highest ward number a ward may carry.
pub const MAX_WARD_NUMBER: u32 = 33;

/// Highest declared ward count a municipality may carry.
pub const MAX_TOTAL_WARDS: u32 = 35;
