//! Arrangement domain models.
//!
//! Provides the data types flowing through the planning pipeline:
//! catalog items, slot positions, arrangements and swap operations.
//!
//! # Domain Mappings
//!
//! | u-arrange | Perfume rack | Warehouse | Library |
//! |-----------|--------------|-----------|---------|
//! | CatalogItem | Bottle | SKU | Book |
//! | Position | Plane/row/column slot | Aisle/shelf/bin | Case/shelf/place |
//! | Arrangement | Rack contents | Bin map | Shelf order |
//! | SwapOp | Exchange two bottles | Re-slot two SKUs | Swap two books |

mod arrangement;
mod item;
mod position;
mod season;
mod swap;

pub use arrangement::Arrangement;
pub(crate) use arrangement::check_distinct_positions;
pub use item::CatalogItem;
pub use position::Position;
pub use season::{Season, TimeOfDay};
pub use swap::{SwapEndpoint, SwapOp};
