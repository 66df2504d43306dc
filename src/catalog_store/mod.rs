mod models;
mod query_plan;
mod schema;
mod store;
mod trait_def;

pub use models::*;
pub use query_plan::{AlbumFilter, AlbumJoin, AlbumOrder, AlbumQueryPlan, Page, SubstringPattern};
pub use schema::CATALOG_VERSIONED_SCHEMAS;
pub use store::SqliteCatalogStore;
pub use trait_def::CatalogStore;
