mod errors;
mod storage;
mod sync;
mod types;

pub use errors::MarketplaceError;
pub use storage::MarketplaceStore;
pub use sync::sync_marketplace_purchases;
pub use types::{MarketplaceAccount, MarketplacePlan, MarketplaceRecord, PlanData};
