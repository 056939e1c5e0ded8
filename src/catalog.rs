use log::{error, info};

use crate::marketplace::Marketplace;
use crate::models::Category;

/// Fetches the category list once; any failure leaves it empty.
///
/// There is no retry. The caller renders an empty selector and the failure
/// only shows up in the log.
pub async fn load_categories<M: Marketplace + ?Sized>(marketplace: &M) -> Vec<Category> {
    match marketplace.categories().await {
        Ok(categories) => {
            info!("loaded {} categories", categories.len());
            categories
        }
        Err(e) => {
            error!("error fetching categories: {}", e);
            Vec::new()
        }
    }
}
