pub mod catalog;
pub mod config;
pub mod error;
pub mod marketplace;
pub mod models;
pub mod price_range;
pub mod selector;
pub mod session;
pub mod state;

#[cfg(feature = "python")]
mod python;

use std::sync::Arc;

use log::warn;

pub use crate::config::{Config, EmptyResultPolicy};
pub use crate::error::{GiftError, Result};
pub use crate::marketplace::{Marketplace, MercadoLibreClient};
pub use crate::models::{Category, Product};
pub use crate::price_range::PriceRange;
pub use crate::selector::{RandomSource, Selection, ThreadRandom};
pub use crate::session::Session;
pub use crate::state::{Action, Outcome, Status, WidgetState};

// ==================== MAIN ORCHESTRATOR ====================

/// Category loading and gift selection over one marketplace.
#[derive(Clone)]
pub struct GiftFinder {
    marketplace: Arc<dyn Marketplace>,
    random: Arc<dyn RandomSource>,
}

impl GiftFinder {
    pub fn new(marketplace: Arc<dyn Marketplace>) -> Self {
        Self {
            marketplace,
            random: Arc::new(ThreadRandom),
        }
    }

    /// MercadoLibre client built from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = MercadoLibreClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    pub fn with_random(self, random: Arc<dyn RandomSource>) -> Self {
        Self { random, ..self }
    }

    pub async fn categories(&self) -> Vec<Category> {
        catalog::load_categories(self.marketplace.as_ref()).await
    }

    pub async fn suggest(&self, category_id: &str, range: Option<PriceRange>) -> Selection {
        selector::select_gift(
            self.marketplace.as_ref(),
            self.random.as_ref(),
            category_id,
            range,
        )
        .await
    }

    /// Like [`GiftFinder::suggest`], with the range given as its selector token.
    /// Unknown tokens apply no price filter.
    pub async fn suggest_by_token(&self, category_id: &str, token: &str) -> Selection {
        let range = PriceRange::from_token(token);
        if range.is_none() {
            warn!("unknown price range token {:?}, not filtering", token);
        }
        self.suggest(category_id, range).await
    }
}
