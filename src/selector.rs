use log::{debug, info, warn};
use rand::Rng;

use crate::error::GiftError;
use crate::marketplace::Marketplace;
use crate::models::Product;
use crate::price_range::{filter_by_price, PriceRange};

// ==================== RANDOMNESS ====================

pub trait RandomSource: Send + Sync {
    /// An index in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Unseeded, thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Takes one element out of `items`, or `None` when there is nothing to pick.
///
/// Indices past the end wrap around so a sloppy source still lands on a member.
pub fn pick_random<T, R: RandomSource + ?Sized>(mut items: Vec<T>, random: &R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = random.pick(items.len()) % items.len();
    Some(items.swap_remove(idx))
}

// ==================== SELECTION ====================

#[derive(Debug)]
pub enum Selection {
    Found(Product),
    NoMatches,
    FetchFailed(GiftError),
}

impl Selection {
    pub fn product(&self) -> Option<&Product> {
        match self {
            Selection::Found(product) => Some(product),
            _ => None,
        }
    }
}

/// Search, filter by price, pick one, enlarge its thumbnail.
pub async fn select_gift<M, R>(
    marketplace: &M,
    random: &R,
    category_id: &str,
    range: Option<PriceRange>,
) -> Selection
where
    M: Marketplace + ?Sized,
    R: RandomSource + ?Sized,
{
    let products = match marketplace.search(category_id).await {
        Ok(products) => products,
        Err(e) => {
            warn!("search failed category={} error={}", category_id, e);
            return Selection::FetchFailed(e);
        }
    };

    let total = products.len();
    let candidates = filter_by_price(products, range);
    debug!(
        "category={} range={:?} kept {}/{} results",
        category_id,
        range.map(PriceRange::token),
        candidates.len(),
        total
    );

    match pick_random(candidates, random) {
        Some(product) => {
            info!("suggesting {} category={}", product.id, category_id);
            Selection::Found(product.with_large_thumbnail())
        }
        None => Selection::NoMatches,
    }
}
