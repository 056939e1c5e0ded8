use log::debug;

use crate::config::{Config, EmptyResultPolicy};
use crate::error::Result;
use crate::price_range::PriceRange;
use crate::selector::Selection;
use crate::state::{Action, WidgetState};
use crate::GiftFinder;

/// A search that has been started but not yet reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub category_id: String,
    pub range: PriceRange,
}

/// One widget instance: owns the state and performs the I/O the state asks for.
pub struct Session {
    finder: GiftFinder,
    state: WidgetState,
}

impl Session {
    pub fn new(finder: GiftFinder, policy: EmptyResultPolicy) -> Self {
        Self {
            finder,
            state: WidgetState::new(policy),
        }
    }

    /// MercadoLibre-backed session using the configured empty-result policy.
    pub fn from_config(config: &Config) -> Result<Self> {
        let finder = GiftFinder::from_config(config)?;
        Ok(Self::new(finder, config.empty_result_policy))
    }

    pub fn state(&self) -> &WidgetState {
        &self.state
    }

    pub fn finder(&self) -> &GiftFinder {
        &self.finder
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Initial mount: populate the category selector.
    pub async fn start(&mut self) {
        let categories = self.finder.categories().await;
        self.dispatch(Action::CategoriesLoaded(categories));
    }

    pub fn select_category(&mut self, id: impl Into<String>) {
        self.dispatch(Action::SelectCategory(id.into()));
    }

    pub fn select_price_range(&mut self, range: PriceRange) {
        self.dispatch(Action::SelectPriceRange(range));
    }

    /// Marks a search as in flight; `None` while the search button is disabled.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        if !self.state.can_search() {
            return None;
        }
        let category_id = self.state.selected_category.clone()?;
        let range = self.state.price_range?;

        self.dispatch(Action::SearchStarted);
        let generation = self.state.in_flight()?;
        debug!("search {} started category={}", generation, category_id);
        Some(SearchTicket {
            generation,
            category_id,
            range,
        })
    }

    /// Reports a search back. Tickets superseded by a reset or a newer search
    /// are dropped by the reducer.
    pub fn complete_search(&mut self, ticket: &SearchTicket, selection: Selection) {
        if self.state.in_flight() != Some(ticket.generation) {
            debug!("discarding stale search {}", ticket.generation);
        }
        self.dispatch(Action::SearchFinished {
            generation: ticket.generation,
            outcome: selection.into(),
        });
    }

    /// Search with the current inputs and publish the outcome. Also the re-roll.
    ///
    /// Returns `false` when searching is currently disabled.
    pub async fn roll(&mut self) -> bool {
        let Some(ticket) = self.begin_search() else {
            return false;
        };
        let selection = self
            .finder
            .suggest(&ticket.category_id, Some(ticket.range))
            .await;
        self.complete_search(&ticket, selection);
        true
    }

    /// Back to choosing a category; loaded categories stay.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}
