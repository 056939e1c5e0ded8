//! Widget state as a single value, advanced only by [`WidgetState::reduce`].

use crate::config::EmptyResultPolicy;
use crate::models::{Category, Product};
use crate::price_range::PriceRange;
use crate::selector::Selection;

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Loading,
    Display,
    NoMatches,
    Failed(String),
}

/// Result of one search as the widget sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Found(Product),
    NoMatches,
    Failed(String),
}

impl From<Selection> for Outcome {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Found(product) => Outcome::Found(product),
            Selection::NoMatches => Outcome::NoMatches,
            Selection::FetchFailed(e) => Outcome::Failed(e.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    CategoriesLoaded(Vec<Category>),
    SelectCategory(String),
    SelectPriceRange(PriceRange),
    SearchStarted,
    SearchFinished { generation: u64, outcome: Outcome },
    Reset,
}

#[derive(Debug, Clone)]
pub struct WidgetState {
    pub categories: Vec<Category>,
    pub selected_category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub current_product: Option<Product>,
    pub status: Status,
    pub policy: EmptyResultPolicy,
    generation: u64,
    in_flight: Option<u64>,
}

// The generation counter only orders requests; two states that differ in it
// alone render the same.
impl PartialEq for WidgetState {
    fn eq(&self, other: &Self) -> bool {
        self.categories == other.categories
            && self.selected_category == other.selected_category
            && self.price_range == other.price_range
            && self.current_product == other.current_product
            && self.status == other.status
            && self.policy == other.policy
            && self.in_flight.is_some() == other.in_flight.is_some()
    }
}

impl WidgetState {
    pub fn new(policy: EmptyResultPolicy) -> Self {
        Self {
            categories: Vec::new(),
            selected_category: None,
            price_range: None,
            current_product: None,
            status: Status::Idle,
            policy,
            generation: 0,
            in_flight: None,
        }
    }

    /// Both inputs chosen and nothing outstanding.
    pub fn can_search(&self) -> bool {
        self.selected_category.is_some() && self.price_range.is_some() && self.in_flight.is_none()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Generation of the outstanding search, if any.
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// The product the shell should show right now.
    pub fn displayed_product(&self) -> Option<&Product> {
        match self.status {
            Status::Display => self.current_product.as_ref(),
            _ => None,
        }
    }

    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::CategoriesLoaded(categories) => Self { categories, ..self },
            Action::SelectCategory(id) => {
                if self.categories.iter().any(|c| c.id == id) {
                    Self {
                        selected_category: Some(id),
                        ..self
                    }
                } else {
                    self
                }
            }
            Action::SelectPriceRange(range) => Self {
                price_range: Some(range),
                ..self
            },
            Action::SearchStarted => {
                if !self.can_search() {
                    return self;
                }
                let generation = self.generation + 1;
                Self {
                    generation,
                    in_flight: Some(generation),
                    status: Status::Loading,
                    ..self
                }
            }
            Action::SearchFinished {
                generation,
                outcome,
            } => {
                if self.in_flight != Some(generation) {
                    return self;
                }
                self.settle(outcome)
            }
            Action::Reset => Self {
                selected_category: None,
                price_range: None,
                current_product: None,
                status: Status::Idle,
                generation: self.generation + 1,
                in_flight: None,
                ..self
            },
        }
    }

    fn settle(self, outcome: Outcome) -> Self {
        let settled = Self {
            in_flight: None,
            ..self
        };
        match outcome {
            Outcome::Found(product) => Self {
                current_product: Some(product),
                status: Status::Display,
                ..settled
            },
            Outcome::NoMatches => match settled.policy {
                EmptyResultPolicy::KeepPrevious if settled.current_product.is_some() => Self {
                    status: Status::Display,
                    ..settled
                },
                _ => Self {
                    current_product: None,
                    status: Status::NoMatches,
                    ..settled
                },
            },
            Outcome::Failed(reason) => Self {
                current_product: None,
                status: Status::Failed(reason),
                ..settled
            },
        }
    }
}

impl Default for WidgetState {
    fn default() -> Self {
        Self::new(EmptyResultPolicy::default())
    }
}
