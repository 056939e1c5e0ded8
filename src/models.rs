use serde::{Deserialize, Serialize};

const SMALL_THUMBNAIL_SUFFIX: &str = "-I.jpg";
const LARGE_THUMBNAIL_SUFFIX: &str = "-O.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub price: f64,
    pub thumbnail: String,
    pub permalink: String,
}

impl Product {
    /// Decodes one entry of the search `results` array.
    ///
    /// Entries without the fields we display, or with a negative price, are
    /// rejected; extra fields are ignored.
    pub fn from_search_result(value: serde_json::Value) -> Option<Self> {
        let product: Product = serde_json::from_value(value).ok()?;
        if !product.price.is_finite() || product.price < 0.0 {
            return None;
        }
        Some(product)
    }

    /// Same product pointing at the larger image variant.
    pub fn with_large_thumbnail(self) -> Self {
        Self {
            thumbnail: enlarge_thumbnail(&self.thumbnail),
            ..self
        }
    }

    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

/// Swaps the first `-I.jpg` for `-O.jpg`; other URLs come back unchanged.
pub fn enlarge_thumbnail(url: &str) -> String {
    url.replacen(SMALL_THUMBNAIL_SUFFIX, LARGE_THUMBNAIL_SUFFIX, 1)
}

/// `$` plus the amount with `,` thousands separators and up to three
/// fraction digits, trailing zeros dropped.
pub fn format_price(price: f64) -> String {
    let thousandths = (price.max(0.0) * 1000.0).round() as u64;
    let whole = (thousandths / 1000).to_string();
    let frac = thousandths % 1000;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac == 0 {
        format!("${grouped}")
    } else {
        let digits = format!("{frac:03}");
        format!("${grouped}.{}", digits.trim_end_matches('0'))
    }
}
