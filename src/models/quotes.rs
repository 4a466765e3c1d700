use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::SEED_QUOTES;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.category)
    }
}

/// the built-in collection used when nothing has been stored yet.
pub fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES
        .iter()
        .map(|(text, category)| Quote::new(*text, *category))
        .collect()
}
