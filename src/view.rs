use std::fmt;
use std::sync::Arc;

use rand::{seq::SliceRandom, Rng};

use crate::{
    constants::{
        storage::{LAST_VIEWED_QUOTE_KEY, SELECTED_CATEGORY_KEY},
        ALL_CATEGORIES, NO_QUOTES_MESSAGE,
    },
    error::QuoteResult,
    models::quotes::Quote,
    storage::KeyValueStore,
    store::QuoteStore,
};

/// what the quote display region shows.
#[derive(Debug, PartialEq, Eq)]
pub enum QuoteDisplay<'a> {
    Quote(&'a Quote),
    Empty,
}

impl fmt::Display for QuoteDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteDisplay::Quote(quote) => write!(f, "{quote}"),
            QuoteDisplay::Empty => f.write_str(NO_QUOTES_MESSAGE),
        }
    }
}

/// the options of the category filter and which one is selected.
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryFilter {
    pub options: Vec<String>,
    pub selected: String,
}

/// selection and rendering state over a [`QuoteStore`].
///
/// the category filter's selection is remembered in durable storage; the last
/// shown quote only in session storage.
pub struct QuoteView {
    durable: Arc<dyn KeyValueStore>,
    session: Arc<dyn KeyValueStore>,
    selected_category: String,
}

impl QuoteView {
    #[tracing::instrument(skip_all)]
    pub async fn initialize(
        durable: Arc<dyn KeyValueStore>,
        session: Arc<dyn KeyValueStore>,
    ) -> Self {
        let selected_category = match durable.get(SELECTED_CATEGORY_KEY).await {
            Ok(Some(category)) => category,
            Ok(None) => ALL_CATEGORIES.to_string(),
            Err(e) => {
                tracing::warn!(err = ?e, "couldn't read the selected category, defaulting to all.");
                ALL_CATEGORIES.to_string()
            }
        };

        QuoteView {
            durable,
            session,
            selected_category,
        }
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    #[tracing::instrument(skip(self))]
    pub async fn set_selected_category(&mut self, category: &str) -> QuoteResult<()> {
        self.durable.set(SELECTED_CATEGORY_KEY, category).await?;
        self.selected_category = category.to_string();

        Ok(())
    }

    /// quotes matching the selection; `all` matches everything.
    pub fn get_filtered_quotes<'a>(&self, store: &'a QuoteStore) -> Vec<&'a Quote> {
        store
            .quotes()
            .iter()
            .filter(|quote| {
                self.selected_category == ALL_CATEGORIES || quote.category == self.selected_category
            })
            .collect()
    }

    /// picks a quote uniformly from the filtered quotes and remembers it for
    /// the rest of the session.
    #[tracing::instrument(skip_all, fields(selected = %self.selected_category))]
    pub async fn show_random_quote<'a, R: Rng + ?Sized>(
        &self,
        store: &'a QuoteStore,
        rng: &mut R,
    ) -> QuoteResult<QuoteDisplay<'a>> {
        let Some(quote) = self.get_filtered_quotes(store).choose(rng).copied() else {
            return Ok(QuoteDisplay::Empty);
        };

        let json = serde_json::to_string(quote)?;
        self.session.set(LAST_VIEWED_QUOTE_KEY, &json).await?;

        Ok(QuoteDisplay::Quote(quote))
    }

    /// the quote most recently shown in this session, if any.
    pub async fn last_viewed(&self) -> QuoteResult<Option<Quote>> {
        let Some(raw) = self.session.get(LAST_VIEWED_QUOTE_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(quote) => Ok(Some(quote)),
            Err(e) => {
                tracing::warn!(err = ?e, "last viewed quote is corrupt, ignoring it.");
                Ok(None)
            }
        }
    }

    /// forgets everything kept for the current session.
    #[tracing::instrument(skip_all)]
    pub async fn end_session(&self) -> QuoteResult<()> {
        self.session.remove(LAST_VIEWED_QUOTE_KEY).await
    }

    /// one line per category, first occurrence order.
    pub fn render_category_list(&self, store: &QuoteStore) -> Vec<String> {
        store
            .distinct_categories()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// rebuilds the filter options, keeping the remembered selection only if
    /// it is still one of them.
    pub fn populate_category_filter(&self, store: &QuoteStore) -> CategoryFilter {
        let mut options = vec![ALL_CATEGORIES.to_string()];
        options.extend(self.render_category_list(store));

        let selected = if options.contains(&self.selected_category) {
            self.selected_category.clone()
        } else {
            ALL_CATEGORIES.to_string()
        };

        CategoryFilter { options, selected }
    }
}
