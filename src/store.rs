use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::{
    constants::storage::QUOTES_KEY,
    error::{QuoteError, QuoteResult},
    models::quotes::{seed_quotes, Quote},
    storage::KeyValueStore,
};

/// the ordered quote collection, mirrored to durable storage on every change.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    durable: Arc<dyn KeyValueStore>,
}

impl QuoteStore {
    /// loads the collection from durable storage.
    ///
    /// a missing, unreadable or corrupt collection is not an error: the store
    /// starts over from the seed quotes, which are only written back on the
    /// next change.
    #[tracing::instrument(skip_all)]
    pub async fn initialize(durable: Arc<dyn KeyValueStore>) -> Self {
        let quotes = match durable.get(QUOTES_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Quote>>(&raw) {
                Ok(quotes) => {
                    tracing::info!(count = quotes.len(), "loaded quotes from storage.");
                    quotes
                }
                Err(e) => {
                    tracing::warn!(err = ?e, "stored quotes are corrupt, falling back to seed quotes.");
                    seed_quotes()
                }
            },
            Ok(None) => {
                tracing::info!("no stored quotes found, starting with seed quotes.");
                seed_quotes()
            }
            Err(e) => {
                tracing::warn!(err = ?e, "couldn't read stored quotes, falling back to seed quotes.");
                seed_quotes()
            }
        };

        QuoteStore { quotes, durable }
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// appends a quote after trimming both fields.
    #[tracing::instrument(skip(self))]
    pub async fn add_quote(&mut self, text: &str, category: &str) -> QuoteResult<Quote> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::MissingFields);
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());

        if let Err(e) = self.save().await {
            self.quotes.pop();
            return Err(e);
        }

        Ok(quote)
    }

    /// appends every quote in a JSON array, returning how many were added.
    ///
    /// the payload must be an array whose elements all have the quote shape,
    /// otherwise nothing is added.
    #[tracing::instrument(skip_all)]
    pub async fn import_quotes(&mut self, raw: &str) -> QuoteResult<usize> {
        let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
            tracing::warn!(err = ?e, "import payload is not valid json.");
            QuoteError::InvalidFormat
        })?;

        let serde_json::Value::Array(items) = value else {
            tracing::warn!("import payload is not a json array.");
            return Err(QuoteError::InvalidFormat);
        };

        let imported = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value::<Quote>(item).map_err(|e| {
                    tracing::warn!(err = ?e, index, "imported element is not a quote.");
                    QuoteError::InvalidFormat
                })
            })
            .collect::<QuoteResult<Vec<_>>>()?;

        let count = imported.len();
        let previous_len = self.quotes.len();
        self.quotes.extend(imported);

        if let Err(e) = self.save().await {
            self.quotes.truncate(previous_len);
            return Err(e);
        }

        tracing::info!(count, "imported quotes.");
        Ok(count)
    }

    /// reads a local file and imports its contents.
    #[tracing::instrument(skip(self))]
    pub async fn import_from(&mut self, path: &Path) -> QuoteResult<usize> {
        let raw = tokio::fs::read_to_string(path).await.inspect_err(
            |e| tracing::error!(err = ?e, path = %path.display(), "an error occurred when reading import file"),
        )?;

        self.import_quotes(&raw).await
    }

    /// the full collection as pretty-printed JSON.
    pub fn export_quotes(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string_pretty(&self.quotes)?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn export_to(&self, path: &Path) -> QuoteResult<()> {
        let json = self.export_quotes()?;

        tokio::fs::write(path, json).await.inspect_err(
            |e| tracing::error!(err = ?e, path = %path.display(), "an error occurred when writing export file"),
        )?;

        Ok(())
    }

    /// categories in order of first appearance.
    pub fn distinct_categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.quotes
            .iter()
            .map(|quote| quote.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    async fn save(&self) -> QuoteResult<()> {
        let json = serde_json::to_string(&self.quotes)?;
        self.durable.set(QUOTES_KEY, &json).await
    }
}
