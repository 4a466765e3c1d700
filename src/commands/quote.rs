use crate::{commands::alert_or_raise, commands::category::categories, Context, Data, Error};

/// show a random quote from the selected category.
#[tracing::instrument(skip_all)]
pub async fn show(ctx: &mut Context<'_>) -> Result<(), Error> {
    let Data { store, view, rng } = &mut *ctx.data;

    let line = view
        .show_random_quote(store, rng)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when showing a quote"))?
        .to_string();

    ctx.say(line)
}

/// add a quote, then show the refreshed category list.
#[tracing::instrument(skip(ctx))]
pub async fn add(ctx: &mut Context<'_>, text: &str, category: &str) -> Result<(), Error> {
    match ctx.data.store.add_quote(text, category).await {
        Ok(quote) => {
            ctx.say(format!("added quote {quote}."))?;
            categories(ctx)
        }
        Err(e) => {
            tracing::warn!(err = ?e, "couldn't add quote");
            alert_or_raise(ctx, e)
        }
    }
}

/// show the quote most recently shown in this session.
#[tracing::instrument(skip_all)]
pub async fn last(ctx: &mut Context<'_>) -> Result<(), Error> {
    let last_viewed = ctx.data.view.last_viewed().await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when reading the last viewed quote"),
    )?;

    match last_viewed {
        Some(quote) => ctx.say(quote),
        None => ctx.say("no quote has been shown yet in this session."),
    }
}
