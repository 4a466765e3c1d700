use crate::{commands::quote::show, constants::ALL_CATEGORIES, Context, Error};

/// list the filter options, marking the selected one with `*`.
#[tracing::instrument(skip_all)]
pub fn categories(ctx: &mut Context<'_>) -> Result<(), Error> {
    let filter = ctx.data.view.populate_category_filter(&ctx.data.store);

    for option in filter.options {
        let marker = if option == filter.selected { '*' } else { ' ' };
        ctx.say(format!("{marker} {option}"))?;
    }

    Ok(())
}

/// remember `category` as the selection, then show a quote from it.
#[tracing::instrument(skip(ctx))]
pub async fn filter(ctx: &mut Context<'_>, category: &str) -> Result<(), Error> {
    let category = category.trim();

    if category.is_empty() {
        return ctx.alert(format!(
            "Please choose a category, or \"{ALL_CATEGORIES}\" for every category."
        ));
    }

    let known = category == ALL_CATEGORIES
        || ctx.data.store.distinct_categories().contains(&category);

    if !known {
        tracing::warn!(category = %category, "selected a category that has no quotes yet");
    }

    ctx.data
        .view
        .set_selected_category(category)
        .await
        .inspect_err(
            |e| tracing::error!(err = ?e, category = %category, "an error occurred when saving the selected category"),
        )?;

    show(ctx).await
}
