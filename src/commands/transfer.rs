use std::path::Path;

use crate::{
    commands::{alert_or_raise, category::categories},
    error::QuoteError,
    Context, Error,
};

/// write every quote to `path` as pretty-printed JSON.
#[tracing::instrument(skip(ctx))]
pub async fn export(ctx: &mut Context<'_>, path: &Path) -> Result<(), Error> {
    match ctx.data.store.export_to(path).await {
        Ok(()) => {
            let count = ctx.data.store.quotes().len();
            ctx.say(format!("exported {count} quotes to {}.", path.display()))
        }
        Err(QuoteError::Io(e)) => ctx.alert(format!("couldn't write {}: {e}", path.display())),
        Err(e) => alert_or_raise(ctx, e),
    }
}

/// append the quotes stored in the JSON file at `path`.
#[tracing::instrument(skip(ctx))]
pub async fn import(ctx: &mut Context<'_>, path: &Path) -> Result<(), Error> {
    match ctx.data.store.import_from(path).await {
        Ok(count) => {
            ctx.say(format!("imported {count} quotes."))?;
            categories(ctx)
        }
        Err(QuoteError::Io(e)) => ctx.alert(format!("couldn't read {}: {e}", path.display())),
        Err(e) => alert_or_raise(ctx, e),
    }
}
