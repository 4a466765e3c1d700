use crate::{error::QuoteError, Context, Error};

pub mod category;
pub mod help;
pub mod quote;
pub mod session;
pub mod status;
pub mod transfer;

/// shows user-facing failures as an alert and hands everything else back.
pub(crate) fn alert_or_raise(ctx: &mut Context<'_>, err: QuoteError) -> Result<(), Error> {
    if err.is_user_facing() {
        ctx.alert(err)
    } else {
        Err(err.into())
    }
}
