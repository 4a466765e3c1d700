use crate::{constants::version::get_version, Context, Error};

/// get the program's status.
#[tracing::instrument(skip_all)]
pub fn status(ctx: &mut Context<'_>) -> Result<(), Error> {
    let store = &ctx.data.store;

    let lines = [
        format!("version: {}", get_version()),
        format!("rust: {}", rustc_version_runtime::version()),
        format!("quotes: {}", store.quotes().len()),
        format!("categories: {}", store.distinct_categories().len()),
        format!("filter: {}", ctx.data.view.selected_category()),
    ];

    for line in lines {
        ctx.say(line)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::memory_data;

    #[tokio::test]
    async fn reports_collection_statistics() {
        let mut data = memory_data(1).await;
        data.store.add_quote("a", "Life").await.unwrap();

        let (mut out, mut alerts) = (Vec::<u8>::new(), Vec::<u8>::new());
        let mut ctx = Context::new(&mut data, &mut out, &mut alerts);
        status(&mut ctx).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("quotes: 4\n"));
        assert!(out.contains("categories: 3\n"));
        assert!(out.contains("filter: all\n"));
    }
}
