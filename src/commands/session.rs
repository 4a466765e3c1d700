use std::path::Path;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    commands::{
        category::{categories, filter},
        help::help,
        quote::{add, last, show},
        status::status,
        transfer::{export, import},
    },
    constants::EXPORT_FILE_NAME,
    Context, Error,
};

/// next line of `input` without its line ending, `None` at end of input.
///
/// bytes that aren't valid UTF-8 are replaced rather than failing the read.
async fn next_line<R>(input: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();

    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// read commands line by line from `input` until `quit` or end of input.
///
/// a failing command is reported and the session carries on.
#[tracing::instrument(skip_all)]
pub async fn session<R>(ctx: &mut Context<'_>, mut input: R) -> Result<(), Error>
where
    R: AsyncBufRead + Unpin,
{
    ctx.say("welcome to quotebox! type `help` for a list of commands.")?;
    categories(ctx)?;

    loop {
        ctx.prompt("> ")?;

        let Some(line) = next_line(&mut input).await? else {
            break;
        };

        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        let result = match command {
            "" => Ok(()),
            "show" => show(ctx).await,
            "add" => {
                ctx.prompt("quote text: ")?;
                let Some(text) = next_line(&mut input).await? else {
                    break;
                };

                ctx.prompt("category: ")?;
                let Some(category) = next_line(&mut input).await? else {
                    break;
                };

                add(ctx, &text, &category).await
            }
            "categories" => categories(ctx),
            "filter" => filter(ctx, rest).await,
            "export" if rest.is_empty() => export(ctx, Path::new(EXPORT_FILE_NAME)).await,
            "export" => export(ctx, Path::new(rest)).await,
            "import" if rest.is_empty() => ctx.alert("Please choose a file to import."),
            "import" => import(ctx, Path::new(rest)).await,
            "last" => last(ctx).await,
            "status" => status(ctx),
            "help" => help(ctx),
            "quit" | "exit" => break,
            other => ctx.alert(format!(
                "unknown command \"{other}\". type `help` for a list of commands."
            )),
        };

        if let Err(e) = result {
            tracing::error!(err = ?e, command = %command, "an error occurred when running command");
            ctx.alert(format!("something went wrong: {e}"))?;
        }
    }

    ctx.data.view.end_session().await.inspect_err(
        |e| tracing::error!(err = ?e, "an error occurred when clearing session storage"),
    )?;

    tracing::info!("session ended.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::memory_data;

    async fn run_session(script: &str) -> (String, String, crate::Data) {
        let mut data = memory_data(9).await;
        let (mut out, mut alerts) = (Vec::<u8>::new(), Vec::<u8>::new());

        let mut ctx = Context::new(&mut data, &mut out, &mut alerts);
        session(&mut ctx, script.as_bytes()).await.unwrap();

        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(alerts).unwrap(),
            data,
        )
    }

    #[tokio::test]
    async fn add_prompts_like_a_form() {
        let (out, alerts, data) =
            run_session("add\nWell done is better than well said.\nAction\nquit\n").await;

        assert!(alerts.is_empty(), "{alerts}");
        assert!(out.contains("quote text: category: added quote"));
        assert_eq!(
            data.store.quotes().last().map(|q| q.category.as_str()),
            Some("Action")
        );
    }

    #[tokio::test]
    async fn failures_do_not_end_the_session() {
        let (out, alerts, data) = run_session("add\n\nLife\nbogus\nimport\nfilter Wisdom\n").await;

        assert_eq!(
            alerts,
            "Please fill in both the quote and category fields.\n\
             unknown command \"bogus\". type `help` for a list of commands.\n\
             Please choose a file to import.\n"
        );
        assert!(out.contains("\"Do or do not. There is no try.\" (Wisdom)\n"));
        assert_eq!(data.view.selected_category(), "Wisdom");
    }

    #[tokio::test]
    async fn last_reads_back_within_the_session() {
        let (out, _, _) = run_session("filter Life\nlast\nquit\n").await;

        let quote = "\"Life is what happens when you're busy making other plans.\" (Life)\n";
        assert_eq!(out.matches(quote).count(), 2);
    }

    #[tokio::test]
    async fn invalid_utf8_line_is_reported_and_the_session_goes_on() {
        let mut data = memory_data(9).await;
        let (mut out, mut alerts) = (Vec::<u8>::new(), Vec::<u8>::new());

        let mut ctx = Context::new(&mut data, &mut out, &mut alerts);
        session(&mut ctx, &b"\xff\xfe\nadd\nok\nLife\r\nquit\n"[..])
            .await
            .unwrap();
        assert_eq!(ctx.alert_count(), 1);

        let alerts = String::from_utf8(alerts).unwrap();
        assert!(alerts.starts_with("unknown command \"\u{FFFD}\u{FFFD}\""), "{alerts}");
        assert_eq!(data.store.quotes().len(), 4);
        assert_eq!(
            data.store.quotes().last().map(|q| q.category.as_str()),
            Some("Life")
        );
    }

    #[tokio::test]
    async fn quitting_forgets_the_last_quote() {
        let (_, _, data) = run_session("show\nquit\n").await;

        assert_eq!(data.view.last_viewed().await.unwrap(), None);
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let (out, alerts, _) = run_session("").await;

        assert!(alerts.is_empty());
        assert!(out.starts_with("welcome to quotebox!"));
        assert!(out.ends_with("> "));
    }
}
