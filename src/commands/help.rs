use crate::{Context, Error};

const SESSION_COMMANDS: [(&str, &str); 10] = [
    ("show", "show a random quote from the selected category"),
    ("add", "add a quote (asks for the text and the category)"),
    ("categories", "list the categories, marking the selected one"),
    ("filter <category>", "select a category, or \"all\""),
    ("export [path]", "write every quote to a JSON file (quotes.json)"),
    ("import <path>", "append the quotes of a JSON file"),
    ("last", "show the last quote shown in this session"),
    ("status", "show version and collection statistics"),
    ("help", "print this list"),
    ("quit", "leave the session"),
];

/// print the list of session commands and their usage
#[tracing::instrument(skip_all)]
pub fn help(ctx: &mut Context<'_>) -> Result<(), Error> {
    let width = SESSION_COMMANDS
        .iter()
        .map(|(usage, _)| usage.len())
        .max()
        .unwrap_or_default();

    for (usage, description) in SESSION_COMMANDS {
        ctx.say(format!("  {usage:<width$}  {description}"))?;
    }

    Ok(())
}
