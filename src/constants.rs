pub mod storage;
pub mod version;

pub static ALL_CATEGORIES: &str = "all";
pub static EXPORT_FILE_NAME: &str = "quotes.json";
pub static NO_QUOTES_MESSAGE: &str = "No quotes available. Add one!";
pub static DEFAULT_DATABASE_URL: &str = "sqlite://quotes.db?mode=rwc";

pub static SEED_QUOTES: [(&str, &str); 3] = [
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    (
        "Life is what happens when you're busy making other plans.",
        "Life",
    ),
    ("Do or do not. There is no try.", "Wisdom"),
];
