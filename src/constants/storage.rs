// durable
pub static QUOTES_KEY: &str = "quotes";
pub static SELECTED_CATEGORY_KEY: &str = "selectedCategory";

// session
pub static LAST_VIEWED_QUOTE_KEY: &str = "lastViewedQuote";
