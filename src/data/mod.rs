mod price_file;

pub use price_file::{load_prices, parse_prices};
