pub mod currency;
pub mod error;

pub use currency::{Currency, IsoPriceFormatter, PriceFormatter};
pub use error::{AppError, Result};
