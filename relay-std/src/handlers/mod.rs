//! Standard handler implementations.

mod conditional;
mod logging;
mod respond;
mod traced;

pub use conditional::{Branch, When};
pub use logging::LoggingHandler;
pub use respond::Respond;
pub use traced::Traced;
