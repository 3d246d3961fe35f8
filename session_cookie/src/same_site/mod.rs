mod adapt;
mod policy;

pub use adapt::adapt_same_site;
pub use policy::{SameSite, parse_same_site};
