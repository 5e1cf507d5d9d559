mod page;
mod query;
mod record;
mod summary;

pub use page::*;
pub use query::*;
pub use record::*;
pub use summary::*;
