pub mod catalog;
pub mod clustering;
pub mod dataset;
pub mod preprocessing;
pub mod ranking;
pub mod search;
pub mod similarity;
pub mod title_search;

pub use catalog::Catalog;
pub use ranking::top100;
pub use search::search;
