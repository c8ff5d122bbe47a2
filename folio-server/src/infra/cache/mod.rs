pub mod stylesheet_cache;

pub use stylesheet_cache::StylesheetCache;
