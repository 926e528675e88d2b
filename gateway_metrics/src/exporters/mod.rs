pub mod json;
pub mod markdown;
pub mod table;

pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
pub use table::TableExporter;
