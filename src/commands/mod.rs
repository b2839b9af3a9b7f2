pub mod migrate;
pub mod news;
pub mod stats;
pub mod web;

pub use migrate::handle_migrate;
pub use news::{handle_news_add, handle_news_delete, handle_news_edit, handle_news_list};
pub use stats::{handle_materials, handle_operators};
pub use web::handle_web;
