pub mod config;
pub mod db;
pub mod error;
pub mod server;
pub mod service;
pub mod theme;

pub use error::PagewrightError;
pub use server::router::{PagewrightState, pagewright_router};
pub use service::{PageRegistry, PageService};
pub use theme::ThemeStore;
