pub mod pages;
pub mod registry;

pub use pages::{AddOutcome, EditOutcome, PageService};
pub use registry::PageRegistry;
