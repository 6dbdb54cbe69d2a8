mod pagewright;

pub use pagewright::PagewrightError;
