//! Page name derivation.
//!
//! A page name doubles as its URL path and as the stem of its template file,
//! so it is restricted to alphanumeric characters.

const TEMPLATE_EXTENSION: &str = ".html";
const ARCHIVE_SUFFIX: &str = ".old";

/// Names taken by single-segment server routes; a page with one of these paths could never be served.
pub const RESERVED_PAGE_NAMES: &[&str] = &["login", "logout", "reload"];

/// Derives a page name from a title by keeping only alphanumeric characters.
///
/// Unicode-aware: `"Über uns!"` becomes `"Überuns"`. Case is preserved.
pub fn derive_page_name(title: &str) -> String {
    title.chars().filter(|c| c.is_alphanumeric()).collect()
}

pub fn template_file_name(page_name: &str) -> String {
    format!("{page_name}{TEMPLATE_EXTENSION}")
}

pub fn archived_template_file_name(template_file: &str) -> String {
    format!("{template_file}{ARCHIVE_SUFFIX}")
}

/// Returns `true` when `name` could have been produced by [`derive_page_name`].
pub fn is_valid_page_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_alphanumeric)
}

pub fn is_reserved_page_name(name: &str) -> bool {
    RESERVED_PAGE_NAMES.contains(&name)
}
