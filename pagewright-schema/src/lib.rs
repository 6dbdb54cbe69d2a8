pub mod flash;
pub mod forms;
pub mod naming;

pub use flash::Flash;
pub use forms::{DeleteQuery, FormError, LoginForm, PageForm, ReloadQuery, ValidPage};
pub use naming::{
    RESERVED_PAGE_NAMES, archived_template_file_name, derive_page_name, is_reserved_page_name,
    is_valid_page_name, template_file_name,
};
