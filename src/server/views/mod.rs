//! HTML for the admin screens, rendered with maud (all interpolation is escaped).

mod layout;
mod login;
mod pages;

pub use layout::layout;
pub use login::login_form;
pub use pages::{
    add_page_form, delete_confirm, delete_pages_list, edit_page_form, edit_pages_list,
    module_index,
};
