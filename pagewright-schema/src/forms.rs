use crate::naming::{derive_page_name, is_reserved_page_name, template_file_name};
use serde::Deserialize;
use thiserror::Error as ThisError;

/// Add/edit page form as posted by the admin UI.
///
/// Both fields are optional at the decoding layer so that a missing field
/// surfaces as a [`FormError`] rather than a generic decoding rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageForm {
    #[serde(rename = "page-title")]
    pub page_title: Option<String>,
    #[serde(rename = "page-body")]
    pub page_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum FormError {
    #[error("Error: Page title is required")]
    MissingTitle,

    #[error("Error: Page body is required")]
    MissingBody,

    #[error("Error: Page title must contain at least one letter or digit")]
    EmptyPageName,

    #[error("Error: Page name \"{0}\" is reserved")]
    ReservedPageName(String),
}

/// A page form that passed validation, with its derived names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPage {
    pub title: String,
    pub body: String,
    pub page_name: String,
    pub template_file: String,
}

impl PageForm {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            page_title: Some(title.into()),
            page_body: Some(body.into()),
        }
    }

    /// Title is checked before body; present-but-empty values are accepted.
    pub fn validate(self) -> Result<ValidPage, FormError> {
        let title = self.page_title.ok_or(FormError::MissingTitle)?;
        let body = self.page_body.ok_or(FormError::MissingBody)?;

        let page_name = derive_page_name(&title);
        if page_name.is_empty() {
            return Err(FormError::EmptyPageName);
        }
        if is_reserved_page_name(&page_name) {
            return Err(FormError::ReservedPageName(page_name));
        }
        let template_file = template_file_name(&page_name);

        Ok(ValidPage {
            title,
            body,
            page_name,
            template_file,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub password: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// `?confirm` only needs to be present; its value is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    pub confirm: Option<String>,
}

impl DeleteQuery {
    pub fn wants_confirmation(&self) -> bool {
        self.confirm.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReloadQuery {
    pub next: Option<String>,
}
