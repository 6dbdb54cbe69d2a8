use serde::{Deserialize, Serialize};

/// One-shot message shown on the next rendered admin page.
///
/// `text` is rendered escaped, followed by an anchor to `/{link}` when `link`
/// is set. `suffix` is rendered after the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub suffix: String,
}

impl Flash {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: None,
            suffix: String::new(),
        }
    }

    pub fn page_created(page_name: &str) -> Self {
        Self {
            text: "Your new page ".to_string(),
            link: Some(page_name.to_string()),
            suffix: " will be visible after reloading".to_string(),
        }
    }

    pub fn page_exists(page_name: &str) -> Self {
        Self {
            text: "The page ".to_string(),
            link: Some(page_name.to_string()),
            suffix: " already exists".to_string(),
        }
    }

    pub fn page_edited(page_name: &str) -> Self {
        Self {
            text: "Page edited. ".to_string(),
            link: Some(page_name.to_string()),
            suffix: String::new(),
        }
    }

    pub fn page_deleted(path: &str) -> Self {
        Self::plain(format!("Page \"{path}\" deleted."))
    }

    /// Flat text form, used for logging.
    pub fn to_plain_text(&self) -> String {
        match &self.link {
            Some(link) => format!("{}{}{}", self.text, link, self.suffix),
            None => format!("{}{}", self.text, self.suffix),
        }
    }

    pub fn encode_all(flashes: &[Flash]) -> serde_json::Result<String> {
        serde_json::to_string(flashes)
    }

    /// Undecodable input yields no messages.
    pub fn decode_all(raw: &str) -> Vec<Flash> {
        serde_json::from_str(raw).unwrap_or_default()
    }
}
