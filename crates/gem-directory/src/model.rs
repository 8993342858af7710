use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoCredit {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A curated place. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Cover image; may be empty when a gem has only a gallery.
    pub image: String,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(flatten)]
    pub contact: ContactLinks,
    pub featured: bool,
    pub sponsored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_credit: Option<PhotoCredit>,
}

impl Gem {
    /// The image a preview should show: the cover, else the first gallery image.
    pub fn preview_image(&self) -> Option<&str> {
        std::iter::once(self.image.as_str())
            .chain(self.images.iter().map(String::as_str))
            .find(|s| !s.trim().is_empty())
    }
}

/// A search hit, carrying just enough to render a type-ahead row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Gem> for Suggestion {
    fn from(gem: &Gem) -> Self {
        Self {
            id: gem.id.clone(),
            title: gem.title.clone(),
            image: gem.preview_image().map(str::to_string),
            category: gem.category.clone(),
            tags: gem.tags.clone(),
            description: Some(gem.description.clone()).filter(|d| !d.is_empty()),
        }
    }
}
