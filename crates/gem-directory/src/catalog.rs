/// The gem catalog: loaded once at startup, read-only afterwards.
///
/// Entries may use the legacy keys `name`, `desc` and `img`; canonical keys win when both
/// are present.
use std::collections::HashSet;
use std::path::Path;

use hiddenpg_common::text::{normalize, split_multi};
use serde::Deserialize;

use crate::error::AppError;
use crate::model::{ContactLinks, Gem, PhotoCredit};

const EMBEDDED_GEMS: &str = include_str!("../data/gems.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGem {
    id: String,
    #[serde(default)]
    category: String,
    title: Option<String>,
    name: Option<String>,
    description: Option<String>,
    desc: Option<String>,
    image: Option<String>,
    img: Option<String>,
    slug: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
    address: Option<String>,
    #[serde(flatten)]
    contact: ContactLinks,
    #[serde(default)]
    featured: bool,
    #[serde(default)]
    sponsored: bool,
    photo_credit: Option<PhotoCredit>,
}

impl From<RawGem> for Gem {
    fn from(raw: RawGem) -> Self {
        Self {
            id: raw.id.trim().to_string(),
            slug: raw.slug,
            title: raw.title.or(raw.name).unwrap_or_default().trim().to_string(),
            description: raw.description.or(raw.desc).unwrap_or_default().trim().to_string(),
            category: normalize_category(&raw.category),
            image: raw.image.or(raw.img).unwrap_or_default(),
            images: raw.images,
            tags: raw.tags,
            address: raw.address,
            contact: raw.contact,
            featured: raw.featured,
            sponsored: raw.sponsored,
            photo_credit: raw.photo_credit,
        }
    }
}

/// Folds plural category aliases onto the singular labels the filters use.
fn normalize_category(raw: &str) -> String {
    let c = raw.trim();
    match c.to_lowercase().as_str() {
        "parks" => "Park".to_string(),
        "restaurants" => "Restaurant".to_string(),
        _ => c.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    gems: Vec<Gem>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, AppError> {
        Self::from_json(EMBEDDED_GEMS)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, AppError> {
        let raw: Vec<RawGem> = serde_json::from_str(content)
            .map_err(|e| AppError::Catalog(format!("invalid gem data: {e}")))?;
        Self::new(raw.into_iter().map(Gem::from).collect())
    }

    /// Rejects empty or duplicate ids.
    pub fn new(gems: Vec<Gem>) -> Result<Self, AppError> {
        let mut seen = HashSet::new();
        for (index, gem) in gems.iter().enumerate() {
            if gem.id.is_empty() {
                return Err(AppError::Catalog(format!("gem at index {index} has an empty id")));
            }
            if !seen.insert(gem.id.as_str()) {
                return Err(AppError::Catalog(format!("duplicate gem id: {}", gem.id)));
            }
        }
        Ok(Self { gems })
    }

    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    pub fn len(&self) -> usize {
        self.gems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Gem> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Distinct category labels, multi-value strings split apart, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for gem in &self.gems {
            for part in split_multi(&gem.category) {
                if seen.insert(normalize(part)) {
                    out.push(part.to_string());
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.len() >= 5);
        let debs = catalog.get("debs-cafe").unwrap();
        assert_eq!(debs.category, "Bakery • Café");
        assert_eq!(debs.contact.phone.as_deref(), Some("+1 (250) 565-1115"));
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn canonical_keys_win_over_legacy_aliases() {
        let catalog = Catalog::from_json(
            r#"[
                { "id": "a", "category": "parks", "name": "Old", "title": " New ",
                  "desc": "short", "description": "long", "img": "/a.jpg" },
                { "id": "b", "category": "Food", "name": "Legacy only", "desc": "legacy desc" }
            ]"#,
        )
        .unwrap();

        let a = catalog.get("a").unwrap();
        assert_eq!(a.title, "New");
        assert_eq!(a.description, "long");
        assert_eq!(a.image, "/a.jpg");
        assert_eq!(a.category, "Park");

        let b = catalog.get("b").unwrap();
        assert_eq!(b.title, "Legacy only");
        assert_eq!(b.description, "legacy desc");
        assert!(b.tags.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::from_json(r#"[{ "id": "a", "title": "x" }, { "id": "a", "title": "y" }]"#)
            .unwrap_err();
        assert!(err.to_string().contains("duplicate gem id: a"));

        let err = Catalog::from_json(r#"[{ "id": "  ", "title": "x" }]"#).unwrap_err();
        assert!(err.to_string().contains("empty id"));
    }

    #[test]
    fn malformed_data_is_a_catalog_error() {
        assert!(matches!(Catalog::from_json("{}"), Err(AppError::Catalog(_))));
    }

    #[test]
    fn categories_are_split_and_deduplicated() {
        let catalog = Catalog::from_json(
            r#"[
                { "id": "a", "category": "Bakery • Café" },
                { "id": "b", "category": "Cafe" },
                { "id": "c", "category": "Food, Drink" },
                { "id": "d", "category": "food" }
            ]"#,
        )
        .unwrap();
        assert_eq!(catalog.categories(), vec!["Bakery", "Café", "Food", "Drink"]);
    }
}
