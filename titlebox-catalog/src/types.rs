//! Data model types for the title catalog.
//!
//! Titles arrive from the remote catalog and are written once at ingestion;
//! pictures are metadata pointing at image files on disk.

use serde::{Deserialize, Deserializer, Serialize};

// ── Title ───────────────────────────────────────────────────────────────────

/// A catalog title as served by the API and as decoded from the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Fixed-format identifier (8 hex characters, e.g. `413607d9`).
    pub title_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub systems: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bing_id: String,
    #[serde(default)]
    pub service_config_id: Option<String>,
    #[serde(default)]
    pub pfn: Option<String>,
    /// Attached from storage; never read from the remote payload.
    #[serde(default, skip_deserializing)]
    pub pictures: Vec<Picture>,
}

impl Title {
    /// Lower-cased identifier, used as the join key against picture folders.
    pub fn key(&self) -> String {
        self.title_id.to_lowercase()
    }

    pub fn has_pictures(&self) -> bool {
        !self.pictures.is_empty()
    }
}

// ── Picture ─────────────────────────────────────────────────────────────────

/// An image belonging to a title. The bytes live at
/// `<pictures-root>/<title_id>/<name><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    pub id: i64,
    pub title_id: String,
    /// Image identifier: the file name without its suffix.
    pub name: String,
}

impl Picture {
    /// A picture not yet persisted (id assigned by storage).
    pub fn new(title_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            title_id: title_id.into(),
            name: name.into(),
        }
    }
}

// ── Remote envelope ─────────────────────────────────────────────────────────

/// One page of the remote catalog: `{ "items": [...], "count": N }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Title>,
    #[serde(default)]
    pub count: i64,
}

// ── Import tracking ─────────────────────────────────────────────────────────

/// Record of a completed ingestion run.
#[derive(Debug, Clone)]
pub struct IngestLog {
    pub id: i64,
    pub source_url: String,
    pub system: String,
    pub imported_at: String,
    pub titles_created: i64,
    pub pictures_created: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_title_tolerates_nulls() {
        let json = r#"{
            "title_id": "413607D9",
            "name": "Halo 3",
            "systems": null,
            "bing_id": null,
            "service_config_id": null,
            "pfn": "Microsoft.Halo3",
            "pictures": [{"id": 9, "title_id": "x", "name": "y"}]
        }"#;
        let title: Title = serde_json::from_str(json).unwrap();
        assert_eq!(title.key(), "413607d9");
        assert!(title.systems.is_empty());
        assert_eq!(title.bing_id, "");
        assert_eq!(title.pfn.as_deref(), Some("Microsoft.Halo3"));
        assert!(title.pictures.is_empty());
    }

    #[test]
    fn catalog_page_decodes() {
        let json = r#"{"items": [{"title_id": "4d5307e6", "name": "Halo 3", "systems": ["XBOX360"], "bing_id": "abc"}], "count": 1}"#;
        let page: CatalogPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.items[0].systems, vec!["XBOX360"]);
        assert_eq!(page.items[0].service_config_id, None);
    }

    #[test]
    fn title_serializes_pictures() {
        let mut title: Title =
            serde_json::from_str(r#"{"title_id": "413607d9", "name": "Test"}"#).unwrap();
        title.pictures.push(Picture {
            id: 1,
            title_id: "413607d9".to_string(),
            name: "20452".to_string(),
        });
        let value = serde_json::to_value(&title).unwrap();
        assert_eq!(value["pictures"][0]["name"], "20452");
        assert!(value["service_config_id"].is_null());
    }
}
