// Conversions between remote records, stored rows, and domain breeds.
// Total functions: absent optional fields always have a default.

use chrono::{DateTime, Utc};

use crate::api::RemoteBreedRecord;
use crate::model::{Breed, Kind};
use crate::store::BreedRow;

/// Origin used when the catalog does not report one.
pub const UNKNOWN_ORIGIN: &str = "Unknown";

/// Build the stored row for a freshly fetched breed.
pub fn to_row(kind: Kind, record: RemoteBreedRecord, synced_at: DateTime<Utc>) -> BreedRow {
    BreedRow {
        id: record.id,
        kind,
        name: record.name,
        origin: record.origin.unwrap_or_else(|| UNKNOWN_ORIGIN.to_string()),
        temperament: record.temperament.unwrap_or_default(),
        description: record.description.unwrap_or_default(),
        life_span: record.life_span.unwrap_or_default(),
        image_url: record.image.and_then(|image| image.url),
        images: Vec::new(),
        is_favorite: false,
        synced_at,
    }
}

/// Map a whole fetched page.
pub fn to_rows(kind: Kind, records: Vec<RemoteBreedRecord>, synced_at: DateTime<Utc>) -> Vec<BreedRow> {
    records
        .into_iter()
        .map(|record| to_row(kind, record, synced_at))
        .collect()
}

pub fn to_domain(row: BreedRow) -> Breed {
    Breed {
        id: row.id,
        name: row.name,
        origin: row.origin,
        temperament: row.temperament,
        description: row.description,
        life_span: row.life_span,
        image_url: row.image_url,
        images: row.images,
        is_favorite: row.is_favorite,
        kind: row.kind,
        synced_at: row.synced_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ImageRef;

    #[test]
    fn test_absent_fields_get_defaults() {
        let record = RemoteBreedRecord {
            id: "abys".to_string(),
            name: "Abyssinian".to_string(),
            ..Default::default()
        };

        let row = to_row(Kind::Cat, record, Utc::now());
        assert_eq!(row.origin, "Unknown");
        assert_eq!(row.temperament, "");
        assert_eq!(row.description, "");
        assert_eq!(row.life_span, "");
        assert_eq!(row.image_url, None);
        assert!(row.images.is_empty());
        assert!(!row.is_favorite);
    }

    #[test]
    fn test_image_without_url_maps_to_none() {
        let record = RemoteBreedRecord {
            id: "1".to_string(),
            name: "Affenpinscher".to_string(),
            image: Some(ImageRef {
                id: Some("BJa4kxc4X".to_string()),
                url: None,
            }),
            ..Default::default()
        };

        assert_eq!(to_row(Kind::Dog, record, Utc::now()).image_url, None);
    }

    #[test]
    fn test_bengal_scenario() {
        let record = RemoteBreedRecord {
            id: "beng".to_string(),
            name: "Bengal".to_string(),
            origin: None,
            temperament: Some("Agile".to_string()),
            image: Some(ImageRef {
                id: None,
                url: Some("http://x/1.jpg".to_string()),
            }),
            ..Default::default()
        };
        let now = Utc::now();

        let row = to_row(Kind::Cat, record, now);
        assert_eq!(row.id, "beng");
        assert_eq!(row.origin, "Unknown");
        assert_eq!(row.temperament, "Agile");
        assert_eq!(row.image_url.as_deref(), Some("http://x/1.jpg"));
        assert!(!row.is_favorite);

        let breed = to_domain(row.clone());
        assert_eq!(breed.id, row.id);
        assert_eq!(breed.name, "Bengal");
        assert_eq!(breed.kind, Kind::Cat);
        assert_eq!(breed.image_url, row.image_url);
        assert_eq!(breed.synced_at, now);
    }
}
