// Breed API response types.
// Kind-specific wire shapes and the kind-agnostic record they decode into.

use serde::{Deserialize, Deserializer, Serialize};

/// Image reference nested in a breed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: Option<String>,
    pub url: Option<String>,
}

/// TheCatAPI breed.
#[derive(Debug, Clone, Deserialize)]
pub struct CatBreed {
    pub id: String,
    pub name: String,
    pub origin: Option<String>,
    pub temperament: Option<String>,
    pub description: Option<String>,
    pub life_span: Option<String>,
    pub image: Option<ImageRef>,
}

/// TheDogAPI breed. Ids are numeric and there is no long description,
/// `bred_for` is the closest equivalent.
#[derive(Debug, Clone, Deserialize)]
pub struct DogBreed {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    pub origin: Option<String>,
    pub temperament: Option<String>,
    pub bred_for: Option<String>,
    pub life_span: Option<String>,
    pub image: Option<ImageRef>,
}

/// A breed as handed to the mapper, whatever catalog it came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RemoteBreedRecord {
    pub id: String,
    pub name: String,
    pub origin: Option<String>,
    pub temperament: Option<String>,
    pub description: Option<String>,
    pub life_span: Option<String>,
    pub image: Option<ImageRef>,
}

impl From<CatBreed> for RemoteBreedRecord {
    fn from(breed: CatBreed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
            origin: breed.origin,
            temperament: breed.temperament,
            description: breed.description,
            life_span: breed.life_span,
            image: breed.image,
        }
    }
}

impl From<DogBreed> for RemoteBreedRecord {
    fn from(breed: DogBreed) -> Self {
        Self {
            id: breed.id,
            name: breed.name,
            origin: breed.origin,
            temperament: breed.temperament,
            description: breed.bred_for,
            life_span: breed.life_span,
            image: breed.image,
        }
    }
}

/// Result of an image search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Accept both `"beng"` and `264` for an id.
fn id_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
