// Breed API module.
// One HTTP client per pet kind, plus the wire types they decode.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::BreedClient;
pub use types::*;

use crate::error::Result;
use crate::model::Kind;

/// The pair of remote catalogs, dispatched by kind.
#[derive(Debug, Clone)]
pub struct BreedApi {
    cat: BreedClient,
    dog: BreedClient,
}

impl BreedApi {
    pub fn new(cat: BreedClient, dog: BreedClient) -> Result<Self> {
        if cat.kind() != Kind::Cat || dog.kind() != Kind::Dog {
            return Err(crate::error::PawError::Config(
                "breed clients passed in the wrong order".to_string(),
            ));
        }
        Ok(Self { cat, dog })
    }

    /// Client serving the given kind.
    pub fn client(&self, kind: Kind) -> &BreedClient {
        match kind {
            Kind::Cat => &self.cat,
            Kind::Dog => &self.dog,
        }
    }
}
