use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{present, Resource, StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Material {
    pub id: i64,
    pub title: String,
    pub link: String,
    pub active: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct MaterialDraft {
    pub title: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct MaterialListing {
    pub title: String,
    pub link: String,
}

impl Resource for Material {
    const TABLE: &'static str = "materials";
    const KIND: &'static str = "material";
    const PATH: &'static str = "/materials";
    const LISTING_COLUMNS: &'static str = "title,link";
    const LISTING_ORDER: &'static str = "id";

    type Draft = MaterialDraft;
    type Listing = MaterialListing;

    fn columns(draft: MaterialDraft) -> StoreResult<Vec<(&'static str, String)>> {
        let (Some(title), Some(link)) = (present(draft.title), present(draft.link)) else {
            return Err(StoreError::Validation("title and link are required".to_owned()));
        };

        Ok(vec![("title", title), ("link", link)])
    }
}
