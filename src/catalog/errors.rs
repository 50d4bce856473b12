#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("CatalogEntry: {0} already exists")]
    CatalogEntryExists(String),
    #[error("CatalogEntry: {0} not exists")]
    CatalogEntryNotExists(String),
}
