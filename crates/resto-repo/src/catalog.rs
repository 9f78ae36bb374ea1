use async_trait::async_trait;
use resto_types::ports::directory::Catalog;

/// Catalog adapter that recognizes every reference. Matches the observed
/// behavior of the service: order contents are carried through unvalidated.
#[derive(Clone, Default)]
pub struct OpenCatalog;

#[async_trait]
impl Catalog for OpenCatalog {
    async fn has_product(&self, _id: &str) -> bool {
        true
    }

    async fn has_payment_method(&self, _id: &str) -> bool {
        true
    }
}
