//! Service catalogs compiled into the crate.

use {
    crate::{ServiceCatalog, StatementError},
    lazy_static::lazy_static,
    log::debug,
    std::sync::Arc,
};

const FIREHOSE: &str = include_str!("../data/catalogs/firehose.json");
const KINESIS: &str = include_str!("../data/catalogs/kinesis.json");

lazy_static! {
    static ref FIREHOSE_CATALOG: Result<Arc<ServiceCatalog>, StatementError> =
        ServiceCatalog::from_json(FIREHOSE).map(Arc::new);
    static ref KINESIS_CATALOG: Result<Arc<ServiceCatalog>, StatementError> =
        ServiceCatalog::from_json(KINESIS).map(Arc::new);
}

/// Prefixes of every embedded catalog.
pub const SERVICE_PREFIXES: &[&str] = &["firehose", "kinesis"];

/// Load an embedded catalog by service prefix.
///
/// Each catalog is parsed and validated once; later calls share it.
pub fn load(service_prefix: &str) -> Result<Arc<ServiceCatalog>, StatementError> {
    let catalog: &Result<Arc<ServiceCatalog>, StatementError> = match service_prefix {
        "firehose" => &*FIREHOSE_CATALOG,
        "kinesis" => &*KINESIS_CATALOG,
        _ => {
            debug!("No embedded catalog for service {service_prefix}");
            return Err(StatementError::UnknownService(service_prefix.to_string()));
        }
    };

    catalog.clone()
}

/// Amazon Kinesis Firehose.
pub fn firehose() -> Result<Arc<ServiceCatalog>, StatementError> {
    load("firehose")
}

/// Amazon Kinesis (data streams).
pub fn kinesis() -> Result<Arc<ServiceCatalog>, StatementError> {
    load("kinesis")
}
