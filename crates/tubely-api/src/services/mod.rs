pub mod ingest;

pub use ingest::AssetIngestService;
