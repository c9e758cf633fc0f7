use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::models::{CertificatePage, CertificateSummary, HypercertId};

/// Snapshot of every hypercert on one chain, as written by the `export` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogExport {
    pub chain_id: String,
    pub count: u64,
    pub hypercerts: Vec<CertificateSummary>,
}

impl CatalogExport {
    pub fn new(chain_id: &str, page: CertificatePage) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            count: page.count,
            hypercerts: page.data,
        }
    }

    pub fn into_page(self) -> CertificatePage {
        CertificatePage {
            data: self.hypercerts,
            count: self.count,
        }
    }
}

pub fn export_catalog(export: &CatalogExport, path: impl AsRef<Path>) -> Result<()> {
    save_to_file(export, path)
}

/// Read an export back, rejecting rows whose id no longer parses.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CatalogExport> {
    let path = path.as_ref();
    let export: CatalogExport = load_from_file(path)?;
    for cert in &export.hypercerts {
        cert.id
            .parse::<HypercertId>()
            .map_err(|e| anyhow!("Bad hypercert id in {}: {}", path.display(), e))?;
    }
    Ok(export)
}

/// Write a serializable value as pretty JSON.
pub fn save_to_file<T: Serialize>(data: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| anyhow!("Failed to create export file {}: {}", path.display(), e))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, data)
        .map_err(|e| anyhow!("Failed to write export to {}: {}", path.display(), e))?;
    Ok(())
}

pub fn load_from_file<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| anyhow!("Failed to open export file {}: {}", path.display(), e))?;
    let reader = BufReader::new(file);
    let data = serde_json::from_reader(reader)
        .map_err(|e| anyhow!("Failed to parse export file {}: {}", path.display(), e))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("hypercerts-{}-{}.json", name, std::process::id()))
    }

    fn cert(id: &str, units: u128) -> CertificateSummary {
        CertificateSummary {
            id: id.to_string(),
            name: "Reforest".to_string(),
            image: "ipfs://img".to_string(),
            description: "Trees".to_string(),
            units,
        }
    }

    #[test]
    fn test_catalog_export_reloads() {
        let page = CertificatePage {
            data: vec![cert(
                "8453-0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed-1",
                u64::MAX as u128 + 12_345,
            )],
            count: 1,
        };
        let export = CatalogExport::new("8453", page.clone());
        let path = temp_path("export");

        export_catalog(&export, &path).unwrap();
        let loaded = load_catalog(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.chain_id, "8453");
        assert_eq!(loaded.into_page(), page);
    }

    #[test]
    fn test_load_rejects_bad_ids() {
        let export = CatalogExport::new(
            "8453",
            CertificatePage {
                data: vec![cert("not-an-id", 10)],
                count: 1,
            },
        );
        let path = temp_path("bad-id");

        export_catalog(&export, &path).unwrap();
        let err = load_catalog(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Bad hypercert id"));
    }

    #[test]
    fn test_missing_file_errors() {
        let err = load_catalog("/nonexistent/hypercerts.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open export file"));
    }
}
