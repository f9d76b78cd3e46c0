use std::sync::OnceLock;

use anyhow::{Result, bail};

use super::model::LaunchDataset;

static DATASET: OnceLock<LaunchDataset> = OnceLock::new();

/// Install the process-wide dataset. Only the first call succeeds.
pub fn install(dataset: LaunchDataset) -> Result<()> {
    let rows = dataset.len();
    if DATASET.set(dataset).is_err() {
        bail!("launch dataset is already installed");
    }
    log::info!("Installed launch dataset ({rows} records)");
    Ok(())
}

/// The installed dataset, if any.
pub fn dataset() -> Option<&'static LaunchDataset> {
    DATASET.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::two_sites;

    // The store is process-global, so install and re-install are checked in
    // one test to keep ordering deterministic.
    #[test]
    fn installs_exactly_once() {
        install(two_sites()).unwrap();
        let first = dataset().unwrap();
        assert_eq!(first.len(), 5);

        let err = install(two_sites()).unwrap_err();
        assert!(err.to_string().contains("already installed"));
        assert!(std::ptr::eq(first, dataset().unwrap()));
    }
}
