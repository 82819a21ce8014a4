//! Session state: dataset, settings and configuration store loaded once per run.

use std::path::Path;
use std::sync::Arc;

use omnisearch::{
    default_catalogue, ensure_defaults, Catalogue, ConfigEntry, ConfigStore, GlobalSearch,
    MemoryDatabase, Result, SearchResultGroup, SearchSettings, SeedReport, SETTINGS_FILE_NAME,
};
use tracing::debug;

use crate::parse::SessionOptions;

/// Everything a subcommand needs.
pub struct Session {
    db: MemoryDatabase,
    search: GlobalSearch,
    options: SessionOptions,
}

impl Session {
    /// Load the dataset, the settings, and the stored configurations.
    ///
    /// A missing configurations file yields an empty store. Settings come
    /// from `--settings`, else `omnisearch.toml` in the working directory
    /// when present, else the defaults.
    pub fn open(options: SessionOptions) -> Result<Self> {
        let db = MemoryDatabase::from_file(&options.data)?;
        let settings = load_settings(options.settings.as_deref())?;

        let store = if options.configs.exists() {
            ConfigStore::from_file(&options.configs, &db, settings.validation)?
        } else {
            debug!(
                target: "omnisearch::config",
                path = %options.configs.display(),
                "No configurations file, starting empty"
            );
            ConfigStore::new(settings.validation)
        };

        let search = GlobalSearch::new(Arc::new(store)).with_settings(settings);
        Ok(Session {
            db,
            search,
            options,
        })
    }

    /// Options this session was opened with.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Run a global search as the session's caller.
    pub fn search(&self, query: &str) -> Vec<SearchResultGroup> {
        self.search.search(&self.db, &self.options.caller, query)
    }

    /// Seed defaults and, unless `dry_run`, write the configurations file.
    pub fn seed(&self, catalogue: Option<&Path>, dry_run: bool) -> Result<SeedReport> {
        let catalogue = match catalogue {
            Some(path) => Catalogue::from_file(path)?,
            None => default_catalogue()?,
        };

        if dry_run {
            let scratch = self.search.store().snapshot();
            return ensure_defaults(&scratch, &self.db, &catalogue);
        }

        let report = ensure_defaults(self.search.store(), &self.db, &catalogue)?;
        if report.created > 0 {
            self.search.store().write_to_file(&self.options.configs)?;
        }
        Ok(report)
    }

    /// Stored configurations, optionally including inactive ones.
    pub fn configs(&self, all: bool) -> Vec<ConfigEntry> {
        if all {
            self.search.store().list_all()
        } else {
            self.search.store().list_active()
        }
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<SearchSettings> {
    match explicit {
        Some(path) => SearchSettings::from_file(path),
        None => {
            let local = Path::new(SETTINGS_FILE_NAME);
            if local.exists() {
                SearchSettings::from_file(local)
            } else {
                Ok(SearchSettings::default())
            }
        }
    }
}
