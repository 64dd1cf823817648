use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::calendar::{CalendarDate, Locale};
use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::inspection::{Inspection, Template};

pub const APP_ID: &str = "inspectit";
pub const APP_VERSION: &str = "v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub app_id: String,
    pub version: String,
    pub updated_at: String,
}

impl Default for Meta {
    fn default() -> Self {
        Meta {
            app_id: APP_ID.to_owned(),
            version: APP_VERSION.to_owned(),
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub meta: Meta,
    pub template: Template,
    pub inspections: Vec<Inspection>,
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset {
            meta: Meta::default(),
            template: Template::default(),
            inspections: Vec::new(),
        }
    }
}

impl Dataset {
    pub fn find_inspection(&self, id: Uuid) -> Option<&Inspection> {
        self.inspections.iter().find(|i| i.id == id)
    }

    pub fn find_inspection_mut(&mut self, id: Uuid) -> Option<&mut Inspection> {
        self.inspections.iter_mut().find(|i| i.id == id)
    }

    /// Newest first, as the source kept its list.
    pub fn add_inspection(&mut self, inspection: Inspection) {
        self.inspections.insert(0, inspection);
    }

    pub fn delete_inspection(&mut self, id: Uuid) -> bool {
        let before = self.inspections.len();
        self.inspections.retain(|i| i.id != id);
        self.inspections.len() != before
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub org: String,
    pub user: String,
    pub language: Locale,
    pub logo: String,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            org: "ToolStack".to_owned(),
            user: String::new(),
            language: Locale::default(),
            logo: String::new(),
        }
    }
}

/// The export payload wrapping profile and dataset in one file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub exported_at: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    pub data: Dataset,
}

/// Flat-file persistence for the dataset and the user profile, the two
/// storage keys of the original application.
pub struct Store {
    data_path: PathBuf,
    profile_path: PathBuf,
}

impl Store {
    pub fn from_config(config: &Config) -> Self {
        Store {
            data_path: config.data_file(),
            profile_path: config.profile_file(),
        }
    }

    pub fn at(data_path: PathBuf, profile_path: PathBuf) -> Self {
        Store {
            data_path,
            profile_path,
        }
    }

    /// Missing or unreadable data degrades to the default dataset; the
    /// caller never sees a parse failure on load.
    pub fn load(&self) -> Dataset {
        match fs::read_to_string(&self.data_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(dataset) => dataset,
                Err(err) => {
                    log::warn!(
                        "Data file {} is unreadable ({}), starting fresh",
                        self.data_path.display(),
                        err
                    );
                    Dataset::default()
                }
            },
            Err(_) => Dataset::default(),
        }
    }

    pub fn save(&self, dataset: &mut Dataset) -> Result<()> {
        dataset.meta.updated_at = chrono::Utc::now().to_rfc3339();
        write_json(&self.data_path, dataset)
    }

    pub fn load_profile(&self) -> Profile {
        match fs::read_to_string(&self.profile_path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!(
                    "Profile file {} is unreadable ({}), using defaults",
                    self.profile_path.display(),
                    err
                );
                Profile::default()
            }),
            Err(_) => Profile::default(),
        }
    }

    pub fn save_profile(&self, profile: &Profile) -> Result<()> {
        write_json(&self.profile_path, profile)
    }

    pub fn export_to(&self, path: &Path) -> Result<()> {
        let export = Export {
            exported_at: chrono::Utc::now().to_rfc3339(),
            profile: Some(self.load_profile()),
            data: self.load(),
        };

        write_json(path, &export)
    }

    /// Parses an export payload, checks it belongs to this application and
    /// data version, and replaces dataset and profile with its contents.
    pub fn import_from(&self, path: &Path) -> Result<Dataset> {
        let content = fs::read_to_string(path)?;
        let export: Export = serde_json::from_str(&content).map_err(|err| {
            Error::new(
                ErrorKind::StoreFormat,
                format!("{} is not a valid export file: {}", path.display(), err).as_str(),
            )
        })?;

        let mut dataset = export.data;

        if dataset.meta.app_id != APP_ID {
            return Err(Error::new(
                ErrorKind::StoreFormat,
                format!("export belongs to '{}'", dataset.meta.app_id).as_str(),
            ));
        }
        if dataset.meta.version != APP_VERSION {
            return Err(Error::new(
                ErrorKind::StoreVersion,
                format!(
                    "export has version '{}', expected '{}'",
                    dataset.meta.version, APP_VERSION
                )
                .as_str(),
            ));
        }

        if let Some(profile) = export.profile {
            self.save_profile(&profile)?;
        }
        self.save(&mut dataset)?;

        Ok(dataset)
    }

    pub fn default_export_name() -> String {
        format!(
            "toolstack-inspect-it-{}-{}.json",
            APP_VERSION,
            CalendarDate::today()
        )
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::parse_iso_date;
    use crate::inspection::InspectionType;
    use std::env;

    struct TempStore {
        dir: PathBuf,
        store: Store,
    }

    impl TempStore {
        fn new() -> Self {
            let dir = env::temp_dir().join(format!("inspectit-test-{}", Uuid::new_v4()));
            let store = Store::at(dir.join("data.json"), dir.join("profile.json"));
            TempStore { dir, store }
        }
    }

    impl Drop for TempStore {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    fn sample_inspection(dataset: &Dataset) -> Inspection {
        Inspection::from_template(
            &dataset.template,
            parse_iso_date("2026-01-04").unwrap(),
            InspectionType::MoveOut,
        )
    }

    #[test]
    fn load_of_missing_file_is_default() {
        let tmp = TempStore::new();
        let dataset = tmp.store.load();

        assert_eq!(dataset.meta.app_id, APP_ID);
        assert!(dataset.inspections.is_empty());
    }

    #[test]
    fn load_of_corrupt_file_is_default() {
        let tmp = TempStore::new();
        fs::create_dir_all(&tmp.dir).unwrap();
        fs::write(tmp.dir.join("data.json"), "{not json").unwrap();

        assert!(tmp.store.load().inspections.is_empty());
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = TempStore::new();
        let mut dataset = tmp.store.load();
        let inspection = sample_inspection(&dataset);
        let id = inspection.id;

        dataset.add_inspection(inspection);
        tmp.store.save(&mut dataset).unwrap();

        let reloaded = tmp.store.load();
        assert_eq!(reloaded.inspections.len(), 1);
        let found = reloaded.find_inspection(id).unwrap();
        assert_eq!(found.date, parse_iso_date("2026-01-04").unwrap());
        assert_eq!(found.inspection_type, InspectionType::MoveOut);
    }

    #[test]
    fn delete_inspection_by_id() {
        let tmp = TempStore::new();
        let mut dataset = tmp.store.load();
        let inspection = sample_inspection(&dataset);
        let id = inspection.id;
        dataset.add_inspection(inspection);

        assert!(dataset.delete_inspection(id));
        assert!(!dataset.delete_inspection(id));
        assert!(dataset.inspections.is_empty());
    }

    #[test]
    fn export_import_round_trip() {
        let tmp = TempStore::new();
        let mut dataset = tmp.store.load();
        dataset.add_inspection(sample_inspection(&dataset));
        tmp.store.save(&mut dataset).unwrap();

        let export_path = tmp.dir.join("export.json");
        tmp.store.export_to(&export_path).unwrap();

        let other = TempStore::new();
        let imported = other.store.import_from(&export_path).unwrap();
        assert_eq!(imported.inspections.len(), 1);
        assert_eq!(other.store.load().inspections.len(), 1);
    }

    #[test]
    fn import_rejects_malformed_payloads() {
        let tmp = TempStore::new();
        fs::create_dir_all(&tmp.dir).unwrap();

        // Shape validation: a payload without template/inspections.
        let bogus = tmp.dir.join("bogus.json");
        fs::write(&bogus, "{\"data\": {\"meta\": {}}}").unwrap();
        assert!(matches!(
            tmp.store.import_from(&bogus).unwrap_err().kind,
            ErrorKind::StoreFormat
        ));

        // Version gate.
        let mut dataset = Dataset::default();
        dataset.meta.version = "v2".to_owned();
        let export = Export {
            exported_at: chrono::Utc::now().to_rfc3339(),
            profile: None,
            data: dataset,
        };
        let wrong_version = tmp.dir.join("wrong-version.json");
        fs::write(&wrong_version, serde_json::to_string(&export).unwrap()).unwrap();
        assert!(matches!(
            tmp.store.import_from(&wrong_version).unwrap_err().kind,
            ErrorKind::StoreVersion
        ));
    }
}
