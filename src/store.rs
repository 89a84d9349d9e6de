use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;
use crate::errors::StoreError;

/// Partition trees kept in the store, one subtree per kind
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Raw records as returned by the weather source
    Raw,
    /// Archived model outputs for locations with a model configured
    Model,
}

impl Kind {
    fn dir(&self) -> &'static str {
        match self {
            Kind::Raw => "raw",
            Kind::Model => "model",
        }
    }
}

/// Time-partitioned forecast store. One JSON file per (kind, location, date)
/// holds the records of that calendar date keyed by query hour.
#[derive(Clone)]
pub struct ForecastStore {
    data_dir: String,
}

impl ForecastStore {
    /// Returns a store rooted at the given directory
    ///
    /// # Arguments
    ///
    /// * 'data_dir' - directory the partition trees live under
    pub fn new(data_dir: &str) -> ForecastStore {
        ForecastStore { data_dir: data_dir.to_string() }
    }

    fn partition_path(&self, kind: Kind, key: &str, date: NaiveDate) -> PathBuf {
        let mut path = PathBuf::from(&self.data_dir);
        path.push(kind.dir());
        path.push(key);
        path.push(format!("{}.json", date.format("%Y-%m-%d")));
        path
    }

    /// Replaces the records stored under (kind, location, date, query hour).
    ///
    /// Repeated appends with the same key are idempotent and other query hour
    /// keys in the partition are untouched. The partition file is replaced by
    /// renaming a fully written sibling, so a reader never observes a torn key.
    ///
    /// # Arguments
    ///
    /// * 'kind' - partition tree to write to
    /// * 'key' - the location key
    /// * 'date' - calendar date of the query, in the location's timezone
    /// * 'hour' - hour of day the query was issued
    /// * 'records' - the full record sequence of the query event
    pub fn append<T: Serialize>(
        &self,
        kind: Kind,
        key: &str,
        date: NaiveDate,
        hour: u8,
        records: &[T]) -> Result<(), StoreError> {

        let path = self.partition_path(kind, key, date);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut partition: BTreeMap<u8, Vec<serde_json::Value>> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            BTreeMap::new()
        };

        let values = records.iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<serde_json::Value>, serde_json::Error>>()?;
        partition.insert(hour, values);

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&partition)?)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }

    /// Returns all records of a partition, unordered across query hours.
    /// A partition that does not exist yet reads as empty. The record type
    /// must match the kind: raw partitions hold forecast records, model
    /// partitions hold model records.
    ///
    /// # Arguments
    ///
    /// * 'kind' - partition tree to read from
    /// * 'key' - the location key
    /// * 'date' - calendar date of the partition
    pub fn read_partition<T: DeserializeOwned>(&self, kind: Kind, key: &str, date: NaiveDate)
        -> Result<Vec<T>, StoreError> {

        let path = self.partition_path(kind, key, date);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let partition: BTreeMap<u8, Vec<T>> =
            serde_json::from_str(&fs::read_to_string(&path)?)?;
        Ok(partition.into_values().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::condition::Condition;
    use crate::models::forecast::{ForecastRecord, ModelOutput, ModelRecord};

    fn record(query_hour: u8, target_hour: u8, label: &str) -> ForecastRecord {
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        ForecastRecord {
            query_date: date,
            query_hour,
            target_date: date,
            target_hour,
            label: label.to_string(),
            icon: 3,
            is_daylight: true,
            temperature: 21.0,
            wind_speed: 10.0,
            wind_gust: 15.0,
        }
    }

    #[test]
    fn missing_partition_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ForecastStore::new(dir.path().to_str().unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        let records: Vec<ForecastRecord> = store.read_partition(Kind::Raw, "sto", date).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn append_and_read_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ForecastStore::new(dir.path().to_str().unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        let records = vec![record(10, 11, "Sunny"), record(10, 12, "Cloudy")];
        store.append(Kind::Raw, "sto", date, 10, &records).unwrap();

        let read: Vec<ForecastRecord> = store.read_partition(Kind::Raw, "sto", date).unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn append_is_idempotent_per_hour() {
        let dir = tempfile::tempdir().unwrap();
        let store = ForecastStore::new(dir.path().to_str().unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        let records = vec![record(10, 11, "Sunny")];
        store.append(Kind::Raw, "sto", date, 10, &records).unwrap();
        store.append(Kind::Raw, "sto", date, 10, &records).unwrap();

        let read: Vec<ForecastRecord> = store.read_partition(Kind::Raw, "sto", date).unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn append_replaces_only_its_own_hour() {
        let dir = tempfile::tempdir().unwrap();
        let store = ForecastStore::new(dir.path().to_str().unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        store.append(Kind::Raw, "sto", date, 10, &[record(10, 11, "Sunny")]).unwrap();
        store.append(Kind::Raw, "sto", date, 11, &[record(11, 12, "Rain")]).unwrap();
        store.append(Kind::Raw, "sto", date, 10, &[record(10, 11, "Fog")]).unwrap();

        let read: Vec<ForecastRecord> = store.read_partition(Kind::Raw, "sto", date).unwrap();
        assert_eq!(read.len(), 2);
        assert!(read.iter().any(|r| r.label == "Fog"));
        assert!(read.iter().any(|r| r.label == "Rain"));
        assert!(!read.iter().any(|r| r.label == "Sunny"));
    }

    #[test]
    fn kinds_and_locations_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = ForecastStore::new(dir.path().to_str().unwrap());
        let date = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();

        store.append(Kind::Raw, "sto", date, 10, &[record(10, 11, "Sunny")]).unwrap();
        let archived = vec![ModelRecord {
            query_date: date,
            query_hour: 10,
            target_date: date,
            target_hour: 11,
            model: ModelOutput { dominant: Condition::Windy },
        }];
        store.append(Kind::Model, "sto", date, 10, &archived).unwrap();

        let raw: Vec<ForecastRecord> = store.read_partition(Kind::Raw, "sto", date).unwrap();
        assert_eq!(raw.len(), 1);
        assert!(store.read_partition::<ForecastRecord>(Kind::Raw, "gbg", date).unwrap().is_empty());

        // model partitions read back with their own record type
        let models: Vec<ModelRecord> = store.read_partition(Kind::Model, "sto", date).unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].model.dominant, Condition::Windy);
        assert_eq!(models[0].query_hour, 10);
    }
}
