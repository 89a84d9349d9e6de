use std::collections::BTreeMap;
use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use log::{error, info, warn};
use crate::config::Location;
use crate::errors::WorkerError;
use crate::manager_accuweather::AccuWeather;
use crate::manager_webhook::Webhook;
use crate::model::Model;
use crate::models::forecast::{ForecastRecord, ModelRecord};
use crate::report;
use crate::scheduler::Ticker;
use crate::store::{ForecastStore, Kind};

/// Everything one location's pipeline owns. Workers share nothing but the
/// store, which is partitioned by location and needs no cross-location locking.
pub struct LocationWorker {
    pub key: String,
    pub location: Location,
    pub store: ForecastStore,
    pub weather: AccuWeather,
    pub webhooks: Vec<Webhook>,
    pub model: Model,
    pub ticker: Ticker,
}

/// Runs the location's pipeline until shutdown: one ingest, aggregate and
/// deliver sequence per tick, in order, so the report always observes the
/// same tick's query.
///
/// A failed tick is logged and the loop waits for the next one; one tick's
/// failure never terminates the subscription. The whole pipeline runs on this
/// one thread, so two ticks can never overlap; a tick whose work overruns the
/// next fire time makes that hour's tick get skipped, the loop then resumes
/// at the following fire time.
///
/// # Arguments
///
/// * 'worker' - the location pipeline to run
pub fn run(worker: LocationWorker) {
    info!("worker started; location {}", worker.key);

    while let Some(now) = worker.ticker.wait() {
        if let Err(e) = tick(&worker, now) {
            error!("location {}: tick aborted: {}", worker.key, e);
        }
    }

    info!("worker stopped; location {}", worker.key);
}

/// One tick of the pipeline: query the weather source, commit raw and model
/// partitions, build the report from the rolling two day window and deliver it
///
/// # Arguments
///
/// * 'worker' - the location pipeline
/// * 'now' - start of the current hour in the location's timezone
fn tick(worker: &LocationWorker, now: DateTime<Tz>) -> Result<(), WorkerError> {
    let key = worker.key.as_str();

    let records = worker.weather.query(&worker.location.station, now)?;
    log_predictions(key, now, &records);

    worker.store.append(Kind::Raw, key, now.date_naive(), now.hour() as u8, &records)?;

    if worker.location.model.is_some() {
        let model_records = records.iter()
            .map(|r| ModelRecord {
                query_date: r.query_date,
                query_hour: r.query_hour,
                target_date: r.target_date,
                target_hour: r.target_hour,
                model: (worker.model)(r),
            })
            .collect::<Vec<ModelRecord>>();
        worker.store.append(Kind::Model, key, now.date_naive(), now.hour() as u8, &model_records)?;
    }

    let lines = report::build_report(&worker.store, key, worker.model, now)
        .map_err(|e| WorkerError { phase: "report", msg: e.to_string() })?;
    info!("report; location {}\n{}", key, lines.join("\n"));

    let title = format!("**{}** `{}T{:02}`",
                        worker.location.display_name(key),
                        now.format("%Y-%m-%d"), now.hour());
    let timestamp = now.to_rfc3339();

    // failed deliveries never roll back what this tick already stored
    for webhook in &worker.webhooks {
        if let Err(e) = webhook.send_report(&title, &lines, &timestamp, &worker.location) {
            warn!("location {}: delivery failed: {}", key, e);
        }
    }

    Ok(())
}

/// Logs the per-hour label map of a query event before it is stored
fn log_predictions(key: &str, now: DateTime<Tz>, records: &[ForecastRecord]) {
    let labels = records.iter()
        .map(|r| (format!("{}T{:02}", r.target_date, r.target_hour), r.label.as_str()))
        .collect::<BTreeMap<String, &str>>();

    info!("predictions; location {} at {} {}",
          key, now.to_rfc3339(),
          serde_json::to_string(&labels).unwrap_or_default());
}
