use std::env;
use std::thread;
use anyhow::{Context, Result};
use log::{error, info};
use crate::config::load_config;
use crate::manager_accuweather::AccuWeather;
use crate::manager_webhook::Webhook;
use crate::scheduler::{Shutdown, Ticker};
use crate::store::ForecastStore;
use crate::worker::LocationWorker;

mod config;
mod errors;
mod initialization;
mod manager_accuweather;
mod manager_webhook;
mod model;
mod models;
mod report;
mod scheduler;
mod server;
mod store;
mod worker;

fn main() -> Result<()> {
    let config_path = env::var("CONFIG_FILE").unwrap_or("config.toml".to_string());
    let config = load_config(&config_path)
        .with_context(|| format!("loading {}", config_path))?;

    initialization::setup_logger(&config.general)?;
    info!("hindcast version {}", env!("CARGO_PKG_VERSION"));

    for msg in &config.skipped {
        error!("{}", msg);
    }

    server::spawn(config.general.port)?;

    let shutdown = Shutdown::new();
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("shutdown requested; waiting for in-flight ticks");
            shutdown.trigger();
        })?;
    }

    let store = ForecastStore::new(&config.general.data_dir);

    let mut handles = Vec::new();
    for (key, location) in &config.locations {
        if location.disabled {
            info!("location {} is disabled, not scheduling", key);
            continue;
        }

        // an unknown model selector disables this location only
        let model = match model::resolve(location.model.as_deref()) {
            Ok(model) => model,
            Err(e) => {
                error!("location {} skipped: {}", key, e);
                continue;
            }
        };

        let worker = LocationWorker {
            key: key.clone(),
            location: location.clone(),
            store: store.clone(),
            weather: AccuWeather::new(config.weather.api_key.clone()),
            webhooks: location.webhooks.iter()
                .map(|w| Webhook::new(&w.id, &w.token))
                .collect(),
            model,
            ticker: Ticker::new(location.timezone, location.minute, shutdown.clone()),
        };

        info!("scheduling location {}; tz {}, minute {}", key, location.timezone, location.minute);
        let handle = thread::Builder::new()
            .name(key.clone())
            .spawn(move || worker::run(worker))?;
        handles.push(handle);
    }

    if handles.is_empty() {
        error!("no locations scheduled, exiting");
        return Ok(());
    }

    for handle in handles {
        let _ = handle.join();
    }
    info!("hindcast stopped");

    Ok(())
}
