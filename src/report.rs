use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, TimeZone, Timelike};
use chrono_tz::Tz;
use crate::errors::StoreError;
use crate::model::Model;
use crate::models::condition::glyph;
use crate::models::forecast::{ForecastRecord, ModelOutput};
use crate::store::{ForecastStore, Kind};

/// Number of hourly steps in one forecast query, and the number of grid rows
pub const HORIZON: usize = 12;

/// Clock glyphs indexed by hour of day modulo twelve
const CLOCKS: [&str; 12] = ["🕛", "🕐", "🕑", "🕒", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚"];

/// One grid row: the target hour it describes and one cell per lead time.
/// Row r covers the hour r + 1 hours after now and has HORIZON - r cells.
pub struct GridRow {
    pub hour: DateTime<Tz>,
    pub cells: Vec<Option<ModelOutput>>,
}

/// Reads the rolling two day window for a location, reduces it into the
/// forecast grid and renders it as report lines
///
/// # Arguments
///
/// * 'store' - the forecast store to read partitions from
/// * 'key' - the location key
/// * 'model' - the location's model transform
/// * 'now' - start of the current hour in the location's timezone
pub fn build_report(
    store: &ForecastStore,
    key: &str,
    model: Model,
    now: DateTime<Tz>) -> Result<Vec<String>, StoreError> {

    let today = now.date_naive();
    let mut candidates = store.read_partition(Kind::Raw, key, today - Days::new(1))?;
    candidates.extend(store.read_partition(Kind::Raw, key, today)?);

    let rows = build_grid(now, candidates, model);
    Ok(render(now, &rows))
}

/// Builds the forecast grid from the candidate set.
///
/// Candidates are processed in ascending (query_date, query_hour) order so
/// that when two records map to the same cell the most recent query wins;
/// cell overwrite is the contract, not an artifact of traversal order.
/// Records whose target offset falls outside the grid, or whose lead time
/// has no cell in the row, are skipped.
///
/// # Arguments
///
/// * 'now' - start of the current hour in the location's timezone
/// * 'candidates' - all records of the two day window, in any order
/// * 'model' - the location's model transform
pub fn build_grid(now: DateTime<Tz>, mut candidates: Vec<ForecastRecord>, model: Model) -> Vec<GridRow> {
    let tz = now.timezone();

    let mut rows: Vec<GridRow> = (0..HORIZON)
        .map(|r| GridRow {
            hour: now + TimeDelta::hours(r as i64 + 1),
            cells: vec![None; HORIZON - r],
        })
        .collect();

    candidates.sort_by_key(|c| (c.query_date, c.query_hour));

    for record in candidates {
        let Some(target) = zoned_hour(record.target_date, record.target_hour, tz) else { continue };
        let Some(query) = zoned_hour(record.query_date, record.query_hour, tz) else { continue };

        let offset = (target - now).num_hours() - 1;
        if offset < 0 || offset >= HORIZON as i64 {
            continue;
        }
        let lead = (now - query).num_hours();
        if lead < 0 {
            continue;
        }

        if let Some(cell) = rows[offset as usize].cells.get_mut(lead as usize) {
            *cell = Some(model(&record));
        }
    }

    rows
}

/// Renders the grid: a header of clock glyphs for the past twelve query hours
/// (current hour first), then one line per row with the two digit target hour
/// and one condition glyph per cell
///
/// # Arguments
///
/// * 'now' - start of the current hour in the location's timezone
/// * 'rows' - the grid rows to render
pub fn render(now: DateTime<Tz>, rows: &[GridRow]) -> Vec<String> {
    let clocks = (0..HORIZON)
        .map(|x| CLOCKS[((now - TimeDelta::hours(x as i64)).hour() % 12) as usize])
        .collect::<String>();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("        ↪ {}\n", clocks));

    for row in rows {
        let cells = row.cells.iter()
            .map(|cell| glyph(cell.as_ref().map(|m| m.dominant)))
            .collect::<String>();
        lines.push(format!("`{:02}` {}", row.hour.hour(), cells));
    }

    lines
}

/// Resolves a calendar date and hour to an instant in the given timezone.
/// An hour that does not exist on the local clock reads as None; an
/// ambiguous one resolves to its first occurrence.
fn zoned_hour(date: NaiveDate, hour: u8, tz: Tz) -> Option<DateTime<Tz>> {
    tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour as u32, 0, 0)
        .earliest()
}
