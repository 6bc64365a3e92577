use activity_stats::{
    ActivityAggregator, SnapshotStore, TimeWindow, load_snapshot, resolve_snapshot_path,
};
use chrono::{DateTime, NaiveDate, Utc};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut args = env::args().skip(1);
    let (from, to) = match (args.next(), args.next()) {
        (Some(from), Some(to)) => (parse_bound(&from, false)?, parse_bound(&to, true)?),
        _ => {
            eprintln!("usage: activity_stats <from> <to>  (RFC 3339 or YYYY-MM-DD)");
            std::process::exit(2);
        }
    };

    let path = resolve_snapshot_path();
    info!("loading activity snapshot from {}", path.display());
    let snapshot = load_snapshot(&path).await;

    let store = SnapshotStore::new(snapshot);
    let aggregator = ActivityAggregator::new(store.clone(), store);

    let stats = aggregator.compute_stats(TimeWindow::new(from, to)).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}

fn parse_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    // Bare dates cover the whole day: midnight going in, 23:59:59 going out.
    let date: NaiveDate = raw.parse()?;
    let timestamp = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    }
    .ok_or("date out of range")?;

    Ok(timestamp.and_utc())
}
