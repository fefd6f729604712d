use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use failure::{bail, format_err, Error};
use log::{error, info};
use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

use mxevents::config::DecoderConfig;
use mxevents::{Event, EventDecoder};

fn summarise(event: &Event) -> String {
    format!(
        "{} {} from {}{}",
        event.kind(),
        event.event_type(),
        event.sender().unwrap_or("-"),
        if event.content().is_unknown() {
            " (untyped)"
        } else {
            ""
        },
    )
}

fn main() -> Result<(), Error> {
    tracing_log::env_logger::init();

    // We need to import this due to clap::app_from_crate!.
    use clap::{crate_authors, crate_description, crate_name, crate_version};

    let matches = clap::app_from_crate!()
        .arg(
            clap::Arg::with_name("config")
                .short("c")
                .long("config")
                .takes_value(true)
                .multiple(true)
                .help("Specify config files to load"),
        )
        .arg(
            clap::Arg::with_name("file")
                .short("f")
                .long("file")
                .takes_value(true)
                .required(true)
                .help("JSON file holding an event or an array of events"),
        )
        .get_matches();

    let log_layer = tracing_subscriber::fmt::layer().with_ansi(false);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter).with(log_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    let config_files = matches.values_of("config").unwrap_or_default();

    let mut settings = config::Config::new();
    for config_file in config_files {
        settings.merge(config::File::with_name(config_file))?;
    }

    let settings: DecoderConfig = settings.try_into()?;

    let decoder = EventDecoder::new(Arc::new(settings.build_registry()?));
    info!(
        "Decoding with {} registered event types",
        decoder.registry().len()
    );

    let path = matches
        .value_of("file")
        .ok_or_else(|| format_err!("No event file given"))?;
    let input: Value =
        serde_json::from_reader(BufReader::new(File::open(path)?))?;

    let values = match input {
        Value::Array(values) => values,
        value => vec![value],
    };

    let total = values.len();
    let mut failed = 0;

    for (idx, value) in values.into_iter().enumerate() {
        match decoder.decode(value) {
            Ok(event) => info!("{}: {}", idx, summarise(&event)),
            Err(err) => {
                error!("{}: {}", idx, err);
                failed += 1;

                if settings.fail_fast {
                    bail!("Stopping after event {} failed to decode", idx);
                }
            }
        }
    }

    info!("Decoded {} of {} events", total - failed, total);

    Ok(())
}
