//! Demo binary for `dgramfrag`.
//!
//! Fragments a payload, reorders or drops fragments as requested, feeds them
//! to a decoder and logs every lifecycle event.

mod cli;

use std::{error::Error, fs};

use clap::Parser;
use dgramfrag::{Decoder, DecoderEvent, Encoder, FragmentationConfig, MessageTypeSet};
use tracing::{info, warn};

fn main() -> Result<(), Box<dyn Error>> {
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();
    let payload = match &cli.input {
        Some(path) => fs::read(path)?,
        None => vec![0_u8; cli.size],
    };

    let config = FragmentationConfig::with_max_payload_size(cli.max_payload);
    let mut encoder = Encoder::with_config(cli.source_id, config);
    let batch = encoder.fragment(&payload, cli.message_type)?;
    info!(
        message_id = %batch.message_id(),
        fragments = batch.len(),
        bytes = batch.total_bytes(),
        "payload fragmented"
    );

    let mut datagrams: Vec<_> = batch
        .fragments()
        .iter()
        .filter(|frame| !cli.drop.contains(&frame.header().fragment_index().get()))
        .map(|frame| frame.to_datagram())
        .collect();
    cli.order.apply(&mut datagrams);

    let mut decoder = Decoder::with_config(cli.source_id, MessageTypeSet::all(), config);
    for datagram in &datagrams {
        decoder.accept(datagram);
    }

    let mut completed = false;
    for event in decoder.drain_events() {
        match event {
            DecoderEvent::MessageComplete(message) => {
                completed = message.payload() == payload.as_slice();
                info!(
                    message_id = %message.message_id(),
                    fragments = message.fragment_count(),
                    bytes = message.total_bytes(),
                    intact = completed,
                    "message complete"
                );
            }
            DecoderEvent::Error(error) => warn!(%error, "fragment rejected"),
            other => info!(event = ?other, "decoder event"),
        }
    }

    if let Some(status) = decoder.in_flight(batch.message_type()) {
        warn!(
            message_id = %status.message_id,
            received = status.fragments_received,
            expected = status.fragment_count,
            "message left incomplete"
        );
    }
    if completed {
        println!("reassembled {} bytes", payload.len());
    } else {
        println!("message incomplete");
    }
    Ok(())
}
