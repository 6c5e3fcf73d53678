//! Command line interface for the `dgramfrag` demo binary.
//!
//! The binary fragments a payload, delivers the datagrams to a decoder in a
//! chosen order, and logs the reassembly lifecycle.

use std::{num::NonZeroUsize, path::PathBuf};

use clap::{Parser, ValueEnum};

/// Order in which fragments are handed to the decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DeliveryOrder {
    /// Index order.
    #[default]
    Forward,
    /// Last fragment first.
    Reverse,
    /// Odd indices, then even indices.
    Interleaved,
}

impl DeliveryOrder {
    /// Reorder `items` in place.
    pub fn apply<T>(self, items: &mut Vec<T>) {
        match self {
            Self::Forward => {}
            Self::Reverse => items.reverse(),
            Self::Interleaved => {
                let (mut odd, even): (Vec<_>, Vec<_>) = std::mem::take(items)
                    .into_iter()
                    .enumerate()
                    .partition(|(index, _)| index % 2 == 1);
                odd.extend(even);
                items.extend(odd.into_iter().map(|(_, item)| item));
            }
        }
    }
}

/// Command line arguments for the `dgramfrag` binary.
#[derive(Debug, Parser)]
#[command(
    name = "dgramfrag",
    version,
    about = "Fragment a payload and reassemble it in-process"
)]
pub struct Cli {
    /// Source identifier, decimal or `0x`-prefixed hex.
    #[arg(long, default_value = "0x12345678", value_parser = parse_source_id)]
    pub source_id: u32,
    /// Message type tag (0-63).
    #[arg(short = 't', long, default_value_t = 0)]
    pub message_type: u8,
    /// Maximum payload bytes per fragment.
    #[arg(long, default_value_t = crate_default_payload())]
    pub max_payload: NonZeroUsize,
    /// Read the payload from this file.
    #[arg(short, long, conflicts_with = "size")]
    pub input: Option<PathBuf>,
    /// Generate a zero-filled payload of this many bytes.
    #[arg(short, long, default_value_t = 0)]
    pub size: usize,
    /// Delivery order for the fragments.
    #[arg(long, value_enum, default_value_t = DeliveryOrder::Forward)]
    pub order: DeliveryOrder,
    /// Fragment indices to drop before delivery.
    #[arg(long = "drop", value_delimiter = ',')]
    pub drop: Vec<u16>,
}

fn crate_default_payload() -> NonZeroUsize { NonZeroUsize::MIN.saturating_add(1199) }

fn parse_source_id(raw: &str) -> Result<u32, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse(),
    };
    parsed.map_err(|err| format!("invalid source id {raw:?}: {err}"))
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rstest::rstest;

    use super::{Cli, DeliveryOrder};

    #[test]
    fn parses_hex_source_and_type() {
        let cli = Cli::parse_from(["dgramfrag", "--source-id", "0xdeadbeef", "-t", "5"]);
        assert_eq!(cli.source_id, 0xDEAD_BEEF);
        assert_eq!(cli.message_type, 5);
        assert_eq!(cli.max_payload.get(), 1200);
    }

    #[test]
    fn parses_drop_list() {
        let cli = Cli::parse_from(["dgramfrag", "--size", "5000", "--drop", "1,3"]);
        assert_eq!(cli.size, 5000);
        assert_eq!(cli.drop, vec![1, 3]);
    }

    #[test]
    fn rejects_malformed_source() {
        assert!(Cli::try_parse_from(["dgramfrag", "--source-id", "0xzz"]).is_err());
    }

    #[rstest]
    #[case(DeliveryOrder::Forward, vec![0, 1, 2, 3, 4])]
    #[case(DeliveryOrder::Reverse, vec![4, 3, 2, 1, 0])]
    #[case(DeliveryOrder::Interleaved, vec![1, 3, 0, 2, 4])]
    fn delivery_order_reorders(#[case] order: DeliveryOrder, #[case] expected: Vec<u8>) {
        let mut items: Vec<u8> = (0..5).collect();
        order.apply(&mut items);
        assert_eq!(items, expected);
    }
}
