use clap::Parser;
use clap_num::maybe_hex;

use crate::config::{ScanConfig, DEFAULT_RETRY_BUDGET, DEFAULT_SLOT_COUNT};
use crate::convert::Format;

#[derive(Debug, Parser)]
#[clap(name = "px4tsid")]
#[clap(about = "Scans the BS/CS110 transponder plans through a px4_drv ISDB-S tuner, \
recovers each slot's TSID from the PAT and prints a receiver channel map.", long_about = None)]
#[clap(version)]
pub struct Cli {
    /// Enable LNB power (15 V) while tuned.
    #[clap(short, long)]
    pub lnb: bool,

    /// Output format of the channel map.
    #[clap(value_enum, short, long, default_value = "json")]
    pub format: Format,

    /// TSIDs to treat as invalid even if recovered.{n}
    /// Decimal or 0x-prefixed hex; repeatable or comma-separated.
    #[clap(short, long, value_parser = maybe_hex::<u16>, value_delimiter = ',')]
    pub ignore: Vec<u16>,

    /// TSID slots scanned per BS transponder, clamped to 1..=8.
    #[clap(short = 't', long = "ts-number-size", default_value_t = DEFAULT_SLOT_COUNT)]
    pub ts_number_size: usize,

    /// Read retries per slot before its TSID is left unresolved.
    #[clap(short = 'r', long = "retry-times", default_value_t = DEFAULT_RETRY_BUDGET)]
    pub retry_times: u32,

    /// px4_drv device file, e.g. /dev/px4video0.
    #[clap(required = true)]
    pub device: String,
}

impl Cli {
    /// Validated scan parameters for this invocation.
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig::new(self.ts_number_size, self.retry_times)
            .with_ignored(self.ignore.iter().copied())
            .with_lnb_power(self.lnb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_arguments_map_into_scan_config() {
        let cli = Cli::parse_from([
            "px4tsid",
            "--lnb",
            "--ignore",
            "0x4010,16401",
            "-t",
            "9",
            "/dev/px4video2",
        ]);

        assert!(cli.lnb);
        assert_eq!(cli.device, "/dev/px4video2");
        assert_eq!(cli.ignore, vec![0x4010, 16401]);

        let config = cli.scan_config();
        assert!(config.lnb_power);
        assert_eq!(config.slot_count(), 8);
        assert_eq!(config.retry_budget(), DEFAULT_RETRY_BUDGET);
        assert!(config.is_ignored(0x4010));
        assert!(config.is_ignored(16401));
    }

    #[test]
    fn test_format_values_parse() {
        for format in [
            "json", "dvbv5", "dvbv5lnb", "bondvb", "bonpt", "bonptx", "bonpx4", "mirakurun",
        ] {
            let cli = Cli::parse_from(["px4tsid", "--format", format, "/dev/px4video0"]);
            assert_eq!(cli.device, "/dev/px4video0");
        }
    }
}
