//! JSON data directory adapter.
//!
//! Loads the snapshot from the directory layout the crawler writes:
//!
//! - `stocks.json`     — `{ code: { name, market } }`
//! - `themes.json`     — `{ "themes": [ { id, name, stocks } ] }`
//! - `market.json`     — `{ date, data: { code: { market_cap, ... } } }`
//! - `financial.json`  — `{ quarter, data: { code: { revenue, ... } } }`
//! - `prices/YYYY-MM.json` — `{ code: { "YYYY-MM-DD": { close, value } } }`
//!
//! Price history is partitioned by month; the most recent partitions present
//! on disk are merged, so a load is reproducible for a fixed directory
//! regardless of the wall clock.

use crate::domain::error::ThemarankError;
use crate::domain::price_series::{PriceBar, PriceBook, PriceSeries};
use crate::domain::snapshot::Snapshot;
use crate::domain::stock::{FinancialData, MarketData, Stock};
use crate::domain::theme::Theme;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PRICE_MONTHS: usize = 3;

pub struct JsonDataAdapter {
    base_path: PathBuf,
    price_months: usize,
}

#[derive(Debug, Deserialize)]
struct ThemesFile {
    themes: Vec<Theme>,
}

#[derive(Debug, Deserialize)]
struct MarketFile {
    date: String,
    #[serde(default)]
    data: HashMap<String, MarketData>,
}

#[derive(Debug, Default, Deserialize)]
struct FinancialFile {
    #[serde(default)]
    data: HashMap<String, FinancialData>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    close: f64,
    #[serde(default)]
    value: f64,
}

/// code → date string → bar, as stored in one monthly partition.
type PriceFile = HashMap<String, HashMap<String, RawBar>>;

impl JsonDataAdapter {
    pub fn new(base_path: PathBuf, price_months: usize) -> Self {
        Self {
            base_path,
            price_months,
        }
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, ThemarankError> {
        let dir = config
            .get_string("data", "dir")
            .ok_or_else(|| ThemarankError::ConfigMissing {
                section: "data".into(),
                key: "dir".into(),
            })?;

        let months = config.get_int("data", "price_months", DEFAULT_PRICE_MONTHS as i64);
        if months < 1 {
            return Err(ThemarankError::ConfigInvalid {
                section: "data".into(),
                key: "price_months".into(),
                reason: format!("must be at least 1, got {months}"),
            });
        }

        Ok(Self::new(PathBuf::from(dir), months as usize))
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T, ThemarankError> {
        let path = self.base_path.join(name);
        let content = fs::read_to_string(&path).map_err(|e| ThemarankError::DataLoad {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ThemarankError::DataFormat {
            file: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Like `read_json`, but a missing file yields the default value.
    /// A present-but-broken file is still an error.
    fn read_json_optional<T>(&self, name: &str) -> Result<T, ThemarankError>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if !self.base_path.join(name).exists() {
            return Ok(T::default());
        }
        self.read_json(name)
    }

    /// Monthly partition names under `prices/`, newest first, capped at the
    /// configured month count.
    fn recent_price_files(&self) -> Result<Vec<PathBuf>, ThemarankError> {
        let dir = self.base_path.join("prices");
        let entries = fs::read_dir(&dir).map_err(|e| ThemarankError::DataLoad {
            file: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ThemarankError::DataLoad {
                file: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }

        // YYYY-MM stems sort chronologically as strings.
        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        files.truncate(self.price_months);

        if files.is_empty() {
            return Err(ThemarankError::NoPriceData {
                dir: dir.display().to_string(),
            });
        }
        Ok(files)
    }

    fn load_price_book(&self) -> Result<PriceBook, ThemarankError> {
        let mut bars_by_code: HashMap<String, Vec<PriceBar>> = HashMap::new();

        for path in self.recent_price_files()? {
            let content = fs::read_to_string(&path).map_err(|e| ThemarankError::DataLoad {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let month: PriceFile =
                serde_json::from_str(&content).map_err(|e| ThemarankError::DataFormat {
                    file: path.display().to_string(),
                    reason: e.to_string(),
                })?;

            for (code, days) in month {
                let bars = bars_by_code.entry(code).or_default();
                for (date_str, raw) in days {
                    let date = parse_date(&date_str, &path)?;
                    bars.push(PriceBar {
                        date,
                        close: raw.close,
                        value: raw.value,
                    });
                }
            }
        }

        let series = bars_by_code
            .into_iter()
            .map(|(code, bars)| (code, PriceSeries::new(bars)))
            .collect();
        Ok(PriceBook::new(series))
    }
}

fn parse_date(s: &str, file: &Path) -> Result<NaiveDate, ThemarankError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ThemarankError::DataFormat {
        file: file.display().to_string(),
        reason: format!("invalid date key {s:?} (expected YYYY-MM-DD)"),
    })
}

impl DataPort for JsonDataAdapter {
    fn load_snapshot(&self) -> Result<Snapshot, ThemarankError> {
        let stocks: HashMap<String, Stock> = self.read_json("stocks.json")?;
        let themes: ThemesFile = self.read_json("themes.json")?;
        let market: MarketFile = self.read_json("market.json")?;
        let financial: FinancialFile = self.read_json_optional("financial.json")?;

        let base_date = NaiveDate::parse_from_str(&market.date, "%Y-%m-%d").map_err(|_| {
            ThemarankError::DataFormat {
                file: self.base_path.join("market.json").display().to_string(),
                reason: format!("invalid base date {:?} (expected YYYY-MM-DD)", market.date),
            }
        })?;

        let prices = self.load_price_book()?;

        Ok(Snapshot {
            stocks,
            themes: themes.themes,
            prices,
            market: market.data,
            financial: financial.data,
            base_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_data_dir() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        fs::write(
            path.join("stocks.json"),
            r#"{"005930": {"name": "Samsung Electronics", "market": "KOSPI"},
                "000660": {"name": "SK Hynix", "market": "KOSPI"}}"#,
        )
        .unwrap();
        fs::write(
            path.join("themes.json"),
            r#"{"themes": [{"id": "T001", "name": "Semiconductors",
                            "stocks": ["005930", "000660"]}]}"#,
        )
        .unwrap();
        fs::write(
            path.join("market.json"),
            r#"{"date": "2025-02-28",
                "data": {"005930": {"market_cap": 420000000000000.0}}}"#,
        )
        .unwrap();

        fs::create_dir(path.join("prices")).unwrap();
        fs::write(
            path.join("prices/2025-02.json"),
            r#"{"005930": {"2025-02-27": {"close": 71000, "value": 850000000000},
                           "2025-02-28": {"close": 72000}},
                "000660": {"2025-02-28": {"close": 180000, "value": 500000000000}}}"#,
        )
        .unwrap();
        fs::write(
            path.join("prices/2025-01.json"),
            r#"{"005930": {"2025-01-31": {"close": 68000, "value": 700000000000}}}"#,
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn loads_full_snapshot() {
        let (_dir, path) = setup_data_dir();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);
        let snapshot = adapter.load_snapshot().unwrap();

        assert_eq!(snapshot.stocks.len(), 2);
        assert_eq!(snapshot.themes.len(), 1);
        assert_eq!(snapshot.themes[0].stocks, vec!["005930", "000660"]);
        assert_eq!(
            snapshot.base_date,
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!((snapshot.market_cap("005930") - 420_000_000_000_000.0).abs() < 1.0);
        // financial.json is absent and defaults to empty.
        assert!(snapshot.financial.is_empty());
    }

    #[test]
    fn merges_monthly_partitions_newest_first() {
        let (_dir, path) = setup_data_dir();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);
        let snapshot = adapter.load_snapshot().unwrap();

        let series = snapshot.prices.series("005930").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.close_price(0), Some(72_000.0));
        assert_eq!(series.close_price(1), Some(71_000.0));
        assert_eq!(series.close_price(2), Some(68_000.0));
    }

    #[test]
    fn missing_value_field_defaults_to_zero() {
        let (_dir, path) = setup_data_dir();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);
        let snapshot = adapter.load_snapshot().unwrap();

        let series = snapshot.prices.series("005930").unwrap();
        assert!((series.bars()[0].value - 0.0).abs() < f64::EPSILON);
        assert!((series.bars()[1].value - 850_000_000_000.0).abs() < 1.0);
    }

    #[test]
    fn month_cap_drops_oldest_partitions() {
        let (_dir, path) = setup_data_dir();
        let adapter = JsonDataAdapter::new(path, 1);
        let snapshot = adapter.load_snapshot().unwrap();

        // Only 2025-02 is read; the January record disappears.
        let series = snapshot.prices.series("005930").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.close_price(1), Some(71_000.0));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let (_dir, path) = setup_data_dir();
        fs::remove_file(path.join("stocks.json")).unwrap();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);

        assert!(matches!(
            adapter.load_snapshot(),
            Err(ThemarankError::DataLoad { .. })
        ));
    }

    #[test]
    fn broken_json_is_a_format_error() {
        let (_dir, path) = setup_data_dir();
        fs::write(path.join("themes.json"), "{not json").unwrap();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);

        assert!(matches!(
            adapter.load_snapshot(),
            Err(ThemarankError::DataFormat { .. })
        ));
    }

    #[test]
    fn empty_prices_dir_is_an_error() {
        let (_dir, path) = setup_data_dir();
        fs::remove_file(path.join("prices/2025-02.json")).unwrap();
        fs::remove_file(path.join("prices/2025-01.json")).unwrap();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);

        assert!(matches!(
            adapter.load_snapshot(),
            Err(ThemarankError::NoPriceData { .. })
        ));
    }

    #[test]
    fn invalid_date_key_is_a_format_error() {
        let (_dir, path) = setup_data_dir();
        fs::write(
            path.join("prices/2025-02.json"),
            r#"{"005930": {"20250228": {"close": 72000}}}"#,
        )
        .unwrap();
        let adapter = JsonDataAdapter::new(path, DEFAULT_PRICE_MONTHS);

        assert!(matches!(
            adapter.load_snapshot(),
            Err(ThemarankError::DataFormat { .. })
        ));
    }

    #[test]
    fn from_config_requires_data_dir() {
        struct EmptyConfig;
        impl ConfigPort for EmptyConfig {
            fn get_string(&self, _section: &str, _key: &str) -> Option<String> {
                None
            }
            fn get_int(&self, _section: &str, _key: &str, default: i64) -> i64 {
                default
            }
        }

        assert!(matches!(
            JsonDataAdapter::from_config(&EmptyConfig),
            Err(ThemarankError::ConfigMissing { .. })
        ));
    }
}
