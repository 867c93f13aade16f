use std::{
    collections::BTreeMap,
    fmt,
    sync::Arc,
};

use tokio::sync::mpsc;

use reqwest::StatusCode;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    shared_state::SharedState,
    price_map::{
        PriceMap,
        PriceRecord,
        normalize,
    },
};



/// One-shot price feed fetcher.
///
/// The form loads its token prices exactly once at startup. There is no
/// retry and no periodic refresh, so this task makes a single request,
/// hands the outcome to the frontend over `tx` and exits.
pub struct AsyncPriceFeed {
    tx: mpsc::Sender<FeedResult>,
    url: String,
}



impl AsyncPriceFeed {
    pub fn new(url: &str, tx: mpsc::Sender<FeedResult>) -> Self {
        Self {
            tx,
            url: url.to_string(),
        }
    }
}



pub type FeedResult = Result<PriceMap, FeedError>;



/// Why the price feed could not be loaded.
///
/// Every variant renders as the same generic user-facing line, because the
/// user can not act differently on transport versus decode problems. The
/// specific cause is written to stderr by the feed task instead.
#[derive(Debug, Clone)]
pub enum FeedError {
    Status(u16),
    Transport(String),
    Decode(String),
}



impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load prices — check your network.")
    }
}



/// One record of the raw array-shaped feed.
///
/// Every field defaults so that a malformed record still decodes and can
/// be dropped per-record instead of failing the whole body.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
struct DecodedRow {
    currency: Value,
    price: Value,
    date: Option<String>,
}



/// The feed body comes in two shapes: an array of records with optional
/// timestamps, or a flat symbol to price object.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum DecodedBody {
    Rows(Vec<DecodedRow>),
    Flat(BTreeMap<String, Value>),
}



/// Coerce a feed price value the way the form treats untrusted input:
/// numbers pass through, numeric strings parse, everything else becomes
/// NaN and is dropped during normalization.
fn price_of(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}



impl DecodedRow {
    /// Records with a non-string symbol are dropped silently.
    fn into_record(self) -> Option<PriceRecord> {
        let symbol = self.currency.as_str()?.to_string();

        Some(PriceRecord {
            symbol,
            price: price_of(&self.price),
            date: self.date,
        })
    }
}



impl DecodedBody {
    fn into_records(self) -> Vec<PriceRecord> {
        match self {
            DecodedBody::Rows(rows) => {
                rows.into_iter()
                    .filter_map(DecodedRow::into_record)
                    .collect()
            }

            DecodedBody::Flat(map) => {
                map.into_iter()
                    .map(|(symbol, value)| PriceRecord {
                        price: price_of(&value),
                        symbol,
                        date: None,
                    })
                    .collect()
            }
        }
    }
}



async fn fetch(url: &str) -> FeedResult {
    let result = match reqwest::get(url).await {
        Ok(result) => result,
        Err(e) => {
            return Err(FeedError::Transport(e.to_string()))
        }
    };

    let status = result.status();
    if status != StatusCode::OK {
        return Err(FeedError::Status(status.as_u16()))
    }

    let b = match result.text().await {
        Ok(b) => b,
        Err(e) => {
            return Err(FeedError::Transport(e.to_string()))
        }
    };

    let decoded: DecodedBody = match serde_json::from_str(&b) {
        Ok(val) => val,
        Err(e) => {
            return Err(FeedError::Decode(e.to_string()))
        }
    };

    Ok(normalize(decoded.into_records()))
}



pub async fn main(feed: AsyncPriceFeed, shared_state: Arc<SharedState>) {
    if shared_state.is_shut_down() {
        return
    }

    let result = fetch(&feed.url).await;

    match &result {
        Err(FeedError::Status(code)) => {
            eprintln!("WARNING: price feed endpoint returned status: {}", code);
        }

        Err(FeedError::Transport(e)) => {
            eprintln!("WARNING: price feed request failed: {}", e);
        }

        Err(FeedError::Decode(e)) => {
            eprintln!("WARNING: could not decode price feed as JSON: {}", e);
        }

        Ok(..) => {}
    }

    // If the frontend has already been torn down, its receiver is gone and
    // this late result is dropped on the floor, which is exactly what we
    // want for a result nobody can display anymore.
    let _ = feed.tx.try_send(result);
}



#[cfg(test)]
mod test {
    use super::*;

    /// The array-shaped body decodes per record, keeping the latest
    /// timestamp per duplicate symbol and dropping malformed records.
    #[test]
    fn test_decode_rows_variant() {
        let body = r#"[
            {"currency": "SWTH", "date": "2023-08-29T07:10:40.000Z", "price": 0.4},
            {"currency": "SWTH", "date": "2023-08-29T07:10:52.000Z", "price": "0.5"},
            {"currency": 42, "price": 1.0},
            {"currency": "ZIL", "price": "not a number"},
            {"currency": "USDC", "price": 1}
        ]"#;

        let decoded: DecodedBody = serde_json::from_str(body).unwrap();
        let map = normalize(decoded.into_records());

        assert_eq!(map.get("SWTH"), Some(&0.5));
        assert_eq!(map.get("USDC"), Some(&1.0));
        assert_eq!(map.len(), 2);
    }

    /// The flat body variant is filtered for finite positive values.
    #[test]
    fn test_decode_flat_variant() {
        let body = r#"{
            "SWTH": 0.5,
            "USDC": 1.0,
            "BROKEN": -3.0,
            "ZERO": 0,
            "TEXT": "1700.25"
        }"#;

        let decoded: DecodedBody = serde_json::from_str(body).unwrap();
        let map = normalize(decoded.into_records());

        assert_eq!(map.get("SWTH"), Some(&0.5));
        assert_eq!(map.get("USDC"), Some(&1.0));
        assert_eq!(map.get("TEXT"), Some(&1700.25));
        assert_eq!(map.len(), 3);
    }

    /// A record missing its price field decodes but normalizes to nothing.
    #[test]
    fn test_missing_fields_drop_record() {
        let body = r#"[
            {"currency": "SWTH"},
            {"price": 1.0},
            {"currency": "USDC", "price": 1.0}
        ]"#;

        let decoded: DecodedBody = serde_json::from_str(body).unwrap();
        let map = normalize(decoded.into_records());

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("USDC"), Some(&1.0));
    }

    /// Every feed error renders the same user-facing message.
    #[test]
    fn test_error_display_is_generic() {
        let msg = "Failed to load prices — check your network.";

        assert_eq!(FeedError::Status(500).to_string(), msg);
        assert_eq!(FeedError::Transport("dns".to_string()).to_string(), msg);
        assert_eq!(FeedError::Decode("eof".to_string()).to_string(), msg);
    }
}
