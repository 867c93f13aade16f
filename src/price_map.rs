//! Normalization of the raw price feed into a per-symbol price map.
//!
//! The feed is untrusted: the same symbol can appear multiple times with
//! different timestamps, prices can be zero, negative, NaN or missing.
//! Normalization keeps, per symbol, the record with the most recent
//! parseable timestamp and silently drops everything unusable.



use std::collections::BTreeMap;

use chrono::DateTime;



/// Symbol to latest known price, always positive and finite.
///
/// BTreeMap so that iterating yields the token list in sorted order, which
/// is the order the form presents tokens in.
pub type PriceMap = BTreeMap<String, f64>;



/// One record of the raw feed after decoding, before normalization.
///
/// `symbol` - token symbol as it appeared in the feed.
/// `price` - price as decoded, not yet validated.
/// `date` - optional timestamp string, expected RFC 3339 but not trusted.
#[derive(Debug, Clone)]
pub struct PriceRecord {
    pub symbol: String,
    pub price: f64,
    pub date: Option<String>,
}



/// Parse a feed timestamp into milliseconds since the Unix epoch.
///
/// Unparseable or absent timestamps rank earliest possible, so a record
/// carrying one loses against any record with a real timestamp.
fn parse_ts(date: Option<&str>) -> i64 {
    let Some(date) = date else {
        return i64::MIN
    };

    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.timestamp_millis(),
        Err(..) => i64::MIN,
    }
}



/// Build a PriceMap from decoded feed records.
///
/// For duplicate symbols the record with the greatest parsed timestamp
/// wins. When neither candidate has a parseable timestamp the first seen
/// record is kept, because a later record must compare strictly greater to
/// replace the incumbent.
pub fn normalize(records: Vec<PriceRecord>) -> PriceMap {
    let mut best: BTreeMap<String, (f64, i64)> = BTreeMap::new();

    for rec in records {
        if !rec.price.is_finite() || rec.price <= 0.0 {
            continue;
        }

        let ts = parse_ts(rec.date.as_deref());

        match best.get(&rec.symbol) {
            Some((_, best_ts)) if ts <= *best_ts => {}

            _ => {
                best.insert(rec.symbol, (rec.price, ts));
            }
        }
    }

    best.into_iter().map(|(sym, (price, _))| (sym, price)).collect()
}
