//! Market Data Formatting
//!
//! Turns a market record into the Markdown message posted back to the chat.
//! Each line is emitted only when its field (or fields) are present.

use serde_json::Value;

use super::error::MarketError;
use super::types::MarketRecord;

/// Message used when the markets endpoint returned nothing.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Response is empty.";

/// Format a number with comma thousands separators and two decimals.
///
/// # Examples
///
/// ```
/// use token_tracker_server::market::format::format_amount;
///
/// assert_eq!(format_amount(1234567.891), "1,234,567.89");
/// assert_eq!(format_amount(-1234.5), "-1,234.50");
/// assert_eq!(format_amount(0.1), "0.10");
/// ```
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Build the message for one market record.
pub fn format_market_record(coin: &MarketRecord) -> String {
    let mut message = String::new();

    if let (Some(name), Some(symbol)) = (&coin.name, &coin.symbol) {
        message.push_str(&format!("**{name} ({})**\n", symbol.to_uppercase()));
    }
    if let Some(price) = coin.current_price {
        message.push_str(&format!("**Current price:** ${}\n", format_amount(price)));
    }
    if let Some(cap) = coin.market_cap {
        message.push_str(&format!("**Market Cap:** ${}\n", format_amount(cap)));
    }
    if let Some(rank) = coin.market_cap_rank {
        message.push_str(&format!("**Market Cap Rank:** {rank}\n"));
    }
    if let Some(fdv) = coin.fully_diluted_valuation {
        message.push_str(&format!(
            "**Fully Diluted Valuation:** ${}\n",
            format_amount(fdv)
        ));
    }
    if let Some(volume) = coin.total_volume {
        message.push_str(&format!("**24h Volume:** ${}\n", format_amount(volume)));
    }
    if let (Some(low), Some(high)) = (coin.low_24h, coin.high_24h) {
        message.push_str(&format!(
            "**24h Low/High:** ${} / ${}\n",
            format_amount(low),
            format_amount(high)
        ));
    }
    if let Some(change) = coin.price_change_24h {
        message.push_str(&format!("**24h Price Change:** ${}\n", format_amount(change)));
    }
    if let Some(change) = coin.market_cap_change_24h {
        message.push_str(&format!(
            "**24h Market Cap Change:** ${}\n",
            format_amount(change)
        ));
    }
    if let Some(supply) = coin.circulating_supply {
        message.push_str(&format!("**Circulating Supply:** {}\n", format_amount(supply)));
    }
    if let Some(supply) = coin.total_supply {
        message.push_str(&format!("**Total Supply:** {}\n", format_amount(supply)));
    }
    if let Some(supply) = &coin.max_supply {
        message.push_str(&format!("**Maximum Supply:** {supply}\n"));
    }
    if let (Some(ath), Some(pct)) = (coin.ath, coin.ath_change_percentage) {
        message.push_str(&format!(
            "**All Time High:** ${} (Change: {}%)\n",
            format_amount(ath),
            format_amount(pct)
        ));
    }
    if let (Some(atl), Some(pct)) = (coin.atl, coin.atl_change_percentage) {
        message.push_str(&format!(
            "**All Time Low:** ${} (Change: {}%)\n",
            format_amount(atl),
            format_amount(pct)
        ));
    }

    if let Some(roi) = &coin.roi {
        if let Some(times) = &roi.times {
            message.push_str(&format!("**ROI times:** {times}\n"));
        }
        if let Some(percentage) = &roi.percentage {
            message.push_str(&format!("**ROI percentage:** {percentage}\n"));
        }
        if let Some(currency) = &roi.currency {
            message.push_str(&format!("**ROI currency:** {currency}\n"));
        }
    }

    message
}

/// Format a raw `coins/markets` response.
///
/// The response may arrive as a JSON string holding the encoded list; it is
/// decoded first. An empty or falsy response yields [`EMPTY_RESPONSE_MESSAGE`].
pub fn format_market_response(response: &Value) -> Result<String, MarketError> {
    let decoded;
    let response = match response {
        Value::String(raw) if !raw.is_empty() => {
            decoded = serde_json::from_str::<Value>(raw)?;
            &decoded
        }
        other => other,
    };

    if is_falsy(response) {
        return Ok(EMPTY_RESPONSE_MESSAGE.to_string());
    }

    let records: Vec<MarketRecord> = serde_json::from_value(response.clone())?;
    Ok(records
        .first()
        .map(format_market_record)
        .unwrap_or_else(|| EMPTY_RESPONSE_MESSAGE.to_string()))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::types::Roi;
    use serde_json::json;

    fn bitcoin() -> Value {
        json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "current_price": 65000.5,
            "market_cap": 1_280_000_000_000.0_f64,
            "market_cap_rank": 1,
            "fully_diluted_valuation": 1_365_000_000_000.0_f64,
            "total_volume": 25_000_000_000.0_f64,
            "high_24h": 65500.0,
            "low_24h": 63000.25,
            "price_change_24h": -512.3456,
            "market_cap_change_24h": 1_000_000.0,
            "circulating_supply": 19_700_000.0,
            "total_supply": 21_000_000.0,
            "max_supply": 21_000_000.0,
            "ath": 73738.0,
            "ath_change_percentage": -11.85,
            "atl": 67.81,
            "atl_change_percentage": 95761.1,
            "roi": null
        })
    }

    #[test]
    fn amounts_use_thousands_separators() {
        assert_eq!(format_amount(1234567.891), "1,234,567.89");
        assert_eq!(format_amount(999.999), "1,000.00");
        assert_eq!(format_amount(100.0), "100.00");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-512.3456), "-512.35");
        assert_eq!(format_amount(123456.0), "123,456.00");
    }

    #[test]
    fn full_record() {
        let message = format_market_response(&json!([bitcoin()])).unwrap();
        let expected = "\
**Bitcoin (BTC)**
**Current price:** $65,000.50
**Market Cap:** $1,280,000,000,000.00
**Market Cap Rank:** 1
**Fully Diluted Valuation:** $1,365,000,000,000.00
**24h Volume:** $25,000,000,000.00
**24h Low/High:** $63,000.25 / $65,500.00
**24h Price Change:** $-512.35
**24h Market Cap Change:** $1,000,000.00
**Circulating Supply:** 19,700,000.00
**Total Supply:** 21,000,000.00
**Maximum Supply:** 21000000.0
**All Time High:** $73,738.00 (Change: -11.85%)
**All Time Low:** $67.81 (Change: 95,761.10%)
";
        assert_eq!(message, expected);
    }

    #[test]
    fn null_market_cap_is_omitted() {
        let record: MarketRecord = serde_json::from_value(json!({
            "name": "Bitcoin",
            "symbol": "btc",
            "current_price": 65000.5,
            "market_cap": null,
        }))
        .unwrap();

        let message = format_market_record(&record);
        assert!(message.starts_with("**Bitcoin (BTC)**\n"));
        assert!(message.contains("**Current price:** $65,000.50\n"));
        assert!(!message.contains("Market Cap"));
    }

    #[test]
    fn header_needs_name_and_symbol() {
        let record = MarketRecord {
            name: Some("Bitcoin".into()),
            current_price: Some(1.0),
            ..MarketRecord::default()
        };
        assert_eq!(format_market_record(&record), "**Current price:** $1.00\n");
    }

    #[test]
    fn paired_fields_need_both_values() {
        let record = MarketRecord {
            low_24h: Some(1.0),
            ath: Some(2.0),
            atl_change_percentage: Some(-3.0),
            ..MarketRecord::default()
        };
        assert_eq!(format_market_record(&record), "");
    }

    #[test]
    fn empty_record_formats_to_nothing() {
        assert_eq!(format_market_record(&MarketRecord::default()), "");
    }

    #[test]
    fn roi_lines_only_for_present_fields() {
        let record = MarketRecord {
            roi: Some(Roi {
                times: serde_json::from_str("73.21").ok(),
                currency: Some("usd".into()),
                percentage: None,
            }),
            ..MarketRecord::default()
        };
        assert_eq!(
            format_market_record(&record),
            "**ROI times:** 73.21\n**ROI currency:** usd\n"
        );
    }

    #[test]
    fn absent_roi_never_fails() {
        let mut coin = bitcoin();
        coin.as_object_mut().unwrap().remove("roi");
        let message = format_market_response(&json!([coin])).unwrap();
        assert!(!message.contains("ROI"));
    }

    #[test]
    fn empty_responses() {
        for empty in [json!([]), Value::Null, json!(""), json!({}), json!(false)] {
            assert_eq!(
                format_market_response(&empty).unwrap(),
                EMPTY_RESPONSE_MESSAGE
            );
        }
    }

    #[test]
    fn string_encoded_response_is_decoded() {
        let raw = serde_json::to_string(&json!([bitcoin()])).unwrap();
        let message = format_market_response(&Value::String(raw)).unwrap();
        assert!(message.starts_with("**Bitcoin (BTC)**\n"));

        assert_eq!(
            format_market_response(&Value::String("[]".into())).unwrap(),
            EMPTY_RESPONSE_MESSAGE
        );
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(format_market_response(&Value::String("{not json".into())).is_err());
        assert!(format_market_response(&json!([{"current_price": "high"}])).is_err());
    }

    #[test]
    fn only_first_record_is_used() {
        let response = json!([
            {"name": "First", "symbol": "one"},
            {"name": "Second", "symbol": "two"},
        ]);
        assert_eq!(format_market_response(&response).unwrap(), "**First (ONE)**\n");
    }
}
