//! Derivation of the short-lived request-signing key.
//!
//! The upstream service accepts an MD5 over the device id, an
//! hour-granularity UTC time string and a fixed suffix. The time string is
//! taken from the service's own clock when reachable so key validity
//! follows server time; the local clock is the fallback.

use chrono::{DateTime, Timelike, TimeZone, Utc};
use md5::{Digest, Md5};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// The mobile-app identity the service expects on every request.
pub const USER_AGENT: &str = "UGT_ANDROID/5.10.12 (SM-G973F; Android 13)";

const KEY_SUFFIX: &str = "createLog()";
const TIME_SYNC_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns the current hour-granularity time bucket, preferring the
/// service's clock and falling back to the local clock on any failure.
pub async fn current_time_bucket(
    http: &Client,
    base_url: &str,
    device_id: &str,
    pad_hour: bool,
) -> String {
    match fetch_server_time(http, base_url, device_id, pad_hour).await {
        Ok(bucket) => bucket,
        Err(reason) => {
            eprintln!(
                "\x1b[33mServer time fetch failed, using local time: {}\x1b[0m",
                reason
            );
            format_bucket(Utc::now(), pad_hour)
        }
    }
}

async fn fetch_server_time(
    http: &Client,
    base_url: &str,
    device_id: &str,
    pad_hour: bool,
) -> Result<String, String> {
    let url = format!("{}/api/v1/common/hello", base_url);
    let response = http
        .get(&url)
        .header("Accept", "application/json")
        .header("User-Agent", USER_AGENT)
        .header("x-ug-client-id", device_id)
        .timeout(TIME_SYNC_TIMEOUT)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().as_u16() != 200 {
        return Err(format!(
            "server time request failed with status {}",
            response.status()
        ));
    }

    let body: Value = response.json().await.map_err(|e| e.to_string())?;
    let timestamp = body["timestamp"]
        .as_i64()
        .ok_or_else(|| "no valid timestamp in response".to_string())?;

    bucket_from_timestamp(timestamp, pad_hour)
        .ok_or_else(|| format!("timestamp {} out of range", timestamp))
}

/// Converts a Unix timestamp (seconds) into a `YYYY-MM-DD:HH` UTC bucket.
pub fn bucket_from_timestamp(timestamp: i64, pad_hour: bool) -> Option<String> {
    Utc.timestamp_opt(timestamp, 0)
        .single()
        .map(|time| format_bucket(time, pad_hour))
}

/// Formats a UTC instant as a time bucket. Month and day are always
/// zero-padded; hour padding is the caller's choice since the two observed
/// upstream client builds disagree on it.
pub fn format_bucket(time: DateTime<Utc>, pad_hour: bool) -> String {
    if pad_hour {
        time.format("%Y-%m-%d:%H").to_string()
    } else {
        format!("{}:{}", time.format("%Y-%m-%d"), time.hour())
    }
}

/// Derives the request-signing key for a device at a time bucket.
/// Pure: equal inputs always yield equal keys.
pub fn derive_key(device_id: &str, time_bucket: &str) -> String {
    let input = format!("{}{}{}", device_id, time_bucket, KEY_SUFFIX);
    format!("{:x}", Md5::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_from_timestamp_padded() {
        assert_eq!(
            bucket_from_timestamp(1_700_000_000, true).unwrap(),
            "2023-11-14:22"
        );
        assert_eq!(
            bucket_from_timestamp(1_700_006_400, true).unwrap(),
            "2023-11-15:00"
        );
    }

    #[test]
    fn test_bucket_from_timestamp_unpadded_hour() {
        assert_eq!(
            bucket_from_timestamp(1_700_006_400, false).unwrap(),
            "2023-11-15:0"
        );
        // Double-digit hours render identically either way.
        assert_eq!(
            bucket_from_timestamp(1_700_000_000, false).unwrap(),
            "2023-11-14:22"
        );
    }

    #[test]
    fn test_derive_key_known_value() {
        assert_eq!(
            derive_key("abcdef1234567890", "2023-11-14:22"),
            "afa56763d370245f7a3855ae3c6b5ff8"
        );
    }

    #[test]
    fn test_derive_key_is_pure() {
        let a = derive_key("abcdef1234567890", "2023-11-14:22");
        let b = derive_key("abcdef1234567890", "2023-11-14:22");
        assert_eq!(a, b);
    }

    #[test]
    fn test_derive_key_differs_per_input() {
        let base = derive_key("abcdef1234567890", "2023-11-14:22");
        assert_ne!(base, derive_key("abcdef1234567890", "2023-11-14:23"));
        assert_ne!(base, derive_key("abcdef1234567891", "2023-11-14:22"));
    }

    #[test]
    fn test_derive_key_is_lowercase_hex() {
        let key = derive_key("0123456789abcdef", "2024-01-01:05");
        assert_eq!(key.len(), 32);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[tokio::test]
    async fn test_unreachable_time_endpoint_falls_back_to_local_clock() {
        let http = Client::new();
        // Nothing listens on port 9; the connection is refused immediately.
        let before = format_bucket(Utc::now(), true);
        let bucket =
            current_time_bucket(&http, "http://127.0.0.1:9", "0123456789abcdef", true).await;
        let after = format_bucket(Utc::now(), true);

        assert!(bucket == before || bucket == after);
    }
}
