use hmac::{Hmac, Mac};
use regex::{Captures, Regex};
use sha1::Sha1;
use url::Url;

use crate::api::error;

type HmacSha1 = Hmac<Sha1>;

/// Cache-busting parameter the provider appends to file URLs.
pub const UPDATED_AT_PARAM: &str = "updatedAt";

lazy_static::lazy_static! {
    static ref DATA_URL_PREFIX: Regex =
        Regex::new(r"^data:[^,]*;base64,").expect("compile data url regex");
    static ref UPDATED_AT_QUERY: Regex =
        Regex::new(r"([?&])updatedAt(?:=[^&#]*)?(&|#|$)").expect("compile updatedAt regex");
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?)(\d+)").expect("compile int regex");
}

/// Returns the payload after a `data:<mime>;base64,` header, or the input untouched.
pub fn strip_data_url(raw: &str) -> &str {
    match DATA_URL_PREFIX.find(raw) {
        Some(prefix) => &raw[prefix.end()..],
        None => raw,
    }
}

/// Removes the `updatedAt` query parameter from a file URL.
pub fn clean_url(raw: &str) -> String {
    let Ok(mut url) = Url::parse(raw) else {
        return strip_updated_at(raw);
    };

    if !url.query_pairs().any(|(key, _)| key == UPDATED_AT_PARAM) {
        return raw.to_string();
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != UPDATED_AT_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }

    url.to_string()
}

// Fallback for relative or otherwise unparseable URLs.
fn strip_updated_at(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = UPDATED_AT_QUERY
            .replace(&current, |caps: &Captures| match (&caps[1], &caps[2]) {
                ("?", "&") => "?".to_string(),
                (_, "&") => "&".to_string(),
                (_, tail) => tail.to_string(),
            })
            .into_owned();

        if next == current {
            return next;
        }
        current = next;
    }
}

/// Leading-integer parse: optional sign then digits, trailing characters ignored.
/// Values too large for `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let caps = LEADING_INT.captures(raw)?;
    let negative = &caps[1] == "-";
    let value = match caps[2].parse::<i64>() {
        Ok(v) => v,
        Err(_) => i64::MAX,
    };
    Some(if negative { -value } else { value })
}

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Lowercase hex HMAC-SHA1 of `message` keyed with `secret`.
pub fn hmac_sha1_hex(secret: &str, message: &str) -> Result<String, error::SystemError> {
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|_| error::SystemError::config("invalid signing key"))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
