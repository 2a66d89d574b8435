//! Percent strings from integer counts — no float arithmetic, so rendered
//! output is bit-identical across platforms.
//!
//! Values at or above 1% render with one decimal; positive values below 1%
//! render with three decimals so long-shot contestants do not collapse to
//! "0.0%".

/// One-decimal percent, rounded half up (e.g. 528/1024 → "51.6%").
/// A zero denominator renders as "0.0%".
pub fn percent_tenths(num: u64, den: u64) -> String {
    if den == 0 {
        return "0.0%".to_string();
    }
    let tenths = (num * 1000 * 2 + den) / (2 * den);
    format!("{}.{}%", tenths / 10, tenths % 10)
}

/// Three-decimal percent, rounded half up (e.g. 1/1024 → "0.098%").
pub fn percent_milli(num: u64, den: u64) -> String {
    if den == 0 {
        return "0.000%".to_string();
    }
    let milli = (num * 100_000 * 2 + den) / (2 * den);
    format!("{}.{:03}%", milli / 1000, milli % 1000)
}

/// Tenths at or above 1%, milli-precision below.
pub fn percent_auto(num: u64, den: u64) -> String {
    if den == 0 || num * 100 >= den {
        percent_tenths(num, den)
    } else {
        percent_milli(num, den)
    }
}
