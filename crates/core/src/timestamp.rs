use chrono::NaiveDateTime;
use thiserror::Error;

/// Layout EXIF uses for `DateTimeOriginal`.
pub const EXIF_TIMESTAMP_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
/// Filename-safe layout, no colons.
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("撮影日時の形式が不正です (YYYY:MM:DD HH:MM:SS を想定): {raw:?}")]
pub struct FormatError {
    pub raw: String,
}

/// Rewrites an EXIF timestamp as `YYYY-MM-DD-HH-MM-SS`.
///
/// The value is treated as naive local time: no timezone conversion happens,
/// the digits are carried over verbatim.
pub fn format_timestamp(raw: &str) -> Result<String, FormatError> {
    if !has_exif_layout(raw) {
        return Err(FormatError {
            raw: raw.to_string(),
        });
    }
    let parsed = NaiveDateTime::parse_from_str(raw, EXIF_TIMESTAMP_FORMAT).map_err(|_| {
        FormatError {
            raw: raw.to_string(),
        }
    })?;
    Ok(parsed.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
}

// exactly `dddd:dd:dd dd:dd:dd`; chrono alone tolerates padding differences
fn has_exif_layout(raw: &str) -> bool {
    const LAYOUT: &[u8] = b"dddd:dd:dd dd:dd:dd";
    raw.len() == LAYOUT.len()
        && raw.bytes().zip(LAYOUT).all(|(b, &expected)| match expected {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        })
}

#[cfg(test)]
mod tests {
    use super::format_timestamp;

    #[test]
    fn formats_exif_timestamp_for_filenames() {
        assert_eq!(
            format_timestamp("2021:07:04 13:05:09").expect("valid timestamp"),
            "2021-07-04-13-05-09"
        );
    }

    #[test]
    fn keeps_midnight_and_end_of_day_verbatim() {
        assert_eq!(
            format_timestamp("2020:01:01 00:00:00").expect("midnight"),
            "2020-01-01-00-00-00"
        );
        assert_eq!(
            format_timestamp("1999:12:31 23:59:59").expect("end of day"),
            "1999-12-31-23-59-59"
        );
    }

    #[test]
    fn same_input_yields_same_output() {
        let first = format_timestamp("2016:09:20 08:15:16").expect("first");
        let second = format_timestamp("2016:09:20 08:15:16").expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = format_timestamp("not-a-date").expect_err("should fail");
        assert_eq!(err.raw, "not-a-date");
        assert!(err.to_string().contains("撮影日時の形式が不正です"));
    }

    #[test]
    fn rejects_other_separators_and_impossible_dates() {
        assert!(format_timestamp("2021-07-04 13:05:09").is_err());
        assert!(format_timestamp("2021:07:04T13:05:09").is_err());
        assert!(format_timestamp("2021:02:30 10:00:00").is_err());
        assert!(format_timestamp("2021:07:04 25:00:00").is_err());
        assert!(format_timestamp("").is_err());
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(format_timestamp(" 2021:07:04 13:05:09").is_err());
        assert!(format_timestamp("2021:07:04 13:05:09 ").is_err());
        assert!(format_timestamp("2021:07:04 13:05:09\n").is_err());
        assert!(format_timestamp("2021:7:04 13:05:09").is_err());
    }
}
