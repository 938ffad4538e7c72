use anyhow::Result;
use num_format::{CustomFormat, Grouping, ToFormattedString};

pub fn number_format() -> Result<CustomFormat> {
    Ok(CustomFormat::builder()
        .grouping(Grouping::Standard)
        .minus_sign("-")
        .separator(",")
        .build()?)
}

/// e.g. `-1,200`
pub fn format_number(n: i64) -> String {
    format_or_plain(n, number_format())
}

fn format_or_plain(n: i64, format: Result<CustomFormat>) -> String {
    match format {
        Ok(format) => n.to_formatted_string(&format),
        Err(e) => {
            log::warn!("number format unavailable, printing {n} ungrouped: {e:#}");
            n.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "0")]
    #[case(100, "100")]
    #[case(6000, "6,000")]
    #[case(-1200, "-1,200")]
    #[case(1234567, "1,234,567")]
    fn grouped_numbers(#[case] n: i64, #[case] expected: &str) {
        assert_eq!(format_number(n), expected);
    }

    #[test]
    fn broken_format_falls_back_to_plain_digits() {
        assert!(number_format().is_ok());
        assert_eq!(format_or_plain(-12345, Err(anyhow::anyhow!("no format"))), "-12345");
    }
}
