//! Parsing of uploaded diamond price tables.
//!
//! Rows are `shape, clarity, color, carat_min, carat_max, price_per_carat`
//! with no header. Rows that are short, carry non-numeric values, or have an
//! empty carat range are skipped rather than failing the upload.

use csv::{ReaderBuilder, Trim};
use log::debug;
use rust_decimal::Decimal;

use super::diamonds_model::{shape_code, NewDiamondPriceEntry, ShapeType};
use crate::errors::{Error, Result};

const EXPECTED_COLUMNS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPriceCsv {
    pub entries: Vec<NewDiamondPriceEntry>,
    pub skipped: usize,
}

pub fn parse_price_csv(shape_type: ShapeType, content: &[u8]) -> Result<ParsedPriceCsv> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content);

    let mut entries = Vec::new();
    let mut skipped = 0;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        match parse_row(shape_type, &record) {
            Some(entry) => entries.push(entry),
            None => {
                debug!("Skipping price CSV line {}: {:?}", line + 1, record);
                skipped += 1;
            }
        }
    }

    if entries.is_empty() {
        return Err(Error::invalid_input(
            "No valid price rows found in the uploaded CSV",
        ));
    }

    Ok(ParsedPriceCsv { entries, skipped })
}

fn parse_row(shape_type: ShapeType, record: &csv::StringRecord) -> Option<NewDiamondPriceEntry> {
    if record.len() < EXPECTED_COLUMNS {
        return None;
    }

    let shape = record.get(0).filter(|s| !s.is_empty())?;
    let clarity = record.get(1).filter(|s| !s.is_empty())?;
    let color = record.get(2).filter(|s| !s.is_empty())?;
    let carat_min: Decimal = record.get(3)?.parse().ok()?;
    let carat_max: Decimal = record.get(4)?.parse().ok()?;
    let price_per_carat: Decimal = record.get(5)?.parse().ok()?;

    if carat_min >= carat_max || carat_min.is_sign_negative() || price_per_carat.is_sign_negative()
    {
        return None;
    }

    Some(NewDiamondPriceEntry {
        shape_code: shape_code(shape),
        shape_type,
        color: color.to_string(),
        clarity: clarity.to_string(),
        carat_min,
        carat_max,
        price_per_carat,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_rows_without_header() {
        let csv = b"BR,VS1,G,0.90,1.00,5000\nBR, VS2 , H ,1.00,1.50,6200.50\n";
        let parsed = parse_price_csv(ShapeType::Round, csv).unwrap();

        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.skipped, 0);
        let second = &parsed.entries[1];
        assert_eq!(second.clarity, "VS2");
        assert_eq!(second.color, "H");
        assert_eq!(second.carat_min, dec!(1.00));
        assert_eq!(second.price_per_carat, dec!(6200.50));
        assert_eq!(second.shape_type, ShapeType::Round);
    }

    #[test]
    fn test_skips_header_short_and_invalid_rows() {
        let csv = b"shape,clarity,color,carat_min,carat_max,price_per_carat\n\
PE,SI1,F,0.5,0.7,2100\n\
PE,SI1,F,0.7\n\
PE,SI1,F,0.9,0.7,2100\n\
PE,SI1,F,abc,1.0,2100\n\
\n\
oval,VVS2,D,1.0,1.5,9000\n";
        let parsed = parse_price_csv(ShapeType::Fancy, csv).unwrap();

        assert_eq!(parsed.entries.len(), 2);
        assert_eq!(parsed.skipped, 4);
        assert_eq!(parsed.entries[1].shape_code, "OV");
    }

    #[test]
    fn test_no_valid_rows_is_an_error() {
        let csv = b"shape,clarity,color,carat_min,carat_max,price_per_carat\n";
        assert!(parse_price_csv(ShapeType::Round, csv).is_err());
        assert!(parse_price_csv(ShapeType::Round, b"").is_err());
    }
}
