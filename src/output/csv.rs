use super::{Formatter, iso8601_timestamp};
use crate::record::{CoordinateFix, Fix, FixValue};

pub struct CsvFormatter;

fn cell(v: FixValue) -> String {
    v.value().map_or(String::new(), |v| v.to_string())
}

/// The hemisphere is whatever byte was on the wire, so it may need quoting.
fn text_cell(c: char) -> String {
    match c {
        '"' => "\"\"\"\"".to_string(),
        ',' | '\r' | '\n' => format!("\"{}\"", c),
        _ => c.to_string(),
    }
}

fn coordinate_cells(c: &CoordinateFix) -> String {
    format!(
        "{},{},{},{}",
        c.hemisphere.as_char().map_or(String::new(), text_cell),
        cell(c.degree),
        cell(c.minute),
        cell(c.second)
    )
}

impl Formatter for CsvFormatter {
    fn format(&self, fix: &Fix) -> String {
        let t = &fix.time;
        format!(
            "{},{},{},{},{},{},{},{},{}",
            iso8601_timestamp(),
            cell(t.year),
            cell(t.month),
            cell(t.day),
            cell(t.hour),
            cell(t.minute),
            cell(t.second),
            coordinate_cells(&fix.position.latitude),
            coordinate_cells(&fix.position.longitude)
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some(
            "ts,year,month,day,hour,minute,second,lat_hemisphere,lat_degree,lat_minute,lat_second,lon_hemisphere,lon_degree,lon_minute,lon_second",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordDecoder;

    #[test]
    fn test_csv_row_matches_header() {
        let fix = RecordDecoder::default()
            .decode(b"@__0607204655N6012249E01107556")
            .unwrap();
        let row = CsvFormatter.format(&fix);
        let cells: Vec<&str> = row.split(',').collect();
        let header = CsvFormatter.header().unwrap();

        assert_eq!(cells.len(), header.split(',').count());
        assert_eq!(&cells[1..8], &["", "6", "7", "20", "46", "55", "N"]);
        assert_eq!(&cells[11..], &["E", "11", "7", "33"]);
    }

    #[test]
    fn test_delimiter_hemisphere_is_quoted() {
        let fix = RecordDecoder::default()
            .decode(b"@000607204655,6012249\"01107556")
            .unwrap();
        let row = CsvFormatter.format(&fix);

        assert!(row.ends_with(r#",",",60,12,14,"""",11,7,33"#));
        let collapsed = row.replace(r#"",""#, "X").replace(r#""""""#, "X");
        assert_eq!(
            collapsed.split(',').count(),
            CsvFormatter.header().unwrap().split(',').count()
        );
    }
}
