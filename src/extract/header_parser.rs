/// Stock report header parser
///
/// Derives province, facility and the reporting window from the fixed header
/// cells of an HMED stock report. The window decides whether the file is a
/// monthly or a quarterly report.
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::extract::error::ExtractError;
use crate::extract::layout::{CellAddress, SheetLayout};
use crate::extract::sheet::Sheet;

/// One `split(delimiter)[segment]` step
#[derive(Debug, Clone, Copy)]
pub struct SplitStep {
    pub delimiter: char,
    pub segment: usize,
}

/// Declarative description of how to cut a header field out of its cell text
#[derive(Debug, Clone, Copy)]
pub struct HeaderPattern {
    pub field: &'static str,
    pub steps: &'static [SplitStep],
}

/// "Tỉnh: Miền Nam/Đồng Nai" -> "Đồng Nai"
pub const PROVINCE_PATTERN: HeaderPattern = HeaderPattern {
    field: "province",
    steps: &[
        SplitStep { delimiter: ':', segment: 1 },
        SplitStep { delimiter: '/', segment: 1 },
    ],
};

/// "Cơ sở: Facility X" -> "Facility X"
pub const FACILITY_PATTERN: HeaderPattern = HeaderPattern {
    field: "facility",
    steps: &[SplitStep { delimiter: ':', segment: 1 }],
};

/// "Báo cáo (01/03/2021 - 31/03/2021)" -> "01/03/2021 - 31/03/2021"
pub const PERIOD_PATTERN: HeaderPattern = HeaderPattern {
    field: "reporting window",
    steps: &[
        SplitStep { delimiter: '(', segment: 1 },
        SplitStep { delimiter: ')', segment: 0 },
    ],
};

const DATE_FORMAT: &str = "%d/%m/%Y";

static WINDOW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}/\d{1,2}/\d{4})\s*-\s*(\d{1,2}/\d{1,2}/\d{4})\s*$")
        .expect("reporting window regex is valid")
});

impl HeaderPattern {
    /// Apply the split steps to `text`, returning the trimmed result
    pub fn apply<'a>(&self, text: &'a str) -> Result<&'a str, String> {
        let mut current = text;
        for step in self.steps {
            current = current.split(step.delimiter).nth(step.segment).ok_or_else(|| {
                format!(
                    "expected '{}' in {} text {:?}",
                    step.delimiter, self.field, text
                )
            })?;
        }

        let value = current.trim();
        if value.is_empty() {
            return Err(format!("empty {} in {:?}", self.field, text));
        }
        Ok(value)
    }
}

/// Month or quarter a report covers; exactly one of the two
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    Month(u32),
    Quarter(u32),
}

impl ReportPeriod {
    /// Monthly when both ends of the window fall in the same month,
    /// otherwise the quarter containing the start month
    pub fn from_window(start: NaiveDate, end: NaiveDate) -> Self {
        if start.month() == end.month() {
            ReportPeriod::Month(start.month())
        } else {
            ReportPeriod::Quarter((start.month() - 1) / 3 + 1)
        }
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self, ReportPeriod::Month(_))
    }

    pub fn month(&self) -> Option<u32> {
        match self {
            ReportPeriod::Month(m) => Some(*m),
            ReportPeriod::Quarter(_) => None,
        }
    }

    pub fn quarter(&self) -> Option<u32> {
        match self {
            ReportPeriod::Month(_) => None,
            ReportPeriod::Quarter(q) => Some(*q),
        }
    }
}

/// Header metadata shared by every record of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub province_name: String,
    pub facility_name: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub period: ReportPeriod,
}

impl HeaderInfo {
    pub fn is_monthly(&self) -> bool {
        self.period.is_monthly()
    }

    pub fn period_year(&self) -> i32 {
        self.period_start.year()
    }

    pub fn period_month(&self) -> Option<u32> {
        self.period.month()
    }

    pub fn period_quarter(&self) -> Option<u32> {
        self.period.quarter()
    }
}

/// Parse the header cells of a stock report sheet
pub fn parse_header(sheet: &Sheet, layout: &SheetLayout) -> Result<HeaderInfo, ExtractError> {
    let province_name = read_field(sheet, layout.province_cell, &PROVINCE_PATTERN)?;
    let facility_name = read_field(sheet, layout.facility_cell, &FACILITY_PATTERN)?;
    let window = read_field(sheet, layout.period_cell, &PERIOD_PATTERN)?;
    let (period_start, period_end) = parse_window(&window, layout.period_cell)?;
    let period = ReportPeriod::from_window(period_start, period_end);

    debug!(
        "Header: province={}, facility={}, window={}..{}, period={:?}",
        province_name, facility_name, period_start, period_end, period
    );

    Ok(HeaderInfo {
        province_name,
        facility_name,
        period_start,
        period_end,
        period,
    })
}

fn read_field(
    sheet: &Sheet,
    address: CellAddress,
    pattern: &HeaderPattern,
) -> Result<String, ExtractError> {
    let text = match sheet.cell(address.row, address.col) {
        Some(calamine::Data::String(s)) => s.as_str(),
        Some(other) => {
            return Err(ExtractError::Format {
                cell: address.to_string(),
                msg: format!("expected {} text, got: {other:?}", pattern.field),
            })
        }
        None => {
            return Err(ExtractError::Format {
                cell: address.to_string(),
                msg: format!("{} cell is empty", pattern.field),
            })
        }
    };

    pattern
        .apply(text)
        .map(str::to_string)
        .map_err(|msg| ExtractError::Format {
            cell: address.to_string(),
            msg,
        })
}

/// Parse "dd/mm/yyyy - dd/mm/yyyy" into its two dates
fn parse_window(
    window: &str,
    address: CellAddress,
) -> Result<(NaiveDate, NaiveDate), ExtractError> {
    let format_error = |msg: String| ExtractError::Format {
        cell: address.to_string(),
        msg,
    };

    let caps = WINDOW_RE
        .captures(window)
        .ok_or_else(|| format_error(format!("expected 'dd/mm/yyyy - dd/mm/yyyy', got {window:?}")))?;

    let parse = |s: &str| {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map_err(|e| format_error(format!("invalid date {s:?}: {e}")))
    };

    let start = parse(&caps[1])?;
    let end = parse(&caps[2])?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::sheet::sheet_from_rows;
    use calamine::Data;

    fn header_sheet(province: &str, facility: &str, window: &str) -> Sheet {
        let text = |s: &str| vec![Data::String(s.to_string())];
        sheet_from_rows(vec![
            text(province),
            text(facility),
            vec![Data::Empty],
            vec![Data::Empty],
            vec![Data::Empty],
            vec![Data::Empty],
            text(window),
        ])
    }

    #[test]
    fn test_parse_monthly_header() {
        let sheet = header_sheet(
            "Tỉnh: Region/Dong Nai",
            "Cơ sở: Facility X",
            "Báo cáo xuất nhập tồn (01/03/2021 - 31/03/2021)",
        );
        let header = parse_header(&sheet, &SheetLayout::default()).unwrap();

        assert_eq!(header.province_name, "Dong Nai");
        assert_eq!(header.facility_name, "Facility X");
        assert_eq!(header.period_start, NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(header.period_end, NaiveDate::from_ymd_opt(2021, 3, 31).unwrap());
        assert!(header.is_monthly());
        assert_eq!(header.period_year(), 2021);
        assert_eq!(header.period_month(), Some(3));
        assert_eq!(header.period_quarter(), None);
    }

    #[test]
    fn test_parse_quarterly_header() {
        let sheet = header_sheet(
            "Tỉnh: Miền Nam/Đồng Nai  ",
            "Cơ sở:   CDC Đồng Nai ",
            "(01/07/2021 - 30/09/2021)",
        );
        let header = parse_header(&sheet, &SheetLayout::default()).unwrap();

        assert_eq!(header.province_name, "Đồng Nai");
        assert_eq!(header.facility_name, "CDC Đồng Nai");
        assert!(!header.is_monthly());
        assert_eq!(header.period_month(), None);
        assert_eq!(header.period_quarter(), Some(3));
    }

    #[test]
    fn test_province_keeps_only_second_slash_segment() {
        assert_eq!(
            PROVINCE_PATTERN.apply("Tỉnh: Miền Nam/Đồng Nai/extra").unwrap(),
            "Đồng Nai"
        );
    }

    #[test]
    fn test_quarter_from_start_month() {
        let d = |m| NaiveDate::from_ymd_opt(2022, m, 1).unwrap();
        assert_eq!(ReportPeriod::from_window(d(1), d(3)), ReportPeriod::Quarter(1));
        assert_eq!(ReportPeriod::from_window(d(3), d(5)), ReportPeriod::Quarter(1));
        assert_eq!(ReportPeriod::from_window(d(4), d(6)), ReportPeriod::Quarter(2));
        assert_eq!(ReportPeriod::from_window(d(10), d(12)), ReportPeriod::Quarter(4));
        assert_eq!(ReportPeriod::from_window(d(12), d(12)), ReportPeriod::Month(12));
    }

    #[test]
    fn test_same_month_different_year_is_monthly() {
        let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 1, 31).unwrap();
        assert_eq!(ReportPeriod::from_window(start, end), ReportPeriod::Month(1));
    }

    #[test]
    fn test_missing_colon_is_format_error() {
        let sheet = header_sheet(
            "Tỉnh Region/Dong Nai",
            "Cơ sở: Facility X",
            "(01/03/2021 - 31/03/2021)",
        );
        match parse_header(&sheet, &SheetLayout::default()) {
            Err(ExtractError::Format { cell, .. }) => assert_eq!(cell, "A1"),
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_slash_is_format_error() {
        let sheet = header_sheet(
            "Tỉnh: Dong Nai",
            "Cơ sở: Facility X",
            "(01/03/2021 - 31/03/2021)",
        );
        assert!(matches!(
            parse_header(&sheet, &SheetLayout::default()),
            Err(ExtractError::Format { .. })
        ));
    }

    #[test]
    fn test_missing_parenthesis_is_format_error() {
        let sheet = header_sheet(
            "Tỉnh: Region/Dong Nai",
            "Cơ sở: Facility X",
            "01/03/2021 - 31/03/2021",
        );
        match parse_header(&sheet, &SheetLayout::default()) {
            Err(ExtractError::Format { cell, .. }) => assert_eq!(cell, "A7"),
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_date_is_format_error() {
        let sheet = header_sheet(
            "Tỉnh: Region/Dong Nai",
            "Cơ sở: Facility X",
            "(31/02/2021 - 31/03/2021)",
        );
        match parse_header(&sheet, &SheetLayout::default()) {
            Err(ExtractError::Format { cell, msg }) => {
                assert_eq!(cell, "A7");
                assert!(msg.contains("31/02/2021"));
            }
            other => panic!("Expected Format error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_header_cell_is_format_error() {
        let sheet = sheet_from_rows(vec![vec![Data::Empty]]);
        assert!(matches!(
            parse_header(&sheet, &SheetLayout::default()),
            Err(ExtractError::Format { .. })
        ));
    }

    #[test]
    fn test_numeric_header_cell_is_format_error() {
        let sheet = sheet_from_rows(vec![vec![Data::Float(1.0)]]);
        match parse_header(&sheet, &SheetLayout::default()) {
            Err(ExtractError::Format { cell, .. }) => assert_eq!(cell, "A1"),
            other => panic!("Expected Format error, got {other:?}"),
        }
    }
}
