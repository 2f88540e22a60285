//! Reads survey responses from an Excel workbook.
//!
//! One question per column: the first row holds the question statements,
//! every following non-empty cell is one response.

use log::debug;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use snafu::prelude::*;

use crate::survey::{
    EmptyWorksheetSnafu, MissingWorksheetSnafu, OpeningExcelSnafu, SurveyResult,
    UnsupportedCellSnafu,
};

/// One worksheet column: the statement from the first row and the raw
/// responses below it, top to bottom, empty cells skipped.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionColumn {
    pub statement: String,
    pub responses: Vec<String>,
}

pub fn read_worksheet(path: &str, worksheet: &str) -> SurveyResult<Vec<QuestionColumn>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = workbook
        .worksheet_range(worksheet)
        .context(MissingWorksheetSnafu {
            name: worksheet,
            path,
        })?
        .context(OpeningExcelSnafu { path })?;

    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyWorksheetSnafu {})?;
    debug!("header: {:?}", header);
    let mut columns: Vec<QuestionColumn> = Vec::new();
    for (col, cell) in header.iter().enumerate() {
        match cell {
            DataType::String(s) if !s.trim().is_empty() => columns.push(QuestionColumn {
                statement: s.trim().to_string(),
                responses: Vec::new(),
            }),
            _ => {
                return UnsupportedCellSnafu {
                    row: 1u32,
                    col: col as u32 + 1,
                    content: format!("{:?} (expected a question statement)", cell),
                }
                .fail()
            }
        }
    }

    for (row, cells) in rows.enumerate() {
        for (col, cell) in cells.iter().enumerate().take(columns.len()) {
            if let Some(value) = cell_to_string(cell, row as u32 + 2, col as u32 + 1)? {
                columns[col].responses.push(value);
            }
        }
    }
    Ok(columns)
}

/// The raw text of a cell. Excel stores integer responses as floats, so
/// integral floats are rendered without a fraction. Empty and blank cells
/// become `None`; any other cell type fails with its coordinates.
fn cell_to_string(cell: &DataType, row: u32, col: u32) -> SurveyResult<Option<String>> {
    match cell {
        DataType::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(None)
            } else {
                Ok(Some(s.to_string()))
            }
        }
        DataType::Int(i) => Ok(Some(format!("{}", i))),
        DataType::Float(f) if f.fract() == 0.0 => Ok(Some(format!("{}", *f as i64))),
        DataType::Float(f) => Ok(Some(format!("{}", f))),
        DataType::Empty => Ok(None),
        _ => UnsupportedCellSnafu {
            row,
            col,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}
