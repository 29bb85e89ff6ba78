//! Excel workbook rendering for database exports.
//!
//! # Design
//! Workbooks are assembled entirely in memory and returned as bytes via
//! `save_to_buffer`, so no temp files are written or cleaned up. Sheet
//! selection is by `Option`: `Some` adds the sheet (even when empty), `None`
//! omits it, which gives the combined and single-sheet endpoints one code
//! path. Column widths track the widest cell plus padding, capped at 50.

use chrono::{DateTime, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet, XlsxError};

use crate::models::{ConversionHistory, Todo};

/// Header fill used by every sheet.
const HEADER_FILL: u32 = 0x667EEA;

/// Maximum column width in character units.
const MAX_COLUMN_WIDTH: usize = 50;

const TODO_HEADERS: [&str; 6] = [
    "ID",
    "Title",
    "Description",
    "Completed",
    "Created At",
    "Updated At",
];

const HISTORY_HEADERS: [&str; 7] = [
    "ID",
    "Value",
    "From Unit",
    "To Unit",
    "Result",
    "Unit Type",
    "Created At",
];

/// Build a workbook with the requested sheets and return the `.xlsx` bytes.
pub fn build_workbook(
    todos: Option<&[Todo]>,
    conversions: Option<&[ConversionHistory]>,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);

    if let Some(todos) = todos {
        write_todos_sheet(workbook.add_worksheet(), &header, todos)?;
    }
    if let Some(conversions) = conversions {
        write_history_sheet(workbook.add_worksheet(), &header, conversions)?;
    }
    workbook.save_to_buffer()
}

fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn write_headers(
    sheet: &mut Worksheet,
    format: &Format,
    headers: &[&str],
    widths: &mut [usize],
) -> Result<(), XlsxError> {
    for (col, title) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
        widths[col] = title.len();
    }
    Ok(())
}

fn apply_widths(sheet: &mut Worksheet, widths: &[usize]) -> Result<(), XlsxError> {
    for (col, width) in widths.iter().enumerate() {
        sheet.set_column_width(col as u16, (width + 2).min(MAX_COLUMN_WIDTH) as f64)?;
    }
    Ok(())
}

fn write_todos_sheet(
    sheet: &mut Worksheet,
    header: &Format,
    todos: &[Todo],
) -> Result<(), XlsxError> {
    sheet.set_name("Todos")?;
    let mut widths = [0usize; TODO_HEADERS.len()];
    write_headers(sheet, header, &TODO_HEADERS, &mut widths)?;

    for (i, todo) in todos.iter().enumerate() {
        let row = (i + 1) as u32;
        let cells = [
            todo.id.to_string(),
            todo.title.clone(),
            todo.description.clone().unwrap_or_default(),
            if todo.completed { "Yes" } else { "No" }.to_string(),
            format_timestamp(todo.created_at),
            format_timestamp(todo.updated_at),
        ];
        for (col, cell) in cells.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
            sheet.write_string(row, col as u16, cell.as_str())?;
        }
    }
    apply_widths(sheet, &widths)
}

fn write_history_sheet(
    sheet: &mut Worksheet,
    header: &Format,
    records: &[ConversionHistory],
) -> Result<(), XlsxError> {
    sheet.set_name("Conversion History")?;
    let mut widths = [0usize; HISTORY_HEADERS.len()];
    write_headers(sheet, header, &HISTORY_HEADERS, &mut widths)?;

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;

        let id = record.id.to_string();
        widths[0] = widths[0].max(id.len());
        sheet.write_string(row, 0, id.as_str())?;

        widths[1] = widths[1].max(record.value.to_string().len());
        sheet.write_number(row, 1, record.value)?;

        widths[2] = widths[2].max(record.from_unit.chars().count());
        sheet.write_string(row, 2, record.from_unit.as_str())?;

        widths[3] = widths[3].max(record.to_unit.chars().count());
        sheet.write_string(row, 3, record.to_unit.as_str())?;

        widths[4] = widths[4].max(record.result.to_string().len());
        sheet.write_number(row, 4, record.result)?;

        widths[5] = widths[5].max(record.unit_type.chars().count());
        sheet.write_string(row, 5, record.unit_type.as_str())?;

        let created = format_timestamp(record.created_at);
        widths[6] = widths[6].max(created.len());
        sheet.write_string(row, 6, created.as_str())?;
    }
    apply_widths(sheet, &widths)
}
