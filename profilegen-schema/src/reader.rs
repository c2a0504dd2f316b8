//! XML workbook reader.
//!
//! Reads a spreadsheet exported as a small XML dialect:
//!
//! ```text
//! <workbook>
//!   <sheet name="Types">
//!     <row><cell>Type Name</cell><cell>Base Type</cell></row>
//!     <row><cell>kind</cell><cell>enum</cell></row>
//!   </sheet>
//! </workbook>
//! ```
//!
//! The first row of a sheet is its header. Cells are positional, `<cell/>`
//! is an empty cell and a short row leaves its trailing columns absent.

use crate::error::ReadError;
use crate::table::{RawTable, TableReader};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Default [`TableReader`] for XML workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlWorkbookReader;

impl TableReader for XmlWorkbookReader {
    fn read_tables(&self, bytes: &[u8]) -> Result<Vec<RawTable>, ReadError> {
        let xml = std::str::from_utf8(bytes)?;
        read_workbook(xml.strip_prefix('\u{feff}').unwrap_or(xml))
    }
}

/// Parses an XML workbook into raw tables, in document order.
///
/// # Errors
/// Returns `ReadError` if the XML is malformed or the workbook structure is invalid.
pub fn read_workbook(xml: &str) -> Result<Vec<RawTable>, ReadError> {
    let mut reader = Reader::from_str(xml);
    let mut builder = WorkbookBuilder::default();
    let mut seen_workbook = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "workbook" => seen_workbook = true,
                    "sheet" if seen_workbook => builder.open_sheet(sheet_name(e)?)?,
                    "row" => builder.open_row()?,
                    "cell" => builder.open_cell()?,
                    "sheet" => return Err(ReadError::structure("sheet outside of workbook")),
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_bytes)?;
                match name {
                    "workbook" => seen_workbook = true,
                    "sheet" if seen_workbook => {
                        builder.open_sheet(sheet_name(e)?)?;
                        builder.close_sheet()?;
                    }
                    "row" => {
                        builder.open_row()?;
                        builder.close_row()?;
                    }
                    "cell" => {
                        builder.open_cell()?;
                        builder.close_cell()?;
                    }
                    "sheet" => return Err(ReadError::structure("sheet outside of workbook")),
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                let name_bytes = e.name().as_ref().to_vec();
                match std::str::from_utf8(&name_bytes)? {
                    "cell" => builder.close_cell()?,
                    "row" => builder.close_row()?,
                    "sheet" => builder.close_sheet()?,
                    _ => {}
                }
            }
            Ok(Event::Text(ref t)) => {
                builder.push_text(std::str::from_utf8(t.as_ref())?);
            }
            Ok(Event::CData(ref c)) => {
                builder.push_text(std::str::from_utf8(c.as_ref())?);
            }
            Ok(Event::GeneralRef(ref r)) => {
                let entity = std::str::from_utf8(r.as_ref())?;
                let mut utf8 = [0u8; 4];
                builder.push_text(resolve_entity(entity)?.encode_utf8(&mut utf8));
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ReadError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if !seen_workbook {
        return Err(ReadError::structure("no workbook element found"));
    }
    builder.finish()
}

/// Reads the `name` attribute of a sheet element.
fn sheet_name(e: &BytesStart<'_>) -> Result<String, ReadError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.trim().to_string());
        }
    }
    Err(ReadError::missing_attr("sheet", "name"))
}

/// Resolves a predefined entity or a character reference.
fn resolve_entity(name: &str) -> Result<char, ReadError> {
    match name {
        "amp" => Ok('&'),
        "lt" => Ok('<'),
        "gt" => Ok('>'),
        "quot" => Ok('"'),
        "apos" => Ok('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or(name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
                .ok_or_else(|| ReadError::UnknownEntity {
                    name: name.to_string(),
                })
        }
    }
}

/// Sheet under construction; the header is the first row seen.
struct SheetBuilder {
    name: String,
    table: Option<RawTable>,
}

#[derive(Default)]
struct WorkbookBuilder {
    tables: Vec<RawTable>,
    sheet: Option<SheetBuilder>,
    row: Option<Vec<String>>,
    cell: Option<String>,
}

impl WorkbookBuilder {
    fn open_sheet(&mut self, name: String) -> Result<(), ReadError> {
        if self.sheet.is_some() {
            return Err(ReadError::structure(format!("sheet '{name}' is nested in another sheet")));
        }
        self.sheet = Some(SheetBuilder { name, table: None });
        Ok(())
    }

    fn open_row(&mut self) -> Result<(), ReadError> {
        if self.sheet.is_none() || self.row.is_some() {
            return Err(ReadError::structure("row outside of a sheet"));
        }
        self.row = Some(Vec::new());
        Ok(())
    }

    fn open_cell(&mut self) -> Result<(), ReadError> {
        if self.row.is_none() || self.cell.is_some() {
            return Err(ReadError::structure("cell outside of a row"));
        }
        self.cell = Some(String::new());
        Ok(())
    }

    fn push_text(&mut self, text: &str) {
        if let Some(cell) = self.cell.as_mut() {
            cell.push_str(text);
        }
    }

    fn close_cell(&mut self) -> Result<(), ReadError> {
        let (Some(cell), Some(row)) = (self.cell.take(), self.row.as_mut()) else {
            return Err(ReadError::structure("unbalanced cell"));
        };
        row.push(cell.trim().to_string());
        Ok(())
    }

    fn close_row(&mut self) -> Result<(), ReadError> {
        let (Some(cells), Some(sheet)) = (self.row.take(), self.sheet.as_mut()) else {
            return Err(ReadError::structure("unbalanced row"));
        };
        match sheet.table.as_mut() {
            None => sheet.table = Some(RawTable::new(sheet.name.clone(), cells)),
            Some(table) => {
                if cells.len() > table.columns().len() {
                    return Err(ReadError::structure(format!(
                        "sheet '{}' row {} has {} cells but the header has {}",
                        sheet.name,
                        table.rows().len() + 2,
                        cells.len(),
                        table.columns().len()
                    )));
                }
                table.push_row(cells);
            }
        }
        Ok(())
    }

    fn close_sheet(&mut self) -> Result<(), ReadError> {
        let Some(sheet) = self.sheet.take() else {
            return Err(ReadError::structure("unbalanced sheet"));
        };
        let table = sheet
            .table
            .unwrap_or_else(|| RawTable::new(sheet.name, Vec::new()));
        self.tables.push(table);
        Ok(())
    }

    fn finish(self) -> Result<Vec<RawTable>, ReadError> {
        if self.sheet.is_some() {
            return Err(ReadError::structure("unterminated sheet"));
        }
        Ok(self.tables)
    }
}
