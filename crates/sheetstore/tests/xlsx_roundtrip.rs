//! End-to-end tests for XLSX roundtrip (create -> save -> read -> verify)

use pretty_assertions::assert_eq;
use sheetstore::prelude::*;
use std::io::{Cursor, Write};

/// Test basic roundtrip with numeric values
#[test]
fn test_roundtrip_numbers() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();

    sheet.set_cell_value("A1", 42.0).unwrap();
    sheet.set_cell_value("B1", 3.14159).unwrap();
    sheet.set_cell_value("C1", -100.5).unwrap();
    sheet.set_cell_value("A2", 0.0).unwrap();
    sheet.set_cell_value("B2", 1e10).unwrap();

    // Write to buffer
    let mut buf = Vec::new();
    XlsxWriter::write(&wb, Cursor::new(&mut buf)).unwrap();

    // Read back
    let wb2 = XlsxReader::read(Cursor::new(&buf)).unwrap();
    let sheet2 = wb2.worksheet(0).unwrap();

    assert_eq!(sheet2.get_value("A1").unwrap().as_number(), Some(42.0));
    assert!((sheet2.get_value("B1").unwrap().as_number().unwrap() - 3.14159).abs() < 1e-10);
    assert_eq!(sheet2.get_value("C1").unwrap().as_number(), Some(-100.5));
    assert_eq!(sheet2.get_value("A2").unwrap().as_number(), Some(0.0));
    assert_eq!(sheet2.get_value("B2").unwrap().as_number(), Some(1e10));
}

/// Test basic roundtrip with string values
#[test]
fn test_roundtrip_strings() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();

    sheet.set_cell_value("A1", "Hello, World!").unwrap();
    sheet.set_cell_value("B1", "Special: <>&\"'").unwrap(); // XML entities
    sheet.set_cell_value("A2", "Multi\nLine").unwrap();
    sheet.set_cell_value("B2", "Unicode: \u{1F600}").unwrap(); // Emoji

    let bytes = XlsxWriter::write_bytes(&wb).unwrap();
    let wb2 = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet2 = wb2.worksheet(0).unwrap();

    assert_eq!(
        sheet2.get_value("A1").unwrap().as_text(),
        Some("Hello, World!")
    );
    assert_eq!(
        sheet2.get_value("B1").unwrap().as_text(),
        Some("Special: <>&\"'")
    );
    assert_eq!(
        sheet2.get_value("A2").unwrap().as_text(),
        Some("Multi\nLine")
    );
    assert_eq!(
        sheet2.get_value("B2").unwrap().as_text(),
        Some("Unicode: \u{1F600}")
    );
}

/// Test roundtrip with boolean and error values
#[test]
fn test_roundtrip_booleans_and_errors() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();

    sheet.set_cell_value("A1", true).unwrap();
    sheet.set_cell_value("B1", false).unwrap();
    sheet.set_cell_value("C1", CellError::Div0).unwrap();

    let bytes = XlsxWriter::write_bytes(&wb).unwrap();
    let wb2 = XlsxReader::read_bytes(&bytes).unwrap();
    let sheet2 = wb2.worksheet(0).unwrap();

    assert_eq!(sheet2.get_value("A1").unwrap().as_bool(), Some(true));
    assert_eq!(sheet2.get_value("B1").unwrap().as_bool(), Some(false));
    assert_eq!(
        sheet2.get_value("C1").unwrap(),
        CellValue::Error(CellError::Div0)
    );
}

/// Extraction is stable across a decode -> encode -> decode cycle
#[test]
fn test_reencode_preserves_extraction() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name").unwrap();
    sheet.set_cell_value("B1", "Age").unwrap();
    sheet.set_cell_value("A2", "Alice").unwrap();
    sheet.set_cell_value("B2", "30").unwrap();

    let bytes = XlsxWriter::write_bytes(&wb).unwrap();

    let direct = XlsxReader::read_bytes(&bytes)
        .unwrap()
        .extract_table("people.xlsx")
        .unwrap();

    let reencoded = XlsxWriter::write_bytes(&XlsxReader::read_bytes(&bytes).unwrap()).unwrap();
    let via_cycle = XlsxReader::read_bytes(&reencoded)
        .unwrap()
        .extract_table("people.xlsx")
        .unwrap();

    assert_eq!(direct, via_cycle);
}

/// Patching a cell to the same value twice produces byte-identical output
#[test]
fn test_patch_is_idempotent() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name").unwrap();
    sheet.set_cell_value("A2", "Alice").unwrap();
    let original = XlsxWriter::write_bytes(&wb).unwrap();

    let mut first = XlsxReader::read_bytes(&original).unwrap();
    first.patch_cell(1, 0, "Alison").unwrap();
    let once = XlsxWriter::write_bytes(&first).unwrap();

    let mut second = XlsxReader::read_bytes(&once).unwrap();
    second.patch_cell(1, 0, "Alison").unwrap();
    let twice = XlsxWriter::write_bytes(&second).unwrap();

    assert_eq!(once, twice);
}

/// Patch-then-extract sees the new value in the right place
#[test]
fn test_patch_then_extract_consistency() {
    let mut wb = Workbook::new();
    let sheet = wb.worksheet_mut(0).unwrap();
    sheet.set_cell_value("A1", "Name").unwrap();
    sheet.set_cell_value("B1", "Age").unwrap();
    sheet.set_cell_value("A2", "Alice").unwrap();
    sheet.set_cell_value("B2", "30").unwrap();
    let bytes = XlsxWriter::write_bytes(&wb).unwrap();

    // Patch a data cell (row 1 -> data_rows[0])
    let mut wb2 = XlsxReader::read_bytes(&bytes).unwrap();
    wb2.patch_cell(1, 1, "31").unwrap();
    let patched = XlsxWriter::write_bytes(&wb2).unwrap();

    let table = XlsxReader::read_bytes(&patched)
        .unwrap()
        .extract_table("people.xlsx")
        .unwrap();
    assert_eq!(table.header_columns, vec!["Name", "Age"]);
    assert_eq!(table.data_rows, vec![vec!["Alice", "31"]]);

    // Patch a header cell (row 0)
    let mut wb3 = XlsxReader::read_bytes(&patched).unwrap();
    wb3.patch_cell(0, 1, "Years").unwrap();
    let repatched = XlsxWriter::write_bytes(&wb3).unwrap();

    let table = XlsxReader::read_bytes(&repatched)
        .unwrap()
        .extract_table("people.xlsx")
        .unwrap();
    assert_eq!(table.header_columns[1], "Years");
}

/// Shared-string workbooks decode like inline-string ones
#[test]
fn test_reads_shared_strings() {
    // Hand-built archive using the shared strings table, as produced by
    // Excel itself (this writer only emits inline strings)
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = zip::write::SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#).unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#).unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#).unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#).unwrap();

        zip.start_file("xl/sharedStrings.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="2" uniqueCount="2">
    <si><t>Name</t></si>
    <si><t>Alice</t></si>
</sst>"#).unwrap();

        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>
        <row r="1"><c r="A1" t="s"><v>0</v></c></row>
        <row r="2"><c r="A2" t="s"><v>1</v></c></row>
    </sheetData>
</worksheet>"#).unwrap();

        zip.finish().unwrap();
    }

    let table = XlsxReader::read_bytes(&buf)
        .unwrap()
        .extract_table("shared.xlsx")
        .unwrap();
    assert_eq!(table.header_columns, vec!["Name"]);
    assert_eq!(table.data_rows, vec![vec!["Alice"]]);
}

/// File-path based write and read
#[test]
fn test_write_and_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let mut wb = Workbook::new();
    wb.worksheet_mut(0)
        .unwrap()
        .set_cell_value("A1", "persisted")
        .unwrap();
    XlsxWriter::write_file(&wb, &path).unwrap();

    let wb2 = XlsxReader::read_file(&path).unwrap();
    assert_eq!(
        wb2.worksheet(0).unwrap().get_value("A1").unwrap().as_text(),
        Some("persisted")
    );
}
