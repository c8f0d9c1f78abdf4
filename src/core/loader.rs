use crate::domain::model::Record;
use crate::utils::error::{Result, SiteError};

pub const DEFAULT_HEADER_PREFIX: &str = "Name,";

const BOM: char = '\u{feff}';

/// Byte offset of the first line starting with `prefix`. Lines end at
/// `\r\n`, `\n` or a lone `\r`.
pub fn find_header_offset(content: &str, prefix: &str) -> Option<usize> {
    let mut start = 0;
    loop {
        let line = &content[start..];
        let text = if start == 0 {
            line.strip_prefix(BOM).unwrap_or(line)
        } else {
            line
        };
        if text.starts_with(prefix) {
            return Some(start + (line.len() - text.len()));
        }

        let end = start + line.find(['\r', '\n'])?;
        start = if content[end..].starts_with("\r\n") {
            end + 2
        } else {
            end + 1
        };
        if start >= content.len() {
            return None;
        }
    }
}

/// 找到表頭行後，把其後的內容當作 CSV 解析成記錄
///
/// 表頭前的所有行（匯出檔常見的中繼資料列）都會被丟棄。找不到表頭時回傳
/// `SiteError::HeaderNotFound`，呼叫端不應產生任何輸出。
pub fn load_records(content: &str, header_prefix: &str) -> Result<Vec<Record>> {
    let offset =
        find_header_offset(content, header_prefix).ok_or_else(|| SiteError::HeaderNotFound {
            prefix: header_prefix.to_string(),
        })?;

    if offset > 0 {
        tracing::debug!("Skipped {} bytes of preamble before the header", offset);
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content[offset..].as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    tracing::debug!("Header columns: {:?}", headers);

    let mut records: Vec<Record> = Vec::new();
    for row in reader.records() {
        // csv 已略過空白行；只有 `""` 的行仍算一筆記錄
        let row = row?;

        if row.len() > headers.len() {
            tracing::debug!(
                "Row {} has {} fields, dropping {} beyond the header",
                records.len() + 1,
                row.len(),
                row.len() - headers.len()
            );
        }

        let record: Record = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), row.get(i).map(str::to_string)))
            .collect();
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Date,Meet Name,Time,Overall Place,Grade,Meet Results URL,Photo";

    #[test]
    fn test_header_on_first_line() {
        let content = format!("{}\nGarrett,2024-01-05,Winter Invite,12:34,5,10,,\n", HEADER);
        let records = load_records(&content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].field_names().count(), 8);
        assert_eq!(records[0].get("Meet Name"), Some("Winter Invite"));
        assert_eq!(records[0].get("Meet Results URL"), Some(""));
    }

    #[test]
    fn test_preamble_is_skipped() {
        let body = format!(
            "{}\nGarrett,2024-01-05,Winter Invite,12:34,5,10,,\nGarrett,2024-02-10,Spring Open,11:58,2,10,http://example.com/results,img1.jpg\n",
            HEADER
        );
        let with_preamble = format!("Exported from Sheets\nAthlete report,,,\n{}", body);

        let plain = load_records(&body, DEFAULT_HEADER_PREFIX).unwrap();
        let skipped = load_records(&with_preamble, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(plain, skipped);
        assert_eq!(skipped.len(), 2);
    }

    #[test]
    fn test_missing_header_fails() {
        let content = "junk\nmore junk\nGarrett,2024-01-05\n";
        let err = load_records(content, DEFAULT_HEADER_PREFIX).unwrap_err();
        assert!(matches!(err, SiteError::HeaderNotFound { ref prefix } if prefix == "Name,"));
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            load_records("", DEFAULT_HEADER_PREFIX),
            Err(SiteError::HeaderNotFound { .. })
        ));
    }

    #[test]
    fn test_short_rows_yield_absent_fields() {
        let content = format!("{}\nGarrett,2024-01-05,Winter Invite\n", HEADER);
        let records = load_records(&content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records[0].field_names().count(), 8);
        assert_eq!(records[0].get("Meet Name"), Some("Winter Invite"));
        assert_eq!(records[0].get("Time"), None);
        assert_eq!(records[0].get("Photo"), None);
    }

    #[test]
    fn test_extra_fields_are_dropped() {
        let content = "Name,Date\nGarrett,2024-01-05,surplus,values\n";
        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records[0].field_names().count(), 2);
        assert_eq!(
            records[0].field_names().collect::<Vec<_>>(),
            vec!["Name", "Date"]
        );
    }

    #[test]
    fn test_quoted_fields() {
        let content = "Name,Meet Name,Time\nGarrett,\"Invite, \"\"Winter\"\" Edition\",\"12:34\nunofficial\"\n";
        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Meet Name"), Some("Invite, \"Winter\" Edition"));
        assert_eq!(records[0].get("Time"), Some("12:34\nunofficial"));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let content = "meta\r\nName,Date\r\n\r\nGarrett,2024-01-05\r\n\r\n";
        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Date"), Some("2024-01-05"));
    }

    #[test]
    fn test_carriage_return_only_line_endings() {
        let content = "Season export\rAthlete,,\rName,Date\rGarrett,2024-01-05\r";
        assert_eq!(find_header_offset(content, "Name,"), Some(24));

        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Date"), Some("2024-01-05"));
    }

    #[test]
    fn test_quoted_empty_line_is_a_record() {
        let content = "Name,Date\n\"\"\nGarrett,2024-01-05\n";
        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Name"), Some(""));
        assert_eq!(records[0].get("Date"), None);
        assert_eq!(records[1].get("Name"), Some("Garrett"));
    }

    #[test]
    fn test_byte_order_mark_before_header() {
        let content = "\u{feff}Name,Date\nGarrett,2024-01-05\n";
        assert_eq!(find_header_offset(content, "Name,"), Some(3));
        let records = load_records(content, DEFAULT_HEADER_PREFIX).unwrap();
        assert_eq!(records[0].get("Name"), Some("Garrett"));
    }

    #[test]
    fn test_custom_prefix() {
        let content = "Athlete;x\nAthlete,Time\nGarrett,12:34\n";
        let records = load_records(content, "Athlete,").unwrap();
        assert_eq!(records[0].get("Time"), Some("12:34"));
    }
}
