use serde::ser::{Serialize, Serializer};

/// One parsed data row. Fields keep header order; `None` marks a column the
/// row was too short to fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Option<String>)>,
}

impl Record {
    pub fn new(fields: Vec<(String, Option<String>)>) -> Self {
        Self { fields }
    }

    /// 以欄位名稱取值；重複的欄位名稱以最後一個為準
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl FromIterator<(String, Option<String>)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// 輸出為 JSON 物件時保留欄位順序
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|(name, value)| (name, value)))
    }
}

#[derive(Debug, Clone)]
pub struct RenderedCards {
    pub records: Vec<Record>,
    pub cards_html: String,
    pub card_count: usize,
}

/// Ordered placeholder mapping. Re-inserting a key overwrites its value but
/// keeps the position of the first insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions {
    entries: Vec<(String, String)>,
}

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, Option<&str>)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_record_get_missing_and_absent() {
        let r = record(&[("Name", Some("Garrett")), ("Photo", None)]);
        assert_eq!(r.get("Name"), Some("Garrett"));
        assert_eq!(r.get("Photo"), None);
        assert_eq!(r.get("Grade"), None);
        assert_eq!(r.field_names().collect::<Vec<_>>(), vec!["Name", "Photo"]);
    }

    #[test]
    fn test_record_duplicate_column_last_wins() {
        let r = record(&[("Time", Some("12:00")), ("Time", Some("12:34"))]);
        assert_eq!(r.get("Time"), Some("12:34"));
    }

    #[test]
    fn test_record_serializes_in_header_order() {
        let r = record(&[("Name", Some("Garrett")), ("Date", Some("2024-01-05")), ("Photo", None)]);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"Name":"Garrett","Date":"2024-01-05","Photo":null}"#);
    }

    #[test]
    fn test_substitutions_overwrite_keeps_position() {
        let subs = Substitutions::new()
            .with("NAME", "A")
            .with("CARDS", "<article/>")
            .with("NAME", "B");
        assert_eq!(subs.get("NAME"), Some("B"));
        assert_eq!(
            subs.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["NAME", "CARDS"]
        );
    }
}
