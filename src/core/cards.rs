use crate::domain::model::Record;
use crate::utils::validation::validate_url;

pub const FIELD_DATE: &str = "Date";
pub const FIELD_MEET: &str = "Meet Name";
pub const FIELD_TIME: &str = "Time";
pub const FIELD_PLACE: &str = "Overall Place";
pub const FIELD_GRADE: &str = "Grade";
pub const FIELD_RESULTS_URL: &str = "Meet Results URL";
pub const FIELD_PHOTO: &str = "Photo";

pub const DEFAULT_MISSING_VALUE: &str = "N/A";
pub const DEFAULT_IMAGE_DIR: &str = "images/";
pub const DEFAULT_LINK_LABEL: &str = "Meet results";
pub const NO_LINK_HTML: &str = "<span>No results link</span>";

pub const CARD_SEPARATOR: &str = "\n";

/// Safe lookup: absent or whitespace-only values fall back to `default`.
pub fn safe(record: &Record, key: &str, default: &str) -> String {
    match present(record, key) {
        Some(value) => value.to_string(),
        None => default.to_string(),
    }
}

fn present<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardStyle {
    pub missing_value: String,
    pub image_dir: String,
    pub link_label: String,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            missing_value: DEFAULT_MISSING_VALUE.to_string(),
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
            link_label: DEFAULT_LINK_LABEL.to_string(),
        }
    }
}

/// Renders records as `<article>` cards. Values are inserted as-is, without
/// HTML escaping.
#[derive(Debug, Clone, Default)]
pub struct CardRenderer {
    style: CardStyle,
}

impl CardRenderer {
    pub fn new(style: CardStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn render_all(&self, records: &[Record]) -> String {
        records
            .iter()
            .map(|record| self.render(record))
            .collect::<Vec<_>>()
            .join(CARD_SEPARATOR)
    }

    pub fn render(&self, record: &Record) -> String {
        let missing = self.style.missing_value.as_str();
        let date = safe(record, FIELD_DATE, missing);
        let meet = safe(record, FIELD_MEET, missing);
        let time = safe(record, FIELD_TIME, missing);
        let place = safe(record, FIELD_PLACE, missing);
        let grade = safe(record, FIELD_GRADE, missing);

        let link_html = self.link_html(present(record, FIELD_RESULTS_URL), &meet);
        let photo_html = match present(record, FIELD_PHOTO) {
            Some(photo) => format!(
                r#"<img src="{}{}" alt="Photo for {}" width=200>"#,
                self.style.image_dir, photo, meet
            ),
            None => String::new(),
        };

        format!(
            r#"
<article>
  <h2>{meet}</h2>
  <p>{date}</p>

  {photo_html}

  <dl>
    <dt>Time</dt><dd>{time}</dd>
    <dt>Place</dt><dd>{place}</dd>
    <dt>Grade</dt><dd>{grade}</dd>
  </dl>

  <p>{link_html}</p>
</article>
"#
        )
    }

    fn link_html(&self, url: Option<&str>, meet: &str) -> String {
        match url {
            Some(url) => {
                if let Err(e) = validate_url(FIELD_RESULTS_URL, url) {
                    tracing::warn!("⚠️ Results link for '{}' looks malformed: {}", meet, e);
                }
                format!(r#"<a href="{}">{}</a>"#, url, self.style.link_label)
            }
            None => NO_LINK_HTML.to_string(),
        }
    }
}
