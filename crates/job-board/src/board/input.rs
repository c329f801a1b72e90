use serde::Deserialize;

/// List-valued form field accepted either as a JSON array or a comma-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Items(Vec<String>),
    Delimited(String),
}

impl StringList {
    pub fn into_items(self) -> Vec<String> {
        let items = match self {
            StringList::Items(items) => items,
            StringList::Delimited(raw) => raw.split(',').map(str::to_string).collect(),
        };

        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

/// Scalar form field accepted either as a JSON string or a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn text(raw: impl Into<String>) -> Self {
        Scalar::Text(raw.into())
    }

    /// Field as text; numbers keep their JSON spelling.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Number(number) => number.to_string(),
            Scalar::Text(text) => text,
        }
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Scalar::Number(value.into())
    }
}

/// Trims a required text field, treating blank input as absent.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

/// [`present`] for fields that may arrive as numbers.
pub(crate) fn present_scalar(value: Option<Scalar>) -> Option<String> {
    present(value.map(Scalar::into_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delimited_lists_are_split_and_trimmed() {
        let list: StringList = serde_json::from_str("\"rust, sql ,, axum\"").expect("parses");
        assert_eq!(list.into_items(), vec!["rust", "sql", "axum"]);
    }

    #[test]
    fn arrays_drop_blank_entries() {
        let list: StringList = serde_json::from_str("[\" go \", \"\"]").expect("parses");
        assert_eq!(list.into_items(), vec!["go"]);
    }

    #[test]
    fn scalars_accept_numbers_and_text() {
        let numeric: Scalar = serde_json::from_str("5550100").expect("parses");
        assert_eq!(numeric, Scalar::from(5_550_100));
        assert_eq!(numeric.into_text(), "5550100");

        let text: Scalar = serde_json::from_str("\" 12 \"").expect("parses");
        assert_eq!(present_scalar(Some(text)), Some("12".to_string()));

        let free_text: Scalar = serde_json::from_str("\"2-5 years\"").expect("parses");
        assert_eq!(present_scalar(Some(free_text)), Some("2-5 years".to_string()));
        assert_eq!(present_scalar(Some(Scalar::text("  "))), None);
    }

    #[test]
    fn blank_text_is_absent() {
        assert_eq!(present(Some("   ".to_string())), None);
        assert_eq!(present(Some(" Acme ".to_string())), Some("Acme".to_string()));
        assert_eq!(present(None), None);
    }
}
