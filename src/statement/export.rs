//! Downloadable annexure documents.
//!
//! The rendered text is exported as a `data:` URI so a browser can save it
//! directly, under a file name derived from the employee's name.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

/// MIME type of exported annexures.
pub const ANNEXURE_MIME_TYPE: &str = "text/plain";

/// An annexure ready for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnexureDocument {
    /// Suggested file name, e.g. `Annexure_Asha_Rao.txt`.
    pub file_name: String,
    /// Always `text/plain`.
    pub mime_type: String,
    /// `data:text/plain;base64,...` URI of the UTF-8 text.
    pub data_uri: String,
}

/// Builds the download file name: whitespace runs in the name become
/// underscores.
///
/// ```
/// use ctc_engine::statement::annexure_file_name;
///
/// assert_eq!(annexure_file_name("Asha  Rao"), "Annexure_Asha_Rao.txt");
/// ```
pub fn annexure_file_name(name: &str) -> String {
    let stem = name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("Annexure_{}.txt", stem)
}

/// Wraps rendered annexure text as a base64 `data:` URI document.
pub fn export_annexure(name: &str, text: &str) -> AnnexureDocument {
    AnnexureDocument {
        file_name: annexure_file_name(name),
        mime_type: ANNEXURE_MIME_TYPE.to_string(),
        data_uri: format!(
            "data:{};base64,{}",
            ANNEXURE_MIME_TYPE,
            STANDARD.encode(text.as_bytes())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_replaces_spaces() {
        assert_eq!(annexure_file_name("Asha Rao"), "Annexure_Asha_Rao.txt");
        assert_eq!(
            annexure_file_name("Mary Anne van Dyke"),
            "Annexure_Mary_Anne_van_Dyke.txt"
        );
    }

    #[test]
    fn test_file_name_trims_and_collapses_whitespace() {
        assert_eq!(annexure_file_name("  Asha \t Rao "), "Annexure_Asha_Rao.txt");
    }

    #[test]
    fn test_data_uri_encodes_text() {
        let doc = export_annexure("Asha Rao", "Hi");
        assert_eq!(doc.mime_type, "text/plain");
        assert_eq!(doc.data_uri, "data:text/plain;base64,SGk=");
    }

    #[test]
    fn test_data_uri_round_trips_utf8() {
        let text = "Employee: Zoë\nNet Pay 100.00\n";
        let doc = export_annexure("Zoë", text);

        let encoded = doc.data_uri.strip_prefix("data:text/plain;base64,").unwrap();
        let decoded = STANDARD.decode(encoded).unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), text);
        assert_eq!(doc.file_name, "Annexure_Zoë.txt");
    }
}
