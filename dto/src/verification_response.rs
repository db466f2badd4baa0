use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields the user typed, as echoed back by the verification backend.
#[derive(Debug, Default, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
#[serde(default)]
pub struct EnteredData {
    name: Option<String>,
    dob: Option<String>,
    gender: Option<String>,
}

impl EnteredData {
    pub fn new(name: Option<String>, dob: Option<String>, gender: Option<String>) -> Self {
        Self { name, dob, gender }
    }
}

/// Body returned by `POST /verify-document`.
///
/// `extracted_data` is either the fields read from the document
/// or a single `error` entry explaining why nothing could be read.
/// Every member may be missing: the backend only fills what it has.
#[derive(Debug, Default, Serialize, Deserialize, Getters, PartialEq, Clone)]
#[serde(default)]
pub struct VerificationResponse {
    entered_data: EnteredData,
    extracted_data: Option<Map<String, Value>>,
    raw_ocr_text: Option<String>,
    is_verified: bool,
    status_message: Option<String>,
}

impl VerificationResponse {
    pub fn new(
        entered_data: EnteredData,
        extracted_data: Option<Map<String, Value>>,
        raw_ocr_text: Option<String>,
        is_verified: bool,
        status_message: Option<String>,
    ) -> Self {
        Self {
            entered_data,
            extracted_data,
            raw_ocr_text,
            is_verified,
            status_message,
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;
    use serde_json::json;

    pub fn get_verified_aadhaar_response() -> Value {
        json!({
            "entered_data": {"name": "Test User", "gender": "male"},
            "extracted_data": {"dob": "1990-08-15", "aadhaar_linked": true},
            "raw_ocr_text": "GOVERNMENT OF INDIA\nTest User\nDOB: 15/08/1990\nMale",
            "is_verified": true,
            "status_message": "Match found"
        })
    }

    #[test]
    fn should_deserialize_verification_response() {
        let response: VerificationResponse =
            serde_json::from_value(get_verified_aadhaar_response()).unwrap();

        assert_eq!(
            &EnteredData::new(Some("Test User".to_owned()), None, Some("male".to_owned())),
            response.entered_data()
        );
        assert!(*response.is_verified());
        assert_eq!(&Some("Match found".to_owned()), response.status_message());
        let keys = response
            .extracted_data()
            .as_ref()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>();
        assert_eq!(vec!["dob".to_owned(), "aadhaar_linked".to_owned()], keys);
    }

    #[test]
    fn should_deserialize_empty_verification_response() {
        let response: VerificationResponse = serde_json::from_str("{}").unwrap();

        assert_eq!(VerificationResponse::default(), response);
        assert!(!*response.is_verified());
    }

    #[test]
    fn should_deserialize_extraction_error() {
        let response: VerificationResponse = serde_json::from_value(json!({
            "extracted_data": {"error": "No text found."},
            "raw_ocr_text": "",
            "is_verified": false,
            "status_message": "Verification failed"
        }))
        .unwrap();

        let extracted_data = response.extracted_data().as_ref().unwrap();
        assert_eq!(Some(&json!("No text found.")), extracted_data.get("error"));
    }
}
