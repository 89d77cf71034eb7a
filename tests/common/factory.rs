//! Case record factories.

use serde_json::{Value, json};

/// The case reference most tests use.
pub const CASE_REFERENCE: &str = "PC-1922-1879";

/// A fully populated case record, the shape the case API returns.
pub fn case_record() -> Value {
    json!({
        "fullName": "Jane Doe",
        "dateOfBirth": "1985-04-09",
        "address": "1 King Street, Leeds, LS1 2HQ",
        "phoneNumber": "0113 496 0000",
        "emailAddress": "jane.doe@example.org",
        "providerNotes": "Initial meeting held",
        "thirdParty": {
            "fullName": "Sam Carer",
            "relationshipToClient": "Support worker",
            "emailAddress": "sam@example.org",
            "phoneNumber": "0113 496 0101",
        },
        "clientSupportNeeds": {
            "bslWebcam": "no",
            "textRelay": "yes",
            "callbackPreferred": "no",
            "languageSelection": "",
            "otherSupport": "",
        },
    })
}
