//! Typed access request/response messages exchanged with door terminals.
//!
//! Wire format is JSON with the field names the terminal firmware sends;
//! renames map them onto idiomatic Rust names. Field presence is
//! validated by deserialization — a request without `cardID` or `doorID`
//! never constructs.

use serde::{Deserialize, Serialize};

/// Inbound access request, published by a terminal on `<site>/<room>/auth`.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessRequest {
    /// RFID credential value presented at the door.
    #[serde(rename = "cardID")]
    pub card_id: String,

    /// Room name (or device identifier on locker terminals).
    #[serde(rename = "doorID", alias = "deviceID")]
    pub door_id: String,

    /// Terminal clock at send time, seconds. Optional.
    pub ts: Option<i64>,

    /// 16-bit integrity checksum over `cardID`/`doorID`/`ts`. Optional.
    pub sig: Option<i64>,
}

/// Authorization decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessResult {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "DENY")]
    Deny,
}

/// Outbound decision, published on `<site>/<room>/result`.
///
/// Echoes `ts`/`sig` when the request carried them so the terminal can
/// correlate and verify the round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessResponse {
    #[serde(rename = "accessResult")]
    pub access_result: AccessResult,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sig: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_parses_terminal_field_names() {
        let req: AccessRequest =
            serde_json::from_str(r#"{"cardID":"AB12CD34","doorID":"room1","ts":7,"sig":9}"#)
                .unwrap();
        assert_eq!(req.card_id, "AB12CD34");
        assert_eq!(req.door_id, "room1");
        assert_eq!(req.ts, Some(7));
        assert_eq!(req.sig, Some(9));
    }

    #[test]
    fn device_id_is_accepted_for_door_id() {
        let req: AccessRequest =
            serde_json::from_str(r#"{"cardID":"AB12CD34","deviceID":"locker3"}"#).unwrap();
        assert_eq!(req.door_id, "locker3");
        assert_eq!(req.ts, None);
    }

    #[test]
    fn request_without_card_id_fails_to_parse() {
        assert!(serde_json::from_str::<AccessRequest>(r#"{"doorID":"room1"}"#).is_err());
    }

    #[test]
    fn response_omits_absent_ts_and_sig() {
        let resp = AccessResponse {
            access_result: AccessResult::Deny,
            ts: None,
            sig: None,
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"accessResult":"DENY"}"#
        );
    }

    #[test]
    fn response_echoes_ts_and_sig() {
        let resp = AccessResponse {
            access_result: AccessResult::Ok,
            ts: Some(7),
            sig: Some(9),
        };
        assert_eq!(
            serde_json::to_string(&resp).unwrap(),
            r#"{"accessResult":"OK","ts":7,"sig":9}"#
        );
    }
}
