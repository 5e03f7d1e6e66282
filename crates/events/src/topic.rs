//! Topic scheme helpers.
//!
//! Terminals publish requests on `<site>/<room>/auth` and listen for
//! decisions on `<site>/<room>/result`. The room segment is a technical
//! identifier (no spaces), distinct from the human-facing room name
//! carried in the payload's `doorID`.

/// Suffix of inbound authorization request topics.
pub const AUTH_SUFFIX: &str = "auth";
/// Suffix of outbound decision topics.
pub const RESULT_SUFFIX: &str = "result";

/// Split an auth topic into `(site, room)` segments.
///
/// Returns `None` for anything that is not exactly
/// `<site>/<room>/auth` with non-empty segments.
pub fn parse_auth_topic(topic: &str) -> Option<(&str, &str)> {
    let mut parts = topic.split('/');
    let site = parts.next()?;
    let room = parts.next()?;
    let kind = parts.next()?;
    if parts.next().is_some() || site.is_empty() || room.is_empty() || kind != AUTH_SUFFIX {
        return None;
    }
    Some((site, room))
}

/// Build the decision topic for a site/room pair.
pub fn result_topic(site: &str, room: &str) -> String {
    format!("{site}/{room}/{RESULT_SUFFIX}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_auth_topic() {
        assert_eq!(
            parse_auth_topic("hotel/room868/auth"),
            Some(("hotel", "room868"))
        );
    }

    #[test]
    fn rejects_wrong_suffix_and_shape() {
        assert_eq!(parse_auth_topic("hotel/room868/result"), None);
        assert_eq!(parse_auth_topic("hotel/room868"), None);
        assert_eq!(parse_auth_topic("hotel/room868/auth/extra"), None);
        assert_eq!(parse_auth_topic("/room868/auth"), None);
        assert_eq!(parse_auth_topic("hotel//auth"), None);
    }

    #[test]
    fn builds_result_topic() {
        assert_eq!(result_topic("hotel", "room868"), "hotel/room868/result");
    }
}
