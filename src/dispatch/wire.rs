//! Wire codec for the streaming dispatch protocol.
//!
//! Inbound framing (one text WebSocket message = one frame):
//! `<kind><name>.<payload>`. The first character is the kind tag, the
//! characters up to the first `.` are the parameter name, and everything
//! after the `.` is the payload. A message with no `.` is treated as an
//! empty-payload frame for that name.
//!
//! Outbound framing has no name: `<kind><payload>`, where `kind` is one of
//! `n` (value), `e` (error) or the bare completion frame `c`.

/// Kind tag of an inbound frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InboundKind {
    /// `n` — deliver `payload` as the next item on the named stream.
    Value,
    /// `e` — terminate the named stream with an error carrying `payload`.
    Error,
    /// `c` — terminate the named stream normally; `payload` is ignored.
    Complete,
    /// `f` — deliver `payload`, then terminate normally.
    Final,
}

impl InboundKind {
    fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'n' => Some(Self::Value),
            'e' => Some(Self::Error),
            'c' => Some(Self::Complete),
            'f' => Some(Self::Final),
            _ => None,
        }
    }
}

/// One parsed inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InboundFrame {
    pub(crate) kind: InboundKind,
    pub(crate) name: String,
    pub(crate) payload: String,
}

impl InboundFrame {
    /// Parses one text WebSocket message into a frame.
    ///
    /// Returns `None` for an empty message or an unrecognized kind tag; both
    /// are malformed frames that get dropped without closing the connection.
    pub(crate) fn parse(message: &str) -> Option<Self> {
        let mut chars = message.chars();
        let kind = InboundKind::from_tag(chars.next()?)?;
        let rest = chars.as_str();
        let (name, payload) = match rest.split_once('.') {
            Some((name, payload)) => (name.to_owned(), payload.to_owned()),
            None => (rest.to_owned(), String::new()),
        };
        Some(Self { kind, name, payload })
    }
}

/// Builds the outbound `n`-frame text for one already-serialized value.
#[inline]
pub(crate) fn value_frame(payload: &str) -> String {
    let mut frame = String::with_capacity(payload.len() + 1);
    frame.push('n');
    frame.push_str(payload);
    frame
}

/// Builds the outbound `e`-frame text for an error message.
#[inline]
pub(crate) fn error_frame(message: &str) -> String {
    let encoded = serde_json::to_string(message)
        .unwrap_or_else(|_| "\"\"".to_owned());
    let mut frame = String::with_capacity(encoded.len() + 1);
    frame.push('e');
    frame.push_str(&encoded);
    frame
}

/// The outbound completion frame: a bare `c`.
pub(crate) const COMPLETE_FRAME: &str = "c";

/// Close reason sent alongside the normal-closure status after `c`.
pub(crate) const CLOSE_REASON: &str = "onCompleted";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_parses_value_frame() {
        let frame = InboundFrame::parse("nleft.3").unwrap();
        assert_eq!(frame.kind, InboundKind::Value);
        assert_eq!(frame.name, "left");
        assert_eq!(frame.payload, "3");
    }

    #[test]
    fn it_parses_frame_without_separator_as_empty_payload() {
        let frame = InboundFrame::parse("cleft").unwrap();
        assert_eq!(frame.kind, InboundKind::Complete);
        assert_eq!(frame.name, "left");
        assert_eq!(frame.payload, "");
    }

    #[test]
    fn it_parses_final_frame() {
        let frame = InboundFrame::parse("fpayloadX.v1").unwrap();
        assert_eq!(frame.kind, InboundKind::Final);
        assert_eq!(frame.name, "payloadX");
        assert_eq!(frame.payload, "v1");
    }

    #[test]
    fn it_rejects_unknown_kind() {
        assert!(InboundFrame::parse("xfoo.bar").is_none());
    }

    #[test]
    fn it_rejects_empty_message() {
        assert!(InboundFrame::parse("").is_none());
    }

    #[test]
    fn it_builds_value_and_error_frames() {
        assert_eq!(value_frame("7"), "n7");
        assert_eq!(error_frame("nope"), "e\"nope\"");
    }
}
