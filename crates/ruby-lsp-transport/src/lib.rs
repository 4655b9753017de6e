//! Message framing for LSP Base Protocol
//!
//! Implements Content-Length based message framing as specified in
//! the LSP Base Protocol.

use std::collections::HashMap;
use std::io::{self, BufRead, Read, Write};

use ruby_lsp_protocol::{JsonRpcRequest, JsonRpcResponse};

/// The result of attempting to read one frame.
///
/// `MalformedFrame` and `Eof` are deliberately distinct: a malformed frame's
/// bytes have already been consumed off the stream, so the next frame
/// boundary is still reachable and the caller should keep reading. EOF means
/// the stream itself is gone and there is no next frame to reach.
pub enum ReadOutcome {
    Message(JsonRpcRequest),
    /// A frame was read but couldn't be decoded (missing/unparseable
    /// `Content-Length`, or a body that isn't valid JSON-RPC). Recoverable —
    /// the caller should read the next frame.
    MalformedFrame,
    /// The stream ended, cleanly or mid-frame. Not recoverable.
    Eof,
}

/// Read an LSP message from a buffered reader.
///
/// Returns `Err` only on I/O errors, which are not recoverable.
pub fn read_message<R: BufRead>(reader: &mut R) -> io::Result<ReadOutcome> {
    let mut headers = HashMap::new();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        let line = line.trim_end();
        if line.is_empty() {
            break;
        }

        if let Some((key, value)) = line.split_once(": ") {
            headers.insert(key.to_string(), value.to_string());
        }
    }

    let Some(content_length) = headers.get("Content-Length") else {
        tracing::warn!("frame missing Content-Length header");
        return Ok(ReadOutcome::MalformedFrame);
    };
    let Ok(length) = content_length.parse::<usize>() else {
        tracing::warn!(value = %content_length, "unparseable Content-Length header");
        return Ok(ReadOutcome::MalformedFrame);
    };

    let mut content = vec![0u8; length];
    let mut bytes_read = 0;
    while bytes_read < length {
        match reader.read(&mut content[bytes_read..])? {
            0 => return Ok(ReadOutcome::Eof), // unexpected EOF mid-frame
            n => bytes_read += n,
        }
    }

    match serde_json::from_slice(&content) {
        Ok(request) => Ok(ReadOutcome::Message(request)),
        Err(error) => {
            let preview = String::from_utf8_lossy(&content);
            let preview = if preview.len() > 100 { format!("{}...", &preview[..100]) } else { preview.to_string() };
            tracing::warn!(%error, frame = %preview, "malformed JSON-RPC frame, skipping");
            Ok(ReadOutcome::MalformedFrame)
        }
    }
}

/// Write an LSP response to `writer` with Content-Length framing.
pub fn write_message<W: Write>(writer: &mut W, response: &JsonRpcResponse) -> io::Result<()> {
    let content = serde_json::to_string(response)?;
    write!(writer, "Content-Length: {}\r\n\r\n{}", content.len(), content)?;
    writer.flush()
}

/// Log an outgoing response at debug level without touching the framed
/// stream itself.
pub fn log_response(response: &JsonRpcResponse) {
    tracing::debug!(
        id = ?response.id,
        has_result = response.result.is_some(),
        has_error = response.error.is_some(),
        "sending response"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn framed(body: &str) -> Vec<u8> {
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body).into_bytes()
    }

    #[test]
    fn reads_a_well_formed_request() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#;
        let mut cursor = Cursor::new(framed(body));
        let request = match read_message(&mut cursor).expect("no io error") {
            ReadOutcome::Message(request) => request,
            _ => panic!("expected a message"),
        };
        assert_eq!(request.method, "initialize");
        assert_eq!(request.id, Some(serde_json::Value::from(1)));
    }

    #[test]
    fn returns_eof_on_clean_eof() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        let result = read_message(&mut cursor).expect("no io error");
        assert!(matches!(result, ReadOutcome::Eof));
    }

    #[test]
    fn returns_malformed_frame_on_malformed_json_body() {
        let mut cursor = Cursor::new(framed("not json"));
        let result = read_message(&mut cursor).expect("no io error");
        assert!(matches!(result, ReadOutcome::MalformedFrame));
    }

    #[test]
    fn returns_malformed_frame_when_content_length_missing() {
        let raw = b"X-Custom: value\r\n\r\n".to_vec();
        let mut cursor = Cursor::new(raw);
        let result = read_message(&mut cursor).expect("no io error");
        assert!(matches!(result, ReadOutcome::MalformedFrame));
    }

    #[test]
    fn a_malformed_frame_does_not_consume_the_next_well_formed_one() {
        let mut combined = framed("not json");
        combined.extend(framed(r#"{"jsonrpc":"2.0","id":2,"method":"shutdown","params":null}"#));
        let mut cursor = Cursor::new(combined);

        let first = read_message(&mut cursor).expect("no io error");
        assert!(matches!(first, ReadOutcome::MalformedFrame));

        let second = read_message(&mut cursor).expect("no io error");
        match second {
            ReadOutcome::Message(request) => assert_eq!(request.method, "shutdown"),
            _ => panic!("expected the second frame to parse"),
        }
    }

    #[test]
    fn write_message_produces_correct_framing() {
        let response = JsonRpcResponse::success(Some(serde_json::Value::from(1)), serde_json::json!({"ok": true}));
        let mut buf = Vec::new();
        write_message(&mut buf, &response).expect("writes");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("Content-Length: "));
        assert!(text.ends_with(r#"{"jsonrpc":"2.0","id":1,"result":{"ok":true}}"#));
    }

    #[test]
    fn roundtrips_through_read_and_write() {
        let response = JsonRpcResponse::success(Some(serde_json::Value::from(7)), serde_json::Value::Null);
        let mut buf = Vec::new();
        write_message(&mut buf, &response).expect("writes");

        // the next read_message call should be able to parse a request of
        // the same shape written the same way
        let request_body = r#"{"jsonrpc":"2.0","id":7,"method":"shutdown","params":null}"#;
        let mut cursor = Cursor::new(framed(request_body));
        let parsed = match read_message(&mut cursor).expect("no io error") {
            ReadOutcome::Message(request) => request,
            _ => panic!("expected a message"),
        };
        assert_eq!(parsed.id, Some(serde_json::Value::from(7)));
    }
}
