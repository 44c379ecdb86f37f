//! STOMP 1.2 text frame codec for the messaging WebSocket.
//!
//! DESIGN
//! ======
//! The broker speaks STOMP over a raw WebSocket, one frame (or heartbeat EOL)
//! per text message. Only the commands this client actually exchanges are
//! modeled; the transactional commands (BEGIN/COMMIT/ABORT, ACK/NACK) are out
//! of scope because every subscription runs in auto-ack mode.
//!
//! Frames serialize with LF line endings. Incoming payloads may use CRLF and
//! may interleave heartbeat EOLs between frames; [`parse_payload`] accepts
//! both.

/// Error returned by [`parse_payload`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StompError {
    /// The command line names no command this client understands.
    #[error("unknown STOMP command: {0}")]
    UnknownCommand(String),
    /// A header line has no colon or an invalid escape sequence.
    #[error("malformed STOMP header: {0}")]
    MalformedHeader(String),
    /// The frame body never reached a NUL terminator.
    #[error("STOMP frame is missing its NUL terminator")]
    MissingTerminator,
    /// The `content-length` header is not an unsigned integer.
    #[error("invalid content-length header: {0}")]
    BadContentLength(String),
    /// The declared `content-length` overruns the received payload.
    #[error("frame body shorter than declared content-length {expected}")]
    TruncatedBody {
        /// Byte count the `content-length` header promised.
        expected: usize,
    },
}

/// Frame commands exchanged on the messaging socket.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Client session opener.
    Connect,
    /// Server acknowledgement of [`Command::Connect`].
    Connected,
    /// Client subscription to a destination.
    Subscribe,
    /// Client removal of a subscription.
    Unsubscribe,
    /// Client publication to a destination.
    Send,
    /// Server delivery of a published message.
    Message,
    /// Server receipt acknowledgement.
    Receipt,
    /// Server-reported failure; the server closes the connection after it.
    Error,
    /// Client session closer.
    Disconnect,
}

impl Command {
    /// Wire name of the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect => "CONNECT",
            Self::Connected => "CONNECTED",
            Self::Subscribe => "SUBSCRIBE",
            Self::Unsubscribe => "UNSUBSCRIBE",
            Self::Send => "SEND",
            Self::Message => "MESSAGE",
            Self::Receipt => "RECEIPT",
            Self::Error => "ERROR",
            Self::Disconnect => "DISCONNECT",
        }
    }

    fn from_name(name: &str) -> Result<Self, StompError> {
        match name {
            "CONNECT" => Ok(Self::Connect),
            "CONNECTED" => Ok(Self::Connected),
            "SUBSCRIBE" => Ok(Self::Subscribe),
            "UNSUBSCRIBE" => Ok(Self::Unsubscribe),
            "SEND" => Ok(Self::Send),
            "MESSAGE" => Ok(Self::Message),
            "RECEIPT" => Ok(Self::Receipt),
            "ERROR" => Ok(Self::Error),
            "DISCONNECT" => Ok(Self::Disconnect),
            other => Err(StompError::UnknownCommand(other.to_owned())),
        }
    }

    /// CONNECT and CONNECTED skip header escaping for STOMP 1.0 compatibility.
    fn escapes_headers(self) -> bool {
        !matches!(self, Self::Connect | Self::Connected)
    }
}

/// A single STOMP frame.
///
/// Headers keep wire order; when a name repeats, the first occurrence wins,
/// as the protocol requires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Command line of the frame.
    pub command: Command,
    /// Header lines in wire order, unescaped.
    pub headers: Vec<(String, String)>,
    /// Frame body; empty for control frames.
    pub body: String,
}

impl Frame {
    /// Start a frame with no headers and an empty body.
    #[must_use]
    pub fn new(command: Command) -> Self {
        Self {
            command,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Append a header (builder style).
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Set the body (builder style).
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.body = body.to_owned();
        self
    }

    /// First value recorded for `name`, if any.
    #[must_use]
    pub fn header_value(&self, name: &str) -> Option<&str> {
        header_in(&self.headers, name)
    }

    /// Parse this frame's `heart-beat` header as `(send, receive)` millis.
    ///
    /// A missing or malformed header reads as `(0, 0)`, which disables
    /// heartbeats in both directions.
    #[must_use]
    pub fn heart_beat(&self) -> (u64, u64) {
        self.header_value("heart-beat")
            .and_then(parse_heart_beat)
            .unwrap_or((0, 0))
    }

    /// Render the frame as wire text, NUL terminator included.
    ///
    /// A `content-length` header is added for non-empty bodies unless the
    /// caller already set one.
    #[must_use]
    pub fn serialize(&self) -> String {
        let escape = self.command.escapes_headers();
        let mut out = String::with_capacity(self.body.len() + 64);
        out.push_str(self.command.as_str());
        out.push('\n');
        for (name, value) in &self.headers {
            if escape {
                out.push_str(&escape_header(name));
                out.push(':');
                out.push_str(&escape_header(value));
            } else {
                out.push_str(name);
                out.push(':');
                out.push_str(value);
            }
            out.push('\n');
        }
        if !self.body.is_empty() && self.header_value("content-length").is_none() {
            out.push_str("content-length:");
            out.push_str(&self.body.len().to_string());
            out.push('\n');
        }
        out.push('\n');
        out.push_str(&self.body);
        out.push('\0');
        out
    }
}

/// Negotiated heartbeat cadence for an established session, in milliseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeartBeat {
    /// How often this side must emit an EOL heartbeat; 0 disables.
    pub send_every_ms: u64,
    /// Slowest cadence the server promised for inbound traffic; 0 disables.
    pub expect_every_ms: u64,
}

/// Combine our CONNECT offer with the server's CONNECTED reply.
///
/// Each pair is `(can send every, wants to receive every)`. A zero on either
/// side of a direction disables that direction; otherwise the slower of the
/// two intervals wins.
#[must_use]
pub fn negotiate_heart_beat(offer: (u64, u64), reply: (u64, u64)) -> HeartBeat {
    let (client_send, client_recv) = offer;
    let (server_send, server_recv) = reply;
    HeartBeat {
        send_every_ms: combine(client_send, server_recv),
        expect_every_ms: combine(server_send, client_recv),
    }
}

fn combine(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 { 0 } else { a.max(b) }
}

fn parse_heart_beat(value: &str) -> Option<(u64, u64)> {
    let (send, recv) = value.split_once(',')?;
    match (send.trim().parse(), recv.trim().parse()) {
        (Ok(send), Ok(recv)) => Some((send, recv)),
        _ => None,
    }
}

/// The payload a client sends as a heartbeat tick.
pub const HEART_BEAT_PAYLOAD: &str = "\n";

/// CONNECT frame for `host`, offering `heart_beat` as `(send, receive)` ms.
#[must_use]
pub fn connect(host: &str, heart_beat: (u64, u64)) -> Frame {
    Frame::new(Command::Connect)
        .header("accept-version", "1.2")
        .header("host", host)
        .header(
            "heart-beat",
            &format!("{},{}", heart_beat.0, heart_beat.1),
        )
}

/// SUBSCRIBE frame for `destination` under the client-chosen `id`.
#[must_use]
pub fn subscribe(id: &str, destination: &str) -> Frame {
    Frame::new(Command::Subscribe)
        .header("id", id)
        .header("destination", destination)
        .header("ack", "auto")
}

/// SEND frame publishing a JSON `body` to `destination`.
#[must_use]
pub fn send_json(destination: &str, body: &str) -> Frame {
    Frame::new(Command::Send)
        .header("destination", destination)
        .header("content-type", "application/json")
        .body(body)
}

/// DISCONNECT frame announcing a graceful close.
#[must_use]
pub fn disconnect() -> Frame {
    Frame::new(Command::Disconnect)
}

/// Parse one WebSocket text payload into the frames it carries.
///
/// Heartbeat EOLs before, between, and after frames are skipped; an
/// all-heartbeat payload yields an empty vec.
///
/// # Errors
///
/// Returns a [`StompError`] describing the first malformed frame; frames
/// parsed before it are discarded because a framing error leaves the rest of
/// the payload unreadable.
pub fn parse_payload(input: &str) -> Result<Vec<Frame>, StompError> {
    let mut frames = Vec::new();
    let mut rest = skip_eols(input);
    while !rest.is_empty() {
        let (frame, after) = parse_one(rest)?;
        frames.push(frame);
        rest = skip_eols(after);
    }
    Ok(frames)
}

fn parse_one(input: &str) -> Result<(Frame, &str), StompError> {
    let (line, mut rest) = read_line(input).ok_or(StompError::MissingTerminator)?;
    let command = Command::from_name(line)?;

    let mut headers = Vec::new();
    loop {
        let (line, after) = read_line(rest).ok_or(StompError::MissingTerminator)?;
        rest = after;
        if line.is_empty() {
            break;
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| StompError::MalformedHeader(line.to_owned()))?;
        if command.escapes_headers() {
            headers.push((unescape_header(name)?, unescape_header(value)?));
        } else {
            headers.push((name.to_owned(), value.to_owned()));
        }
    }

    let declared = match header_in(&headers, "content-length") {
        Some(value) => Some(
            value
                .parse::<usize>()
                .map_err(|_| StompError::BadContentLength(value.to_owned()))?,
        ),
        None => None,
    };

    let (body, after) = match declared {
        Some(len) => {
            let body = rest
                .get(..len)
                .ok_or(StompError::TruncatedBody { expected: len })?;
            if rest.as_bytes().get(len) != Some(&0) {
                return Err(StompError::MissingTerminator);
            }
            (body, &rest[len + 1..])
        }
        None => {
            let end = rest.find('\0').ok_or(StompError::MissingTerminator)?;
            (&rest[..end], &rest[end + 1..])
        }
    };

    Ok((
        Frame {
            command,
            headers,
            body: body.to_owned(),
        },
        after,
    ))
}

fn read_line(input: &str) -> Option<(&str, &str)> {
    let end = input.find('\n')?;
    let line = &input[..end];
    let line = line.strip_suffix('\r').unwrap_or(line);
    Some((line, &input[end + 1..]))
}

fn skip_eols(mut input: &str) -> &str {
    loop {
        if let Some(rest) = input.strip_prefix("\r\n") {
            input = rest;
        } else if let Some(rest) = input.strip_prefix('\n') {
            input = rest;
        } else {
            return input;
        }
    }
}

fn header_in<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn escape_header(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            ':' => out.push_str("\\c"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape_header(raw: &str) -> Result<String, StompError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('r') => out.push('\r'),
            Some('n') => out.push('\n'),
            Some('c') => out.push(':'),
            _ => return Err(StompError::MalformedHeader(raw.to_owned())),
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "stomp_test.rs"]
mod tests;
