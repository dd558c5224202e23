//! Pull-based JSON token cursor with byte-offset tracking
//!
//! Produces one [`Event`] per structural token while keeping scalar
//! payloads lazy: a string or number value is only materialized when a
//! consumer captures it. Skipping runs over the raw byte window with
//! escape-aware scanning and allocates nothing.

use std::io::Read;

use serde::de::DeserializeOwned;

use super::buffer::StreamBuffer;
use super::region::Region;
use crate::error::{ImportError, ImportResult};

/// One structural token in the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    /// A property name inside an object; the following event is the
    /// property's value start.
    Key(String),
    /// A string value. Content stays in the byte window until captured.
    String,
    /// A number value. Content stays in the byte window until captured.
    Number,
    Bool(bool),
    Null,
}

impl Event {
    /// Whether this event opens a JSON value (container or scalar).
    #[must_use]
    pub fn is_value_start(&self) -> bool {
        matches!(
            self,
            Event::ObjectStart
                | Event::ArrayStart
                | Event::String
                | Event::Number
                | Event::Bool(_)
                | Event::Null
        )
    }
}

#[derive(Debug, Clone, Copy)]
enum ObjState {
    Empty,
    ExpectValue,
    AfterValue,
}

#[derive(Debug, Clone, Copy)]
enum ArrState {
    Empty,
    AfterValue,
}

#[derive(Debug, Clone, Copy)]
enum Frame {
    Object(ObjState),
    Array(ArrState),
}

/// Scalar token whose bytes have not yet been consumed from the window.
enum Pending {
    None,
    /// Inside a string value; the opening quote is already consumed.
    Str,
    /// At the first byte of a number value.
    Num,
    /// A literal (`true`/`false`/`null`) already consumed; raw bytes kept
    /// for capture.
    Lit(&'static [u8]),
}

/// Forward-only JSON cursor over a byte stream.
pub struct JsonCursor<'a> {
    buffer: StreamBuffer<'a>,
    frames: Vec<Frame>,
    pending: Pending,
    pending_name: Option<String>,
    current: Option<Event>,
    current_name: Option<String>,
    token_start: u64,
    started: bool,
}

impl<'a> JsonCursor<'a> {
    pub fn new<R: Read + 'a>(input: R) -> Self {
        Self {
            buffer: StreamBuffer::new(Box::new(input)),
            frames: Vec::new(),
            pending: Pending::None,
            pending_name: None,
            current: None,
            current_name: None,
            token_start: 0,
            started: false,
        }
    }

    /// The most recently produced event.
    #[inline]
    pub fn current(&self) -> Option<&Event> {
        self.current.as_ref()
    }

    /// Name of the property whose value the cursor is positioned at, if
    /// the current value is an object property.
    #[inline]
    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    /// Absolute byte offset of the first byte of the current token.
    #[inline]
    pub fn token_start(&self) -> u64 {
        self.token_start
    }

    /// Absolute byte offset of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> u64 {
        self.buffer.position()
    }

    /// Advance to the next structural token.
    ///
    /// Returns `None` once the single top-level value has been fully
    /// consumed, or when the input is empty.
    pub fn next_event(&mut self) -> ImportResult<Option<Event>> {
        self.flush_pending()?;
        self.skip_ws()?;
        let Some(top) = self.frames.last().copied() else {
            if self.started || self.buffer.peek()?.is_none() {
                return Ok(None);
            }
            self.started = true;
            let ev = self.parse_value_start()?;
            return Ok(Some(ev));
        };
        let ev = match top {
            Frame::Object(ObjState::Empty) => self.object_key_or_end(false)?,
            Frame::Object(ObjState::AfterValue) => self.object_key_or_end(true)?,
            Frame::Object(ObjState::ExpectValue) => {
                self.set_top(Frame::Object(ObjState::AfterValue));
                self.current_name = self.pending_name.take();
                self.parse_value_start()?
            }
            Frame::Array(ArrState::Empty) => self.array_value_or_end(false)?,
            Frame::Array(ArrState::AfterValue) => self.array_value_or_end(true)?,
        };
        Ok(Some(ev))
    }

    /// Skip the current value in full, without materializing anything.
    ///
    /// For container starts this scans raw bytes to the matching close
    /// token; for scalars it discards the pending payload. Any other
    /// position is a no-op.
    pub fn skip_value(&mut self) -> ImportResult<()> {
        match self.current {
            Some(Event::ObjectStart | Event::ArrayStart) => {
                self.raw_skip_container(&mut None)?;
                self.complete_container();
                Ok(())
            }
            Some(Event::String | Event::Number | Event::Bool(_) | Event::Null) => {
                self.flush_pending()
            }
            _ => Ok(()),
        }
    }

    /// Capture the raw bytes of the current value, consuming it.
    pub fn capture_value(&mut self) -> ImportResult<Vec<u8>> {
        let ev = self
            .current
            .clone()
            .ok_or_else(|| ImportError::structural("no current value to capture", self.token_start))?;
        match ev {
            Event::String => {
                if !matches!(self.pending, Pending::Str) {
                    return Err(ImportError::structural(
                        "string value already consumed",
                        self.token_start,
                    ));
                }
                self.pending = Pending::None;
                let mut out = vec![b'"'];
                let mut sink = Some(&mut out);
                self.finish_string_raw(&mut sink)?;
                Ok(out)
            }
            Event::Number => {
                if !matches!(self.pending, Pending::Num) {
                    return Err(ImportError::structural(
                        "number value already consumed",
                        self.token_start,
                    ));
                }
                self.pending = Pending::None;
                let mut out = Vec::new();
                while let Some(b) = self.buffer.peek()? {
                    if !is_number_byte(b) {
                        break;
                    }
                    out.push(b);
                    self.buffer.advance(1);
                }
                Ok(out)
            }
            Event::Bool(_) | Event::Null => {
                match std::mem::replace(&mut self.pending, Pending::None) {
                    Pending::Lit(lit) => Ok(lit.to_vec()),
                    _ => Err(ImportError::structural(
                        "literal value already consumed",
                        self.token_start,
                    )),
                }
            }
            Event::ObjectStart => {
                let mut out = vec![b'{'];
                let mut sink = Some(&mut out);
                self.raw_skip_container(&mut sink)?;
                self.complete_container();
                Ok(out)
            }
            Event::ArrayStart => {
                let mut out = vec![b'['];
                let mut sink = Some(&mut out);
                self.raw_skip_container(&mut sink)?;
                self.complete_container();
                Ok(out)
            }
            _ => Err(ImportError::structural(
                "expected a value start",
                self.token_start,
            )),
        }
    }

    /// Deserialize the current value into `T`, consuming it.
    pub fn read_value<T: DeserializeOwned>(&mut self) -> ImportResult<T> {
        let start = self.token_start;
        let raw = self.capture_value()?;
        serde_json::from_slice(&raw).map_err(|e| ImportError::mapping(e, start))
    }

    /// Record the byte span of the current object or array value, skipping
    /// its contents without parsing them.
    pub fn capture_region(&mut self) -> ImportResult<Region> {
        match self.current {
            Some(Event::ObjectStart | Event::ArrayStart) => {
                let start = self.token_start;
                self.raw_skip_container(&mut None)?;
                self.complete_container();
                Ok(Region::new(start, self.buffer.position()))
            }
            _ => Err(ImportError::structural(
                "expected object or array start",
                self.token_start,
            )),
        }
    }

    /// Count the entries of the current array, skipping each entry.
    pub fn count_array_entries(&mut self) -> ImportResult<u64> {
        if !matches!(self.current, Some(Event::ArrayStart)) {
            return Err(ImportError::structural(
                "expected array start",
                self.token_start,
            ));
        }
        let mut count = 0u64;
        loop {
            match self.next_event()? {
                Some(Event::ArrayEnd) => return Ok(count),
                Some(ev) if ev.is_value_start() => {
                    count += 1;
                    self.skip_value()?;
                }
                Some(_) => {
                    return Err(ImportError::structural(
                        "unexpected token in array",
                        self.token_start,
                    ))
                }
                None => return Err(ImportError::unexpected_end(self.position())),
            }
        }
    }

    fn object_key_or_end(&mut self, need_comma: bool) -> ImportResult<Event> {
        let pos = self.buffer.position();
        let b = self
            .buffer
            .peek()?
            .ok_or_else(|| ImportError::unexpected_end(pos))?;
        if b == b'}' {
            self.buffer.advance(1);
            self.frames.pop();
            self.current_name = None;
            self.current = Some(Event::ObjectEnd);
            return Ok(Event::ObjectEnd);
        }
        if need_comma {
            if b != b',' {
                return Err(ImportError::structural("expected ',' or '}'", pos));
            }
            self.buffer.advance(1);
            self.skip_ws()?;
        }
        let pos = self.buffer.position();
        match self.buffer.peek()? {
            Some(b'"') => {}
            Some(b) => return Err(ImportError::unexpected_byte(b, pos)),
            None => return Err(ImportError::unexpected_end(pos)),
        }
        self.token_start = pos;
        self.buffer.advance(1);
        let name = self.read_string()?;
        self.skip_ws()?;
        let pos = self.buffer.position();
        match self.buffer.peek()? {
            Some(b':') => self.buffer.advance(1),
            Some(b) => return Err(ImportError::unexpected_byte(b, pos)),
            None => return Err(ImportError::unexpected_end(pos)),
        }
        self.set_top(Frame::Object(ObjState::ExpectValue));
        self.pending_name = Some(name.clone());
        self.current_name = Some(name.clone());
        let ev = Event::Key(name);
        self.current = Some(ev.clone());
        Ok(ev)
    }

    fn array_value_or_end(&mut self, need_comma: bool) -> ImportResult<Event> {
        let pos = self.buffer.position();
        let b = self
            .buffer
            .peek()?
            .ok_or_else(|| ImportError::unexpected_end(pos))?;
        if b == b']' {
            self.buffer.advance(1);
            self.frames.pop();
            self.current_name = None;
            self.current = Some(Event::ArrayEnd);
            return Ok(Event::ArrayEnd);
        }
        if need_comma {
            if b != b',' {
                return Err(ImportError::structural("expected ',' or ']'", pos));
            }
            self.buffer.advance(1);
            self.skip_ws()?;
        }
        self.set_top(Frame::Array(ArrState::AfterValue));
        self.current_name = None;
        self.parse_value_start()
    }

    fn parse_value_start(&mut self) -> ImportResult<Event> {
        let pos = self.buffer.position();
        let b = self
            .buffer
            .peek()?
            .ok_or_else(|| ImportError::unexpected_end(pos))?;
        self.token_start = pos;
        let ev = match b {
            b'{' => {
                self.buffer.advance(1);
                self.frames.push(Frame::Object(ObjState::Empty));
                Event::ObjectStart
            }
            b'[' => {
                self.buffer.advance(1);
                self.frames.push(Frame::Array(ArrState::Empty));
                Event::ArrayStart
            }
            b'"' => {
                self.buffer.advance(1);
                self.pending = Pending::Str;
                Event::String
            }
            b'-' | b'0'..=b'9' => {
                self.pending = Pending::Num;
                Event::Number
            }
            b't' => {
                self.expect_literal(b"true")?;
                Event::Bool(true)
            }
            b'f' => {
                self.expect_literal(b"false")?;
                Event::Bool(false)
            }
            b'n' => {
                self.expect_literal(b"null")?;
                Event::Null
            }
            _ => return Err(ImportError::unexpected_byte(b, pos)),
        };
        self.current = Some(ev.clone());
        Ok(ev)
    }

    fn expect_literal(&mut self, lit: &'static [u8]) -> ImportResult<()> {
        let pos = self.buffer.position();
        if self.buffer.ensure(lit.len())? < lit.len() {
            return Err(ImportError::unexpected_end(pos));
        }
        if &self.buffer.window()[..lit.len()] != lit {
            return Err(ImportError::structural("invalid literal", pos));
        }
        self.buffer.advance(lit.len());
        self.pending = Pending::Lit(lit);
        Ok(())
    }

    fn flush_pending(&mut self) -> ImportResult<()> {
        match std::mem::replace(&mut self.pending, Pending::None) {
            Pending::None | Pending::Lit(_) => Ok(()),
            Pending::Str => self.finish_string_raw(&mut None),
            Pending::Num => {
                while let Some(b) = self.buffer.peek()? {
                    if !is_number_byte(b) {
                        break;
                    }
                    self.buffer.advance(1);
                }
                Ok(())
            }
        }
    }

    fn skip_ws(&mut self) -> ImportResult<()> {
        while let Some(b) = self.buffer.peek()? {
            match b {
                b' ' | b'\t' | b'\n' | b'\r' => self.buffer.advance(1),
                _ => break,
            }
        }
        Ok(())
    }

    fn set_top(&mut self, frame: Frame) {
        if let Some(top) = self.frames.last_mut() {
            *top = frame;
        }
    }

    fn complete_container(&mut self) {
        match self.frames.pop() {
            Some(Frame::Object(_)) => self.current = Some(Event::ObjectEnd),
            Some(Frame::Array(_)) => self.current = Some(Event::ArrayEnd),
            None => {}
        }
    }

    /// Consume raw bytes up to and including the close token matching an
    /// already-consumed open token, copying into `out` when present.
    fn raw_skip_container(&mut self, out: &mut Option<&mut Vec<u8>>) -> ImportResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            if self.buffer.ensure(1)? == 0 {
                return Err(ImportError::unexpected_end(self.buffer.position()));
            }
            let window = self.buffer.window();
            let mut consumed = 0usize;
            let mut entered_string = false;
            let mut done = false;
            for (i, &b) in window.iter().enumerate() {
                match b {
                    b'"' => {
                        consumed = i + 1;
                        entered_string = true;
                        break;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            consumed = i + 1;
                            done = true;
                            break;
                        }
                    }
                    _ => {}
                }
            }
            if !entered_string && !done {
                consumed = window.len();
            }
            push_bytes(out, &self.buffer.window()[..consumed]);
            self.buffer.advance(consumed);
            if entered_string {
                self.finish_string_raw(out)?;
            }
        }
        Ok(())
    }

    /// Consume raw bytes of a string body (opening quote already consumed)
    /// up to and including the closing quote, copying into `out` when
    /// present. Escape-aware; uses `memchr` to jump over plain content.
    fn finish_string_raw(&mut self, out: &mut Option<&mut Vec<u8>>) -> ImportResult<()> {
        loop {
            if self.buffer.ensure(1)? == 0 {
                return Err(ImportError::unexpected_end(self.buffer.position()));
            }
            let window = self.buffer.window();
            match memchr::memchr2(b'"', b'\\', window) {
                None => {
                    let n = window.len();
                    push_bytes(out, &self.buffer.window()[..n]);
                    self.buffer.advance(n);
                }
                Some(i) if window[i] == b'"' => {
                    push_bytes(out, &self.buffer.window()[..=i]);
                    self.buffer.advance(i + 1);
                    return Ok(());
                }
                Some(i) => {
                    // Backslash: consume the escape introducer and the
                    // escaped byte together so a split window cannot
                    // misread the closing quote.
                    let need = i + 2;
                    if self.buffer.ensure(need)? < need {
                        return Err(ImportError::unexpected_end(self.buffer.position()));
                    }
                    push_bytes(out, &self.buffer.window()[..need]);
                    self.buffer.advance(need);
                }
            }
        }
    }

    /// Read and decode a string whose opening quote is already consumed.
    fn read_string(&mut self) -> ImportResult<String> {
        let start = self.buffer.position();
        let mut raw = Vec::new();
        let mut sink = Some(&mut raw);
        self.finish_string_raw(&mut sink)?;
        raw.pop(); // closing quote
        decode_json_string(&raw, start)
    }
}

impl std::fmt::Debug for JsonCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonCursor")
            .field("current", &self.current)
            .field("token_start", &self.token_start)
            .field("depth", &self.frames.len())
            .finish()
    }
}

#[inline]
fn is_number_byte(b: u8) -> bool {
    matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
}

#[inline]
fn push_bytes(out: &mut Option<&mut Vec<u8>>, bytes: &[u8]) {
    if let Some(out) = out.as_mut() {
        out.extend_from_slice(bytes);
    }
}

/// Decode the body of a JSON string (no surrounding quotes).
fn decode_json_string(raw: &[u8], offset: u64) -> ImportResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0usize;
    while i < raw.len() {
        match memchr::memchr(b'\\', &raw[i..]) {
            None => {
                out.push_str(utf8_chunk(&raw[i..], offset)?);
                break;
            }
            Some(j) => {
                out.push_str(utf8_chunk(&raw[i..i + j], offset)?);
                i += j + 1;
                let esc = raw
                    .get(i)
                    .copied()
                    .ok_or_else(|| ImportError::structural("truncated escape sequence", offset))?;
                i += 1;
                match esc {
                    b'"' => out.push('"'),
                    b'\\' => out.push('\\'),
                    b'/' => out.push('/'),
                    b'b' => out.push('\u{0008}'),
                    b'f' => out.push('\u{000C}'),
                    b'n' => out.push('\n'),
                    b'r' => out.push('\r'),
                    b't' => out.push('\t'),
                    b'u' => {
                        let code = parse_hex4(raw, i, offset)?;
                        i += 4;
                        if (0xD800..=0xDBFF).contains(&code) {
                            // High surrogate: a \uXXXX low surrogate must follow.
                            if raw.get(i) == Some(&b'\\') && raw.get(i + 1) == Some(&b'u') {
                                let low = parse_hex4(raw, i + 2, offset)?;
                                if (0xDC00..=0xDFFF).contains(&low) {
                                    i += 6;
                                    let c = 0x10000
                                        + ((u32::from(code) - 0xD800) << 10)
                                        + (u32::from(low) - 0xDC00);
                                    out.push(
                                        char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER),
                                    );
                                    continue;
                                }
                            }
                            out.push(char::REPLACEMENT_CHARACTER);
                        } else {
                            out.push(
                                char::from_u32(u32::from(code))
                                    .unwrap_or(char::REPLACEMENT_CHARACTER),
                            );
                        }
                    }
                    _ => {
                        return Err(ImportError::structural(
                            format!("invalid escape '\\{}'", esc.escape_ascii()),
                            offset,
                        ))
                    }
                }
            }
        }
    }
    Ok(out)
}

fn utf8_chunk(bytes: &[u8], offset: u64) -> ImportResult<&str> {
    std::str::from_utf8(bytes)
        .map_err(|_| ImportError::structural("invalid UTF-8 sequence in string", offset))
}

fn parse_hex4(raw: &[u8], at: usize, offset: u64) -> ImportResult<u16> {
    let digits = raw
        .get(at..at + 4)
        .ok_or_else(|| ImportError::structural("truncated unicode escape", offset))?;
    let text = std::str::from_utf8(digits)
        .map_err(|_| ImportError::structural("invalid unicode escape", offset))?;
    u16::from_str_radix(text, 16)
        .map_err(|_| ImportError::structural("invalid unicode escape", offset))
}
