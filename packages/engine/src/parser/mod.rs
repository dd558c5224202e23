//! Path-addressed streaming parser
//!
//! Consumers register `(path, handler)` pairs before parsing starts.
//! Paths are `/`-delimited; a `*` segment matches any object key or array
//! index at that depth. The engine performs exactly one forward pass over
//! the token stream, invoking a handler whenever a value starts at a
//! registered path and skipping everything else in O(size) without
//! touching user code.
//!
//! Registering a leaf path automatically registers pass-through handlers
//! for every proper prefix, so traversal reaches the leaf without the
//! caller subscribing to intermediate containers. An explicit registration
//! always wins over a synthetic pass-through at the same path.

mod handlers;

use std::io::Read;

use hashbrown::HashMap;

use crate::error::{ImportError, ImportResult};
use crate::stream::{Event, JsonCursor, Region, RegionReader};

/// Token kind(s) a traversal expects at the very start of its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartToken {
    Object,
    Array,
    ObjectOrArray,
}

impl StartToken {
    fn matches(self, ev: &Event) -> bool {
        match self {
            StartToken::Object => matches!(ev, Event::ObjectStart),
            StartToken::Array => matches!(ev, Event::ArrayStart),
            StartToken::ObjectOrArray => matches!(ev, Event::ObjectStart | Event::ArrayStart),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            StartToken::Object => "object start",
            StartToken::Array => "array start",
            StartToken::ObjectOrArray => "object or array start",
        }
    }
}

type Handler<'h, C> =
    Box<dyn Fn(&StreamingParser<'h, C>, &mut C, &mut JsonCursor<'_>) -> ImportResult<()> + 'h>;

struct HandlerEntry<'h, C> {
    f: Handler<'h, C>,
    synthetic: bool,
}

/// Streaming parser dispatching sub-trees to handlers by logical path.
///
/// `C` is the caller-supplied traversal context passed mutably to every
/// handler; all handler state lives there, keeping the handler table
/// itself immutable during a pass.
pub struct StreamingParser<'h, C> {
    handlers: HashMap<String, HandlerEntry<'h, C>>,
    expected_start: StartToken,
}

impl<'h, C> StreamingParser<'h, C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            expected_start: StartToken::Object,
        }
    }

    /// Override the token kind expected at the start of the input.
    /// Bounded region replay sets this to [`StartToken::Array`].
    #[must_use]
    pub fn expected_start(mut self, token: StartToken) -> Self {
        self.expected_start = token;
        self
    }

    /// Register a handler for a path. The handler is invoked with the
    /// cursor positioned at the value start and must consume the entire
    /// value, either directly or by delegating to
    /// [`parse_object_properties`](Self::parse_object_properties) /
    /// [`parse_array_entries`](Self::parse_array_entries).
    #[must_use]
    pub fn handler<F>(mut self, path: &str, f: F) -> Self
    where
        F: Fn(&Self, &mut C, &mut JsonCursor<'_>) -> ImportResult<()> + 'h,
    {
        self.handlers.insert(
            path.to_string(),
            HandlerEntry {
                f: Box::new(f),
                synthetic: false,
            },
        );
        self.add_parent_handlers(path);
        self
    }

    /// Synthesize pass-through handlers for every proper prefix of `path`
    /// so traversal descends to it. Existing registrations (explicit or
    /// synthetic) are never overwritten.
    fn add_parent_handlers(&mut self, path: &str) {
        log::debug!("adding parent handlers for {path}");
        let mut current = String::new();
        for segment in path.split('/') {
            current = join_path(&current, segment);
            if !self.handlers.contains_key(&current) {
                log::debug!("adding parent handler for {current}");
                let captured = current.clone();
                self.handlers.insert(
                    current.clone(),
                    HandlerEntry {
                        f: Box::new(move |parser, ctx, cursor| {
                            parser.parse_object_or_array_children(ctx, cursor, &captured)
                        }),
                        synthetic: true,
                    },
                );
            }
        }
    }

    /// Whether the entry registered at `path` is a synthetic pass-through.
    #[must_use]
    pub fn is_synthetic(&self, path: &str) -> bool {
        self.handlers.get(path).is_some_and(|e| e.synthetic)
    }

    /// Parse the full input using the registered handlers.
    pub fn parse<R: Read>(&self, ctx: &mut C, input: R) -> ImportResult<()> {
        self.parse_bounded(ctx, input, None)
    }

    /// Parse the input bounded to a previously captured [`Region`]. The
    /// first token in the bounded view must match the configured start
    /// token; a mismatch is a structural error (a mis-computed region,
    /// not a recoverable condition).
    pub fn parse_bounded<R: Read>(
        &self,
        ctx: &mut C,
        input: R,
        region: Option<Region>,
    ) -> ImportResult<()> {
        let mut cursor = JsonCursor::new(RegionReader::new(input, region));
        let first = cursor.next_event()?;
        match first {
            Some(ev) if self.expected_start.matches(&ev) => {}
            Some(_) => {
                return Err(ImportError::structural(
                    format!("expected {}", self.expected_start.describe()),
                    cursor.token_start(),
                ))
            }
            None => {
                return Err(ImportError::structural(
                    format!("expected {}", self.expected_start.describe()),
                    cursor.position(),
                ))
            }
        }
        match self.handlers.get("/").or_else(|| self.handlers.get("/*")) {
            Some(entry) => {
                log::debug!("handling /");
                (entry.f)(self, ctx, &mut cursor)
            }
            None => cursor.skip_value(),
        }
    }

    /// Parse the properties of the object the cursor is positioned at,
    /// dispatching each value through the handler table.
    pub fn parse_object_properties(
        &self,
        ctx: &mut C,
        cursor: &mut JsonCursor<'_>,
        path: &str,
    ) -> ImportResult<()> {
        loop {
            match cursor.next_event()? {
                Some(Event::ObjectEnd) => return Ok(()),
                Some(Event::Key(name)) => {
                    match cursor.next_event()? {
                        Some(ev) if ev.is_value_start() => {
                            self.dispatch(ctx, cursor, path, &name)?;
                        }
                        _ => {
                            return Err(ImportError::structural(
                                "expected property value",
                                cursor.position(),
                            ))
                        }
                    };
                }
                Some(_) => {
                    return Err(ImportError::structural(
                        "unexpected token in object",
                        cursor.token_start(),
                    ))
                }
                None => return Err(ImportError::unexpected_end(cursor.position())),
            }
        }
    }

    /// Parse the entries of the array the cursor is positioned at. Each
    /// entry's path segment is its decimal index, so `<path>/*` matches
    /// every entry.
    pub fn parse_array_entries(
        &self,
        ctx: &mut C,
        cursor: &mut JsonCursor<'_>,
        path: &str,
    ) -> ImportResult<()> {
        let mut index = 0usize;
        loop {
            match cursor.next_event()? {
                Some(Event::ArrayEnd) => return Ok(()),
                Some(ev) if ev.is_value_start() => {
                    self.dispatch(ctx, cursor, path, &index.to_string())?;
                    index += 1;
                }
                Some(_) => {
                    return Err(ImportError::structural(
                        "unexpected token in array",
                        cursor.token_start(),
                    ))
                }
                None => return Err(ImportError::unexpected_end(cursor.position())),
            }
        }
    }

    /// Descend into the children of the current object or array; scalar
    /// values are left for the cursor to discard.
    pub fn parse_object_or_array_children(
        &self,
        ctx: &mut C,
        cursor: &mut JsonCursor<'_>,
        path: &str,
    ) -> ImportResult<()> {
        match cursor.current() {
            Some(Event::ObjectStart) => self.parse_object_properties(ctx, cursor, path),
            Some(Event::ArrayStart) => self.parse_array_entries(ctx, cursor, path),
            _ => Ok(()),
        }
    }

    /// Look up a handler for the child value at `parent_path/segment`:
    /// exact path first, then the same-depth wildcard. No handler means
    /// the value is skipped wholesale.
    fn dispatch(
        &self,
        ctx: &mut C,
        cursor: &mut JsonCursor<'_>,
        parent_path: &str,
        segment: &str,
    ) -> ImportResult<()> {
        let path = join_path(parent_path, segment);
        log::trace!("processing {path}");
        let entry = self
            .handlers
            .get(&path)
            .or_else(|| self.handlers.get(&join_path(parent_path, "*")));
        match entry {
            Some(entry) => {
                log::debug!("handling {path}");
                (entry.f)(self, ctx, cursor)
            }
            None => cursor.skip_value(),
        }
    }
}

impl<C> Default for StreamingParser<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `segment` to `parent`, normalizing the separator. Empty
/// segments collapse to the parent (the root registers as `/`).
pub(crate) fn join_path(parent: &str, segment: &str) -> String {
    let mut out = String::with_capacity(parent.len() + segment.len() + 1);
    out.push_str(parent);
    if !segment.is_empty() {
        if !out.ends_with('/') {
            out.push('/');
        }
        out.push_str(segment);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
