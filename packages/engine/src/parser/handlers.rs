//! Handler registration sugar
//!
//! Convenience registrars wrapping the raw cursor handler: typed value
//! mapping, per-entry array iteration, property-name capture and region
//! capture. Each is a thin closure over [`JsonCursor`] primitives.

use serde::de::DeserializeOwned;

use super::StreamingParser;
use crate::error::{ImportError, ImportResult};
use crate::stream::{Event, JsonCursor, Region};

impl<'h, C> StreamingParser<'h, C> {
    /// Deserialize the value at `path` into `T` and hand it to `f`.
    #[must_use]
    pub fn value_handler<T, F>(self, path: &str, f: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&mut C, T) -> ImportResult<()> + 'h,
    {
        self.handler(path, move |_, ctx, cursor| {
            let value = cursor.read_value::<T>()?;
            f(ctx, value)
        })
    }

    /// Like [`value_handler`](Self::value_handler), additionally passing
    /// the property name the value was found under. Intended for wildcard
    /// registrations over object properties collected into a map.
    #[must_use]
    pub fn named_value_handler<T, F>(self, path: &str, f: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&mut C, &str, T) -> ImportResult<()> + 'h,
    {
        self.handler(path, move |_, ctx, cursor| {
            let name = cursor.current_name().unwrap_or_default().to_string();
            let value = cursor.read_value::<T>()?;
            f(ctx, &name, value)
        })
    }

    /// Capture the byte [`Region`] of the value at `path` without parsing
    /// its contents, and hand it to `f`.
    #[must_use]
    pub fn region_handler<F>(self, path: &str, f: F) -> Self
    where
        F: Fn(&mut C, Region) -> ImportResult<()> + 'h,
    {
        self.handler(path, move |_, ctx, cursor| {
            let region = cursor.capture_region()?;
            f(ctx, region)
        })
    }

    /// Iterate the array at `path`, invoking `f` once per entry with the
    /// cursor positioned at the entry's value start. `f` must consume the
    /// entry.
    #[must_use]
    pub fn each_entry_handler<F>(self, path: &str, f: F) -> Self
    where
        F: Fn(&Self, &mut C, &mut JsonCursor<'_>) -> ImportResult<()> + 'h,
    {
        self.handler(path, move |parser, ctx, cursor| {
            if !matches!(cursor.current(), Some(Event::ArrayStart)) {
                return Err(ImportError::structural(
                    "expected array start",
                    cursor.token_start(),
                ));
            }
            loop {
                match cursor.next_event()? {
                    Some(Event::ArrayEnd) => return Ok(()),
                    Some(ev) if ev.is_value_start() => f(parser, ctx, cursor)?,
                    Some(_) => {
                        return Err(ImportError::structural(
                            "unexpected token in array",
                            cursor.token_start(),
                        ))
                    }
                    None => return Err(ImportError::unexpected_end(cursor.position())),
                }
            }
        })
    }

    /// Iterate the array at `path`, deserializing each entry into `T`.
    #[must_use]
    pub fn entry_value_handler<T, F>(self, path: &str, f: F) -> Self
    where
        T: DeserializeOwned,
        F: Fn(&mut C, T) -> ImportResult<()> + 'h,
    {
        self.each_entry_handler(path, move |_, ctx, cursor| {
            let value = cursor.read_value::<T>()?;
            f(ctx, value)
        })
    }
}
