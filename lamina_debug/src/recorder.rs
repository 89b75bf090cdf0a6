// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as tagged fixed-size little-endian records. [`decode`] reads
//! them back as an iterator of [`RecordedEvent`]. Decoding stops at the first
//! unknown tag or truncated record.

use lamina_core::scene::WalkStats;
use lamina_core::trace::{
    HierarchyEvent, SuppressionDirection, SuppressionEvent, TraceOrigin, TraceSink, WalkEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_WALK: u8 = 1;
const TAG_SUPPRESSION: u8 = 2;
const TAG_HIERARCHY: u8 = 3;

const ORIGIN_NODE: u8 = 0;
const ORIGIN_SURFACE: u8 = 1;

const FLAG_INCLUDE_ORIGIN: u8 = 1 << 0;
const FLAG_SHORT_CIRCUITED: u8 = 1 << 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_origin(&mut self, origin: TraceOrigin) {
        let (kind, idx) = match origin {
            TraceOrigin::Node(i) => (ORIGIN_NODE, i),
            TraceOrigin::Surface(i) => (ORIGIN_SURFACE, i),
        };
        self.write_u8(kind);
        self.write_u32(idx);
    }
}

impl TraceSink for RecorderSink {
    fn on_walk(&mut self, e: &WalkEvent) {
        self.write_u8(TAG_WALK);
        self.write_origin(e.origin);
        let mut flags = 0;
        if e.include_origin {
            flags |= FLAG_INCLUDE_ORIGIN;
        }
        if e.short_circuited {
            flags |= FLAG_SHORT_CIRCUITED;
        }
        self.write_u8(flags);
        self.write_u32(e.stats.visited);
        self.write_u32(e.stats.surfaces);
        self.write_u32(e.stats.bridged);
        self.write_u32(e.stats.fallbacks);
    }

    fn on_suppression(&mut self, e: &SuppressionEvent) {
        self.write_u8(TAG_SUPPRESSION);
        self.write_u32(e.node_index);
        self.write_u8(match e.direction {
            SuppressionDirection::Disable => 0,
            SuppressionDirection::Enable => 1,
        });
        self.write_u32(e.touched);
    }

    fn on_hierarchy(&mut self, e: &HierarchyEvent) {
        self.write_u8(TAG_HIERARCHY);
        self.write_u32(e.appeared);
        self.write_u32(e.disappeared);
        self.write_u32(e.suppressed);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`WalkEvent`].
    Walk(WalkEvent),
    /// A [`SuppressionEvent`].
    Suppression(SuppressionEvent),
    /// A [`HierarchyEvent`].
    Hierarchy(HierarchyEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_origin(&mut self) -> Option<TraceOrigin> {
        let kind = self.read_u8()?;
        let idx = self.read_u32()?;
        match kind {
            ORIGIN_NODE => Some(TraceOrigin::Node(idx)),
            ORIGIN_SURFACE => Some(TraceOrigin::Surface(idx)),
            _ => None,
        }
    }

    fn decode_walk(&mut self) -> Option<RecordedEvent> {
        let origin = self.read_origin()?;
        let flags = self.read_u8()?;
        Some(RecordedEvent::Walk(WalkEvent {
            origin,
            include_origin: flags & FLAG_INCLUDE_ORIGIN != 0,
            short_circuited: flags & FLAG_SHORT_CIRCUITED != 0,
            stats: WalkStats {
                visited: self.read_u32()?,
                surfaces: self.read_u32()?,
                bridged: self.read_u32()?,
                fallbacks: self.read_u32()?,
            },
        }))
    }

    fn decode_suppression(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Suppression(SuppressionEvent {
            node_index: self.read_u32()?,
            direction: match self.read_u8()? {
                0 => SuppressionDirection::Disable,
                _ => SuppressionDirection::Enable,
            },
            touched: self.read_u32()?,
        }))
    }

    fn decode_hierarchy(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Hierarchy(HierarchyEvent {
            appeared: self.read_u32()?,
            disappeared: self.read_u32()?,
            suppressed: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_WALK => self.decode_walk(),
            TAG_SUPPRESSION => self.decode_suppression(),
            TAG_HIERARCHY => self.decode_hierarchy(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
