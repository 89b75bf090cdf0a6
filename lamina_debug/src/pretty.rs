// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use lamina_core::trace::{
    HierarchyEvent, SuppressionDirection, SuppressionEvent, TraceOrigin, TraceSink, WalkEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn origin_label(origin: TraceOrigin) -> String {
    match origin {
        TraceOrigin::Node(i) => format!("node#{i}"),
        TraceOrigin::Surface(i) => format!("surface#{i}"),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_walk(&mut self, e: &WalkEvent) {
        let mode = if e.include_origin { "all" } else { "sub" };
        let end = if e.short_circuited { "stopped" } else { "done" };
        let _ = writeln!(
            self.writer,
            "[walk] from={} mode={mode} visited={} surfaces={} bridged={} fallbacks={} {end}",
            origin_label(e.origin),
            e.stats.visited,
            e.stats.surfaces,
            e.stats.bridged,
            e.stats.fallbacks,
        );
    }

    fn on_suppression(&mut self, e: &SuppressionEvent) {
        let dir = match e.direction {
            SuppressionDirection::Disable => "disable",
            SuppressionDirection::Enable => "enable",
        };
        let _ = writeln!(
            self.writer,
            "[suppress] {dir} node#{} touched={}",
            e.node_index, e.touched,
        );
    }

    fn on_hierarchy(&mut self, e: &HierarchyEvent) {
        let _ = writeln!(
            self.writer,
            "[hierarchy] appeared={} disappeared={} suppressed={}",
            e.appeared, e.disappeared, e.suppressed,
        );
    }
}
