// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON-lines exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes one JSON object per event, each on its own line.

use std::io::{self, Write};

use serde_json::{Value, json};

use lamina_core::trace::{SuppressionDirection, TraceOrigin};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as JSON lines.
///
/// Every object carries an `"event"` field (`"walk"`, `"suppression"`, or
/// `"hierarchy"`) followed by that event's fields.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    for recorded in decode(bytes) {
        let value = match recorded {
            RecordedEvent::Walk(e) => json!({
                "event": "walk",
                "origin": origin_value(e.origin),
                "include_origin": e.include_origin,
                "short_circuited": e.short_circuited,
                "visited": e.stats.visited,
                "surfaces": e.stats.surfaces,
                "bridged": e.stats.bridged,
                "fallbacks": e.stats.fallbacks,
            }),
            RecordedEvent::Suppression(e) => json!({
                "event": "suppression",
                "node": e.node_index,
                "direction": match e.direction {
                    SuppressionDirection::Disable => "disable",
                    SuppressionDirection::Enable => "enable",
                },
                "touched": e.touched,
            }),
            RecordedEvent::Hierarchy(e) => json!({
                "event": "hierarchy",
                "appeared": e.appeared,
                "disappeared": e.disappeared,
                "suppressed": e.suppressed,
            }),
        };
        serde_json::to_writer(&mut *writer, &value)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

fn origin_value(origin: TraceOrigin) -> Value {
    match origin {
        TraceOrigin::Node(i) => json!({ "node": i }),
        TraceOrigin::Surface(i) => json!({ "surface": i }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use lamina_core::kind::NodeKind;
    use lamina_core::scene::{Scene, WalkOrigin};
    use lamina_core::trace::{TraceSink, Tracer};

    #[test]
    fn export_writes_one_object_per_line() {
        let mut scene = Scene::new();
        let root = scene.nodes_mut().create_node(NodeKind::NODE);
        let child = scene.nodes_mut().create_node(NodeKind::NODE);
        scene.nodes_mut().add_child(root, child);
        scene.nodes_mut().set_presented(root, true);

        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            let _ = scene.walk_traced(WalkOrigin::Node(root), true, &mut tracer, |_| {
                core::ops::ControlFlow::<()>::Continue(())
            });
            let _ = scene.adjust_notifications_traced(
                child,
                SuppressionDirection::Disable,
                &mut tracer,
            );
            let _ = scene.nodes_mut().drain_hierarchy_changes_traced(&mut tracer);
        }

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["event"], "walk");
        assert_eq!(parsed[0]["origin"]["node"], root.index());
        assert_eq!(parsed[0]["visited"], 2);
        assert_eq!(parsed[0]["fallbacks"], 2);

        assert_eq!(parsed[1]["event"], "suppression");
        assert_eq!(parsed[1]["direction"], "disable");
        assert_eq!(parsed[1]["touched"], 1);

        assert_eq!(parsed[2]["event"], "hierarchy");
        assert_eq!(parsed[2]["appeared"], 1);
        assert_eq!(parsed[2]["suppressed"], 1);
    }

    #[test]
    fn export_surface_origin() {
        let mut rec = RecorderSink::new();
        rec.on_walk(&lamina_core::trace::WalkEvent {
            origin: TraceOrigin::Surface(4),
            include_origin: false,
            stats: lamina_core::scene::WalkStats::default(),
            short_circuited: false,
        });
        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let value: Value = serde_json::from_slice(out.trim_ascii_end()).unwrap();
        assert_eq!(value["origin"]["surface"], 4);
        assert_eq!(value["include_origin"], false);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        assert!(out.is_empty());
    }
}
