//! Prometheus text exposition rendering.
//!
//! One block per family: `# HELP` / `# TYPE` preamble, then one line per
//! series. Histograms emit cumulative `_bucket` lines, an implicit `+Inf`
//! bucket equal to the total count, then `_sum` and `_count`. Rendering
//! reads state and never mutates it; no timestamps are emitted.

use std::fmt::Write;

use crate::histogram::HistogramSnapshot;
use crate::label::{LabelKey, LabelSchema};
use crate::registry::{Family, VectorHandle};

/// Content type for the scrape response body.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value per the exposition format.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text (backslash and newline only).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Format `{name="value",...}` for a series, empty string when unlabeled.
fn label_block(schema: &LabelSchema, key: &LabelKey) -> String {
    if schema.is_empty() {
        return String::new();
    }
    let inner = schema
        .names()
        .iter()
        .zip(key.iter())
        .map(|(n, v)| format!("{n}=\"{}\"", escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{inner}}}")
}

fn write_preamble(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {name} {}", escape_help(help));
    let _ = writeln!(out, "# TYPE {name} {kind}");
}

fn write_scalars(out: &mut String, name: &str, schema: &LabelSchema, series: &[(LabelKey, f64)]) {
    for (key, value) in series {
        let _ = writeln!(out, "{name}{} {value}", label_block(schema, key));
    }
}

fn write_histogram(
    out: &mut String,
    name: &str,
    schema: &LabelSchema,
    bounds: &[f64],
    series: &[(LabelKey, HistogramSnapshot)],
) {
    for (key, snap) in series {
        // `le` joins the series labels inside one brace block.
        let prefix = if schema.is_empty() {
            String::new()
        } else {
            let block = label_block(schema, key);
            // Strip the closing brace so `le` can be appended.
            format!("{},", &block[1..block.len() - 1])
        };
        for (bound, count) in bounds.iter().zip(snap.buckets.iter()) {
            let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{bound}\"}} {count}");
        }
        let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {}", snap.count);
        let block = label_block(schema, key);
        let _ = writeln!(out, "{name}_sum{block} {}", snap.sum);
        let _ = writeln!(out, "{name}_count{block} {}", snap.count);
    }
}

/// Write one family's block.
pub(crate) fn write_family(out: &mut String, family: &Family) {
    match &family.vec {
        VectorHandle::Counter(vec) => {
            write_preamble(out, &family.name, &family.help, "counter");
            write_scalars(out, &family.name, vec.schema(), &vec.series());
        }
        VectorHandle::Gauge(vec) => {
            write_preamble(out, &family.name, &family.help, "gauge");
            write_scalars(out, &family.name, vec.schema(), &vec.series());
        }
        VectorHandle::Histogram(vec) => {
            write_preamble(out, &family.name, &family.help, "histogram");
            write_histogram(out, &family.name, vec.schema(), vec.bounds(), &vec.series());
        }
    }
}
