//! Markdown comment body for a snapshot diff
//!
//! Pure string building; posting the comment to GitHub/GitLab is the
//! caller's concern.

use std::fmt::Write;

use arbor_core::{SignificancePolicy, SnapshotDiff};

/// Render a diff as a markdown report. When the diff is not significant
/// under the given policy, the report is a single "no significant
/// changes" line.
pub fn render_markdown(diff: &SnapshotDiff, policy: &SignificancePolicy) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "## Component changes: `{}` → `{}`", diff.base, diff.head);
    out.push('\n');

    if !diff.is_significant(policy) {
        out.push_str("No significant changes.\n");
        return out;
    }

    if !diff.components.added.is_empty() {
        let _ = writeln!(out, "### Added ({})", diff.components.added.len());
        for component in &diff.components.added {
            let _ = writeln!(out, "- `{}` ({})", component.name, component.file_path);
        }
        out.push('\n');
    }

    if !diff.components.removed.is_empty() {
        let _ = writeln!(out, "### Removed ({})", diff.components.removed.len());
        for component in &diff.components.removed {
            let _ = writeln!(out, "- `{}` ({})", component.name, component.file_path);
        }
        out.push('\n');
    }

    if !diff.components.modified.is_empty() {
        let _ = writeln!(out, "### Modified ({})", diff.components.modified.len());
        for change in &diff.components.modified {
            let _ = writeln!(out, "- `{}`", change.component_id);
            for name in &change.props_added {
                let _ = writeln!(out, "  - prop added: `{name}`");
            }
            for name in &change.props_removed {
                let _ = writeln!(out, "  - prop removed: `{name}`");
            }
            for name in &change.props_modified {
                let _ = writeln!(out, "  - prop changed: `{name}`");
            }
            for note in &change.changes {
                let _ = writeln!(out, "  - {note}");
            }
        }
        out.push('\n');
    }

    let notable_bundles: Vec<_> = diff
        .bundle_diff
        .iter()
        .filter(|b| b.delta.gzip != 0 || b.delta.raw != 0)
        .collect();
    if !notable_bundles.is_empty() {
        out.push_str("### Bundle size\n");
        out.push_str("| Component | Before (gzip) | After (gzip) | Delta |\n");
        out.push_str("|---|---|---|---|\n");
        for delta in notable_bundles {
            let arrow = if delta.delta.gzip > 0 { "▲" } else { "▼" };
            let _ = writeln!(
                out,
                "| `{}` | {} B | {} B | {} {:+} B |",
                delta.component_id, delta.before.gzip, delta.after.gzip, arrow, delta.delta.gzip
            );
        }
        out.push('\n');
    }

    let notable_health: Vec<_> = diff.health_diff.iter().filter(|h| h.delta != 0.0).collect();
    if !notable_health.is_empty() {
        out.push_str("### Health\n");
        for delta in notable_health {
            let _ = writeln!(
                out,
                "- `{}`: {:.1} → {:.1} ({:+.1})",
                delta.component_id, delta.before, delta.after, delta.delta
            );
        }
    }

    out
}
