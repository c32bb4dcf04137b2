//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands. Each
//! command builds a `Report` holding both renderings; `execute` picks one.

use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tagpath_core::{
    EdgeSelector, EdgeSequenceExpander, Evaluation, Evaluator, PathEvaluator, PathFilterError,
    SequenceOptions, TagMatcher, TagSequenceEvaluator, TraversalBounds, TraversalPath,
    TraversalQuery, Vertex, VertexId,
};

// =============================================================================
// REPORT
// =============================================================================

/// Command output in machine and human form.
#[derive(Debug, Clone)]
pub struct Report {
    pub json: serde_json::Value,
    pub lines: Vec<String>,
}

impl Report {
    /// Print the JSON or the text rendering.
    pub fn print(&self, json_mode: bool) {
        if json_mode {
            println!(
                "{}",
                serde_json::to_string_pretty(&self.json).unwrap_or_default()
            );
            return;
        }
        for line in &self.lines {
            println!("{}", line);
        }
    }
}

/// A vertex seen at a given depth, for probing a tag filter.
struct ProbePath {
    depth: usize,
    vertex: Vertex,
}

impl TraversalPath for ProbePath {
    fn length(&self) -> usize {
        self.depth
    }

    fn end_vertex(&self) -> &Vertex {
        &self.vertex
    }
}

fn show(matcher: &TagMatcher) -> String {
    if matcher.is_empty() {
        "-".to_string()
    } else {
        matcher.to_string()
    }
}

fn render_steps(selector: &EdgeSelector) -> Vec<String> {
    selector.steps().iter().map(ToString::to_string).collect()
}

// =============================================================================
// TAGS COMMAND
// =============================================================================

/// Compile a tag filter and optionally evaluate a probe vertex.
pub fn cmd_tags(
    filter: &str,
    probe_tags: Option<&[String]>,
    depth: usize,
    min_level: usize,
    filter_start: bool,
    offset_sequence: bool,
) -> Report {
    let options = SequenceOptions {
        filter_start_vertex: filter_start,
        begin_sequence_at_start: !offset_sequence,
        min_level,
    };
    let evaluator = TagSequenceEvaluator::parse(Some(filter), options);

    let mut lines = vec![
        format!("Tag filter: {}", filter),
        format!(
            "Positions:  {}{}",
            evaluator.len(),
            if offset_sequence { " (offset)" } else { "" }
        ),
        format!("End vertices only: {}", evaluator.is_end_vertices_only()),
    ];
    let mut groups = Vec::new();
    for (position, group) in evaluator.groups().enumerate() {
        lines.push(format!(
            "  [{}] whitelist={} blacklist={} end={} terminators={}",
            position,
            show(group.whitelist()),
            show(group.blacklist()),
            show(group.end_vertices()),
            show(group.terminators())
        ));
        groups.push(json!({
            "position": position,
            "whitelist": group.whitelist().to_string(),
            "blacklist": group.blacklist().to_string(),
            "endVertices": group.end_vertices().to_string(),
            "terminators": group.terminators().to_string(),
        }));
    }

    let decision: Option<Evaluation> = probe_tags.map(|tags| {
        let probe = ProbePath {
            depth,
            vertex: Vertex::new(VertexId(0), tags.iter().map(|t| t.trim().to_string())),
        };
        evaluator.evaluate(&probe)
    });
    if let Some(evaluation) = decision {
        lines.push(String::new());
        lines.push(format!(
            "Decision at depth {}: include={} continue={}",
            depth,
            evaluation.includes(),
            evaluation.continues()
        ));
    }

    Report {
        json: json!({
            "filter": filter,
            "offset": offset_sequence,
            "endVerticesOnly": evaluator.is_end_vertices_only(),
            "groups": groups,
            "depth": depth,
            "decision": decision,
        }),
        lines,
    }
}

// =============================================================================
// EDGES COMMAND
// =============================================================================

/// Parse an edge filter and list its positions.
pub fn cmd_edges(filter: &str, offset_sequence: bool) -> Report {
    let expander = EdgeSequenceExpander::parse(Some(filter), !offset_sequence);
    let initial = expander.initial_steps().map(render_steps);
    let positions: Vec<Vec<String>> = expander.positions().map(render_steps).collect();

    let mut lines = vec![format!("Edge filter: {}", filter)];
    if let Some(steps) = &initial {
        lines.push(format!("  initial: {}", steps.join(" | ")));
    }
    for (position, steps) in positions.iter().enumerate() {
        lines.push(format!("  [{}] {}", position, steps.join(" | ")));
    }
    if positions.is_empty() {
        lines.push("  (no repeating positions)".to_string());
    }

    Report {
        json: json!({
            "filter": filter,
            "initialSteps": initial,
            "positions": positions,
        }),
        lines,
    }
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Summary of a compiled request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub file: String,
    pub evaluator: &'static str,
    pub members: Vec<&'static str>,
    pub tag_positions: usize,
    pub edge_positions: usize,
    pub initial_step: bool,
    pub bounds: TraversalBounds,
}

/// Load, validate and compile a request file.
pub fn cmd_check(file: &Path, subgraph: bool) -> Result<Report, PathFilterError> {
    tracing::info!("Checking {:?}", file);

    let mut query = TraversalQuery::load(file)?;
    if subgraph {
        query = query.for_subgraph()?;
    }
    let compiled = query.compile()?;

    let evaluator = compiled.evaluator();
    let members: Vec<&'static str> = match evaluator {
        Evaluator::All(members) => members.iter().map(Evaluator::kind).collect(),
        other => vec![other.kind()],
    };
    let tag_positions = evaluator
        .tag_sequence()
        .map_or(0, TagSequenceEvaluator::len);

    let summary = CheckSummary {
        file: file.display().to_string(),
        evaluator: evaluator.kind(),
        members,
        tag_positions,
        edge_positions: compiled.expander().len(),
        initial_step: compiled.expander().initial_steps().is_some(),
        bounds: compiled.bounds(),
    };

    let bounds = summary.bounds;
    let lines = vec![
        format!("Request:   {}", summary.file),
        format!("Evaluator: {} [{}]", summary.evaluator, summary.members.join(", ")),
        format!("Tag positions:  {}", summary.tag_positions),
        format!(
            "Edge positions: {}{}",
            summary.edge_positions,
            if summary.initial_step { " + initial step" } else { "" }
        ),
        format!(
            "Levels:    {}..{}",
            bounds.min_level,
            bounds
                .max_level
                .map_or_else(|| "unbounded".to_string(), |m| m.to_string())
        ),
        format!("Uniqueness: {:?}", bounds.uniqueness),
        format!("Order:     {}", if bounds.bfs { "breadth-first" } else { "depth-first" }),
    ];

    Ok(Report {
        json: json!(summary),
        lines,
    })
}
