//! JSON documents read and written by the CLI, and their mapping to library types.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use shapecut::geom2::{Hsla, Point, Segment, Shape, ShapeId, ShapeIds};
use shapecut::modes::{GameEvent, ModeState, Tone};
use shapecut::Vec2;

/// One polygon as stored on disk. Missing ids are allocated, missing colors
/// come from the palette.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDoc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub points: Vec<[f64; 2]>,
}

impl From<&Shape> for ShapeDoc {
    fn from(s: &Shape) -> Self {
        Self {
            id: Some(s.id.0),
            color: Some(s.color.to_string()),
            points: s.points.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

/// Turn documents into shapes. Given ids are kept and reserved first so
/// allocated ones never collide with them; repeated ids and `u64::MAX` are
/// rejected.
pub fn shapes_from_docs(docs: &[ShapeDoc], ids: &mut ShapeIds) -> Result<Vec<Shape>> {
    let mut seen = BTreeSet::new();
    for (i, d) in docs.iter().enumerate() {
        let Some(id) = d.id else { continue };
        if id == u64::MAX {
            bail!("shape {i}: id {id} is out of range");
        }
        if !seen.insert(id) {
            bail!("shape {i}: duplicate id {id}");
        }
    }
    for &id in &seen {
        ids.reserve(ShapeId(id));
    }
    docs.iter()
        .enumerate()
        .map(|(i, d)| {
            if d.points.len() < 3 {
                bail!("shape {i} has {} points, need at least 3", d.points.len());
            }
            let points: Vec<Point> = d.points.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
            let id = d.id.map(ShapeId).unwrap_or_else(|| ids.fresh());
            let color = match &d.color {
                Some(c) => c
                    .parse::<Hsla>()
                    .with_context(|| format!("shape {i}: bad color"))?,
                None => Hsla::from_id(id),
            };
            Ok(Shape::with_identity(id, color, points))
        })
        .collect()
}

pub fn read_shapes(path: &Path, ids: &mut ShapeIds) -> Result<Vec<Shape>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let docs: Vec<ShapeDoc> =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    shapes_from_docs(&docs, ids).with_context(|| format!("loading shapes from {}", path.display()))
}

pub fn shape_docs(shapes: &[Shape]) -> Vec<ShapeDoc> {
    shapes.iter().map(ShapeDoc::from).collect()
}

/// Write pretty JSON, creating the parent directory.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

/// Parse `X,Y` (used for `--from` / `--to`).
pub fn parse_point(s: &str) -> Result<Point> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("expected `X,Y`, got `{s}`"))?;
    let x: f64 = x.trim().parse().with_context(|| format!("bad x in `{s}`"))?;
    let y: f64 = y.trim().parse().with_context(|| format!("bad y in `{s}`"))?;
    Ok(Vec2::new(x, y))
}

/// One scripted cut; `wait_ms` of game time passes before it is applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub from: [f64; 2],
    pub to: [f64; 2],
    #[serde(default)]
    pub wait_ms: Option<u64>,
}

impl ScriptStep {
    pub fn segment(&self) -> Segment {
        Segment::from_coords(self.from[0], self.from[1], self.to[0], self.to[1])
    }

    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms.unwrap_or(0))
    }
}

pub fn read_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing script {}", path.display()))
}

/// Serializable mirror of `GameEvent`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDoc {
    LevelStarted { level: u32 },
    Cut { pieces: usize, velocity: f64 },
    Message { text: String, tone: &'static str },
    LevelCompleted { level: u32, gained: u32 },
    LevelFailed { reason: String },
    LevelRestored { level: u32 },
    GameFinished { reason: String, score: u32, level: u32, elapsed_ms: u64 },
}

impl From<&GameEvent> for EventDoc {
    fn from(ev: &GameEvent) -> Self {
        match ev {
            GameEvent::LevelStarted { level } => Self::LevelStarted { level: *level },
            GameEvent::Cut { pieces, velocity } => Self::Cut {
                pieces: *pieces,
                velocity: *velocity,
            },
            GameEvent::Message { text, tone } => Self::Message {
                text: text.clone(),
                tone: match tone {
                    Tone::Info => "info",
                    Tone::Success => "success",
                    Tone::Error => "error",
                },
            },
            GameEvent::LevelCompleted { level, gained } => Self::LevelCompleted {
                level: *level,
                gained: *gained,
            },
            GameEvent::LevelFailed { reason } => Self::LevelFailed {
                reason: reason.clone(),
            },
            GameEvent::LevelRestored { level } => Self::LevelRestored { level: *level },
            GameEvent::GameFinished {
                reason,
                score,
                level,
                elapsed,
            } => Self::GameFinished {
                reason: reason.clone(),
                score: *score,
                level: *level,
                elapsed_ms: elapsed.as_millis() as u64,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateDoc {
    pub mode: String,
    pub level: u32,
    pub score: u32,
    pub cuts_made: u32,
    pub max_cuts: u32,
    pub pieces: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_pieces: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<usize>,
    pub time_left_ms: u64,
}

impl StateDoc {
    pub fn new(st: &ModeState, time_left: Duration) -> Self {
        Self {
            mode: st.mode.to_string(),
            level: st.level,
            score: st.score,
            cuts_made: st.cuts_made,
            max_cuts: st.max_cuts,
            pieces: st.pieces,
            target_pieces: st.target_pieces,
            conflicts: st.conflicts,
            teams: st.teams,
            time_left_ms: time_left.as_millis() as u64,
        }
    }
}
