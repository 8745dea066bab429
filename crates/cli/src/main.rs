use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use shapecut::cut::{cut_shapes, CutCfg};
use shapecut::geom2::rand::{level_shape, tutorial_shapes, ReplayToken};
use shapecut::modes::{GameSession, ModeContext, ModeId, ModeRegistry};
use shapecut::{Arena, Point, Segment, ShapeIds};
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{EventDoc, StateDoc};
use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "shapecut-cli")]
#[command(about = "Cut polygon sets, generate level shapes and replay scripted games")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Apply one straight cut to a JSON shape set
    Cut {
        #[arg(long)]
        input: PathBuf,
        /// Cut start as `X,Y`
        #[arg(long, value_parser = io::parse_point, allow_hyphen_values = true)]
        from: Point,
        /// Cut end as `X,Y`
        #[arg(long, value_parser = io::parse_point, allow_hyphen_values = true)]
        to: Point,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the starting shape of a level (or the tutorial board)
    Generate {
        #[arg(long, default_value_t = 1)]
        level: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Level index within the seed's stream
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        #[arg(long)]
        tutorial: bool,
        #[arg(long)]
        out: PathBuf,
    },
    /// Run a game session against a cut script
    Play {
        #[arg(long, default_value = "cut")]
        mode: ModeId,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        script: PathBuf,
        #[arg(long, default_value_t = 800.0)]
        width: f64,
        #[arg(long, default_value_t = 600.0)]
        height: f64,
        /// Game time to let pass after the last cut
        #[arg(long, default_value_t = 0)]
        finish_ms: u64,
        /// Write the result here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print version, code revision and available modes as JSON
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Cut {
            input,
            from,
            to,
            out,
        } => cut(&input, Segment::new(from, to), &out),
        Action::Generate {
            level,
            seed,
            index,
            width,
            height,
            tutorial,
            out,
        } => generate(
            Arena::new(width, height),
            level,
            ReplayToken::new(seed, index),
            tutorial,
            &out,
        ),
        Action::Play {
            mode,
            seed,
            script,
            width,
            height,
            finish_ms,
            out,
        } => {
            let ctx = ModeContext {
                arena: Arena::new(width, height),
                seed,
                cut: CutCfg::default(),
            };
            let doc = play(mode, ctx, &script, Duration::from_millis(finish_ms))?;
            match out {
                Some(out) => {
                    io::write_json(&out, &doc)?;
                    write_sidecar(
                        &out,
                        Payload::new(
                            "play",
                            json!({"mode": mode.as_str(), "script": script.to_string_lossy(), "finish_ms": finish_ms}),
                        )
                        .with_seed(seed),
                    )?;
                }
                None => println!("{}", serde_json::to_string_pretty(&doc)?),
            }
            Ok(())
        }
        Action::Report => report(),
    }
}

fn cut(input: &Path, segment: Segment, out: &Path) -> Result<()> {
    let mut ids = ShapeIds::new();
    let shapes = io::read_shapes(input, &mut ids)?;
    let outcome = cut_shapes(&shapes, segment, CutCfg::default(), &mut ids);
    tracing::info!(
        input = %input.display(),
        shapes_in = shapes.len(),
        shapes_out = outcome.shapes.len(),
        split = outcome.split_count,
        "cut"
    );
    io::write_json(out, &io::shape_docs(&outcome.shapes))?;
    write_sidecar(
        out,
        Payload::new(
            "cut",
            json!({
                "input": input.to_string_lossy(),
                "from": [segment.start.x, segment.start.y],
                "to": [segment.end.x, segment.end.y],
                "split_count": outcome.split_count
            }),
        ),
    )?;
    Ok(())
}

fn generate(arena: Arena, level: u32, tok: ReplayToken, tutorial: bool, out: &Path) -> Result<()> {
    let mut ids = ShapeIds::new();
    let shapes = if tutorial {
        tutorial_shapes(arena, &mut ids)
    } else {
        vec![level_shape(arena, level, tok, &mut ids)]
    };
    tracing::info!(level, seed = tok.seed, index = tok.index, tutorial, shapes = shapes.len(), "generate");
    io::write_json(out, &io::shape_docs(&shapes))?;
    write_sidecar(
        out,
        Payload::new(
            "generate",
            json!({
                "level": level,
                "index": tok.index,
                "tutorial": tutorial,
                "arena": [arena.width, arena.height]
            }),
        )
        .with_seed(tok.seed),
    )?;
    Ok(())
}

fn play(mode: ModeId, ctx: ModeContext, script: &Path, finish: Duration) -> Result<serde_json::Value> {
    let steps = io::read_script(script)?;
    let mut session = GameSession::new(ModeRegistry::with_defaults(), ctx);
    let mut events = session
        .start(mode)
        .with_context(|| format!("starting mode {mode}"))?;
    for step in &steps {
        let wait = step.wait();
        if !wait.is_zero() {
            events.extend(session.tick(wait));
        }
        events.extend(session.cut(step.segment()));
    }
    if !finish.is_zero() {
        events.extend(session.tick(finish));
    }
    let state = session
        .state()
        .context("session has no active mode")?;
    tracing::info!(
        mode = %mode,
        steps = steps.len(),
        level = state.level,
        score = state.score,
        "play"
    );
    Ok(json!({
        "mode": mode.as_str(),
        "seed": ctx.seed,
        "state": StateDoc::new(&state, session.time_left()),
        "events": events.iter().map(EventDoc::from).collect::<Vec<_>>(),
        "shapes": io::shape_docs(session.shapes()),
    }))
}

fn report() -> Result<()> {
    let obj = json!({
        "name": "shapecut",
        "version": shapecut::VERSION,
        "code_rev": provenance::current_git_rev(),
        "modes": ModeRegistry::with_defaults().ids().map(|id| id.as_str()).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;
    use tempfile::tempdir;

    const SQUARE: &str = r#"[{"id": 4, "points": [[0,0],[100,0],[100,100],[0,100]]}]"#;

    #[test]
    fn cut_writes_pieces_and_sidecar() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("square.json");
        fs::write(&input, SQUARE).unwrap();
        let out = dir.path().join("out/pieces.json");
        cut(&input, Segment::from_coords(50.0, -10.0, 50.0, 110.0), &out).unwrap();

        let pieces: Vec<io::ShapeDoc> = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(pieces.len(), 2);
        // fresh ids continue after the adopted one
        assert_eq!(pieces[0].id, Some(5));
        assert_eq!(pieces[1].id, Some(6));
        let prov: Value =
            serde_json::from_slice(&fs::read(dir.path().join("out/pieces.provenance.json")).unwrap()).unwrap();
        assert_eq!(prov["command"], "cut");
        assert_eq!(prov["params"]["split_count"], 1);
    }

    #[test]
    fn cut_rejects_malformed_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"[{"points": [[0,0],[1,1]]}]"#).unwrap();
        let out = dir.path().join("pieces.json");
        let err = cut(&input, Segment::from_coords(0.0, 0.0, 1.0, 1.0), &out).unwrap_err();
        assert!(format!("{err:#}").contains("need at least 3"));
        assert!(!out.exists());
    }

    #[test]
    fn generate_is_reproducible() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        let tok = ReplayToken::new(9, 2);
        generate(Arena::default(), 3, tok, false, &a).unwrap();
        generate(Arena::default(), 3, tok, false, &b).unwrap();
        assert_eq!(fs::read(&a).unwrap(), fs::read(&b).unwrap());

        let t = dir.path().join("tutorial.json");
        generate(Arena::default(), 1, tok, true, &t).unwrap();
        let shapes: Vec<io::ShapeDoc> = serde_json::from_slice(&fs::read(&t).unwrap()).unwrap();
        assert_eq!(shapes.len(), 3);
        assert!(dir.path().join("tutorial.provenance.json").exists());
    }

    #[test]
    fn play_reports_state_and_events() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("script.json");
        // both cuts pass far from the arena: nothing is split
        fs::write(
            &script,
            r#"[{"from":[-50,-50],"to":[-10,-40]},{"from":[900,0],"to":[950,10],"wait_ms":2000}]"#,
        )
        .unwrap();
        let doc = play(ModeId::CutHard, ModeContext::default(), &script, Duration::from_secs(400)).unwrap();
        assert_eq!(doc["mode"], "cut-hard");
        assert_eq!(doc["state"]["level"], 2);
        assert_eq!(doc["state"]["cuts_made"], 0);
        assert_eq!(doc["state"]["target_pieces"], 6);
        assert_eq!(doc["state"]["time_left_ms"], 0);
        let kinds: Vec<&str> = doc["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["level_started", "game_finished"]);
        assert_eq!(doc["shapes"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn play_fails_on_missing_script() {
        let dir = tempdir().unwrap();
        let err = play(
            ModeId::Cut,
            ModeContext::default(),
            &dir.path().join("missing.json"),
            Duration::ZERO,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
