use anyhow::{Context, bail};
use log::info;

use f1vis_rs::model::PartManifest;
use f1vis_rs::settings::Settings;
use f1vis_rs::{Command, Viewer};

// Scripted clicks (seconds): explode, reverse mid-flight, explode again
const TOGGLE_TIMES: [f32; 3] = [0.5, 0.65, 1.2];

struct Args {
    manifest_path: Option<String>,
    frames: u32,
    dt: f32,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        manifest_path: None,
        frames: 120,
        dt: 1.0 / 60.0,
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--frames" => {
                let value = it.next().context("--frames needs a value")?;
                args.frames = value.parse().with_context(|| format!("bad frame count `{value}`"))?;
            }
            "--dt" => {
                let value = it.next().context("--dt needs a value")?;
                args.dt = value.parse().with_context(|| format!("bad time step `{value}`"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown flag `{flag}`"),
            path => args.manifest_path = Some(path.to_string()),
        }
    }

    Ok(args)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let settings = Settings::load();

    let manifest = match &args.manifest_path {
        Some(path) => PartManifest::load(path).with_context(|| format!("failed to load manifest '{path}'"))?,
        None => PartManifest::builtin().context("built-in manifest is broken")?,
    };
    let registry = manifest.into_registry().context("invalid part manifest")?;
    let reference_part = registry.parts()[0].id.clone();

    let mut viewer = Viewer::new(&settings, registry).context("failed to build viewer")?;

    let mut clock = 0.0_f32;
    let mut pending = TOGGLE_TIMES.iter().peekable();
    for frame_idx in 0..args.frames {
        while pending.next_if(|t| clock >= **t).is_some() {
            viewer.apply(Command::ToggleExplode);
            info!(
                "t={clock:.3}s toggle -> button reads {} (progress of {reference_part}: {:.3})",
                viewer.button_label(),
                viewer.animator().progress(&reference_part)?
            );
        }

        let out = viewer.frame(args.dt);
        if frame_idx % 30 == 0 {
            info!(
                "frame {frame_idx}: exploded={} settled={} grid={:.3} eye=({:.2}, {:.2}, {:.2})",
                out.exploded,
                out.settled,
                out.grid_offset,
                out.camera_eye.x,
                out.camera_eye.y,
                out.camera_eye.z
            );
        }
        clock += args.dt;
    }

    println!("{}", serde_json::to_string_pretty(&viewer.snapshot())?);
    Ok(())
}
