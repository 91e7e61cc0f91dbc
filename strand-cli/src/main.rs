mod raster;
mod scenario;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use glam::Affine2;
use strand_core::export::{FrameRecord, MeshExport};
use strand_core::{profile, Facing, Rig, RigProfile, SimulationContext, VERSION};

use scenario::{Event, Scenario};

#[derive(Parser, Debug)]
#[command(name = "strand", version = VERSION, about = "Hair and tail secondary-motion tools")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load, validate and print a rig profile
    Inspect { path: String },
    /// Run the built-in scenario and dump every frame's meshes as JSON
    Simulate {
        path: String,
        #[arg(long, default_value_t = 360)]
        frames: u32,
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        #[arg(long, default_value = "frames.json")]
        out: String,
    },
    /// Rasterize one frame of the built-in scenario to PNG
    Render {
        path: String,
        #[arg(long, default_value_t = 60)]
        frame: u32,
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        #[arg(long, default_value_t = 512)]
        width: u32,
        #[arg(long, default_value_t = 512)]
        height: u32,
        /// Pixels per world unit
        #[arg(long, default_value_t = 160.0)]
        zoom: f32,
        #[arg(long, default_value = "frame.png")]
        out: String,
    },
}

/// Drive `rig` through the scenario, handing each finished frame to `visit`.
fn run<F>(rig: &mut Rig, dt: f32, frames: u32, mut visit: F)
where
    F: FnMut(u32, &SimulationContext, &Rig, &Scenario),
{
    let mut scenario = Scenario::new(dt);
    let mut ctx = SimulationContext { dt, ..Default::default() };
    for frame in 0..frames {
        let step = scenario.step();
        for event in &step.events {
            log::info!("frame {}: {:?}", frame, event);
            match *event {
                Event::Refill => rig.trigger_refill_effect(),
                Event::Warp(p) => rig.warp(p),
            }
        }
        rig.set_transform(step.transform);
        rig.advance(&ctx, &step.host, &step.anchors);
        visit(frame, &ctx, &*rig, &scenario);
        ctx = ctx.next();
    }
}

fn load_rig(path: &str) -> Result<(RigProfile, Rig)> {
    let profile = profile::load_from_path(path)?;
    let rig = Rig::from_profile(&profile, Affine2::IDENTITY, Facing::Right)
        .with_context(|| format!("building rig '{}'", profile.id))?;
    Ok((profile, rig))
}

fn check_dt(dt: f32) -> Result<()> {
    if !(dt.is_finite() && dt > 0.0) {
        bail!("--dt must be a positive number of seconds, got {}", dt);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Inspect { path } => {
            let p = profile::load_from_path(&path)?;
            println!("Loaded profile: {}", p.id);
            match &p.hair {
                Some(h) => {
                    println!("  hair: {} nodes, spacing {:.3}, follow {:.1}", h.chain.segment_count, h.chain.node_distance, h.chain.follow_rate);
                    println!("    radius {:.3} x{:.2} (min {:.3}), outline {:.3} {}", h.ribbon.base_radius, h.ribbon.radius_decay, h.ribbon.min_radius, h.outline.margin, h.outline.color.to_hex());
                    println!("    gravity {:.1}, drag {:.1}, dead gravity {:.1}", h.motion.gravity, h.motion.drag, h.motion.dead.gravity);
                    println!("    colors: normal {} used {} dash {} dead {}", h.palette.normal.to_hex(), h.palette.used.to_hex(), h.palette.dash.to_hex(), h.palette.dead.to_hex());
                }
                None => println!("  hair: none"),
            }
            match &p.tail {
                Some(t) => {
                    println!("  tail: {} nodes, spacing {:.3}, follow {:.1}", t.chain.segment_count, t.chain.node_distance, t.chain.follow_rate);
                    println!("    radius {:.3} x{:.2}, darken {} ({:.2}), fallback {}", t.ribbon.base_radius, t.ribbon.radius_decay, t.darken.enabled, t.darken.multiplier, t.fallback_color.to_hex());
                }
                None => println!("  tail: none"),
            }
        }
        Command::Simulate { path, frames, dt, out } => {
            check_dt(dt)?;
            let (profile, mut rig) = load_rig(&path)?;
            let mut export = MeshExport::new(profile.id.clone(), dt);
            run(&mut rig, dt, frames, |frame, ctx, rig, _| export.push(FrameRecord::capture(frame, ctx, rig)));
            export.write_json(&out)?;
            println!("Wrote {} frames to {}", frames, out);
        }
        Command::Render { path, frame, dt, width, height, zoom, out } => {
            check_dt(dt)?;
            let (_, mut rig) = load_rig(&path)?;
            let mut img = raster::blank(width, height);
            run(&mut rig, dt, frame + 1, |f, _, rig, scenario| {
                if f != frame {
                    return;
                }
                let view = raster::View { center: scenario.position(), pixels_per_unit: zoom, width, height };
                if let Some(t) = rig.tail() {
                    raster::draw_mesh(&mut img, &view, t.mesh(), t.body().transform());
                }
                if let Some(h) = rig.hair() {
                    raster::draw_mesh(&mut img, &view, h.mesh(), h.body().transform());
                }
            });
            img.save(&out).with_context(|| format!("writing {}", out))?;
            println!("Wrote {}x{} frame {} to {}", width, height, frame, out);
        }
    }
    Ok(())
}
