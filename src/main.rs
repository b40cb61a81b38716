use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fb_compositor::cli::Cli;
use fb_compositor::render_loop;
use fb_compositor::scenes::CubeScene;
use fb_compositor::signal::install_stop_handler;
use fb_compositor::DeviceSession;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let device = cli.device();

    let mut session = match cli.emulate {
        Some(mode) => DeviceSession::open_emulated(&device, mode),
        None => DeviceSession::open(&device),
    }
    .with_context(|| format!("failed to set up framebuffer {}", device.display()))?;

    if cli.print_geometry {
        println!("{}", serde_json::to_string_pretty(session.geometry())?);
        return Ok(());
    }

    let stop = install_stop_handler().context("failed to install signal handlers")?;
    let mut scene = CubeScene::new();

    let presented = render_loop::run(&mut session, &mut scene, &cli.loop_options(), stop)
        .with_context(|| format!("rendering to {} failed", session.path().display()))?;

    session.close();
    info!("done after {} frames", presented);
    Ok(())
}
