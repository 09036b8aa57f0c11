//! Drives a capture host with synthetic depth frames and prints the export.
//!
//! Run with: `RUST_LOG=debug cargo run --example synthetic_capture [out.json]`

use std::fs::File;
use std::io::BufWriter;

use depthcloud::*;

const WIDTH: usize = 160;
const HEIGHT: usize = 90;

/// A slanted wall with a bump, as seen by the depth sensor.
fn synthetic_depth(frame_index: usize) -> Result<DepthFrame> {
    let mut raw = Vec::with_capacity(WIDTH * HEIGHT);
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let u = x as f32 / WIDTH as f32;
            let v = y as f32 / HEIGHT as f32;
            let bump = ((u * 6.0 + frame_index as f32 * 0.2).sin() * (v * 4.0).cos()) * 0.2;
            let meters = 1.0 + u * 2.5 + bump;
            raw.push((meters * 1000.0) as u16);
        }
    }
    DepthFrame::from_raw_values(WIDTH, HEIGHT, &raw, 0.001)
}

fn main() -> Result<()> {
    init_logging();

    let mut host = CaptureHost::new(Options::default())?;
    host.handle_event(SessionEvent::Started {
        capability: DepthCapability::Supported,
    })?;

    let aspect = WIDTH as f32 / HEIGHT as f32;
    let projection = Mat4::perspective_rh_gl(60f32.to_radians(), aspect, 0.01, 20.0);
    for i in 0..30 {
        // slow pan to the right
        let transform = Mat4::from_rotation_y(-(i as f32) * 0.02);
        let pose = CameraPose::new(projection, transform);
        let frame = XrFrame::with_depth(pose, synthetic_depth(i)?);
        if let Some(report) = host.on_frame(&frame) {
            log::debug!("frame {i}: {report:?}");
        }
    }

    println!("accumulated {} points", host.point_count());

    match std::env::args().nth(1) {
        Some(path) => {
            host.snapshot().write_json(BufWriter::new(File::create(&path)?))?;
            println!("wrote {path}");
        }
        None => println!("{}", host.export_json()?),
    }

    if let Some(stats) = host.handle_event(SessionEvent::Ended)? {
        println!("{stats:?}");
    }
    Ok(())
}
