//! Renders a small capture job with the software preview host.
//!
//! Writes a demo `positions.txt` into `target/gridcam_demo/` (unless one is
//! already there) and captures it, producing
//! `target/gridcam_demo/photos/demo/*.png`.

use gridcam::*;

fn main() -> Result<()> {
    let script_dir = std::path::Path::new("target").join("gridcam_demo");
    std::fs::create_dir_all(&script_dir)?;

    let positions = script_dir.join("positions.txt");
    if !positions.exists() {
        std::fs::write(&positions, "demo\n# center, an edge and a corner\n5,5\n5,0\n0,0\n")?;
    }

    let options = CaptureOptions::load_or_default(&script_dir)?;
    let mut host = PreviewHost::from_options(&options);

    let summary = run(&script_dir, &mut host)?;
    println!(
        "Rendered {} images into {}",
        summary.renders,
        summary.output_dir.display()
    );

    stop();
    Ok(())
}
