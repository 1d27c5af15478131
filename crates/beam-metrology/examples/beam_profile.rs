//! Example: beam profiling from a multi-snap image.
//!
//! Loads a horizontally-merged PNG of N equal-width frames captured at
//! evenly spaced axial positions, splits it into individual snaps, and runs
//! the profiling pipeline over them. The fitted beam descriptor is printed
//! to stdout and written to a JSON file next to the input image.
//!
//! Run from the workspace root:
//!   cargo run -p beam-metrology --example beam_profile -- --help
//!   cargo run -p beam-metrology --example beam_profile -- \
//!       --input data/beam_0.png --n-snaps 6 --z-start 0 --z-step 5 \
//!       --pixel-size 4.8e-3 --wavelength 632.8e-9

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use serde::Serialize;

use beam_metrology::{Image, OpticsConfig, RadiusExtractConfig, extract_beam_u8};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Fit Gaussian beam parameters from a horizontally-merged multi-snap image")]
struct Args {
    /// Path to the merged PNG
    #[arg(long)]
    input: String,

    /// Number of equal-width snaps merged in the image
    #[arg(long, default_value_t = 6)]
    n_snaps: usize,

    /// Axial position of the first snap (arbitrary consistent unit)
    #[arg(long, default_value_t = 0.0)]
    z_start: f64,

    /// Axial spacing between consecutive snaps
    #[arg(long, default_value_t = 1.0)]
    z_step: f64,

    /// Physical size of one camera pixel (same length unit as the axis)
    #[arg(long, default_value_t = 1.0)]
    pixel_size: f64,

    /// Beam wavelength
    #[arg(long, default_value_t = 632.8e-9)]
    wavelength: f64,

    /// Beam amplitude passed through to the descriptor
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,

    /// Refractive index of the propagation medium
    #[arg(long, default_value_t = 1.0)]
    refractive_index: f64,

    /// Intensity half-width of the 1/e² crossing band
    #[arg(long, default_value_t = 1.0)]
    tolerance: f32,

    /// Output JSON path (default: <input stem>_beam.json next to input)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTO ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct BeamDto {
    wavelength: f64,
    amplitude: f64,
    refractive_index: f64,
    waist_location: f64,
    divergence: f64,
    waist_radius: f64,
    rayleigh_range: f64,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Copy one snap (col slice) from the mega-image into a contiguous buffer.
fn extract_snap(
    pixels: &[u8],
    full_width: usize,
    height: usize,
    snap_w: usize,
    snap_idx: usize,
) -> Result<Image<u8>> {
    let mut buf = vec![0u8; snap_w * height];
    let col_offset = snap_idx * snap_w;
    for row in 0..height {
        let src = &pixels[row * full_width + col_offset..row * full_width + col_offset + snap_w];
        buf[row * snap_w..(row + 1) * snap_w].copy_from_slice(src);
    }
    Image::from_vec(snap_w, height, buf).context("building snap Image")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let img_path = &args.input;
    let out_path = args.out.unwrap_or_else(|| {
        let p = std::path::Path::new(img_path);
        let stem = p.file_stem().unwrap_or_default().to_string_lossy();
        let dir = p.parent().unwrap_or(std::path::Path::new("."));
        dir.join(format!("{stem}_beam.json"))
            .to_string_lossy()
            .into_owned()
    });

    // Load as 8-bit grayscale.
    let gray = ImageReader::open(img_path)
        .with_context(|| format!("opening {img_path}"))?
        .decode()
        .with_context(|| format!("decoding {img_path}"))?
        .into_luma8();

    let full_width = gray.width() as usize;
    let height = gray.height() as usize;
    let n_snaps = args.n_snaps;

    anyhow::ensure!(n_snaps > 0, "n_snaps must be > 0");
    anyhow::ensure!(
        full_width % n_snaps == 0,
        "image width {full_width} is not divisible by n_snaps={n_snaps}"
    );
    let snap_w = full_width / n_snaps;

    println!(
        "loaded {img_path}: {full_width}x{height}, splitting into {n_snaps} snaps of {snap_w}x{height}"
    );

    let pixels = gray.as_raw().as_slice();
    let snaps: Vec<Image<u8>> = (0..n_snaps)
        .map(|i| extract_snap(pixels, full_width, height, snap_w, i))
        .collect::<Result<_>>()?;
    let views: Vec<_> = snaps.iter().map(|s| s.as_view()).collect();

    let positions: Vec<f64> = (0..n_snaps)
        .map(|i| args.z_start + args.z_step * i as f64)
        .collect();

    let optics = OpticsConfig {
        amplitude: args.amplitude,
        refractive_index: args.refractive_index,
    };
    let cfg = RadiusExtractConfig {
        tolerance: args.tolerance,
    };

    let beam = extract_beam_u8(
        &positions,
        &views,
        args.wavelength,
        args.pixel_size,
        &optics,
        &cfg,
    )
    .context("profiling beam")?;

    println!(
        "divergence: {:.6e} rad\nwaist location: {:.6e}\nwaist radius: {:.6e}\nrayleigh range: {:.6e}",
        beam.divergence,
        beam.waist_location,
        beam.waist_radius(),
        beam.rayleigh_range()
    );

    let dto = BeamDto {
        wavelength: beam.wavelength,
        amplitude: beam.amplitude,
        refractive_index: beam.refractive_index,
        waist_location: beam.waist_location,
        divergence: beam.divergence,
        waist_radius: beam.waist_radius(),
        rayleigh_range: beam.rayleigh_range(),
    };
    let out_file =
        std::fs::File::create(&out_path).with_context(|| format!("creating {out_path}"))?;
    serde_json::to_writer_pretty(out_file, &dto)
        .with_context(|| format!("writing JSON to {out_path}"))?;

    println!("descriptor written to {out_path}");
    Ok(())
}
