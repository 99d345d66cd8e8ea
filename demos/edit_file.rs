//! Example: Edit a single WAV file
//!
//! Usage:
//!   cargo run --example edit_file -- [options] <input.wav> [output.wav]
//!
//! Operations run in the order given, then gain, fades and the trim range are
//! applied on save. Without an output path the result goes to `<stem>_edited.wav`.

use pcm_editor::io::{edited_file_name, is_wav_path};
use pcm_editor::waveform::{min_max_envelope, peak_envelope};
use pcm_editor::{read_wav_file, write_wav_file, EditSession, EditorConfig, Operation};
use std::env;
use std::fs;
use std::path::PathBuf;

fn usage() -> String {
    let ops: Vec<&str> = Operation::ALL.iter().map(|op| op.name()).collect();
    format!(
        "Usage: edit_file [options] <input.wav> [output.wav]\n\
         \n\
         --op NAME        One-shot operation, repeatable ({})\n\
         --volume V       Linear gain (default: 1.0)\n\
         --fade-in S      Fade-in seconds\n\
         --fade-out S     Fade-out seconds\n\
         --start S        Selection start seconds\n\
         --end S          Selection end seconds\n\
         --config FILE    Editor configuration (JSON)\n\
         --overwrite      Write back to the input path (WAV only)\n",
        ops.join(", ")
    )
}

fn take_value(args: &mut Vec<String>, flag: &str) -> Result<String, Box<dyn std::error::Error>> {
    if args.is_empty() {
        return Err(format!("{} requires a value", flag).into());
    }
    Ok(args.remove(0))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut ops: Vec<Operation> = Vec::new();
    let mut volume: Option<f32> = None;
    let mut fade_in: Option<f32> = None;
    let mut fade_out: Option<f32> = None;
    let mut start: Option<f32> = None;
    let mut end: Option<f32> = None;
    let mut config = EditorConfig::default();
    let mut overwrite = false;
    let mut paths: Vec<String> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--op" => ops.push(take_value(&mut args, "--op")?.parse()?),
            "--volume" => volume = Some(take_value(&mut args, "--volume")?.parse()?),
            "--fade-in" => fade_in = Some(take_value(&mut args, "--fade-in")?.parse()?),
            "--fade-out" => fade_out = Some(take_value(&mut args, "--fade-out")?.parse()?),
            "--start" => start = Some(take_value(&mut args, "--start")?.parse()?),
            "--end" => end = Some(take_value(&mut args, "--end")?.parse()?),
            "--config" => {
                let text = fs::read_to_string(take_value(&mut args, "--config")?)?;
                config = EditorConfig::from_json(&text)?;
            }
            "--overwrite" => overwrite = true,
            "--help" | "-h" => {
                eprintln!("{}", usage());
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    let Some(input) = paths.first().map(PathBuf::from) else {
        eprintln!("ERROR: Provide an input WAV file. Use --help for usage.");
        std::process::exit(2);
    };

    let output = if overwrite {
        if !is_wav_path(&input) {
            return Err("Only WAV files can be overwritten; pass an output path instead".into());
        }
        input.clone()
    } else {
        paths
            .get(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| edited_file_name(&input))
    };

    let clip = read_wav_file(&input)?;
    println!(
        "Loaded {}: {} ch @ {} Hz, {:.3}s",
        input.display(),
        clip.channel_count(),
        clip.sample_rate(),
        clip.duration_seconds()
    );

    let mut session = EditSession::new(clip, config);
    for op in &ops {
        session.apply(*op)?;
        println!("  {} -> {:.3}s", op, session.working().duration_seconds());
    }

    let mut params = *session.pending();
    if let Some(v) = volume {
        params.volume = v;
    }
    if let Some(v) = fade_in {
        params.fade_in_seconds = v;
    }
    if let Some(v) = fade_out {
        params.fade_out_seconds = v;
    }
    if let Some(v) = start {
        params.marker_start = v;
    }
    if let Some(v) = end {
        params.marker_end = v;
    }
    session.set_pending(params)?;

    if !session.has_user_changes() {
        println!("No changes requested, nothing written.");
        return Ok(());
    }

    let rendered = session.render_for_save()?;
    let written = write_wav_file(&output, &rendered)?;

    let peaks = peak_envelope(rendered.samples(), 60);
    let bars: String = peaks
        .iter()
        .map(|&p| match (p * 8.0) as usize {
            0 => ' ',
            1 => '.',
            2..=3 => ':',
            4..=5 => '|',
            _ => '#',
        })
        .collect();
    println!("  [{}]", bars);

    // Signed lanes: positive excursions above the axis, negative below
    let lanes = min_max_envelope(rendered.samples(), 60);
    let shade = |v: f32| match (v.abs() * 4.0) as usize {
        0 => ' ',
        1 => '.',
        2 => ':',
        _ => '|',
    };
    let upper: String = lanes.iter().map(|&(_, mx)| shade(mx.max(0.0))).collect();
    let lower: String = lanes.iter().map(|&(mn, _)| shade(mn.min(0.0))).collect();
    println!("  +[{}]", upper);
    println!("  -[{}]", lower);
    println!("Wrote {} ({} bytes)", output.display(), written);

    Ok(())
}
