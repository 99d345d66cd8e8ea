//! Example: Run the same edit chain over many WAV files in parallel
//!
//! Usage:
//!   cargo run --release --example batch_process -- [--jobs N] [--json] [--op NAME]... <file1> <file2> ...
//!
//! Each file is edited on its own worker; the edits themselves are single-threaded.
//! Results are written next to the inputs as `<stem>_edited.wav`.

use pcm_editor::io::edited_file_name;
use pcm_editor::{apply_operation, read_wav_file, write_wav_file, EditorConfig, Operation};
use rayon::prelude::*;
use std::env;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

struct ItemOut {
    path: String,
    output: Option<String>,
    seconds_in: f32,
    seconds_out: f32,
    error: Option<String>,
}

fn process(path: &str, ops: &[Operation], config: &EditorConfig) -> Result<ItemOut, pcm_editor::EditError> {
    let clip = read_wav_file(path)?;
    let seconds_in = clip.duration_seconds();

    let mut edited = clip;
    for op in ops {
        edited = apply_operation(&edited, *op, config)?;
    }

    let output = edited_file_name(path);
    write_wav_file(&output, &edited)?;

    Ok(ItemOut {
        path: path.to_string(),
        output: Some(output.display().to_string()),
        seconds_in,
        seconds_out: edited.duration_seconds(),
        error: None,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut ops: Vec<Operation> = Vec::new();
    let mut paths: Vec<String> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args.first().ok_or("--jobs requires a value")?.parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--op" => {
                let op = args.first().ok_or("--op requires a value")?.parse::<Operation>()?;
                args.remove(0);
                ops.push(op);
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: batch_process [--jobs N] [--json] [--op NAME]... <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n\
                     --op NAME  Operation to apply, repeatable\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one WAV file path. Use --help for usage.");
        std::process::exit(2);
    }

    if ops.is_empty() {
        ops = vec![
            Operation::TrimLeadingSilence,
            Operation::TrimTrailingSilence,
            Operation::Normalize,
        ];
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = EditorConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                process(path, &ops, &config).unwrap_or_else(|e| ItemOut {
                    path: path.clone(),
                    output: None,
                    seconds_in: 0.0,
                    seconds_out: 0.0,
                    error: Some(e.to_string()),
                })
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            let value = match &o.error {
                None => serde_json::json!({
                    "file": o.path,
                    "output": o.output,
                    "seconds_in": o.seconds_in,
                    "seconds_out": o.seconds_out,
                }),
                Some(e) => serde_json::json!({ "file": o.path, "error": e }),
            };
            println!("{}", value);
        } else if let Some(e) = &o.error {
            println!("[{}/{}] {}: ERROR {}", idx + 1, outs.len(), o.path, e);
        } else {
            println!(
                "[{}/{}] {}: {:.3}s -> {:.3}s",
                idx + 1,
                outs.len(),
                o.path,
                o.seconds_in,
                o.seconds_out
            );
        }
    }

    let failed = outs.iter().filter(|o| o.error.is_some()).count();
    eprintln!(
        "Done: {} ok, {} failed in {:.2}s",
        outs.len() - failed,
        failed,
        t0.elapsed().as_secs_f32()
    );

    Ok(())
}
