/// huffpack – CLI front end for the huffpack codec.
///
/// Works similar to gzip:
///   huffpack file.txt           → compress to file.txt.hpk (removes original)
///   huffpack -d file.txt.hpk    → decompress to file.txt (removes original)
///   huffpack -c file.txt        → compress to stdout
///   huffpack -k file.txt        → keep original after compress
///   cat file | huffpack -c      → compress stdin to stdout
///   cat file | huffpack -dc     → decompress stdin to stdout
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{self, ExitCode};

use huffpack::{compress, decompress};

fn usage() {
    eprintln!("huffpack - Huffman compression tool");
    eprintln!();
    eprintln!("Usage: huffpack [OPTIONS] [FILE]...");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -d, --decompress   Decompress mode");
    eprintln!("  -c, --stdout       Write to stdout (don't remove original)");
    eprintln!("  -k, --keep         Keep original file");
    eprintln!("  -f, --force        Overwrite existing output files");
    eprintln!("  -v, --verbose      Verbose output");
    eprintln!("  -h, --help         Show this help");
    eprintln!();
    eprintln!("If no FILE is given, reads from stdin and writes to stdout.");
    eprintln!("Compressed files use the .hpk extension.");
}

#[derive(Debug)]
struct Opts {
    decompress: bool,
    to_stdout: bool,
    keep: bool,
    force: bool,
    verbose: bool,
    files: Vec<String>,
}

fn parse_args() -> Opts {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut opts = Opts {
        decompress: false,
        to_stdout: false,
        keep: false,
        force: false,
        verbose: false,
        files: Vec::new(),
    };

    for arg in &args {
        match arg.as_str() {
            "-d" | "--decompress" => opts.decompress = true,
            "-c" | "--stdout" | "--to-stdout" => opts.to_stdout = true,
            "-k" | "--keep" => opts.keep = true,
            "-f" | "--force" => opts.force = true,
            "-v" | "--verbose" => opts.verbose = true,
            "-h" | "--help" => {
                usage();
                process::exit(0);
            }
            // Handle combined short flags like -dc, -kv, etc.
            s if s.starts_with('-') && !s.starts_with("--") && s.len() > 2 => {
                for ch in s[1..].chars() {
                    match ch {
                        'd' => opts.decompress = true,
                        'c' => opts.to_stdout = true,
                        'k' => opts.keep = true,
                        'f' => opts.force = true,
                        'v' => opts.verbose = true,
                        _ => {
                            eprintln!("huffpack: unknown flag '-{ch}'");
                            process::exit(1);
                        }
                    }
                }
            }
            s if s.starts_with('-') && s != "-" => {
                eprintln!("huffpack: unknown option '{s}'");
                process::exit(1);
            }
            _ => {
                opts.files.push(arg.clone());
            }
        }
    }

    opts
}

/// Determine the output filename for compression.
fn compress_output_path(input: &str) -> PathBuf {
    PathBuf::from(format!("{input}.hpk"))
}

/// Determine the output filename for decompression.
fn decompress_output_path(input: &str) -> Option<PathBuf> {
    let path = Path::new(input);
    match path.extension().and_then(|e| e.to_str()) {
        Some("hpk") => Some(path.with_extension("")),
        _ => None,
    }
}

fn write_output(opts: &Opts, path: &str, out_path: &Path, data: &[u8]) -> Result<(), String> {
    let out_str = out_path.display().to_string();

    if out_path.exists() && !opts.force {
        return Err(format!("{out_str} already exists; use -f to overwrite"));
    }

    fs::write(out_path, data).map_err(|e| format!("{out_str}: {e}"))?;

    if !opts.keep {
        fs::remove_file(path).map_err(|e| format!("{path}: cannot remove: {e}"))?;
    }

    Ok(())
}

fn process_compress(opts: &Opts, path: &str) -> Result<(), String> {
    let input = fs::read(path).map_err(|e| format!("{path}: {e}"))?;
    let container = compress(&input);

    if opts.verbose {
        let ratio = if input.is_empty() {
            0.0
        } else {
            (container.len() as f64 / input.len() as f64) * 100.0
        };
        eprintln!(
            "{path}: {ratio:.1}% ({} → {} bytes)",
            input.len(),
            container.len()
        );
    }

    if opts.to_stdout {
        io::stdout()
            .write_all(&container)
            .map_err(|e| format!("stdout: {e}"))?;
        return Ok(());
    }

    write_output(opts, path, &compress_output_path(path), &container)
}

fn process_decompress(opts: &Opts, path: &str) -> Result<(), String> {
    let container = fs::read(path).map_err(|e| format!("{path}: {e}"))?;
    let data = decompress(&container).map_err(|e| format!("{path}: {e}"))?;

    if opts.verbose {
        eprintln!("{path}: {} → {} bytes", container.len(), data.len());
    }

    if opts.to_stdout {
        io::stdout()
            .write_all(&data)
            .map_err(|e| format!("stdout: {e}"))?;
        return Ok(());
    }

    let out_path = decompress_output_path(path)
        .ok_or_else(|| format!("{path}: unknown suffix -- ignored"))?;
    write_output(opts, path, &out_path, &data)
}

fn process_stdin_stdout(opts: &Opts) -> Result<(), String> {
    let mut input = Vec::new();
    io::stdin()
        .read_to_end(&mut input)
        .map_err(|e| format!("stdin: {e}"))?;

    let output = if opts.decompress {
        decompress(&input).map_err(|e| format!("stdin: {e}"))?
    } else {
        compress(&input)
    };

    io::stdout()
        .write_all(&output)
        .map_err(|e| format!("stdout: {e}"))?;
    Ok(())
}

fn run() -> Result<(), ()> {
    let opts = parse_args();
    let mut had_error = false;

    if opts.files.is_empty() {
        if let Err(e) = process_stdin_stdout(&opts) {
            eprintln!("huffpack: {e}");
            return Err(());
        }
        return Ok(());
    }

    for path in &opts.files {
        let result = if path == "-" {
            process_stdin_stdout(&opts)
        } else if opts.decompress {
            process_decompress(&opts, path)
        } else {
            process_compress(&opts, path)
        };

        if let Err(e) = result {
            eprintln!("huffpack: {e}");
            had_error = true;
        }
    }

    if had_error {
        Err(())
    } else {
        Ok(())
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}
