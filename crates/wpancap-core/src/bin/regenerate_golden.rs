use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use wpancap_core::{ConversionOptions, OutputTarget, convert};

const BYTES_PER_LINE: usize = 16;

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let inputs = case_inputs(&path)?;
        if inputs.is_empty() {
            continue;
        }
        regenerate_one(inputs, &path.join("expected.hex"))?;
    }

    Ok(())
}

fn case_inputs(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|err| format!("failed to read {}: {}", dir.display(), err))?;
    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("failed to read entry: {}", err))?
            .path();
        let is_input = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .is_some_and(|stem| stem.starts_with("input"));
        if is_input {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

fn regenerate_one(inputs: Vec<PathBuf>, output: &Path) -> Result<(), String> {
    let scratch = output.with_extension("pcap");
    let options = ConversionOptions::new(inputs, OutputTarget::File(scratch.clone()));
    convert(&options)
        .map_err(|err| format!("conversion failed for {}: {}", output.display(), err))?;
    let bytes = fs::read(&scratch)
        .map_err(|err| format!("failed to read {}: {}", scratch.display(), err))?;
    fs::remove_file(&scratch)
        .map_err(|err| format!("failed to remove {}: {}", scratch.display(), err))?;

    let mut text = bytes
        .chunks(BYTES_PER_LINE)
        .map(|line| {
            line.iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n");
    text.push('\n');
    fs::write(output, text)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
