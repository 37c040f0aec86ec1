use std::fs;
use std::io::{self, Read};
use std::path::Path;

use tracing::debug;
use zego_compiler::SourceMap;

/// Extension of module files picked up from a directory.
pub const MODULE_EXTENSION: &str = "zego";

pub fn load_module_sources(
    module_path: Option<&Path>,
    module_text: Option<&str>,
) -> Result<SourceMap, String> {
    if let Some(text) = module_text {
        return Ok(SourceMap::one_liner(text));
    }

    if let Some(path) = module_path {
        if path.as_os_str() == "-" {
            return load_stdin();
        }
        if path.is_dir() {
            return load_directory(path);
        }
        return load_file(path);
    }

    Err("module is required: use positional argument or -q/--query".to_string())
}

fn load_stdin() -> Result<SourceMap, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    let mut map = SourceMap::new();
    map.add_stdin(&buf);
    Ok(map)
}

fn load_file(path: &Path) -> Result<SourceMap, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    let mut map = SourceMap::new();
    map.add_file(&path.to_string_lossy(), &content);
    Ok(map)
}

fn load_directory(dir: &Path) -> Result<SourceMap, String> {
    let mut map = SourceMap::new();
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(|e| format!("failed to read directory '{}': {}", dir.display(), e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == MODULE_EXTENSION))
        .collect();

    if entries.is_empty() {
        return Err(format!(
            "no .{MODULE_EXTENSION} files found in '{}'",
            dir.display()
        ));
    }

    entries.sort();

    for path in entries {
        let content = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
        map.add_file(&path.to_string_lossy(), &content);
    }

    debug!(dir = %dir.display(), modules = map.len(), "loaded module directory");
    Ok(map)
}
