//! Build script for netlcd-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml and compiles it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use netlcd_core::{ConfigError, DisplayConfig};
use serde::Deserialize;

/// Layout of display.toml
#[derive(Deserialize)]
struct DisplayFile {
    display: DisplayConfig,
}

fn main() {
    setup_linker();
    let config = validate_config();
    generate_config(&config);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate display.toml at compile time
fn validate_config() -> DisplayConfig {
    // Re-run if display.toml changes
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: display.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a display.toml configuration file.        ║\n\
            ║  Please create one in the netlcd-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read display.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let file: DisplayFile = match toml::from_str(&config_content) {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid display.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = file.display.validate() {
        let reason = match e {
            ConfigError::ZeroDimension => "cols and rows must be at least 1",
            ConfigError::TooLarge => "cols * rows must not exceed 80 cells",
            ConfigError::ZeroRefresh => "refresh_interval_ms must be at least 1",
        };
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid [display] section in display.toml                ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            reason
        );
    }

    println!("cargo:warning=display.toml validated successfully");
    file.display
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the validated configuration as a Rust constant
fn generate_config(config: &DisplayConfig) {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("display_config.rs")).unwrap();

    writeln!(
        f,
        "pub const DISPLAY_CONFIG: DisplayConfig = DisplayConfig {{\n    \
             cols: {},\n    \
             rows: {},\n    \
             refresh_interval_ms: {},\n    \
             initial_screen: ScreenKind::{:?},\n\
         }};",
        config.cols, config.rows, config.refresh_interval_ms, config.initial_screen
    )
    .unwrap();
}
