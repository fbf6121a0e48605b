use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Forward variables from .env, if present, to option_env!
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Real environment variables win over .env
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using defaults (BACKEND_URL=http://localhost:8000). Copy .env.example to .env to configure.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in ["BACKEND_URL", "ENVIRONMENT", "ENABLE_LOGGING", "CACHE_TTL_DAYS", "REPORT_LIST_LIMIT"] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
